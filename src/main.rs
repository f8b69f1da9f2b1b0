use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use drugbank::config::DEFAULT_FUZZY_THRESHOLD;
use drugbank::{DrugBankConnector, FindOptions, MatchMode, Selection};
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "drugbank")]
#[command(about = "Flatten DrugBank exports and resolve drug names")]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a drug by name
    Find(FindArgs),
    /// Write the alias table to a CSV file
    Export(ExportArgs),
    /// Print extraction counters for an export
    Stats(StatsArgs),
}

#[derive(Args)]
struct FindArgs {
    /// Path to the DrugBank export (.xml or .zip)
    #[arg(short, long)]
    input: String,

    /// Drug name to look up
    name: String,

    /// Score candidates with token-set similarity instead of exact equality
    #[arg(long)]
    fuzzy: bool,

    /// Minimum fuzzy score (0-100) a candidate needs
    #[arg(long, default_value_t = u32::from(DEFAULT_FUZZY_THRESHOLD))]
    threshold: u32,

    /// Only print the top match
    #[arg(long, conflicts_with = "top")]
    best: bool,

    /// Only print the top N matches
    #[arg(long)]
    top: Option<usize>,

    /// Print JSON lines instead of CSV
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ExportArgs {
    /// Path to the DrugBank export (.xml or .zip)
    #[arg(short, long)]
    input: String,

    /// Destination CSV file
    #[arg(short, long)]
    output: String,
}

#[derive(Args)]
struct StatsArgs {
    /// Path to the DrugBank export (.xml or .zip)
    #[arg(short, long)]
    input: String,
}

impl FindArgs {
    fn options(&self) -> FindOptions {
        let mode = if self.fuzzy {
            MatchMode::Fuzzy {
                threshold: self.threshold,
            }
        } else {
            MatchMode::Exact
        };
        let selection = match (self.best, self.top) {
            (true, _) => Selection::BestMatch,
            (false, Some(n)) => Selection::TopN(n),
            (false, None) => Selection::AllMatches,
        };
        FindOptions { mode, selection }
    }
}

fn run_find(args: FindArgs) -> Result<()> {
    let options = args.options();
    let mut connector = DrugBankConnector::new(&args.input);
    let result = connector
        .find(&args.name, &options)
        .with_context(|| format!("Failed to search DrugBank export: {}", args.input))?;

    if result.is_not_found() {
        eprintln!("Drug {} not found.", args.name);
        return Ok(());
    }
    let matches = result.into_matches();

    info!(matches = matches.len(), "Lookup complete");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        for m in &matches {
            serde_json::to_writer(&mut out, &m.to_record())?;
            writeln!(out)?;
        }
    } else {
        let mut writer = csv::Writer::from_writer(&mut out);
        for m in &matches {
            writer.serialize(m.to_record())?;
        }
        writer.flush()?;
    }

    Ok(())
}

fn run_export(args: ExportArgs) -> Result<()> {
    let start = Instant::now();
    let mut connector = DrugBankConnector::new(&args.input);
    let table = connector
        .load()
        .with_context(|| format!("Failed to load DrugBank export: {}", args.input))?;

    table
        .write_csv(Path::new(&args.output))
        .with_context(|| format!("Failed to write alias table: {}", args.output))?;
    let rows = table.len();

    info!(
        source = ?connector.path(),
        rows,
        duration_secs = start.elapsed().as_secs_f64(),
        "Export complete"
    );
    Ok(())
}

fn run_stats(args: StatsArgs) -> Result<()> {
    let start = Instant::now();
    let mut connector = DrugBankConnector::new(&args.input);
    connector
        .load()
        .with_context(|| format!("Failed to load DrugBank export: {}", args.input))?;
    let stats = connector.stats();

    println!();
    println!("=== Summary ===");
    println!("Load time:          {:.2}s", start.elapsed().as_secs_f64());
    println!();
    println!("Records:            {}", stats.records());
    println!("Alias rows:         {}", stats.rows());
    println!("Brand names:        {}", stats.brand_aliases);
    println!("English synonyms:   {}", stats.synonym_aliases);
    println!("Product names:      {}", stats.product_aliases);
    println!("No primary id:      {}", stats.missing_primary_id);
    println!("No InChIKey:        {}", stats.missing_inchikey);

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    let result = match cli.command {
        Commands::Find(args) => run_find(args),
        Commands::Export(args) => run_export(args),
        Commands::Stats(args) => run_stats(args),
    };

    match result {
        Ok(()) => {
            info!("Completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Error: {:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
