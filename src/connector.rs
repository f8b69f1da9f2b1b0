use crate::error::Result;
use crate::extract::extract_records;
use crate::parser::Element;
use crate::resolver::{FindOptions, FindResult};
use crate::source::load_document;
use crate::stats::ExtractionStats;
use crate::table::AliasTable;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Owns a DrugBank export and the alias table built from it.
///
/// The document tree is parsed on first use and kept for the connector's lifetime.
/// The table is built on the first `load` or `find` and replaced by every later `load`.
/// Loading needs `&mut self`; once loaded, [`AliasTable::find`] can be shared freely.
pub struct DrugBankConnector {
    path: PathBuf,
    root: Option<Element>,
    table: Option<AliasTable>,
    stats: ExtractionStats,
}

impl DrugBankConnector {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            root: None,
            table: None,
            stats: ExtractionStats::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses the source file unless a tree is already cached.
    pub fn initialize(&mut self) -> Result<&Element> {
        let root = match self.root.take() {
            Some(root) => root,
            None => {
                let start = Instant::now();
                let root = load_document(&self.path)?;
                info!(
                    records = root.children.len(),
                    duration_secs = start.elapsed().as_secs_f64(),
                    "Document parsed"
                );
                root
            }
        };
        Ok(&*self.root.insert(root))
    }

    pub fn is_initialized(&self) -> bool {
        self.root.is_some()
    }

    fn build_table(&mut self) -> Result<AliasTable> {
        let mut stats = ExtractionStats::new();
        let records = extract_records(self.initialize()?, &mut stats)?;
        let table = AliasTable::from_records(records);
        stats.set_rows(table.len());

        info!(
            records = stats.records(),
            rows = stats.rows(),
            "Alias table built"
        );

        self.stats = stats;
        Ok(table)
    }

    /// Re-extracts every record and replaces the cached table.
    pub fn load(&mut self) -> Result<&AliasTable> {
        let table = self.build_table()?;
        Ok(&*self.table.insert(table))
    }

    fn loaded_table(&mut self) -> Result<(&AliasTable, bool)> {
        let (table, built) = match self.table.take() {
            Some(table) => (table, false),
            None => {
                info!("First time using connector, loading drugs...");
                (self.build_table()?, true)
            }
        };
        Ok((&*self.table.insert(table), built))
    }

    /// Builds the table if nothing is cached yet. Returns whether it had to.
    pub fn ensure_loaded(&mut self) -> Result<bool> {
        Ok(self.loaded_table()?.1)
    }

    pub fn is_loaded(&self) -> bool {
        self.table.is_some()
    }

    pub fn table(&self) -> Option<&AliasTable> {
        self.table.as_ref()
    }

    /// Counters from the most recent `load`.
    pub fn stats(&self) -> &ExtractionStats {
        &self.stats
    }

    pub fn find(&mut self, name: &str, options: &FindOptions) -> Result<FindResult<'_>> {
        let (table, _) = self.loaded_table()?;
        Ok(table.find(name, options))
    }
}
