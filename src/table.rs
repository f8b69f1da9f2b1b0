use crate::config::CSV_BUFFER_SIZE;
use crate::error::Result;
use crate::models::{AliasRow, DrugRecord};
use crate::resolver::{self, FindOptions, FindResult};
use rustc_hash::{FxHashMap, FxHashSet};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// One row per (record, alias) pair. Immutable once built; a reload replaces it.
#[derive(Debug, Default)]
pub struct AliasTable {
    rows: Vec<AliasRow>,
    by_alias: FxHashMap<String, Vec<usize>>,
}

impl AliasTable {
    /// Rows follow record order, then each record's aliases in sorted order.
    pub fn from_records(records: Vec<DrugRecord>) -> Self {
        let capacity = records.iter().map(|r| r.aliases.len()).sum();
        let mut rows = Vec::with_capacity(capacity);

        for record in &records {
            for alias in &record.aliases {
                rows.push(AliasRow::new(record, alias));
            }
        }

        let mut by_alias: FxHashMap<String, Vec<usize>> = FxHashMap::default();
        for (index, row) in rows.iter().enumerate() {
            by_alias
                .entry(row.alias_name.clone())
                .or_default()
                .push(index);
        }

        Self { rows, by_alias }
    }

    pub fn rows(&self) -> &[AliasRow] {
        &self.rows
    }

    pub fn get(&self, index: usize) -> Option<&AliasRow> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of distinct drug identifiers across all rows.
    pub fn records(&self) -> usize {
        let ids: FxHashSet<&str> = self.rows.iter().map(|r| r.drugbank_id.as_str()).collect();
        ids.len()
    }

    /// Row indices whose alias equals `alias` byte for byte, ascending.
    pub fn indices_of(&self, alias: &str) -> &[usize] {
        self.by_alias.get(alias).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn find(&self, name: &str, options: &FindOptions) -> FindResult<'_> {
        resolver::find(self, name, options)
    }

    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        self.write_csv_to(BufWriter::with_capacity(CSV_BUFFER_SIZE, file))?;
        info!(rows = self.rows.len(), path = ?path, "Alias table written");
        Ok(())
    }

    pub fn write_csv_to<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(writer);
        for row in &self.rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}
