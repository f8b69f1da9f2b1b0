/// Counters collected while flattening a DrugBank export
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExtractionStats {
    pub records_processed: u64,
    pub brand_aliases: u64,
    pub synonym_aliases: u64,
    pub product_aliases: u64,
    pub missing_primary_id: u64,
    pub missing_inchikey: u64,
    pub rows_built: u64,
}

impl ExtractionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inc_records(&mut self) {
        self.records_processed += 1;
    }

    pub fn add_brand_aliases(&mut self, count: u64) {
        self.brand_aliases += count;
    }

    pub fn add_synonym_aliases(&mut self, count: u64) {
        self.synonym_aliases += count;
    }

    pub fn add_product_aliases(&mut self, count: u64) {
        self.product_aliases += count;
    }

    pub fn inc_missing_primary_id(&mut self) {
        self.missing_primary_id += 1;
    }

    pub fn inc_missing_inchikey(&mut self) {
        self.missing_inchikey += 1;
    }

    pub fn set_rows(&mut self, rows: usize) {
        self.rows_built = rows as u64;
    }

    pub fn records(&self) -> u64 {
        self.records_processed
    }

    /// Alias matches before deduplication, across all three sources
    pub fn aliases(&self) -> u64 {
        self.brand_aliases + self.synonym_aliases + self.product_aliases
    }

    pub fn rows(&self) -> u64 {
        self.rows_built
    }
}
