/// Namespace every element of a DrugBank export lives in
pub const DRUGBANK_NS: &str = "http://www.drugbank.ca";

/// Local name of the per-record element directly under the root
pub const DRUG_TAG: &str = "drug";

/// Extension of a bare XML export
pub const XML_EXTENSION: &str = "xml";

/// Extension of a zipped export
pub const ZIP_EXTENSION: &str = "zip";

/// Joins multi-valued fields (groups, ATC codes, categories). Never escaped.
pub const FIELD_SEPARATOR: &str = "|";

/// Language attribute value a synonym needs to count as an alias
pub const SYNONYM_LANGUAGE: &str = "English";

/// Minimum token-set score a fuzzy candidate needs by default
pub const DEFAULT_FUZZY_THRESHOLD: u8 = 90;

/// Progress update interval (tick every N records)
pub const PROGRESS_INTERVAL: usize = 1000;

/// Buffer size for CSV export
pub const CSV_BUFFER_SIZE: usize = 128 * 1024;
