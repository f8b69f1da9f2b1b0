use serde::Serialize;
use std::collections::BTreeSet;

/// One `<drug>` entry, flattened. Multi-valued fields are already joined.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrugRecord {
    pub drug_type: Option<String>,
    pub drugbank_id: Option<String>,
    pub primary_name: String,
    pub description: Option<String>,
    pub groups: String,
    pub atc_codes: String,
    pub categories: String,
    pub inchi: Option<String>,
    pub inchikey: Option<String>,
    /// Always contains `primary_name`; iterates in sorted order.
    pub aliases: BTreeSet<String>,
}

/// Column order of the alias table, as written to CSV.
pub const ALIAS_COLUMNS: [&str; 10] = [
    "drugbank_id",
    "primary_name",
    "alias_name",
    "type",
    "groups",
    "atc_codes",
    "categories",
    "inchikey",
    "inchi",
    "description",
];

/// One (record, alias) pair. Field order matches [`ALIAS_COLUMNS`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AliasRow {
    pub drugbank_id: String,
    pub primary_name: String,
    pub alias_name: String,
    #[serde(rename = "type")]
    pub drug_type: Option<String>,
    pub groups: String,
    pub atc_codes: String,
    pub categories: String,
    pub inchikey: Option<String>,
    pub inchi: Option<String>,
    pub description: Option<String>,
}

impl AliasRow {
    pub fn new(record: &DrugRecord, alias_name: &str) -> Self {
        Self {
            drugbank_id: record.drugbank_id.clone().unwrap_or_default(),
            primary_name: record.primary_name.clone(),
            alias_name: alias_name.to_string(),
            drug_type: record.drug_type.clone(),
            groups: record.groups.clone(),
            atc_codes: record.atc_codes.clone(),
            categories: record.categories.clone(),
            inchikey: record.inchikey.clone(),
            inchi: record.inchi.clone(),
            description: record.description.clone(),
        }
    }
}
