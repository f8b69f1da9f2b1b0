//! DrugBank: alias table extraction and drug name resolution
//!
//! This crate turns a DrugBank XML export (bare or zipped) into a flat, one-row-per-alias
//! table and resolves free-text drug names against it:
//!
//! 1. **Load** -- Read the `.xml` file, or the first `.xml` entry of a `.zip` archive, into
//!    a namespace-aware element tree
//! 2. **Extract** -- Flatten each `<drug>` record: primary identifier, name, groups,
//!    ATC codes, categories, InChI/InChIKey, and the alias set gathered from brand names,
//!    English synonyms and product names
//! 3. **Build** -- Explode every record's alias set into rows with a fixed column order
//! 4. **Resolve** -- Exact or fuzzy (token-set ratio) lookup with ranked selection
//!
//! # Key Modules
//!
//! - [`connector`] -- Owns the cached tree and table; `load`, `ensure_loaded`, `find`
//! - [`source`] -- Input resolution for `.xml` and `.zip` paths
//! - [`parser`] -- Element tree built from `quick-xml` events
//! - [`extract`] -- Per-record field extraction rules
//! - [`table`] -- The alias table and its CSV export
//! - [`resolver`] -- Match modes, selection modes and ranking
//! - [`fuzzy`] -- Name normalization, token-set ratio and edit distance
//! - [`models`] -- `DrugRecord` and `AliasRow`
//! - [`stats`] -- Extraction counters
//! - [`config`] -- Constants for parsing and matching
//!
//! # Concurrency
//!
//! Loading mutates the connector and needs exclusive access. Lookups keep their scores
//! in per-query values, so a loaded [`AliasTable`] can serve concurrent queries through
//! shared references.
//!
//! # Example Usage
//!
//! ```bash
//! # Resolve a misspelled name, keeping only the best candidate
//! drugbank find -i drugbank_all_full_database.xml.zip "asprin" --fuzzy --best
//!
//! # Dump the whole alias table
//! drugbank export -i drugbank.xml -o aliases.csv
//! ```

pub mod config;
pub mod connector;
pub mod error;
pub mod extract;
pub mod fuzzy;
pub mod models;
pub mod parser;
pub mod resolver;
pub mod source;
pub mod stats;
pub mod table;

pub use connector::DrugBankConnector;
pub use error::{ConnectorError, Result};
pub use models::{AliasRow, DrugRecord};
pub use resolver::{FindOptions, FindResult, Match, MatchMode, Selection};
pub use table::AliasTable;
