use crate::config::DEFAULT_FUZZY_THRESHOLD;
use crate::fuzzy::{edit_distance, normalize_name, token_set_ratio};
use crate::models::AliasRow;
use crate::table::AliasTable;
use serde::Serialize;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Case-sensitive equality on `alias_name`
    Exact,
    /// Token-set score of at least `threshold` (0..=100) after normalization
    Fuzzy { threshold: u32 },
}

/// How many of the ranked matches to hand back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    AllMatches,
    BestMatch,
    TopN(usize),
}

impl Selection {
    fn apply<T>(self, mut matches: Vec<T>) -> Vec<T> {
        match self {
            Selection::AllMatches => {}
            Selection::BestMatch => matches.truncate(1),
            Selection::TopN(n) => matches.truncate(n),
        }
        matches
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FindOptions {
    pub mode: MatchMode,
    pub selection: Selection,
}

impl Default for FindOptions {
    fn default() -> Self {
        Self::exact()
    }
}

impl FindOptions {
    pub fn exact() -> Self {
        Self {
            mode: MatchMode::Exact,
            selection: Selection::AllMatches,
        }
    }

    pub fn fuzzy(threshold: u32) -> Self {
        Self {
            mode: MatchMode::Fuzzy { threshold },
            selection: Selection::AllMatches,
        }
    }

    pub fn fuzzy_default() -> Self {
        Self::fuzzy(u32::from(DEFAULT_FUZZY_THRESHOLD))
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }
}

/// Per-query values computed for a fuzzy candidate. Never stored on the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzyScore {
    pub clean_alias_name: String,
    pub score: u8,
    /// Levenshtein distance to the normalized query; informational only
    pub edit_distance: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Match<'a> {
    pub index: usize,
    pub row: &'a AliasRow,
    pub fuzzy: Option<FuzzyScore>,
}

impl<'a> Match<'a> {
    pub fn score(&self) -> Option<u8> {
        self.fuzzy.as_ref().map(|f| f.score)
    }

    pub fn to_record(&self) -> MatchRecord<'a> {
        let row = self.row;
        MatchRecord {
            drugbank_id: &row.drugbank_id,
            primary_name: &row.primary_name,
            alias_name: &row.alias_name,
            drug_type: row.drug_type.as_deref(),
            groups: &row.groups,
            atc_codes: &row.atc_codes,
            categories: &row.categories,
            inchikey: row.inchikey.as_deref(),
            inchi: row.inchi.as_deref(),
            description: row.description.as_deref(),
            fuzzy_score: self.fuzzy.as_ref().map(|f| f.score),
            edit_distance: self.fuzzy.as_ref().map(|f| f.edit_distance),
        }
    }
}

/// Flat, serializable view of a match: the row's columns plus the query-local scores.
#[derive(Debug, Serialize)]
pub struct MatchRecord<'a> {
    pub drugbank_id: &'a str,
    pub primary_name: &'a str,
    pub alias_name: &'a str,
    #[serde(rename = "type")]
    pub drug_type: Option<&'a str>,
    pub groups: &'a str,
    pub atc_codes: &'a str,
    pub categories: &'a str,
    pub inchikey: Option<&'a str>,
    pub inchi: Option<&'a str>,
    pub description: Option<&'a str>,
    pub fuzzy_score: Option<u8>,
    pub edit_distance: Option<usize>,
}

/// `NotFound` only comes out of fuzzy lookups; an exact lookup with no hits is an
/// empty `Matches`.
#[derive(Debug, Clone, PartialEq)]
pub enum FindResult<'a> {
    Matches(Vec<Match<'a>>),
    NotFound,
}

impl<'a> FindResult<'a> {
    pub fn is_not_found(&self) -> bool {
        matches!(self, FindResult::NotFound)
    }

    pub fn matches(&self) -> &[Match<'a>] {
        match self {
            FindResult::Matches(matches) => matches,
            FindResult::NotFound => &[],
        }
    }

    pub fn into_matches(self) -> Vec<Match<'a>> {
        match self {
            FindResult::Matches(matches) => matches,
            FindResult::NotFound => Vec::new(),
        }
    }

    pub fn best(&self) -> Option<&Match<'a>> {
        self.matches().first()
    }

    pub fn len(&self) -> usize {
        self.matches().len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches().is_empty()
    }
}

pub fn find<'a>(table: &'a AliasTable, name: &str, options: &FindOptions) -> FindResult<'a> {
    let matches = match options.mode {
        MatchMode::Exact => exact_matches(table, name),
        MatchMode::Fuzzy { threshold } => match fuzzy_matches(table, name, threshold) {
            Some(matches) => matches,
            None => {
                warn!(query = name, threshold, "Drug {} not found", normalize_name(name));
                return FindResult::NotFound;
            }
        },
    };

    FindResult::Matches(options.selection.apply(matches))
}

fn exact_matches<'a>(table: &'a AliasTable, name: &str) -> Vec<Match<'a>> {
    table
        .indices_of(name)
        .iter()
        .filter_map(|&index| {
            table.get(index).map(|row| Match {
                index,
                row,
                fuzzy: None,
            })
        })
        .collect()
}

/// Scores every row, keeps those at or above `threshold`, and sorts by score
/// descending. The sort is stable so equal scores keep table order.
fn fuzzy_matches<'a>(table: &'a AliasTable, name: &str, threshold: u32) -> Option<Vec<Match<'a>>> {
    let query = normalize_name(name);

    let mut matches: Vec<Match<'a>> = table
        .rows()
        .iter()
        .enumerate()
        .filter_map(|(index, row)| {
            let clean_alias_name = normalize_name(&row.alias_name);
            let score = token_set_ratio(&clean_alias_name, &query);
            (u32::from(score) >= threshold).then(|| Match {
                index,
                row,
                fuzzy: Some(FuzzyScore {
                    edit_distance: edit_distance(&clean_alias_name, &query),
                    clean_alias_name,
                    score,
                }),
            })
        })
        .collect();

    debug!(
        query = %query,
        threshold,
        scored = table.len(),
        kept = matches.len(),
        "Fuzzy scoring complete"
    );

    if matches.is_empty() {
        return None;
    }

    matches.sort_by(|a, b| b.score().cmp(&a.score()));
    Some(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DrugRecord;
    use std::collections::BTreeSet;

    fn record(id: &str, name: &str, aliases: &[&str]) -> DrugRecord {
        let mut set: BTreeSet<String> = aliases.iter().map(|a| a.to_string()).collect();
        set.insert(name.to_string());
        DrugRecord {
            drugbank_id: Some(id.to_string()),
            primary_name: name.to_string(),
            aliases: set,
            ..Default::default()
        }
    }

    fn sample_table() -> AliasTable {
        AliasTable::from_records(vec![
            record("DB00945", "Aspirin", &["Acetylsalicylic acid", "Aspro", "Asprin"]),
            record("DB01050", "Ibuprofen", &["Advil", "Motrin"]),
            record("DB00316", "Acetaminophen", &["Paracetamol", "Tylenol"]),
        ])
    }

    fn ids<'a>(result: &'a FindResult<'_>) -> Vec<&'a str> {
        result
            .matches()
            .iter()
            .map(|m| m.row.drugbank_id.as_str())
            .collect()
    }

    #[test]
    fn exact_match_is_case_sensitive() {
        let table = sample_table();
        let hit = find(&table, "Advil", &FindOptions::exact());
        assert_eq!(ids(&hit), vec!["DB01050"]);
        assert!(hit.matches()[0].fuzzy.is_none());

        let miss = find(&table, "advil", &FindOptions::exact());
        assert!(miss.is_empty());
        assert!(!miss.is_not_found());
    }

    #[test]
    fn exact_match_returns_every_row_sharing_the_alias() {
        let table = AliasTable::from_records(vec![
            record("DB1", "Alpha", &["Common"]),
            record("DB2", "Beta", &["Common"]),
        ]);
        let result = find(&table, "Common", &FindOptions::default());
        assert_eq!(ids(&result), vec!["DB1", "DB2"]);
    }

    #[test]
    fn fuzzy_match_normalizes_query() {
        let table = sample_table();
        let result = find(&table, "ACETYLSALICYLIC ACID", &FindOptions::fuzzy(90));
        let best = result.best().unwrap();
        assert_eq!(best.row.alias_name, "Acetylsalicylic acid");
        assert_eq!(best.score(), Some(100));
        let fuzzy = best.fuzzy.as_ref().unwrap();
        assert_eq!(fuzzy.clean_alias_name, "acetylsalicylicacid");
        assert_eq!(fuzzy.edit_distance, 0);
    }

    #[test]
    fn fuzzy_match_sorts_by_score_descending() {
        let table = sample_table();
        let result = find(&table, "aspirin", &FindOptions::fuzzy(80));
        let scores: Vec<_> = result.matches().iter().map(|m| m.score().unwrap()).collect();
        let mut sorted = scores.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(scores, sorted);
        assert_eq!(result.best().unwrap().row.alias_name, "Aspirin");
    }

    #[test]
    fn fuzzy_threshold_zero_returns_every_row() {
        let table = sample_table();
        let result = find(&table, "anything", &FindOptions::fuzzy(0));
        assert_eq!(result.len(), table.len());
    }

    #[test]
    fn fuzzy_threshold_above_100_is_not_found() {
        let table = sample_table();
        let result = find(&table, "Aspirin", &FindOptions::fuzzy(101));
        assert!(result.is_not_found());
        assert!(result.matches().is_empty());
    }

    #[test]
    fn into_matches_hands_over_rows() {
        let table = sample_table();
        let matches = find(&table, "Advil", &FindOptions::exact()).into_matches();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].row.drugbank_id, "DB01050");

        let missing = find(&table, "zzzzzz", &FindOptions::fuzzy_default()).into_matches();
        assert!(missing.is_empty());
    }

    #[test]
    fn fuzzy_no_candidates_is_not_found() {
        let table = sample_table();
        let result = find(&table, "zzzzzz", &FindOptions::fuzzy_default());
        assert_eq!(result, FindResult::NotFound);
    }

    #[test]
    fn best_match_returns_single_top_row() {
        let table = sample_table();
        let options = FindOptions::fuzzy(50).with_selection(Selection::BestMatch);
        let result = find(&table, "aspirin", &options);
        assert_eq!(result.len(), 1);
        assert_eq!(result.best().unwrap().row.alias_name, "Aspirin");
    }

    #[test]
    fn top_n_keeps_table_order_for_ties() {
        let table = AliasTable::from_records(vec![
            record("DB1", "Dup", &[]),
            record("DB2", "Dup", &[]),
            record("DB3", "Dup", &[]),
            record("DB4", "Dup", &[]),
            record("DB5", "Dup", &[]),
        ]);
        let all = find(&table, "dup", &FindOptions::fuzzy(90));
        assert_eq!(all.len(), 5);

        let options = FindOptions::fuzzy(90).with_selection(Selection::TopN(2));
        let result = find(&table, "dup", &options);
        assert_eq!(ids(&result), vec!["DB1", "DB2"]);
    }

    #[test]
    fn top_n_larger_than_matches_returns_all() {
        let table = sample_table();
        let options = FindOptions::exact().with_selection(Selection::TopN(10));
        let result = find(&table, "Tylenol", &options);
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn top_zero_returns_nothing() {
        let table = sample_table();
        let options = FindOptions::fuzzy(90).with_selection(Selection::TopN(0));
        let result = find(&table, "aspirin", &options);
        assert!(result.is_empty());
        assert!(!result.is_not_found());
    }

    #[test]
    fn exact_after_fuzzy_has_no_scores() {
        let table = sample_table();
        let _ = find(&table, "aspirin", &FindOptions::fuzzy(0));
        let result = find(&table, "Aspirin", &FindOptions::exact());
        assert_eq!(result.len(), 1);
        assert!(result.matches()[0].fuzzy.is_none());
        assert!(result.matches()[0].to_record().fuzzy_score.is_none());
    }

    #[test]
    fn match_record_carries_scores() {
        let table = sample_table();
        let result = find(&table, "asprin", &FindOptions::fuzzy(90));
        let record = result.best().unwrap().to_record();
        assert_eq!(record.alias_name, "Asprin");
        assert_eq!(record.fuzzy_score, Some(100));
        assert_eq!(record.edit_distance, Some(0));
    }
}
