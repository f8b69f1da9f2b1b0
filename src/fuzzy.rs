use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W").unwrap());

/// Query-side normalization: lower-case and drop every space character.
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase().replace(' ', "")
}

/// Pre-processing applied by the scorer: non-ASCII characters are dropped, any other
/// non-word character becomes a space, then the result is lower-cased and trimmed.
pub fn full_process(s: &str) -> String {
    let ascii: String = s.chars().filter(char::is_ascii).collect();
    NON_WORD
        .replace_all(&ascii, " ")
        .to_lowercase()
        .trim()
        .to_string()
}

fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Similarity in 0..=100 from the insert/delete distance between the two strings.
pub fn ratio(a: &str, b: &str) -> u8 {
    if a == b {
        return 100;
    }
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = (a.len() + b.len()) as f64;
    let matched = 2.0 * lcs_len(&a, &b) as f64;

    (100.0 * matched / total).round_ties_even() as u8
}

/// Order- and duplicate-insensitive similarity in 0..=100. Both sides go through
/// [`full_process`]; a side that ends up empty scores 0.
pub fn token_set_ratio(a: &str, b: &str) -> u8 {
    let a = full_process(a);
    let b = full_process(b);
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();

    let sect = join(tokens_a.intersection(&tokens_b));
    let only_a = join(tokens_a.difference(&tokens_b));
    let only_b = join(tokens_b.difference(&tokens_a));

    let combined_a = format!("{} {}", sect, only_a).trim().to_string();
    let combined_b = format!("{} {}", sect, only_b).trim().to_string();

    ratio(&sect, &combined_a)
        .max(ratio(&sect, &combined_b))
        .max(ratio(&combined_a, &combined_b))
}

fn join<'a>(tokens: impl Iterator<Item = &'a &'a str>) -> String {
    tokens.copied().collect::<Vec<_>>().join(" ")
}

/// Levenshtein distance, reported alongside fuzzy matches.
pub fn edit_distance(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}
