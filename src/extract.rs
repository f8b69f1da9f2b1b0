use crate::config::{
    DRUGBANK_NS as NS, DRUG_TAG, FIELD_SEPARATOR, PROGRESS_INTERVAL, SYNONYM_LANGUAGE,
};
use crate::error::{ConnectorError, Result};
use crate::models::DrugRecord;
use crate::parser::Element;
use crate::stats::ExtractionStats;
use indicatif::ProgressBar;
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Flattens every `<drug>` under the root, in document order. A single child with any
/// other tag aborts the whole extraction.
pub fn extract_records(root: &Element, stats: &mut ExtractionStats) -> Result<Vec<DrugRecord>> {
    let mut records = Vec::with_capacity(root.children.len());
    let pb = ProgressBar::new_spinner();

    for drug in &root.children {
        if !drug.is(NS, DRUG_TAG) {
            pb.finish_and_clear();
            return Err(ConnectorError::UnexpectedSchema {
                expected: format!("{{{}}}{}", NS, DRUG_TAG),
                found: drug.qualified_name(),
            });
        }

        records.push(extract_record(drug, stats));

        if records.len() % PROGRESS_INTERVAL == 0 {
            pb.tick();
        }
    }

    pb.finish_and_clear();

    info!(
        records = stats.records(),
        aliases = stats.aliases(),
        missing_primary_id = stats.missing_primary_id,
        "Records extracted"
    );

    Ok(records)
}

pub fn extract_record(drug: &Element, stats: &mut ExtractionStats) -> DrugRecord {
    let primary_name = drug.child_text(NS, "name").unwrap_or_default().to_string();

    let brands = brand_names(drug);
    let synonyms = english_synonyms(drug);
    let products = product_names(drug);
    stats.add_brand_aliases(brands.len() as u64);
    stats.add_synonym_aliases(synonyms.len() as u64);
    stats.add_product_aliases(products.len() as u64);

    let mut aliases: BTreeSet<String> = brands
        .into_iter()
        .chain(synonyms)
        .chain(products)
        .map(str::to_string)
        .collect();
    aliases.insert(primary_name.clone());

    let drugbank_id = primary_id(drug).map(str::to_string);
    if drugbank_id.is_none() {
        debug!(name = %primary_name, "Record has no primary drugbank-id");
        stats.inc_missing_primary_id();
    }

    let inchikey = calculated_property(drug, "InChIKey").map(str::to_string);
    if inchikey.is_none() {
        stats.inc_missing_inchikey();
    }

    stats.inc_records();

    DrugRecord {
        drug_type: drug.attr("type").map(str::to_string),
        drugbank_id,
        primary_name,
        description: drug.child_text(NS, "description").map(str::to_string),
        groups: join_values(nested(drug, "groups", "group").filter_map(Element::text)),
        atc_codes: join_values(nested(drug, "atc-codes", "atc-code").filter_map(|c| c.attr("code"))),
        categories: join_values(
            nested(drug, "categories", "category").filter_map(|c| c.child_text(NS, "category")),
        ),
        inchi: calculated_property(drug, "InChI").map(str::to_string),
        inchikey,
        aliases,
    }
}

/// Direct `parent/child` path: every `child` under every `parent`.
fn nested<'a>(
    drug: &'a Element,
    parent: &'static str,
    child: &'static str,
) -> impl Iterator<Item = &'a Element> + 'a {
    drug.children_named(NS, parent)
        .flat_map(move |p| p.children_named(NS, child))
}

/// `parent/child` anywhere below the record.
fn nested_anywhere<'a>(
    drug: &'a Element,
    parent: &'static str,
    child: &'static str,
) -> impl Iterator<Item = &'a Element> + 'a {
    drug.descendants()
        .filter(move |e| e.is(NS, parent))
        .flat_map(move |p| p.children_named(NS, child))
}

fn join_values<'a>(values: impl Iterator<Item = &'a str>) -> String {
    values.collect::<Vec<_>>().join(FIELD_SEPARATOR)
}

fn primary_id(drug: &Element) -> Option<&str> {
    drug.children_named(NS, "drugbank-id")
        .find(|id| id.attr("primary") == Some("true"))
        .and_then(Element::text)
}

fn calculated_property<'a>(drug: &'a Element, kind: &str) -> Option<&'a str> {
    nested(drug, "calculated-properties", "property")
        .find(|p| p.child_text(NS, "kind") == Some(kind))
        .and_then(|p| p.child_text(NS, "value"))
}

/// Brands carry their name in a `<name>` child; older exports put it inline.
fn brand_names(drug: &Element) -> Vec<&str> {
    nested_anywhere(drug, "international-brands", "international-brand")
        .filter_map(|b| b.child_text(NS, "name").or_else(|| b.text()))
        .collect()
}

fn english_synonyms(drug: &Element) -> Vec<&str> {
    nested_anywhere(drug, "synonyms", "synonym")
        .filter(|s| s.attr("language") == Some(SYNONYM_LANGUAGE))
        .filter_map(Element::text)
        .collect()
}

fn product_names(drug: &Element) -> Vec<&str> {
    nested_anywhere(drug, "products", "product")
        .filter_map(|p| p.child_text(NS, "name"))
        .collect()
}
