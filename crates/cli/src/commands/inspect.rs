// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use lms_store::document::record_id;
use lms_store::{Document, DocumentStore, JsonFileStore};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// Shape of one top-level section.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionSummary {
    pub name: String,
    pub kind: &'static str,
    pub records: usize,
    pub max_id: Option<i64>,
    /// Ids carried by more than one record, ascending.
    pub duplicate_ids: Vec<i64>,
}

pub fn summarize(doc: &Document) -> Vec<SectionSummary> {
    doc.sections()
        .map(|(name, value)| {
            let (kind, records, ids): (&'static str, usize, Vec<i64>) = match value {
                Value::Array(items) => ("collection", items.len(), items.iter().filter_map(record_id).collect()),
                Value::Object(map) => ("object", map.len(), Vec::new()),
                _ => ("scalar", 0, Vec::new()),
            };

            let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
            for id in &ids {
                *counts.entry(*id).or_default() += 1;
            }

            SectionSummary {
                name: name.clone(),
                kind,
                records,
                max_id: ids.iter().copied().max(),
                duplicate_ids: counts.into_iter().filter(|(_, n)| *n > 1).map(|(id, _)| id).collect(),
            }
        })
        .collect()
}

pub fn run(path: &Path) -> anyhow::Result<()> {
    let meta = std::fs::metadata(path)?;
    let modified = meta
        .modified()
        .map(|t| chrono::DateTime::<chrono::Utc>::from(t).to_rfc3339())
        .unwrap_or_else(|_| "unknown".to_string());

    println!("\nLMS Document Report");
    println!("-------------------");
    println!("File:     {}", path.display());
    println!("Size:     {} bytes", meta.len());
    println!("Modified: {}\n", modified);

    let doc = JsonFileStore::new(path).load()?;

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Section", "Kind", "Entries", "Max ID", "Duplicate IDs"]);

    for s in summarize(&doc) {
        let dupes = if s.duplicate_ids.is_empty() {
            "-".to_string()
        } else {
            s.duplicate_ids.iter().map(i64::to_string).collect::<Vec<_>>().join(", ")
        };
        table.add_row(vec![
            s.name,
            s.kind.to_string(),
            s.records.to_string(),
            s.max_id.map_or_else(|| "-".to_string(), |id| id.to_string()),
            dupes,
        ]);
    }

    println!("{table}");
    Ok(())
}
