// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use anyhow::anyhow;
use lms_store::collection::{self, Scope};
use lms_store::{DocumentStore, JsonFileStore};
use serde_json::Value;
use std::path::Path;

/// Parses `field=value` filters.
pub fn parse_filters(raw: &[String]) -> anyhow::Result<Vec<Scope>> {
    raw.iter()
        .map(|f| {
            let (field, value) = f
                .split_once('=')
                .ok_or_else(|| anyhow!("filter '{}' must look like field=value", f))?;
            Ok(Scope::new(field.trim(), value.trim()))
        })
        .collect()
}

/// Records of `name` that pass every filter.
pub fn select(path: &Path, name: &str, filters: &[String]) -> anyhow::Result<Vec<Value>> {
    let filters = parse_filters(filters)?;
    let doc = JsonFileStore::new(path).load()?;
    Ok(collection::list(doc.collection(name)?, &filters))
}

pub fn run(path: &Path, name: &str, filters: &[String]) -> anyhow::Result<()> {
    let records = select(path, name, filters)?;
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}
