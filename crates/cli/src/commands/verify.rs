// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use anyhow::bail;
use lms_store::{DocumentStore, JsonFileStore};
use std::path::Path;

use super::inspect::summarize;

pub fn run(path: &Path) -> anyhow::Result<()> {
    let doc = JsonFileStore::new(path).load()?;

    let problems: Vec<String> = summarize(&doc)
        .into_iter()
        .filter(|s| !s.duplicate_ids.is_empty())
        .map(|s| format!("{}: duplicate ids {:?}", s.name, s.duplicate_ids))
        .collect();

    if problems.is_empty() {
        println!("\n✅ VERIFIED\n");
        println!("Sections: {}", doc.sections().count());
        Ok(())
    } else {
        println!("\n❌ DUPLICATE IDS\n");
        for p in &problems {
            println!("  {}", p);
        }
        bail!("{} collection(s) carry duplicate ids", problems.len())
    }
}
