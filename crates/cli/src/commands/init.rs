// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use anyhow::{bail, Context};
use lms_store::seed::demo_document;
use lms_store::{DocumentStore, JsonFileStore};
use std::path::Path;

pub fn run(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }

    JsonFileStore::new(path).save(&demo_document())?;
    println!("Seeded {}", path.display());
    Ok(())
}
