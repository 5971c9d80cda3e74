// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! JSON file backend.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::document::Document;
use crate::error::{StoreError, StoreResult};
use crate::storage::DocumentStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Write `<file>.tmp`, fsync, then rename over the target.
    #[default]
    Atomic,
    /// Truncate and write in place. A crash mid-write leaves a torn file.
    Overwrite,
}

impl FromStr for WriteMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "atomic" => Ok(WriteMode::Atomic),
            "overwrite" => Ok(WriteMode::Overwrite),
            other => Err(format!("unknown write mode '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    mode: WriteMode,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_mode(path, WriteMode::default())
    }

    pub fn with_mode(path: impl Into<PathBuf>, mode: WriteMode) -> Self {
        Self { path: path.into(), mode }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mode(&self) -> WriteMode {
        self.mode
    }

    fn unavailable(&self, source: std::io::Error) -> StoreError {
        StoreError::StorageUnavailable {
            path: self.path.clone(),
            source,
        }
    }

    fn write_atomic(&self, bytes: &[u8]) -> std::io::Result<()> {
        let tmp_path = self.path.with_extension("tmp");
        {
            let mut file = File::create(&tmp_path)?;
            file.write_all(bytes)?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)
    }
}

impl DocumentStore for JsonFileStore {
    fn load(&self) -> StoreResult<Document> {
        let bytes = fs::read(&self.path).map_err(|e| self.unavailable(e))?;
        tracing::debug!("Loaded {} bytes from {:?}", bytes.len(), self.path);
        Document::from_slice(&bytes)
    }

    fn save(&self, doc: &Document) -> StoreResult<()> {
        let bytes = doc.to_pretty_vec()?;
        match self.mode {
            WriteMode::Atomic => self.write_atomic(&bytes),
            WriteMode::Overwrite => fs::write(&self.path, &bytes),
        }
        .map_err(|e| self.unavailable(e))?;
        tracing::debug!("Saved {} bytes to {:?} ({:?})", bytes.len(), self.path, self.mode);
        Ok(())
    }
}
