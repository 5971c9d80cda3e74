// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! In-memory backend. Keeps the serialized bytes, so every load reparses
//! exactly like the file backend does.

use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::document::Document;
use crate::error::{StoreError, StoreResult};
use crate::storage::DocumentStore;

const MEMORY_PATH: &str = ":memory:";

#[derive(Debug, Default)]
pub struct MemoryStore {
    bytes: Mutex<Option<Vec<u8>>>,
    saves: AtomicUsize,
}

impl MemoryStore {
    pub fn new(doc: &Document) -> StoreResult<Self> {
        Ok(Self::from_bytes(doc.to_pretty_vec()?))
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            bytes: Mutex::new(Some(bytes)),
            saves: AtomicUsize::new(0),
        }
    }

    /// A store with nothing behind it; every load fails as unavailable.
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Number of successful saves since construction.
    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn bytes(&self) -> Option<Vec<u8>> {
        self.bytes.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl DocumentStore for MemoryStore {
    fn load(&self) -> StoreResult<Document> {
        let guard = self.bytes.lock().unwrap_or_else(|e| e.into_inner());
        match guard.as_deref() {
            Some(bytes) => Document::from_slice(bytes),
            None => Err(StoreError::StorageUnavailable {
                path: PathBuf::from(MEMORY_PATH),
                source: io::Error::new(io::ErrorKind::NotFound, "no document stored"),
            }),
        }
    }

    fn save(&self, doc: &Document) -> StoreResult<()> {
        let bytes = doc.to_pretty_vec()?;
        *self.bytes.lock().unwrap_or_else(|e| e.into_inner()) = Some(bytes);
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
