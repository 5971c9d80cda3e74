// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Collection Store: whole-document load/save.
//!
//! Every call goes back to the backing medium. Nothing is cached between
//! calls, so a document's lifetime is exactly one request.

pub mod file;
pub mod memory;

pub use file::{JsonFileStore, WriteMode};
pub use memory::MemoryStore;

use crate::document::Document;
use crate::error::StoreResult;

pub trait DocumentStore: Send + Sync {
    /// Reads and parses the full document.
    fn load(&self) -> StoreResult<Document>;

    /// Serializes and replaces the full document.
    fn save(&self, doc: &Document) -> StoreResult<()>;
}
