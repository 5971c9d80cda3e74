// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.

//! lms-store: a flat-file JSON collection store with generic REST-style
//! resource adapters on top of it.

pub mod config;
pub mod error;
pub mod document;
pub mod storage;
pub mod collection;
pub mod resource;
pub mod seed;

pub use document::{Document, Record};
pub use error::{HandlerError, HandlerResult, StoreError, StoreResult};
pub use storage::{DocumentStore, JsonFileStore, MemoryStore, WriteMode};

#[cfg(test)]
pub mod tests;
