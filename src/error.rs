// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Error types.

use std::path::PathBuf;
use thiserror::Error;

use crate::resource::Verb;

#[derive(Error, Debug)]
pub enum StoreError {
    /// Backing file missing, unreadable or unwritable.
    #[error("Storage unavailable at {path:?}: {source}")]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Bytes on disk are not a JSON object.
    #[error("Malformed document: {0}")]
    MalformedDocument(String),
}

pub type StoreResult<T> = core::result::Result<T, StoreError>;

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::MalformedDocument(e.to_string())
    }
}

/// Everything a resource adapter can answer with instead of a payload.
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    InvalidRequest(String),
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Method {method} Not Allowed")]
    MethodNotAllowed { method: String, allow: Vec<Verb> },
    #[error("Storage fault: {0}")]
    StorageFault(#[from] StoreError),
}

pub type HandlerResult<T> = core::result::Result<T, HandlerError>;
