// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Configuration constants.

use std::str::FromStr;

/// Field every record is addressed by.
pub const ID_FIELD: &str = "id";

/// Indentation used when the document is pretty-printed to disk.
pub const INDENT: &[u8] = b"  ";

/// How a new record's id is chosen on create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdPolicy {
    /// `len(collection) + 1`. Collides with a live id after any delete
    /// that is not the last record.
    #[default]
    CollectionLength,
    /// `max(id) + 1` over the current records.
    NextAfterMax,
}

impl FromStr for IdPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "length" | "collection-length" => Ok(IdPolicy::CollectionLength),
            "max" | "next-after-max" => Ok(IdPolicy::NextAfterMax),
            other => Err(format!("unknown id policy '{}'", other)),
        }
    }
}
