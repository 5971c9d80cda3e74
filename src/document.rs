// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! The persisted document: collection name -> section value.

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

use crate::config::{ID_FIELD, INDENT};
use crate::error::{StoreError, StoreResult};

/// One entity. Shape is whatever the collection's writers put in it.
pub type Record = Map<String, Value>;

/// The whole on-disk state. Sections are usually arrays of records
/// (collections) but object sections such as dashboard stats are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    sections: Map<String, Value>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a document. The top level must be a JSON object.
    pub fn from_slice(bytes: &[u8]) -> StoreResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Pretty-printed form written to disk.
    pub fn to_pretty_vec(&self) -> StoreResult<Vec<u8>> {
        let mut out = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(INDENT));
        self.serialize(&mut ser)?;
        Ok(out)
    }

    pub fn section(&self, name: &str) -> Option<&Value> {
        self.sections.get(name)
    }

    pub fn set_section(&mut self, name: impl Into<String>, value: Value) {
        self.sections.insert(name.into(), value);
    }

    pub fn sections(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.sections.iter()
    }

    /// Records of a collection. An absent collection reads as empty.
    pub fn collection(&self, name: &str) -> StoreResult<&[Value]> {
        match self.sections.get(name) {
            None => Ok(&[]),
            Some(Value::Array(items)) => Ok(items.as_slice()),
            Some(_) => Err(not_a_collection(name)),
        }
    }

    /// Mutable records of a collection, created empty if absent.
    pub fn collection_mut(&mut self, name: &str) -> StoreResult<&mut Vec<Value>> {
        let entry = self
            .sections
            .entry(name.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        match entry {
            Value::Array(items) => Ok(items),
            _ => Err(not_a_collection(name)),
        }
    }
}

impl From<Map<String, Value>> for Document {
    fn from(sections: Map<String, Value>) -> Self {
        Self { sections }
    }
}

fn not_a_collection(name: &str) -> StoreError {
    StoreError::MalformedDocument(format!("section '{}' is not an array", name))
}

/// Integer id of a record, if it has one.
pub fn record_id(record: &Value) -> Option<i64> {
    record.get(ID_FIELD).and_then(Value::as_i64)
}

/// Parses an id taken from a query string or path segment: optional
/// sign, then the leading run of digits (`"2abc"` is 2, `"2.5"` is 2).
/// No leading digits yields `None`, which callers treat as "no such record".
pub fn parse_id(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let sign_len = usize::from(s.starts_with(['+', '-']));
    let digits = s[sign_len..].bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    s[..sign_len + digits].parse().ok()
}
