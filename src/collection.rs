// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! In-memory operations over one collection's records.
//!
//! These never touch storage. Callers load a document, run one of these
//! against a collection, and decide from the result whether to save.

use serde_json::Value;

use crate::config::{IdPolicy, ID_FIELD};
use crate::document::{record_id, Record};

/// Equality predicate on one field, e.g. `role == "student"`.
#[derive(Debug, Clone, PartialEq)]
pub struct Scope {
    pub field: String,
    pub value: Value,
}

impl Scope {
    pub fn new(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Query-string values are always strings; `?id=3` must still match
    /// a numeric field, so scalars are compared by their text form.
    pub fn matches(&self, record: &Value) -> bool {
        match (record.get(&self.field), &self.value) {
            (None, _) => false,
            (Some(actual), expected) if actual == expected => true,
            (Some(Value::Number(n)), Value::String(s)) => n.to_string() == *s,
            (Some(Value::Bool(b)), Value::String(s)) => b.to_string() == *s,
            _ => false,
        }
    }
}

fn in_scope(record: &Value, scope: Option<&Scope>) -> bool {
    scope.map_or(true, |s| s.matches(record))
}

fn is_target(record: &Value, id: i64, scope: Option<&Scope>) -> bool {
    record_id(record) == Some(id) && in_scope(record, scope)
}

/// Records matching every filter, in insertion order.
pub fn list(records: &[Value], filters: &[Scope]) -> Vec<Value> {
    records
        .iter()
        .filter(|r| filters.iter().all(|f| f.matches(r)))
        .cloned()
        .collect()
}

/// First record in scope carrying `id`.
pub fn find<'a>(records: &'a [Value], id: i64, scope: Option<&Scope>) -> Option<&'a Value> {
    records.iter().find(|r| is_target(r, id, scope))
}

/// First record in scope, regardless of id.
pub fn find_first<'a>(records: &'a [Value], scope: Option<&Scope>) -> Option<&'a Value> {
    records.iter().find(|r| in_scope(r, scope))
}

/// Id the next created record gets. `None` once the policy has run past `i64::MAX`.
pub fn next_id(records: &[Value], policy: IdPolicy) -> Option<i64> {
    match policy {
        IdPolicy::CollectionLength => i64::try_from(records.len()).ok()?.checked_add(1),
        IdPolicy::NextAfterMax => records.iter().filter_map(record_id).max().unwrap_or(0).checked_add(1),
    }
}

/// Appends `{id, ...fields}`. Caller fields win, an explicit `id` included.
/// Returns `None`, records untouched, when no id can be assigned.
pub fn create(records: &mut Vec<Value>, fields: Record, policy: IdPolicy) -> Option<Value> {
    let mut record = Record::new();
    record.insert(ID_FIELD.to_string(), Value::from(next_id(records, policy)?));
    record.extend(fields);

    let record = Value::Object(record);
    records.push(record.clone());
    Some(record)
}

fn merge_at(records: &mut [Value], pos: usize, fields: &Record) -> Value {
    if let Value::Object(existing) = &mut records[pos] {
        for (k, v) in fields {
            existing.insert(k.clone(), v.clone());
        }
    }
    records[pos].clone()
}

/// Shallow-merges `fields` into the first record in scope with `id`.
/// Returns the updated record, or `None` with the records untouched.
pub fn replace_fields(records: &mut [Value], id: i64, fields: &Record, scope: Option<&Scope>) -> Option<Value> {
    let pos = records.iter().position(|r| is_target(r, id, scope))?;
    Some(merge_at(records, pos, fields))
}

/// Shallow-merges `fields` into the first record in scope.
pub fn replace_first(records: &mut [Value], fields: &Record, scope: Option<&Scope>) -> Option<Value> {
    let pos = records.iter().position(|r| in_scope(r, scope))?;
    Some(merge_at(records, pos, fields))
}

/// Removes the first record in scope with `id`. True when the collection shrank.
pub fn delete(records: &mut Vec<Value>, id: i64, scope: Option<&Scope>) -> bool {
    let before = records.len();
    if let Some(pos) = records.iter().position(|r| is_target(r, id, scope)) {
        records.remove(pos);
    }
    records.len() < before
}
