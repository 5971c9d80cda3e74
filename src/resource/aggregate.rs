// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Read-only view stitching raw document sections together.

use serde_json::{Map, Value};

use crate::error::HandlerResult;
use crate::resource::{Reply, ResourceContext};

#[derive(Debug, Clone, Default)]
pub struct AggregateResource {
    /// (response key, document section)
    pub sections: Vec<(String, String)>,
}

impl AggregateResource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section(mut self, key: impl Into<String>, section: impl Into<String>) -> Self {
        self.sections.push((key.into(), section.into()));
        self
    }

    /// Absent sections are left out of the reply.
    pub fn handle(&self, ctx: &ResourceContext) -> HandlerResult<Reply> {
        let doc = ctx.load()?;
        let mut view = Map::new();
        for (key, section) in &self.sections {
            if let Some(value) = doc.section(section) {
                view.insert(key.clone(), value.clone());
            }
        }
        Ok(Reply::ok(Value::Object(view)))
    }
}
