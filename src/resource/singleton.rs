// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! The first record in scope, addressed without an id (e.g. the admin account).

use crate::collection::{self, Scope};
use crate::error::HandlerResult;
use crate::resource::{not_found, Reply, Request, ResourceContext, Verb};

#[derive(Debug, Clone)]
pub struct SingletonResource {
    pub collection: String,
    pub label: String,
    pub scope: Option<Scope>,
    pub verbs: Vec<Verb>,
}

impl SingletonResource {
    pub fn new(collection: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            label: label.into(),
            scope: None,
            verbs: vec![Verb::Get, Verb::Put],
        }
    }

    pub fn scoped(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn handle(&self, ctx: &ResourceContext, req: &Request) -> HandlerResult<Reply> {
        match req.verb {
            Verb::Put => self.replace(ctx, req),
            _ => self.get(ctx),
        }
    }

    fn get(&self, ctx: &ResourceContext) -> HandlerResult<Reply> {
        let doc = ctx.load()?;
        let records = doc.collection(&self.collection)?;
        match collection::find_first(records, self.scope.as_ref()) {
            Some(record) => Ok(Reply::ok(record.clone())),
            None => Err(not_found(&self.label)),
        }
    }

    fn replace(&self, ctx: &ResourceContext, req: &Request) -> HandlerResult<Reply> {
        let fields = req.fields()?;
        let mut doc = ctx.load()?;
        let records = doc.collection_mut(&self.collection)?;
        let updated = collection::replace_first(records, &fields, self.scope.as_ref())
            .ok_or_else(|| not_found(&self.label))?;
        ctx.save(&doc)?;
        Ok(Reply::ok(updated))
    }
}
