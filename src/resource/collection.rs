// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! One collection behind one endpoint.

use serde_json::Value;

use crate::collection::{self, Scope};
use crate::error::{HandlerError, HandlerResult};
use crate::resource::{not_found, Reply, Request, ResourceContext, Verb};

#[derive(Debug, Clone)]
pub struct CollectionResource {
    pub collection: String,
    /// Singular name used in messages ("Course not found").
    pub label: String,
    /// Fixed predicate every visible record must satisfy.
    pub scope: Option<Scope>,
    pub verbs: Vec<Verb>,
    /// Query keys honoured as equality filters on list.
    pub filters: Vec<String>,
}

impl CollectionResource {
    pub fn new(collection: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            label: label.into(),
            scope: None,
            verbs: Verb::ALL.to_vec(),
            filters: Vec::new(),
        }
    }

    pub fn scoped(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn verbs(mut self, verbs: &[Verb]) -> Self {
        self.verbs = verbs.to_vec();
        self
    }

    pub fn filter_by(mut self, field: impl Into<String>) -> Self {
        self.filters.push(field.into());
        self
    }

    pub fn handle(&self, ctx: &ResourceContext, req: &Request) -> HandlerResult<Reply> {
        match req.verb {
            Verb::Get if req.raw_id().is_some() => self.get(ctx, req),
            Verb::Get => Ok(Reply::ok(Value::Array(self.list(ctx, req)?))),
            Verb::Post => self.create(ctx, req),
            Verb::Put => self.replace(ctx, req),
            Verb::Delete => self.delete(ctx, req),
        }
    }

    /// Records in scope matching any whitelisted query filters.
    pub fn list(&self, ctx: &ResourceContext, req: &Request) -> HandlerResult<Vec<Value>> {
        let doc = ctx.load()?;
        let mut filters: Vec<Scope> = self.scope.iter().cloned().collect();
        for field in &self.filters {
            if let Some(value) = req.query.get(field) {
                filters.push(Scope::new(field.clone(), value.clone()));
            }
        }
        let records = doc.collection(&self.collection)?;
        Ok(collection::list(records, &filters))
    }

    fn get(&self, ctx: &ResourceContext, req: &Request) -> HandlerResult<Reply> {
        let id = req.id().ok_or_else(|| not_found(&self.label))?;
        let doc = ctx.load()?;
        let records = doc.collection(&self.collection)?;
        match collection::find(records, id, self.scope.as_ref()) {
            Some(record) => Ok(Reply::ok(record.clone())),
            None => Err(not_found(&self.label)),
        }
    }

    fn create(&self, ctx: &ResourceContext, req: &Request) -> HandlerResult<Reply> {
        let mut fields = req.fields()?;
        if let Some(scope) = &self.scope {
            fields.entry(scope.field.clone()).or_insert_with(|| scope.value.clone());
        }

        let mut doc = ctx.load()?;
        let record = collection::create(doc.collection_mut(&self.collection)?, fields, ctx.ids())
            .ok_or_else(|| HandlerError::InvalidRequest(format!("No ids left in {}", self.collection)))?;
        ctx.save(&doc)?;
        tracing::debug!("Created {} in {}: {}", self.label, self.collection, record);
        Ok(Reply::created(record))
    }

    fn replace(&self, ctx: &ResourceContext, req: &Request) -> HandlerResult<Reply> {
        let fields = req.fields()?;
        let id = req.id().ok_or_else(|| not_found(&self.label))?;

        let mut doc = ctx.load()?;
        let records = doc.collection_mut(&self.collection)?;
        let updated = collection::replace_fields(records, id, &fields, self.scope.as_ref())
            .ok_or_else(|| not_found(&self.label))?;
        ctx.save(&doc)?;
        Ok(Reply::ok(updated))
    }

    fn delete(&self, ctx: &ResourceContext, req: &Request) -> HandlerResult<Reply> {
        let id = req.id().ok_or_else(|| not_found(&self.label))?;

        let mut doc = ctx.load()?;
        let removed = collection::delete(doc.collection_mut(&self.collection)?, id, self.scope.as_ref());
        if !removed {
            return Err(not_found(&self.label));
        }
        ctx.save(&doc)?;
        Ok(Reply::message(format!("{} {} deleted", self.label, req.raw_id().unwrap_or_default())))
    }
}
