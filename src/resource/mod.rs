// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Generic resource adapters.
//!
//! An [`Endpoint`] is per-resource configuration (collection name, scope,
//! discriminators, allowed verbs). [`Endpoint::handle`] turns one inbound
//! [`Request`] into a single load -> transform -> (save) cycle against the
//! injected [`DocumentStore`] and answers with a [`Reply`] or a
//! [`HandlerError`].

pub mod aggregate;
pub mod collection;
pub mod login;
pub mod multiplex;
pub mod singleton;

pub use aggregate::AggregateResource;
pub use collection::CollectionResource;
pub use login::LoginResource;
pub use multiplex::{MultiplexResource, Variant};
pub use singleton::SingletonResource;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::{json, Value};

use crate::config::{IdPolicy, ID_FIELD};
use crate::document::{parse_id, Document, Record};
use crate::error::{HandlerError, HandlerResult};
use crate::storage::DocumentStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

impl Verb {
    pub const ALL: [Verb; 4] = [Verb::Get, Verb::Post, Verb::Put, Verb::Delete];

    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Delete => "DELETE",
        }
    }

    pub fn parse(method: &str) -> Option<Verb> {
        Verb::ALL.into_iter().find(|v| v.as_str() == method)
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub type Query = BTreeMap<String, String>;

#[derive(Debug, Clone)]
pub struct Request {
    pub verb: Verb,
    pub query: Query,
    pub body: Option<Value>,
}

impl Request {
    pub fn new(verb: Verb) -> Self {
        Self {
            verb,
            query: Query::new(),
            body: None,
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Raw `id` query parameter.
    pub fn raw_id(&self) -> Option<&str> {
        self.query.get(ID_FIELD).map(String::as_str)
    }

    /// Parsed `id`. Absent or without leading digits both come back as `None`.
    pub fn id(&self) -> Option<i64> {
        self.raw_id().and_then(parse_id)
    }

    /// Body as a field map. No body merges nothing.
    pub fn fields(&self) -> HandlerResult<Record> {
        match &self.body {
            None | Some(Value::Null) => Ok(Record::new()),
            Some(Value::Object(map)) => Ok(map.clone()),
            Some(_) => Err(HandlerError::InvalidRequest(
                "Request body must be a JSON object".to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Created,
}

impl Status {
    pub fn code(&self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::Created => 201,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: Status,
    pub body: Value,
}

impl Reply {
    pub fn ok(body: Value) -> Self {
        Self { status: Status::Ok, body }
    }

    pub fn created(body: Value) -> Self {
        Self {
            status: Status::Created,
            body,
        }
    }

    pub fn message(text: impl Into<String>) -> Self {
        Self::ok(json!({ "message": text.into() }))
    }
}

/// What every adapter needs: the store and the id policy.
#[derive(Clone)]
pub struct ResourceContext {
    store: Arc<dyn DocumentStore>,
    ids: IdPolicy,
}

impl ResourceContext {
    pub fn new(store: Arc<dyn DocumentStore>, ids: IdPolicy) -> Self {
        Self { store, ids }
    }

    pub fn ids(&self) -> IdPolicy {
        self.ids
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    pub fn load(&self) -> HandlerResult<Document> {
        Ok(self.store.load()?)
    }

    pub fn save(&self, doc: &Document) -> HandlerResult<()> {
        Ok(self.store.save(doc)?)
    }
}

pub enum Endpoint {
    Collection(CollectionResource),
    Multiplex(MultiplexResource),
    Singleton(SingletonResource),
    Aggregate(AggregateResource),
    Login(LoginResource),
}

impl Endpoint {
    /// Verbs this endpoint answers, in `Allow` header order.
    pub fn allowed(&self) -> Vec<Verb> {
        match self {
            Endpoint::Collection(r) => r.verbs.clone(),
            Endpoint::Multiplex(r) => r.allowed(),
            Endpoint::Singleton(r) => r.verbs.clone(),
            Endpoint::Aggregate(_) => vec![Verb::Get],
            Endpoint::Login(_) => vec![Verb::Post],
        }
    }

    pub fn method_not_allowed(&self, method: &str) -> HandlerError {
        HandlerError::MethodNotAllowed {
            method: method.to_string(),
            allow: self.allowed(),
        }
    }

    /// Dispatches on an HTTP method string. Methods outside [`Verb`] and
    /// verbs this endpoint does not answer are both rejected.
    pub fn dispatch(&self, ctx: &ResourceContext, method: &str, query: Query, body: Option<Value>) -> HandlerResult<Reply> {
        let verb = Verb::parse(method).ok_or_else(|| self.method_not_allowed(method))?;
        self.handle(ctx, &Request { verb, query, body })
    }

    pub fn handle(&self, ctx: &ResourceContext, req: &Request) -> HandlerResult<Reply> {
        if !self.allowed().contains(&req.verb) {
            return Err(self.method_not_allowed(req.verb.as_str()));
        }
        match self {
            Endpoint::Collection(r) => r.handle(ctx, req),
            Endpoint::Multiplex(r) => r.handle(ctx, req),
            Endpoint::Singleton(r) => r.handle(ctx, req),
            Endpoint::Aggregate(r) => r.handle(ctx),
            Endpoint::Login(r) => r.handle(ctx, req),
        }
    }
}

pub(crate) fn not_found(label: &str) -> HandlerError {
    HandlerError::NotFound(format!("{} not found", label))
}
