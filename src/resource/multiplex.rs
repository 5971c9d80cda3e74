// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Several collections behind one endpoint, picked by a query discriminator
//! such as `?type=course`.

use serde_json::{Map, Value};

use crate::collection;
use crate::error::{HandlerError, HandlerResult};
use crate::resource::{CollectionResource, Reply, Request, ResourceContext, Verb};

#[derive(Debug, Clone)]
pub struct Variant {
    /// Discriminator value selecting this variant.
    pub name: String,
    pub resource: CollectionResource,
}

impl Variant {
    pub fn new(name: impl Into<String>, resource: CollectionResource) -> Self {
        Self {
            name: name.into(),
            resource,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MultiplexResource {
    pub discriminator: String,
    pub variants: Vec<Variant>,
    /// Collections returned by a GET that names no variant.
    pub default_view: Vec<String>,
}

impl MultiplexResource {
    pub fn new(discriminator: impl Into<String>) -> Self {
        Self {
            discriminator: discriminator.into(),
            variants: Vec::new(),
            default_view: Vec::new(),
        }
    }

    pub fn variant(mut self, name: impl Into<String>, resource: CollectionResource) -> Self {
        self.variants.push(Variant::new(name, resource));
        self
    }

    pub fn default_view(mut self, collections: &[&str]) -> Self {
        self.default_view = collections.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn allowed(&self) -> Vec<Verb> {
        Verb::ALL
            .into_iter()
            .filter(|v| *v == Verb::Get || self.variants.iter().any(|var| var.resource.verbs.contains(v)))
            .collect()
    }

    fn selected(&self, req: &Request) -> Option<&Variant> {
        let name = req.query.get(&self.discriminator)?;
        self.variants
            .iter()
            .find(|v| v.name == *name && v.resource.verbs.contains(&req.verb))
    }

    pub fn handle(&self, ctx: &ResourceContext, req: &Request) -> HandlerResult<Reply> {
        match (req.verb, self.selected(req)) {
            (Verb::Get, Some(variant)) => {
                let mut view = Map::new();
                view.insert(
                    variant.resource.collection.clone(),
                    Value::Array(variant.resource.list(ctx, req)?),
                );
                Ok(Reply::ok(Value::Object(view)))
            }
            (Verb::Get, None) => self.default(ctx),
            (_, Some(variant)) => variant.resource.handle(ctx, req),
            (verb, None) => Err(HandlerError::InvalidRequest(format!(
                "Invalid type for {} request",
                verb
            ))),
        }
    }

    fn default(&self, ctx: &ResourceContext) -> HandlerResult<Reply> {
        let doc = ctx.load()?;
        let mut view = Map::new();
        for name in &self.default_view {
            let records = doc.collection(name)?;
            view.insert(name.clone(), Value::Array(collection::list(records, &[])));
        }
        Ok(Reply::ok(Value::Object(view)))
    }
}
