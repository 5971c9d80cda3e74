// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Credential check against a user collection.
//!
//! The token handed back is the opaque `<role>-token` string dashboards
//! keep in local storage. It is not a session and nothing verifies it.

use serde_json::{json, Value};

use crate::error::{HandlerError, HandlerResult};
use crate::resource::{Reply, Request, ResourceContext};

#[derive(Debug, Clone)]
pub struct LoginResource {
    pub collection: String,
    pub identifier_field: String,
    pub secret_field: String,
    pub role_field: String,
}

impl Default for LoginResource {
    fn default() -> Self {
        Self {
            collection: "users".to_string(),
            identifier_field: "email".to_string(),
            secret_field: "password".to_string(),
            role_field: "role".to_string(),
        }
    }
}

impl LoginResource {
    pub fn handle(&self, ctx: &ResourceContext, req: &Request) -> HandlerResult<Reply> {
        let fields = req.fields()?;
        let identifier = fields.get(&self.identifier_field).and_then(Value::as_str);
        let secret = fields.get(&self.secret_field).and_then(Value::as_str);
        let (Some(identifier), Some(secret)) = (identifier, secret) else {
            return Err(HandlerError::InvalidCredentials);
        };

        let doc = ctx.load()?;
        let records = doc.collection(&self.collection)?;
        let role = records
            .iter()
            .find(|u| {
                u.get(&self.identifier_field).and_then(Value::as_str) == Some(identifier)
                    && u.get(&self.secret_field).and_then(Value::as_str) == Some(secret)
            })
            .and_then(|u| u.get(&self.role_field))
            .and_then(Value::as_str)
            .ok_or(HandlerError::InvalidCredentials)?;

        tracing::debug!("Login accepted for {} as {}", identifier, role);
        Ok(Reply::ok(json!({
            "token": format!("{}-token", role),
            "role": role,
        })))
    }
}
