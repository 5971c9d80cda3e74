// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use axum::{
    body::Bytes,
    extract::{Path, Query, Request as AxumRequest, State},
    http::{header::AUTHORIZATION, Method, StatusCode},
    middleware::{from_fn_with_state, Next},
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;

use lms_store::config::ID_FIELD;
use lms_store::resource::{Endpoint, Reply, ResourceContext, Status, Verb};
use lms_store::seed::demo_document;
use lms_store::{DocumentStore, JsonFileStore, StoreError, StoreResult};
use serde_json::Value;

use crate::api::HealthResponse;
use crate::config::NodeConfig;
use crate::errors::ApiError;
use crate::routes::{addresses_records, catalog, LOGIN_PATH};
use crate::telemetry::{self, MeteredStore};

/// One context for the whole node. The lock serializes request cycles
/// inside this process; other processes writing the same file are not
/// coordinated with.
pub type SharedContext = Arc<Mutex<ResourceContext>>;

#[derive(Clone)]
struct EndpointState {
    ctx: SharedContext,
    path: &'static str,
    endpoint: Arc<Endpoint>,
}

/// Opens the configured document file, seeding it first if asked to.
pub fn build_context(cfg: &NodeConfig) -> StoreResult<SharedContext> {
    let store = JsonFileStore::with_mode(&cfg.db_path, cfg.write_mode);

    if !cfg.db_path.exists() {
        if cfg.seed_if_missing {
            if let Some(parent) = cfg.db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|source| StoreError::StorageUnavailable {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            store.save(&demo_document())?;
            tracing::info!("Seeded demo document at {:?}", cfg.db_path);
        } else {
            tracing::warn!("No document at {:?}; requests will fail until it exists", cfg.db_path);
        }
    }

    let store: Arc<dyn DocumentStore> = Arc::new(MeteredStore::new(store));
    Ok(Arc::new(Mutex::new(ResourceContext::new(store, cfg.id_policy))))
}

async fn auth_guard(
    State(token): State<Arc<String>>,
    req: AxumRequest,
    next: Next,
) -> Result<Response, StatusCode> {
    let provided = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|val| val.to_str().ok())
        .and_then(|val| val.strip_prefix("Bearer "));

    if provided == Some(token.as_str()) {
        Ok(next.run(req).await)
    } else {
        Err(StatusCode::UNAUTHORIZED)
    }
}

pub fn build_router(ctx: SharedContext, auth_token: Option<String>) -> Router {
    let mut open = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_handler));
    let mut data = Router::new();

    for (path, endpoint) in catalog() {
        let with_id = addresses_records(&endpoint);
        let state = EndpointState {
            ctx: ctx.clone(),
            path,
            endpoint: Arc::new(endpoint),
        };
        if with_id {
            // `/api/courses/2` is `/api/courses?id=2`.
            data = data.route(&format!("{}/:id", path), any(dispatch_with_id).with_state(state.clone()));
        }
        let route = any(dispatch).with_state(state);
        if path == LOGIN_PATH {
            open = open.route(path, route);
        } else {
            data = data.route(path, route);
        }
    }

    if let Some(token) = auth_token {
        tracing::info!("Auth Enabled: Bearer token required");
        data = data.layer(from_fn_with_state(Arc::new(token), auth_guard));
    } else {
        tracing::warn!("Auth Disabled: No token configured");
    }

    open.merge(data).layer(CorsLayer::permissive())
}

fn parse_body(bytes: &[u8]) -> Result<Option<Value>, ApiError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(bytes)
        .map(Some)
        .map_err(|e| ApiError::InvalidInput(format!("Malformed JSON body: {}", e)))
}

fn reply_response(reply: Reply) -> Response {
    let status = match reply.status {
        Status::Ok => StatusCode::OK,
        Status::Created => StatusCode::CREATED,
    };
    (status, Json(reply.body)).into_response()
}

async fn dispatch(
    State(state): State<EndpointState>,
    method: Method,
    Query(query): Query<BTreeMap<String, String>>,
    body: Bytes,
) -> Response {
    run(state, method, query, body).await
}

async fn dispatch_with_id(
    State(state): State<EndpointState>,
    method: Method,
    Path(id): Path<String>,
    Query(mut query): Query<BTreeMap<String, String>>,
    body: Bytes,
) -> Response {
    query.insert(ID_FIELD.to_string(), id);
    run(state, method, query, body).await
}

async fn run(state: EndpointState, method: Method, query: BTreeMap<String, String>, body: Bytes) -> Response {
    let started = Instant::now();

    // Unsupported verbs get their 405 before the body is looked at.
    let answered = Verb::parse(method.as_str()).filter(|v| state.endpoint.allowed().contains(v));
    let result = match answered.map(|_| parse_body(&body)) {
        None => Err(ApiError::from(state.endpoint.method_not_allowed(method.as_str()))),
        Some(Err(e)) => Err(e),
        Some(Ok(body)) => {
            let ctx = state.ctx.lock().await;
            state
                .endpoint
                .dispatch(&ctx, method.as_str(), query, body)
                .map_err(ApiError::from)
        }
    };

    let response = match result {
        Ok(reply) => reply_response(reply),
        Err(e) => e.into_response(),
    };
    let status = response.status().as_u16();
    let seconds = started.elapsed().as_secs_f64();
    tracing::debug!("{} {} -> {} ({:.3}ms)", method, state.path, status, seconds * 1000.0);
    telemetry::record_request(state.path, status, seconds);
    response
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

async fn metrics_handler() -> String {
    telemetry::get_metrics()
}
