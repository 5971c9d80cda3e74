// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use axum::http::header::ALLOW;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use lms_store::resource::Verb;
use lms_store::HandlerError;
use thiserror::Error;

use crate::api::{ErrorResponse, MessageResponse};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Handler(#[from] HandlerError),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

fn allow_header(allow: &[Verb]) -> HeaderValue {
    let joined = allow.iter().map(Verb::as_str).collect::<Vec<_>>().join(", ");
    HeaderValue::from_str(&joined).unwrap_or_else(|_| HeaderValue::from_static(""))
}

fn message(status: StatusCode, message: String) -> Response {
    (status, Json(MessageResponse { message })).into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Handler(err) => match err {
                HandlerError::NotFound(msg) => message(StatusCode::NOT_FOUND, msg),
                HandlerError::InvalidRequest(msg) => message(StatusCode::BAD_REQUEST, msg),
                HandlerError::InvalidCredentials => (
                    StatusCode::UNAUTHORIZED,
                    Json(ErrorResponse {
                        error: "Invalid credentials".to_string(),
                    }),
                )
                    .into_response(),
                HandlerError::MethodNotAllowed { ref allow, .. } => {
                    let body = err.to_string();
                    let mut response = (StatusCode::METHOD_NOT_ALLOWED, body).into_response();
                    response.headers_mut().insert(ALLOW, allow_header(allow));
                    response
                }
                HandlerError::StorageFault(e) => {
                    tracing::error!("Storage fault: {}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(ErrorResponse {
                            error: "Internal server error".to_string(),
                        }),
                    )
                        .into_response()
                }
            },
            ApiError::InvalidInput(msg) => message(StatusCode::BAD_REQUEST, msg),
        }
    }
}
