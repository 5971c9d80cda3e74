// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Fixed-shape payloads. Record bodies themselves are free-form JSON.
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct LoginResponse {
    pub token: String,
    pub role: String,
}

/// 404/400 bodies and delete confirmations.
#[derive(Deserialize, Serialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}

/// 401/500 bodies.
#[derive(Deserialize, Serialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct HealthResponse {
    pub status: String,
}
