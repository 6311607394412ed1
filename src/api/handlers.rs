// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::version;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            version: version::VERSION_NUMBER.to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// GET /health - Liveness of this server only; upstreams are not probed
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
