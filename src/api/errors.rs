// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

use crate::inference::InferenceError;
use crate::storage::StorageError;

/// The only failure message callers ever see
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to process request";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Inference failed: {0}")]
    Inference(#[from] InferenceError),
    #[error("Storage failed: {0}")]
    Storage(#[from] StorageError),
    #[error("Render failed: {0}")]
    Render(String),
    #[error("Not found: {0}")]
    NotFound(String),
}

impl ApiError {
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::InvalidRequest(_) => "invalid_request",
            ApiError::Inference(InferenceError::Upstream(_)) => "upstream_error",
            ApiError::Inference(_) => "inference_error",
            ApiError::Storage(_) => "storage_error",
            ApiError::Render(_) => "render_error",
            ApiError::NotFound(_) => "not_found",
        }
    }

    /// Everything except a missing resource collapses to 500
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        let error = match self {
            ApiError::NotFound(_) => "Not found".to_string(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        };
        ErrorResponse {
            success: false,
            error,
        }
    }
}

impl From<askama::Error> for ApiError {
    fn from(e: askama::Error) -> Self {
        ApiError::Render(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error_type = self.error_type(), "{}", self);
        } else {
            warn!(error_type = self.error_type(), "{}", self);
        }

        (status, Json(self.to_response())).into_response()
    }
}
