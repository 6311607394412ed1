// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image generation endpoint handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::{debug, info};

use super::request::GenerateImageRequest;
use super::response::GenerateImageResponse;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::storage::{generate_blob_name, PutOptions};

/// POST /api/generate-image - Generate an image from a text prompt
///
/// Pipeline:
/// 1. Parse and validate the body
/// 2. Fetch the image from the inference service
/// 3. Upload it under a fresh name with public access
/// 4. Return the public URL
///
/// Any failure becomes the same generic 500 body.
pub async fn generate_image_handler(
    State(state): State<AppState>,
    payload: Result<Json<GenerateImageRequest>, JsonRejection>,
) -> Result<Json<GenerateImageResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::InvalidRequest(e.body_text()))?;
    let prompt = request.validate().map_err(ApiError::InvalidRequest)?;

    debug!("Image generation request received: prompt_len={}", prompt.len());

    let image = state.inference.generate(prompt).await?;

    let pathname = generate_blob_name();
    let blob = state
        .blob_store
        .put(&pathname, image, PutOptions::public_jpeg())
        .await?;

    info!(
        "Image generated and stored: pathname={}, size={} bytes",
        blob.pathname, blob.size
    );

    Ok(Json(GenerateImageResponse::succeeded(blob.url)))
}
