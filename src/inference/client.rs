// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP client for the hosted text-to-image service

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info};
use url::Url;

use crate::config::InferenceConfig;

/// Header carrying the inference credential
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Media type requested from and returned by the inference service
pub const IMAGE_CONTENT_TYPE: &str = "image/jpeg";

/// Non-success answer from the inference service
#[derive(Debug, Error)]
#[error("HTTP error status: {status} error message: {body}")]
pub struct UpstreamError {
    pub status: u16,
    pub body: String,
}

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid inference url: {0}")]
    InvalidUrl(String),
}

/// Body of the inference service health endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InferenceHealth {
    pub status: String,
    pub timestamp: String,
}

/// Anything that turns a prompt into image bytes
#[async_trait]
pub trait TextToImage: Send + Sync {
    /// Generate one image for the prompt, returning the raw JPEG payload
    async fn generate(&self, prompt: &str) -> Result<Bytes, InferenceError>;

    /// Query the service health endpoint
    async fn health(&self) -> Result<InferenceHealth, InferenceError>;
}

/// Client for the hosted generate/health endpoints
pub struct InferenceClient {
    client: Client,
    generate_url: Url,
    health_url: Url,
    api_key: String,
}

impl InferenceClient {
    /// Create a new InferenceClient
    ///
    /// No request timeout is configured; the transport defaults apply.
    pub fn new(config: &InferenceConfig) -> Result<Self, InferenceError> {
        let generate_url = Url::parse(&config.generate_url)
            .map_err(|e| InferenceError::InvalidUrl(format!("{}: {}", config.generate_url, e)))?;
        let health_url = Url::parse(&config.health_url)
            .map_err(|e| InferenceError::InvalidUrl(format!("{}: {}", config.health_url, e)))?;
        let client = Client::builder().build()?;

        info!(
            "Inference client configured: generate={}, health={}",
            generate_url, health_url
        );

        Ok(Self {
            client,
            generate_url,
            health_url,
            api_key: config.api_key.clone(),
        })
    }

    /// Build the generate URL with the prompt as a query parameter
    pub fn generate_request_url(&self, prompt: &str) -> Url {
        let mut url = self.generate_url.clone();
        url.query_pairs_mut().clear().append_pair("prompt", prompt);
        url
    }
}

#[async_trait]
impl TextToImage for InferenceClient {
    async fn generate(&self, prompt: &str) -> Result<Bytes, InferenceError> {
        let url = self.generate_request_url(prompt);
        debug!("Requested url: {}", url);

        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(header::ACCEPT, IMAGE_CONTENT_TYPE)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            error!("Inference service returned {}: {}", status, body);
            return Err(UpstreamError { status, body }.into());
        }

        let image = response.bytes().await?;
        debug!("Inference service returned {} bytes", image.len());
        Ok(image)
    }

    async fn health(&self) -> Result<InferenceHealth, InferenceError> {
        let response = self.client.get(self.health_url.clone()).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError { status, body }.into());
        }

        Ok(response.json::<InferenceHealth>().await?)
    }
}
