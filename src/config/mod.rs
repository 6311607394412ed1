// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Server configuration loaded from environment variables

use std::env;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

/// Generate endpoint of the hosted text-to-image service
pub const DEFAULT_INFERENCE_URL: &str =
    "https://obay-developer--sd-demo-model-generate-image.modal.run/";

/// Health endpoint of the hosted text-to-image service
pub const DEFAULT_INFERENCE_HEALTH_URL: &str =
    "https://obay-developer--sd-demo-model-health.modal.run/";

pub const DEFAULT_BLOB_API_URL: &str = "https://blob.vercel-storage.com";
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_KEEP_WARM_INTERVAL_SECS: u64 = 3600;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

/// Which blob store implementation backs the gallery
#[derive(Debug, Clone, PartialEq)]
pub enum BlobBackendConfig {
    /// In-process store, objects served from `/blobs/*`
    Memory { public_base_url: String },
    /// Managed blob store reached over its REST API
    Http { api_url: String, token: String },
}

/// Inference service settings
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    pub generate_url: String,
    pub health_url: String,
    pub api_key: String,
}

/// Periodic warm-up of the inference service
#[derive(Debug, Clone)]
pub struct KeepWarmConfig {
    pub enabled: bool,
    pub interval: Duration,
}

#[derive(Debug, Clone)]
pub struct GalleryConfig {
    pub listen_addr: SocketAddr,
    pub inference: InferenceConfig,
    pub blob: BlobBackendConfig,
    pub keep_warm: KeepWarmConfig,
}

impl GalleryConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("API_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("API_KEY"))?;

        let listen_addr = lookup("LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                var: "LISTEN_ADDR",
                message: e.to_string(),
            })?;

        let blob = match lookup("BLOB_BACKEND")
            .map(|v| v.to_lowercase())
            .as_deref()
        {
            None | Some("memory") => BlobBackendConfig::Memory {
                public_base_url: lookup("PUBLIC_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_PUBLIC_BASE_URL.to_string())
                    .trim_end_matches('/')
                    .to_string(),
            },
            Some("http") => BlobBackendConfig::Http {
                api_url: lookup("BLOB_API_URL")
                    .unwrap_or_else(|| DEFAULT_BLOB_API_URL.to_string())
                    .trim_end_matches('/')
                    .to_string(),
                token: lookup("BLOB_READ_WRITE_TOKEN")
                    .filter(|v| !v.trim().is_empty())
                    .ok_or(ConfigError::Missing("BLOB_READ_WRITE_TOKEN"))?,
            },
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "BLOB_BACKEND",
                    message: format!("expected 'memory' or 'http', got '{}'", other),
                })
            }
        };

        let interval_secs = match lookup("KEEP_WARM_INTERVAL_SECS") {
            Some(v) => v.parse::<u64>().map_err(|e| ConfigError::Invalid {
                var: "KEEP_WARM_INTERVAL_SECS",
                message: e.to_string(),
            })?,
            None => DEFAULT_KEEP_WARM_INTERVAL_SECS,
        };

        let config = Self {
            listen_addr,
            inference: InferenceConfig {
                generate_url: lookup("INFERENCE_URL")
                    .unwrap_or_else(|| DEFAULT_INFERENCE_URL.to_string()),
                health_url: lookup("INFERENCE_HEALTH_URL")
                    .unwrap_or_else(|| DEFAULT_INFERENCE_HEALTH_URL.to_string()),
                api_key,
            },
            blob,
            keep_warm: KeepWarmConfig {
                enabled: lookup("KEEP_WARM_ENABLED")
                    .map(|v| v.to_lowercase() == "true" || v == "1")
                    .unwrap_or(false),
                interval: Duration::from_secs(interval_secs),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (var, value) in [
            ("INFERENCE_URL", &self.inference.generate_url),
            ("INFERENCE_HEALTH_URL", &self.inference.health_url),
        ] {
            url::Url::parse(value).map_err(|e| ConfigError::Invalid {
                var,
                message: e.to_string(),
            })?;
        }
        if self.keep_warm.enabled && self.keep_warm.interval.is_zero() {
            return Err(ConfigError::Invalid {
                var: "KEEP_WARM_INTERVAL_SECS",
                message: "interval must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}
