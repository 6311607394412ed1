// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image generation request types and validation

use serde::{Deserialize, Serialize};

/// Request for image generation via POST /api/generate-image
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateImageRequest {
    /// Free-text prompt describing the desired image
    #[serde(default)]
    pub text: Option<String>,
}

impl GenerateImageRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    /// Validate the request, returning the prompt to forward
    pub fn validate(&self) -> Result<&str, String> {
        match self.text.as_deref() {
            None => Err("text is required".to_string()),
            Some(text) if text.trim().is_empty() => Err("text must not be empty".to_string()),
            Some(text) => Ok(text),
        }
    }
}
