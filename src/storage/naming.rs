// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Blob names for generated images

use uuid::Uuid;

/// Extension appended to every generated image name
pub const IMAGE_EXTENSION: &str = "jpg";

/// Fresh opaque name for one generated image
pub fn generate_blob_name() -> String {
    format!("{}.{}", Uuid::new_v4(), IMAGE_EXTENSION)
}
