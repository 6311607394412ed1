// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Gallery listing response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::BlobObject;

/// One stored image as returned by GET /api/get-images
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    pub url: String,
    pub pathname: String,
    pub uploaded_at: DateTime<Utc>,
    pub size: u64,
}

impl From<BlobObject> for ImageRecord {
    fn from(blob: BlobObject) -> Self {
        Self {
            url: blob.url,
            pathname: blob.pathname,
            uploaded_at: blob.uploaded_at,
            size: blob.size,
        }
    }
}

/// Order records newest first; ties fall back to pathname for a stable order
pub fn newest_first(mut records: Vec<ImageRecord>) -> Vec<ImageRecord> {
    records.sort_by(|a, b| {
        b.uploaded_at
            .cmp(&a.uploaded_at)
            .then_with(|| a.pathname.cmp(&b.pathname))
    });
    records
}
