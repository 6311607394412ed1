// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod cli;
pub mod config;
pub mod gallery;
pub mod inference;
pub mod logging;
pub mod storage;
pub mod version;

// Re-export main types
pub use api::{create_app, AppState};
pub use config::GalleryConfig;
pub use inference::{InferenceClient, TextToImage};
pub use storage::{BlobClient, BlobStore};
