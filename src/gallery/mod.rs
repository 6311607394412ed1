// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Gallery client: state, rendering and the HTTP driver

pub mod client;
pub mod error;
pub mod render;
pub mod state;

pub use client::GalleryClient;
pub use error::GalleryError;
pub use render::{render_feed, render_page, SKELETON_CARDS};
pub use state::{GalleryImage, GalleryState, SubmissionOutcome};
