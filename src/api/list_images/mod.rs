// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Gallery listing API endpoint module
//!
//! Provides GET /api/get-images over the blob store listing.

pub mod handler;
pub mod response;

pub use handler::{list_images_handler, load_records};
pub use response::{newest_first, ImageRecord};
