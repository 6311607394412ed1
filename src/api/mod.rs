// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod errors;
pub mod gallery_page;
pub mod generate_image;
pub mod handlers;
pub mod http_server;
pub mod list_images;

pub use errors::{ApiError, ErrorResponse, GENERIC_FAILURE_MESSAGE};
pub use generate_image::{generate_image_handler, GenerateImageRequest, GenerateImageResponse};
pub use handlers::{health_handler, HealthResponse};
pub use http_server::{create_app, start_server, AppState};
pub use list_images::{list_images_handler, ImageRecord};
