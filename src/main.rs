// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use ai_gallery::{
    api::{start_server, AppState},
    config::GalleryConfig,
    inference::{spawn_keep_warm, InferenceClient, TextToImage},
    logging,
    storage::BlobClient,
    version,
};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    logging::init(logging::SERVER_DEFAULT_LEVEL);

    info!("Starting {}", version::get_version_string());

    let config = GalleryConfig::from_env().context("Invalid configuration")?;

    let inference: Arc<dyn TextToImage> = Arc::new(
        InferenceClient::new(&config.inference).context("Failed to build inference client")?,
    );
    info!("Inference service: {}", config.inference.generate_url);

    let blob_store =
        BlobClient::create(&config.blob).context("Failed to initialize blob store")?;

    let keep_warm = if config.keep_warm.enabled {
        Some(spawn_keep_warm(inference.clone(), config.keep_warm.interval))
    } else {
        info!("Keep-warm disabled");
        None
    };

    let state = AppState::new(inference, blob_store);
    let result = start_server(config.listen_addr, state).await;

    if let Some(handle) = keep_warm {
        handle.abort();
    }

    info!("Goodbye");
    result
}
