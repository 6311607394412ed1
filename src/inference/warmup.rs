// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Periodic warm-up of the inference service
//!
//! The hosted service scales to zero when idle. Each tick checks its health
//! endpoint and issues one throwaway generation so the next user request does
//! not pay the cold start.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use super::client::TextToImage;

/// Prompt used for the throwaway generation
pub const WARMUP_PROMPT: &str = "a single sparkle on a plain background";

/// Outcome of one warm-up tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WarmupReport {
    /// Timestamp reported by the health endpoint, if it answered
    pub health_timestamp: Option<String>,
    /// Size of the generated image, if generation succeeded
    pub generated_bytes: Option<usize>,
}

impl WarmupReport {
    pub fn is_warm(&self) -> bool {
        self.health_timestamp.is_some() && self.generated_bytes.is_some()
    }
}

/// Run a single health check plus warm-up generation
pub async fn warm_once(client: &dyn TextToImage) -> WarmupReport {
    let mut report = WarmupReport::default();

    match client.health().await {
        Ok(health) => {
            info!("Health check at {} ({})", health.timestamp, health.status);
            report.health_timestamp = Some(health.timestamp);
        }
        Err(e) => warn!("Inference health check failed: {}", e),
    }

    match client.generate(WARMUP_PROMPT).await {
        Ok(image) => {
            info!(
                "Generate endpoint warmed at {} ({} bytes)",
                chrono::Utc::now().to_rfc3339(),
                image.len()
            );
            report.generated_bytes = Some(image.len());
        }
        Err(e) => warn!("Inference warm-up generation failed: {}", e),
    }

    report
}

/// Spawn the keep-warm loop; the first tick fires after one full interval
pub fn spawn_keep_warm(client: Arc<dyn TextToImage>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!("Keep-warm task started: interval={:?}", interval);
        loop {
            ticker.tick().await;
            let report = warm_once(client.as_ref()).await;
            if !report.is_warm() {
                warn!("Keep-warm tick incomplete: {:?}", report);
            }
        }
    })
}
