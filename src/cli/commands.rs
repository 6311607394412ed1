// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Subcommand implementations

use anyhow::{bail, Context, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::info;

use crate::config::GalleryConfig;
use crate::gallery::{render_page, GalleryClient};
use crate::inference::{warm_once, InferenceClient};

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Text prompt describing the image
    pub prompt: String,
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Write the page here instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

pub async fn generate(server: &str, args: GenerateArgs) -> Result<()> {
    let mut client = GalleryClient::new(server)?;
    match client.submit(&args.prompt).await? {
        Some(url) => {
            println!("{}", url);
            Ok(())
        }
        None => bail!("Failed to generate image"),
    }
}

pub async fn list(server: &str) -> Result<()> {
    let mut client = GalleryClient::new(server)?;
    client.mount().await;

    for image in client.state().images() {
        println!("{}", image.url);
    }
    info!("{} images", client.state().images().len());
    Ok(())
}

pub async fn render(server: &str, args: RenderArgs) -> Result<()> {
    let mut client = GalleryClient::new(server)?;
    client.mount().await;
    let html = render_page(client.state())?;

    match args.output {
        Some(path) => {
            tokio::fs::write(&path, html)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Rendered gallery to {}", path.display());
        }
        None => println!("{}", html),
    }
    Ok(())
}

/// Uses the server's own environment (API_KEY, INFERENCE_URL, ...)
pub async fn warm() -> Result<()> {
    let config = GalleryConfig::from_env()?;
    let client = InferenceClient::new(&config.inference)?;

    let report = warm_once(&client).await;
    if !report.is_warm() {
        bail!("Inference service did not warm up");
    }
    println!(
        "Inference service warm ({} bytes generated)",
        report.generated_bytes.unwrap_or_default()
    );
    Ok(())
}
