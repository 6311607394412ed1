// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

pub const DEFAULT_SERVER: &str = "http://localhost:3000";

/// AI Gallery CLI
#[derive(Parser, Debug)]
#[command(name = "gallery-cli")]
#[command(version)]
#[command(about = "Command-line client for an AI Gallery server", long_about = None)]
pub struct Cli {
    /// Base URL of the gallery server
    #[arg(long, env = "GALLERY_SERVER", default_value = DEFAULT_SERVER, global = true)]
    pub server: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate an image from a prompt and print its URL
    Generate(commands::GenerateArgs),

    /// List stored images, newest first
    List,

    /// Render the gallery page for the current listing
    Render(commands::RenderArgs),

    /// Ping the inference service once (health, then a small generation)
    Warm,
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Generate(args) => commands::generate(&cli.server, args).await,
        Commands::List => commands::list(&cli.server).await,
        Commands::Render(args) => commands::render(&cli.server, args).await,
        Commands::Warm => commands::warm().await,
    }
}
