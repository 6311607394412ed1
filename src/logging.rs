// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Subscriber setup shared by the server and CLI binaries

use tracing_subscriber::EnvFilter;

pub const SERVER_DEFAULT_LEVEL: &str = "info";
pub const CLI_DEFAULT_LEVEL: &str = "warn";

/// Build a filter from a `RUST_LOG`-style value, falling back to `default`
/// when the value is absent, blank or unparsable
pub fn filter_from(value: Option<&str>, default: &str) -> EnvFilter {
    value
        .filter(|v| !v.trim().is_empty())
        .and_then(|v| EnvFilter::try_new(v).ok())
        .unwrap_or_else(|| EnvFilter::new(default))
}

/// Install the global fmt subscriber reading `RUST_LOG`
pub fn init(default: &str) {
    let filter = filter_from(std::env::var("RUST_LOG").ok().as_deref(), default);
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Same as `init` but writing to stderr, keeping stdout for command output
pub fn init_stderr(default: &str) {
    let filter = filter_from(std::env::var("RUST_LOG").ok().as_deref(), default);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
