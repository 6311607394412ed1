// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("a submission is already in flight")]
    SubmissionInFlight,
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("generation rejected: {0}")]
    Rejected(String),
    #[error("image {url} is not loadable (status {status})")]
    NotLoadable { url: String, status: u16 },
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}
