// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Gallery client state machine
//!
//! Three flags drive the page: the feed is loading, a submission is in
//! flight, and a just-created image is waiting to be announced.

use serde::{Deserialize, Serialize};

use super::error::GalleryError;

/// One listing entry as the client consumes it; other fields are ignored
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GalleryImage {
    pub url: String,
}

impl GalleryImage {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// How a submission settled
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// The handler returned a URL and the image loaded
    Created(String),
    /// Anything else; the failure has already been logged
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GalleryState {
    prompt: String,
    loading_feed: bool,
    loading_submission: bool,
    created_image: Option<String>,
    images: Vec<GalleryImage>,
}

impl Default for GalleryState {
    fn default() -> Self {
        Self::new()
    }
}

impl GalleryState {
    /// State right after mount: the feed is loading and nothing is listed
    pub fn new() -> Self {
        Self {
            prompt: String::new(),
            loading_feed: true,
            loading_submission: false,
            created_image: None,
            images: Vec::new(),
        }
    }

    /// State for an already resolved listing
    pub fn with_images(images: Vec<GalleryImage>) -> Self {
        let mut state = Self::new();
        state.apply_listing(Ok::<_, ()>(images));
        state
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn loading_feed(&self) -> bool {
        self.loading_feed
    }

    pub fn loading_submission(&self) -> bool {
        self.loading_submission
    }

    pub fn created_image(&self) -> Option<&str> {
        self.created_image.as_deref()
    }

    pub fn images(&self) -> &[GalleryImage] {
        &self.images
    }

    /// The prompt form is inert while a submission is in flight
    pub fn input_disabled(&self) -> bool {
        self.loading_submission
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    pub fn begin_feed_refresh(&mut self) {
        self.loading_feed = true;
    }

    /// Settle a listing fetch; a failed fetch keeps the previous images
    pub fn apply_listing<E>(&mut self, listing: Result<Vec<GalleryImage>, E>) {
        if let Ok(images) = listing {
            self.images = images;
        }
        self.loading_feed = false;
    }

    /// Lock the form and hand back the prompt to send
    pub fn begin_submission(&mut self) -> Result<String, GalleryError> {
        if self.loading_submission {
            return Err(GalleryError::SubmissionInFlight);
        }
        self.loading_submission = true;
        Ok(self.prompt.clone())
    }

    /// Unlock the form; the prompt is cleared whatever the outcome
    pub fn finish_submission(&mut self, outcome: SubmissionOutcome) {
        if let SubmissionOutcome::Created(url) = outcome {
            self.created_image = Some(url);
        }
        self.prompt.clear();
        self.loading_submission = false;
    }

    pub fn dismiss_toast(&mut self) {
        self.created_image = None;
    }
}
