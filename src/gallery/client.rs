// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Gallery client driving the state machine against a running server

use reqwest::Client;
use tracing::{debug, error, info};
use url::Url;

use super::error::GalleryError;
use super::state::{GalleryImage, GalleryState, SubmissionOutcome};
use crate::api::generate_image::{GenerateImageRequest, GenerateImageResponse};

pub const GENERATE_PATH: &str = "/api/generate-image";
pub const LISTING_PATH: &str = "/api/get-images";

pub struct GalleryClient {
    http: Client,
    server: Url,
    state: GalleryState,
}

impl GalleryClient {
    pub fn new(server: &str) -> Result<Self, GalleryError> {
        let server =
            Url::parse(server).map_err(|e| GalleryError::InvalidUrl(format!("{}: {}", server, e)))?;
        let http = Client::builder().build()?;

        Ok(Self {
            http,
            server,
            state: GalleryState::new(),
        })
    }

    pub fn state(&self) -> &GalleryState {
        &self.state
    }

    fn endpoint(&self, path: &str) -> Result<Url, GalleryError> {
        self.server
            .join(path)
            .map_err(|e| GalleryError::InvalidUrl(format!("{}: {}", path, e)))
    }

    /// Initial load of the listing
    pub async fn mount(&mut self) {
        self.refresh().await;
    }

    /// Re-fetch the listing; failures are logged and leave the current images
    pub async fn refresh(&mut self) {
        self.state.begin_feed_refresh();
        let listing = self.fetch_listing().await;
        if let Err(ref e) = listing {
            error!("Error fetching images: {}", e);
        }
        self.state.apply_listing(listing);
    }

    async fn fetch_listing(&self) -> Result<Vec<GalleryImage>, GalleryError> {
        let response = self
            .http
            .get(self.endpoint(LISTING_PATH)?)
            .send()
            .await?
            .error_for_status()?;
        let images = response.json::<Vec<GalleryImage>>().await?;
        debug!("Listing returned {} images", images.len());
        Ok(images)
    }

    /// Submit `prompt`, returning the created image URL when the whole flow succeeded
    ///
    /// Only a submission already in flight is reported as an error; every
    /// other failure is logged and yields `Ok(None)`.
    pub async fn submit(&mut self, prompt: &str) -> Result<Option<String>, GalleryError> {
        self.state.set_prompt(prompt);
        let text = self.state.begin_submission()?;

        let outcome = match self.generate(&text).await {
            Ok(Some(url)) => match self.preload(&url).await {
                Ok(()) => SubmissionOutcome::Created(url),
                Err(e) => {
                    error!("Error: {}", e);
                    SubmissionOutcome::Failed
                }
            },
            Ok(None) => SubmissionOutcome::Failed,
            Err(e) => {
                error!("Error: {}", e);
                SubmissionOutcome::Failed
            }
        };

        let created = match outcome {
            SubmissionOutcome::Created(ref url) => Some(url.clone()),
            SubmissionOutcome::Failed => None,
        };
        self.state.finish_submission(outcome);

        if let Some(ref url) = created {
            info!("Image created: {}", url);
            self.refresh().await;
        }

        Ok(created)
    }

    async fn generate(&self, text: &str) -> Result<Option<String>, GalleryError> {
        let response = self
            .http
            .post(self.endpoint(GENERATE_PATH)?)
            .json(&GenerateImageRequest::new(text))
            .send()
            .await?;

        let body = response.json::<GenerateImageResponse>().await?;
        if !body.success {
            return Err(GalleryError::Rejected(
                body.error
                    .unwrap_or_else(|| "Failed to generate image".to_string()),
            ));
        }

        Ok(body.image_url)
    }

    /// Confirm the image is loadable before announcing it
    pub async fn preload(&self, url: &str) -> Result<(), GalleryError> {
        let target = self
            .server
            .join(url)
            .map_err(|e| GalleryError::InvalidUrl(format!("{}: {}", url, e)))?;
        let response = self.http.get(target).send().await?;

        if !response.status().is_success() {
            return Err(GalleryError::NotLoadable {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        // Drain the body so a truncated image counts as a failure
        response.bytes().await?;
        Ok(())
    }
}
