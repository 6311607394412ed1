// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Text-to-image generation via the hosted inference service

pub mod client;
pub mod warmup;

pub use client::{
    InferenceClient, InferenceError, InferenceHealth, TextToImage, UpstreamError,
    API_KEY_HEADER, IMAGE_CONTENT_TYPE,
};
pub use warmup::{spawn_keep_warm, warm_once, WarmupReport, WARMUP_PROMPT};
