// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTML rendering of the gallery page and its feed fragment

use askama::Template;

use super::state::GalleryState;

/// Placeholder cards shown while the feed loads
pub const SKELETON_CARDS: usize = 6;

#[derive(Template)]
#[template(path = "gallery/page.html")]
struct PageTemplate<'a> {
    state: &'a GalleryState,
    skeletons: Vec<usize>,
}

#[derive(Template)]
#[template(path = "gallery/feed.html")]
struct FeedTemplate<'a> {
    state: &'a GalleryState,
    skeletons: Vec<usize>,
}

fn skeleton_slots() -> Vec<usize> {
    (0..SKELETON_CARDS).collect()
}

/// Full page: header, feed, prompt form, overlay and toast
pub fn render_page(state: &GalleryState) -> Result<String, askama::Error> {
    PageTemplate {
        state,
        skeletons: skeleton_slots(),
    }
    .render()
}

/// The `#feed` element alone, swapped in by the page script
pub fn render_feed(state: &GalleryState) -> Result<String, askama::Error> {
    FeedTemplate {
        state,
        skeletons: skeleton_slots(),
    }
    .render()
}
