#![forbid(unsafe_code)]

//! Episode panel: title, rendered description, and the download / release
//! links for the video that is currently loaded.

use serde::Serialize;

use crate::catalog::Video;
use crate::markdown::MarkdownRenderer;
use crate::release::Asset;

/// Number of non-empty description lines shown while the panel is collapsed.
pub const PREVIEW_LINES: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EpisodeDetail {
    pub tag_name: String,
    pub title: String,
    pub body_html: String,
    pub preview_html: String,
    /// Whether the full body is longer than the preview.
    pub has_more: bool,
    pub expanded: bool,
    pub download_video_url: String,
    pub slide_deck_url: String,
    /// True when `slide_deck_url` points at an actual deck rather than the
    /// release page fallback.
    pub slide_deck_found: bool,
    pub release_page_url: String,
}

/// First slide deck among the owning release's assets.
pub fn find_slide_deck(assets: &[Asset]) -> Option<&Asset> {
    assets.iter().find(|asset| asset.is_slide_deck())
}

/// Builds the panel content for `video`. Deterministic for the same inputs.
pub fn build_detail(
    video: &Video,
    owner_assets: &[Asset],
    renderer: &MarkdownRenderer,
    expanded: bool,
) -> EpisodeDetail {
    let slide_deck = find_slide_deck(owner_assets);
    let slide_deck_url = match slide_deck {
        Some(asset) => asset.browser_download_url.clone(),
        None => video.release_page_url.clone(),
    };

    let (preview, has_more) = preview_source(&video.description, PREVIEW_LINES);

    EpisodeDetail {
        tag_name: video.tag_name.clone(),
        title: video.title.clone(),
        body_html: renderer.render(&video.description),
        preview_html: renderer.render(&preview),
        has_more,
        expanded,
        download_video_url: video.video_url.clone(),
        slide_deck_url,
        slide_deck_found: slide_deck.is_some(),
        release_page_url: video.release_page_url.clone(),
    }
}

fn preview_source(body: &str, max_lines: usize) -> (String, bool) {
    let mut lines = body.lines().filter(|line| !line.trim().is_empty());
    let preview: Vec<&str> = lines.by_ref().take(max_lines).collect();
    let has_more = lines.next().is_some();
    (preview.join("\n"), has_more)
}
