#![forbid(unsafe_code)]

//! Video catalog derived from the release feed, plus the filter and sort
//! transforms applied to it before rendering.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::release::{Asset, Release};

/// One playable episode.
///
/// `tag_name` is the stable identifier used for the address bar fragment and
/// the "currently playing" lookup. It is never empty and unique across the
/// catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Video {
    pub title: String,
    pub description: String,
    pub video_url: String,
    pub published_at: DateTime<Utc>,
    pub tag_name: String,
    /// Tag of the owning release; differs from `tag_name` only for the extra
    /// videos of a release that ships more than one.
    pub release_tag: String,
    pub release_page_url: String,
}

/// Flattens releases into videos, one per `.mp4` asset.
///
/// Releases without a video asset, without a tag, or repeating a tag seen
/// earlier contribute nothing. No ordering is imposed here.
///
/// Every emitted tag is unique: real release tags are reserved up front, and
/// the extra videos of a release get the first free `<tag>-N` suffix.
pub fn build_catalog(releases: &[Release]) -> Vec<Video> {
    let reserved: HashSet<&str> = releases
        .iter()
        .map(|release| release.tag_name.trim())
        .filter(|tag| !tag.is_empty())
        .collect();
    let mut seen_release_tags = HashSet::new();
    let mut emitted: HashSet<String> = HashSet::new();
    let mut videos = Vec::new();

    for release in releases {
        let tag = release.tag_name.trim();
        if tag.is_empty() {
            warn!(name = %release.name, "skipping release without a tag");
            continue;
        }
        if !seen_release_tags.insert(tag) {
            warn!(tag, "skipping release with duplicate tag");
            continue;
        }

        let mp4s = release.assets.iter().filter(|asset| asset.is_video());
        for (index, asset) in mp4s.enumerate() {
            let tag_name = if index == 0 {
                tag.to_string()
            } else {
                free_suffixed_tag(tag, index + 1, &reserved, &emitted)
            };
            emitted.insert(tag_name.clone());
            videos.push(video_from_asset(release, asset, tag, tag_name));
        }
    }

    debug!(
        releases = releases.len(),
        videos = videos.len(),
        "built video catalog"
    );
    videos
}

fn free_suffixed_tag(
    tag: &str,
    start: usize,
    reserved: &HashSet<&str>,
    emitted: &HashSet<String>,
) -> String {
    let mut suffix = start;
    loop {
        let candidate = format!("{tag}-{suffix}");
        if !reserved.contains(candidate.as_str()) && !emitted.contains(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

fn video_from_asset(
    release: &Release,
    asset: &Asset,
    release_tag: &str,
    tag_name: String,
) -> Video {
    Video {
        title: release.name.clone(),
        description: release.body.clone(),
        video_url: asset.browser_download_url.clone(),
        published_at: release.published_at,
        tag_name,
        release_tag: release_tag.to_string(),
        release_page_url: release.html_url.clone(),
    }
}

/// Case-insensitive substring match on title or description.
///
/// A blank query keeps every video in its current order. Otherwise the query
/// is matched as typed, surrounding whitespace included.
pub fn filter_videos(videos: &[Video], query: &str) -> Vec<Video> {
    if query.trim().is_empty() {
        return videos.to_vec();
    }
    let needle = query.to_lowercase();
    videos
        .iter()
        .filter(|video| {
            video.title.to_lowercase().contains(&needle)
                || video.description.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Orders videos by publish time in place. `ascending` puts the oldest first.
///
/// Both directions use a stable sort on the key itself, so videos published
/// at the same instant keep their relative order either way.
pub fn sort_videos(videos: &mut [Video], ascending: bool) {
    if ascending {
        videos.sort_by(|a, b| a.published_at.cmp(&b.published_at));
    } else {
        videos.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    }
}

/// Finds a video by tag.
pub fn find_video<'a>(videos: &'a [Video], tag_name: &str) -> Option<&'a Video> {
    videos.iter().find(|video| video.tag_name == tag_name)
}
