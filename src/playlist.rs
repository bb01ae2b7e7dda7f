#![forbid(unsafe_code)]

//! Projects the visible videos into selectable playlist entries.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::catalog::Video;

/// A rendered playlist row. `href` is the in-page link (`#<tag>`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaylistEntry {
    pub tag_name: String,
    pub title: String,
    pub href: String,
    pub published_at: DateTime<Utc>,
    pub active: bool,
}

/// Address bar fragment for a tag.
pub fn fragment_for(tag_name: &str) -> String {
    format!("#{tag_name}")
}

/// Renders one entry per video in input order. At most one entry is active:
/// the one whose tag equals `current_tag`.
pub fn render_playlist(videos: &[Video], current_tag: Option<&str>) -> Vec<PlaylistEntry> {
    videos
        .iter()
        .map(|video| PlaylistEntry {
            tag_name: video.tag_name.clone(),
            title: video.title.clone(),
            href: fragment_for(&video.tag_name),
            published_at: video.published_at,
            active: current_tag == Some(video.tag_name.as_str()),
        })
        .collect()
}

/// Renders entries as `<li>` items for server-side page rendering.
pub fn render_playlist_html(entries: &[PlaylistEntry]) -> String {
    let mut html = String::new();
    for entry in entries {
        let class = if entry.active { " class=\"active\"" } else { "" };
        html.push_str(&format!(
            "<li{class} data-tag=\"{tag}\"><a href=\"{href}\">{title}</a> <time datetime=\"{iso}\">{date}</time></li>\n",
            tag = escape_html(&entry.tag_name),
            href = escape_html(&entry.href),
            title = escape_html(&entry.title),
            iso = entry.published_at.to_rfc3339(),
            date = entry.published_at.format("%Y-%m-%d"),
        ));
    }
    html
}

pub(crate) fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::video;

    #[test]
    fn render_marks_only_current_entry() {
        let videos = vec![video("v1", 1), video("v2", 2), video("v3", 3)];
        let entries = render_playlist(&videos, Some("v2"));
        assert_eq!(entries.len(), 3);
        let active: Vec<_> = entries.iter().filter(|e| e.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].tag_name, "v2");
        assert_eq!(active[0].href, "#v2");
    }

    #[test]
    fn render_without_selection_marks_nothing() {
        let videos = vec![video("v1", 1)];
        assert!(render_playlist(&videos, None).iter().all(|e| !e.active));
        assert!(render_playlist(&videos, Some("gone")).iter().all(|e| !e.active));
    }

    #[test]
    fn render_empty_is_empty() {
        assert!(render_playlist(&[], Some("v1")).is_empty());
        assert!(render_playlist_html(&[]).is_empty());
    }

    #[test]
    fn render_html_escapes_titles() {
        let mut item = video("v1", 1);
        item.title = "<script>alert('x')</script> & more".into();
        let html = render_playlist_html(&render_playlist(&[item], Some("v1")));
        assert!(html.contains("class=\"active\""));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; more"));
        assert!(html.contains("href=\"#v1\""));
        assert!(html.contains("2024-01-01"));
    }
}
