#![forbid(unsafe_code)]

//! Playback and navigation controller.
//!
//! [`AppState`] holds everything the page shows: the catalog in its current
//! sort order, the view settings (query and order), the selection and the
//! playback state. The free functions in this module are pure transforms over
//! that state; [`Controller`] owns the single mutable instance together with
//! the media player and the address bar, and mediates every user command.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::catalog::{Video, build_catalog, filter_videos, find_video, sort_videos};
use crate::detail::{EpisodeDetail, build_detail};
use crate::error::{GalleryError, GalleryResult, PlaybackError};
use crate::markdown::MarkdownHandle;
use crate::playlist::{PlaylistEntry, fragment_for, render_playlist};
use crate::release::{Asset, Release, ReleaseSource};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "error", rename_all = "snake_case")]
pub enum PlaybackState {
    /// Nothing loaded yet.
    #[default]
    Idle,
    /// Source assigned, playback requested.
    Loading,
    Playing,
    PlayFailed(String),
}

/// Whether the release feed could be turned into a catalog at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum CatalogStatus {
    #[default]
    Ready,
    Failed(String),
}

/// What a player reports when asked to start playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayRequest {
    /// Playback is running.
    Started,
    /// The request was handed on; the outcome arrives later through
    /// [`Controller::report_playback`].
    Deferred,
}

/// The media element the selected video is loaded into.
pub trait MediaPlayer {
    fn load(&mut self, url: &str);
    fn play(&mut self) -> Result<PlayRequest, PlaybackError>;
}

/// The address bar: read once at startup, pushed on every selection.
pub trait AddressBar {
    fn fragment(&self) -> Option<String>;
    fn push_fragment(&mut self, fragment: &str);
}

/// Mirror of the page's `<video>` element. The browser performs the actual
/// playback, so every play request is deferred until the page reports back.
#[derive(Debug, Clone, Default)]
pub struct BrowserPlayer {
    source: Option<String>,
}

impl BrowserPlayer {
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

impl MediaPlayer for BrowserPlayer {
    fn load(&mut self, url: &str) {
        self.source = Some(url.to_string());
    }

    fn play(&mut self) -> Result<PlayRequest, PlaybackError> {
        if self.source.is_none() {
            return Err(PlaybackError::new("no source loaded"));
        }
        Ok(PlayRequest::Deferred)
    }
}

/// Mirror of the page's history: the fragment it was opened with plus every
/// fragment pushed since.
#[derive(Debug, Clone, Default)]
pub struct BrowserHistory {
    initial: Option<String>,
    pushed: Vec<String>,
}

impl BrowserHistory {
    pub fn with_fragment(fragment: Option<String>) -> Self {
        Self {
            initial: fragment,
            pushed: Vec::new(),
        }
    }

    pub fn pushed(&self) -> &[String] {
        &self.pushed
    }
}

impl AddressBar for BrowserHistory {
    fn fragment(&self) -> Option<String> {
        self.pushed.last().cloned().or_else(|| self.initial.clone())
    }

    fn push_fragment(&mut self, fragment: &str) {
        self.pushed.push(fragment.to_string());
    }
}

/// Strips the leading `#` from an address bar fragment. Blank fragments are
/// treated as absent.
pub fn parse_fragment(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    let tag = trimmed.strip_prefix('#').unwrap_or(trimmed).trim();
    (!tag.is_empty()).then_some(tag)
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Catalog in its current sort order.
    pub catalog: Vec<Video>,
    /// Assets of each release, keyed by release tag.
    pub release_assets: HashMap<String, Vec<Asset>>,
    pub status: CatalogStatus,
    pub query: String,
    pub ascending: bool,
    pub current_tag: Option<String>,
    pub playback: PlaybackState,
    /// Whether the episode panel shows the full description.
    pub expanded: bool,
    /// Bumped on every selection, including re-selecting the current video,
    /// so the page knows to load and play again.
    pub selection_seq: u64,
}

impl AppState {
    /// Builds the catalog and applies the initial sort order.
    pub fn from_releases(releases: &[Release], ascending: bool) -> Self {
        let mut catalog = build_catalog(releases);
        sort_videos(&mut catalog, ascending);
        let release_assets = releases
            .iter()
            .map(|release| (release.tag_name.trim().to_string(), release.assets.clone()))
            .rev()
            .collect();
        Self {
            catalog,
            release_assets,
            ascending,
            ..Self::default()
        }
    }

    /// State shown when the releases could not be loaded.
    pub fn failed(message: impl Into<String>, ascending: bool) -> Self {
        Self {
            status: CatalogStatus::Failed(message.into()),
            ascending,
            ..Self::default()
        }
    }

    pub fn current_video(&self) -> Option<&Video> {
        self.current_tag
            .as_deref()
            .and_then(|tag| find_video(&self.catalog, tag))
    }

    pub fn owner_assets(&self, video: &Video) -> &[Asset] {
        self.release_assets
            .get(&video.release_tag)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Records a new search query. Selection and playback are untouched.
pub fn apply_search(mut state: AppState, query: &str) -> AppState {
    state.query = query.to_string();
    state
}

/// Flips the sort order and re-sorts the catalog. Selection and playback are
/// untouched.
pub fn apply_sort_toggle(mut state: AppState) -> AppState {
    state.ascending = !state.ascending;
    sort_videos(&mut state.catalog, state.ascending);
    state
}

/// The videos currently shown: the sorted catalog narrowed by the query.
pub fn visible_videos(state: &AppState) -> Vec<Video> {
    filter_videos(&state.catalog, &state.query)
}

/// Tag to select when the page loads: the fragment when it names a known
/// video, else the first video of the sorted catalog.
pub fn resolve_initial_tag(state: &AppState, fragment: Option<&str>) -> Option<String> {
    if let Some(tag) = fragment.and_then(parse_fragment) {
        if find_video(&state.catalog, tag).is_some() {
            return Some(tag.to_string());
        }
        debug!(tag, "deep link does not match any video; using default selection");
    }
    state.catalog.first().map(|video| video.tag_name.clone())
}

pub struct Controller<P, A> {
    state: AppState,
    player: P,
    address_bar: A,
    markdown: Arc<MarkdownHandle>,
}

impl<P, A> Controller<P, A>
where
    P: MediaPlayer,
    A: AddressBar,
{
    pub fn new(state: AppState, player: P, address_bar: A, markdown: Arc<MarkdownHandle>) -> Self {
        Self {
            state,
            player,
            address_bar,
            markdown,
        }
    }

    /// Fetches the releases and builds the controller around them. A failed
    /// fetch yields a controller in the [`CatalogStatus::Failed`] state.
    pub fn from_source(
        source: &dyn ReleaseSource,
        ascending: bool,
        player: P,
        address_bar: A,
        markdown: Arc<MarkdownHandle>,
    ) -> Self {
        let state = match source.fetch_releases() {
            Ok(releases) => {
                let state = AppState::from_releases(&releases, ascending);
                info!(videos = state.catalog.len(), "episodes loaded");
                state
            }
            Err(err) => {
                error!(error = %err, "failed to load episodes");
                AppState::failed(err.to_string(), ascending)
            }
        };
        Self::new(state, player, address_bar, markdown)
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    pub fn address_bar(&self) -> &A {
        &self.address_bar
    }

    pub fn address_bar_mut(&mut self) -> &mut A {
        &mut self.address_bar
    }

    /// Resolves the initial selection from the address bar. Stays idle when
    /// the catalog is empty.
    pub fn initialize(&mut self) -> Option<&Video> {
        let fragment = self.address_bar.fragment();
        let tag = resolve_initial_tag(&self.state, fragment.as_deref())?;
        self.select(&tag).ok()
    }

    /// Selects the video with `tag_name`, loads it, requests playback and
    /// publishes `#<tag>` to the address bar. Legal from any playback state.
    pub fn select(&mut self, tag_name: &str) -> GalleryResult<&Video> {
        let video = find_video(&self.state.catalog, tag_name)
            .cloned()
            .ok_or_else(|| GalleryError::UnknownVideo(tag_name.to_string()))?;

        if self.state.current_tag.as_deref() != Some(video.tag_name.as_str()) {
            self.state.expanded = false;
        }
        self.state.current_tag = Some(video.tag_name.clone());
        self.state.selection_seq += 1;

        self.player.load(&video.video_url);
        self.state.playback = PlaybackState::Loading;
        self.state.playback = match self.player.play() {
            Ok(PlayRequest::Started) => PlaybackState::Playing,
            Ok(PlayRequest::Deferred) => PlaybackState::Loading,
            Err(err) => {
                warn!(tag = %video.tag_name, error = %err, "error playing video");
                PlaybackState::PlayFailed(err.reason)
            }
        };
        self.address_bar.push_fragment(&fragment_for(&video.tag_name));
        debug!(tag = %video.tag_name, url = %video.video_url, "selected video");

        self.state
            .current_video()
            .ok_or_else(|| GalleryError::UnknownVideo(tag_name.to_string()))
    }

    pub fn select_video(&mut self, video: &Video) -> GalleryResult<&Video> {
        self.select(&video.tag_name)
    }

    /// Records the outcome of a deferred play request. Reports for a video
    /// that is no longer selected, or that already settled, are ignored.
    pub fn report_playback(&mut self, tag_name: &str, outcome: Result<(), PlaybackError>) {
        if self.state.current_tag.as_deref() != Some(tag_name)
            || self.state.playback != PlaybackState::Loading
        {
            debug!(tag = tag_name, "ignoring stale playback report");
            return;
        }
        self.state.playback = match outcome {
            Ok(()) => PlaybackState::Playing,
            Err(err) => {
                warn!(tag = tag_name, error = %err, "error playing video");
                PlaybackState::PlayFailed(err.reason)
            }
        };
    }

    pub fn on_search(&mut self, query: &str) -> Vec<PlaylistEntry> {
        self.state = apply_search(std::mem::take(&mut self.state), query);
        self.playlist()
    }

    pub fn on_sort_toggle(&mut self) -> Vec<PlaylistEntry> {
        self.state = apply_sort_toggle(std::mem::take(&mut self.state));
        self.playlist()
    }

    /// Full re-render of the visible list with the active entry marked.
    pub fn playlist(&self) -> Vec<PlaylistEntry> {
        render_playlist(&visible_videos(&self.state), self.state.current_tag.as_deref())
    }

    pub fn detail(&self) -> Option<EpisodeDetail> {
        let video = self.state.current_video()?;
        Some(build_detail(
            video,
            self.state.owner_assets(video),
            self.markdown.get(),
            self.state.expanded,
        ))
    }

    /// Puts the view back to a fresh page: no query, the given sort order and
    /// a collapsed panel. Selection and playback are untouched.
    pub fn reset_view(&mut self, ascending: bool) {
        self.state.query.clear();
        self.state.expanded = false;
        if self.state.ascending != ascending {
            self.state.ascending = ascending;
            sort_videos(&mut self.state.catalog, ascending);
        }
    }

    pub fn toggle_expanded(&mut self) -> bool {
        if self.state.current_tag.is_some() {
            self.state.expanded = !self.state.expanded;
        }
        self.state.expanded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::{release, tags};
    use crate::release::StaticReleaseSource;

    #[derive(Default)]
    struct FakePlayer {
        loaded: Vec<String>,
        reject: bool,
        defer: bool,
    }

    impl MediaPlayer for FakePlayer {
        fn load(&mut self, url: &str) {
            self.loaded.push(url.to_string());
        }

        fn play(&mut self) -> Result<PlayRequest, PlaybackError> {
            if self.reject {
                Err(PlaybackError::new("autoplay blocked"))
            } else if self.defer {
                Ok(PlayRequest::Deferred)
            } else {
                Ok(PlayRequest::Started)
            }
        }
    }

    struct FailingSource;

    impl ReleaseSource for FailingSource {
        fn fetch_releases(&self) -> GalleryResult<Vec<Release>> {
            Err(GalleryError::Fetch {
                url: "https://example.test".into(),
                message: "connection refused".into(),
            })
        }
    }

    fn sample_releases() -> Vec<Release> {
        vec![
            release("v1", 1, &["episode.mp4"]),
            release("v2", 2, &["episode.mp4", "v2-slides.pdf"]),
            release("v3", 3, &["episode.mp4"]),
            release("notes", 4, &["readme.txt"]),
        ]
    }

    fn controller_with(
        fragment: Option<&str>,
        player: FakePlayer,
    ) -> Controller<FakePlayer, BrowserHistory> {
        Controller::new(
            AppState::from_releases(&sample_releases(), false),
            player,
            BrowserHistory::with_fragment(fragment.map(str::to_string)),
            Arc::new(MarkdownHandle::new()),
        )
    }

    fn active_tags(entries: &[PlaylistEntry]) -> Vec<&str> {
        entries
            .iter()
            .filter(|entry| entry.active)
            .map(|entry| entry.tag_name.as_str())
            .collect()
    }

    #[test]
    fn default_order_is_newest_first() {
        let state = AppState::from_releases(&sample_releases(), false);
        assert_eq!(tags(&state.catalog), vec!["v3", "v2", "v1"]);
    }

    #[test]
    fn select_pushes_fragment_and_marks_entry() {
        let mut ctrl = controller_with(None, FakePlayer::default());
        ctrl.select("v2").unwrap();

        assert_eq!(ctrl.address_bar().pushed(), ["#v2".to_string()]);
        assert_eq!(active_tags(&ctrl.playlist()), vec!["v2"]);
        assert_eq!(ctrl.state().playback, PlaybackState::Playing);
        assert_eq!(
            ctrl.player().loaded,
            vec!["https://example.test/download/v2/episode.mp4".to_string()]
        );
    }

    #[test]
    fn initialize_honours_known_deep_link() {
        let mut ctrl = controller_with(Some("#v2"), FakePlayer::default());
        let selected = ctrl.initialize().map(|video| video.tag_name.clone());
        assert_eq!(selected.as_deref(), Some("v2"));
        assert_eq!(ctrl.state().current_tag.as_deref(), Some("v2"));
    }

    #[test]
    fn initialize_unknown_deep_link_falls_back_to_newest() {
        let mut ctrl = controller_with(Some("#doesNotExist"), FakePlayer::default());
        ctrl.initialize();
        assert_eq!(ctrl.state().current_tag.as_deref(), Some("v3"));
        assert_eq!(ctrl.address_bar().pushed(), ["#v3".to_string()]);
    }

    #[test]
    fn initialize_without_fragment_uses_sorted_view() {
        let mut state = AppState::from_releases(&sample_releases(), false);
        state = apply_sort_toggle(state);
        let mut ctrl = Controller::new(
            state,
            FakePlayer::default(),
            BrowserHistory::default(),
            Arc::new(MarkdownHandle::new()),
        );
        ctrl.initialize();
        assert_eq!(ctrl.state().current_tag.as_deref(), Some("v1"));
    }

    #[test]
    fn initialize_empty_catalog_stays_idle() {
        let mut ctrl = Controller::new(
            AppState::from_releases(&[], false),
            FakePlayer::default(),
            BrowserHistory::with_fragment(Some("#v1".into())),
            Arc::new(MarkdownHandle::new()),
        );
        assert!(ctrl.initialize().is_none());
        assert_eq!(ctrl.state().playback, PlaybackState::Idle);
        assert!(ctrl.state().current_tag.is_none());
        assert!(ctrl.address_bar().pushed().is_empty());
    }

    #[test]
    fn filtering_everything_out_keeps_selection() {
        let mut ctrl = controller_with(None, FakePlayer::default());
        ctrl.select("v1").unwrap();

        let entries = ctrl.on_search("no episode mentions this");
        assert!(entries.is_empty());
        assert_eq!(ctrl.state().current_tag.as_deref(), Some("v1"));
        assert_eq!(ctrl.state().playback, PlaybackState::Playing);
    }

    #[test]
    fn filtering_out_active_item_leaves_it_unhighlighted() {
        let mut ctrl = controller_with(None, FakePlayer::default());
        ctrl.select("v1").unwrap();

        let entries = ctrl.on_search("about v2");
        assert_eq!(entries.len(), 1);
        assert!(active_tags(&entries).is_empty());

        let entries = ctrl.on_search("");
        assert_eq!(active_tags(&entries), vec!["v1"]);
    }

    #[test]
    fn sort_toggle_preserves_selection_and_highlight() {
        let mut ctrl = controller_with(None, FakePlayer::default());
        ctrl.select("v2").unwrap();
        let pushed_before = ctrl.address_bar().pushed().len();

        let entries = ctrl.on_sort_toggle();
        let order: Vec<_> = entries.iter().map(|e| e.tag_name.as_str()).collect();
        assert_eq!(order, vec!["v1", "v2", "v3"]);
        assert_eq!(active_tags(&entries), vec!["v2"]);
        assert_eq!(ctrl.address_bar().pushed().len(), pushed_before);

        let entries = ctrl.on_sort_toggle();
        let order: Vec<_> = entries.iter().map(|e| e.tag_name.as_str()).collect();
        assert_eq!(order, vec!["v3", "v2", "v1"]);
    }

    #[test]
    fn search_applies_to_sorted_view() {
        let mut ctrl = controller_with(None, FakePlayer::default());
        ctrl.on_sort_toggle();
        let entries = ctrl.on_search("EPISODE");
        let order: Vec<_> = entries.iter().map(|e| e.tag_name.as_str()).collect();
        assert_eq!(order, vec!["v1", "v2", "v3"]);
    }

    #[test]
    fn playback_failure_is_recorded_without_touching_selection() {
        let player = FakePlayer {
            reject: true,
            ..FakePlayer::default()
        };
        let mut ctrl = controller_with(None, player);
        ctrl.select("v3").unwrap();

        assert_eq!(
            ctrl.state().playback,
            PlaybackState::PlayFailed("autoplay blocked".into())
        );
        assert_eq!(ctrl.state().current_tag.as_deref(), Some("v3"));
        assert_eq!(ctrl.address_bar().pushed(), ["#v3".to_string()]);
    }

    #[test]
    fn deferred_playback_settles_on_report() {
        let player = FakePlayer {
            defer: true,
            ..FakePlayer::default()
        };
        let mut ctrl = controller_with(None, player);
        ctrl.select("v3").unwrap();
        assert_eq!(ctrl.state().playback, PlaybackState::Loading);

        ctrl.report_playback("v1", Ok(()));
        assert_eq!(ctrl.state().playback, PlaybackState::Loading);

        ctrl.report_playback("v3", Err(PlaybackError::new("codec")));
        assert_eq!(ctrl.state().playback, PlaybackState::PlayFailed("codec".into()));

        ctrl.report_playback("v3", Ok(()));
        assert_eq!(ctrl.state().playback, PlaybackState::PlayFailed("codec".into()));
    }

    #[test]
    fn selecting_unknown_tag_changes_nothing() {
        let mut ctrl = controller_with(None, FakePlayer::default());
        ctrl.select("v1").unwrap();
        let err = ctrl.select("v9").unwrap_err();
        assert!(matches!(err, GalleryError::UnknownVideo(tag) if tag == "v9"));
        assert_eq!(ctrl.state().current_tag.as_deref(), Some("v1"));
        assert_eq!(ctrl.address_bar().pushed().len(), 1);
    }

    #[test]
    fn reselecting_current_video_requests_playback_again() {
        let player = FakePlayer {
            defer: true,
            ..FakePlayer::default()
        };
        let mut ctrl = controller_with(None, player);
        ctrl.select("v1").unwrap();
        ctrl.report_playback("v1", Err(PlaybackError::new("autoplay blocked")));
        let seq = ctrl.state().selection_seq;

        ctrl.select("v1").unwrap();
        assert_eq!(ctrl.state().selection_seq, seq + 1);
        assert_eq!(ctrl.state().playback, PlaybackState::Loading);
        assert_eq!(ctrl.player().loaded.len(), 2);

        ctrl.report_playback("v1", Ok(()));
        assert_eq!(ctrl.state().playback, PlaybackState::Playing);
    }

    #[test]
    fn reset_view_restores_default_order_and_collapses_panel() {
        let mut ctrl = controller_with(None, FakePlayer::default());
        ctrl.select("v2").unwrap();
        ctrl.toggle_expanded();
        ctrl.on_sort_toggle();
        ctrl.on_search("v1");

        ctrl.reset_view(false);
        assert_eq!(tags(&ctrl.state().catalog), vec!["v3", "v2", "v1"]);
        assert!(!ctrl.state().ascending);
        assert!(ctrl.state().query.is_empty());
        assert!(!ctrl.state().expanded);
        assert_eq!(ctrl.state().current_tag.as_deref(), Some("v2"));

        *ctrl.address_bar_mut() = BrowserHistory::with_fragment(Some("#doesNotExist".into()));
        ctrl.initialize();
        assert_eq!(ctrl.state().current_tag.as_deref(), Some("v3"));
    }

    #[test]
    fn selecting_another_video_collapses_panel() {
        let mut ctrl = controller_with(None, FakePlayer::default());
        ctrl.select("v1").unwrap();
        assert!(ctrl.toggle_expanded());
        ctrl.select("v1").unwrap();
        assert!(ctrl.state().expanded);
        ctrl.select("v2").unwrap();
        assert!(!ctrl.state().expanded);
    }

    #[test]
    fn detail_uses_owner_release_assets() {
        let mut ctrl = controller_with(None, FakePlayer::default());
        assert!(ctrl.detail().is_none());

        ctrl.select("v2").unwrap();
        let detail = ctrl.detail().unwrap();
        assert_eq!(
            detail.slide_deck_url,
            "https://example.test/download/v2/v2-slides.pdf"
        );

        ctrl.select("v1").unwrap();
        let detail = ctrl.detail().unwrap();
        assert_eq!(detail.slide_deck_url, "https://example.test/releases/tag/v1");
    }

    #[test]
    fn from_source_failure_yields_failed_state() {
        let ctrl = Controller::from_source(
            &FailingSource,
            false,
            FakePlayer::default(),
            BrowserHistory::default(),
            Arc::new(MarkdownHandle::new()),
        );
        assert!(matches!(ctrl.state().status, CatalogStatus::Failed(ref msg) if msg.contains("connection refused")));
        assert!(ctrl.playlist().is_empty());
    }

    #[test]
    fn from_source_builds_catalog() {
        let source = StaticReleaseSource::new(sample_releases());
        let ctrl = Controller::from_source(
            &source,
            true,
            BrowserPlayer::default(),
            BrowserHistory::default(),
            Arc::new(MarkdownHandle::new()),
        );
        assert_eq!(ctrl.state().status, CatalogStatus::Ready);
        assert_eq!(tags(&ctrl.state().catalog), vec!["v1", "v2", "v3"]);
    }

    #[test]
    fn browser_player_defers_playback() {
        let mut ctrl = Controller::new(
            AppState::from_releases(&sample_releases(), false),
            BrowserPlayer::default(),
            BrowserHistory::default(),
            Arc::new(MarkdownHandle::new()),
        );
        ctrl.initialize();
        assert_eq!(ctrl.state().playback, PlaybackState::Loading);
        assert_eq!(
            ctrl.player().source(),
            Some("https://example.test/download/v3/episode.mp4")
        );
    }

    #[test]
    fn initialize_matches_non_ascii_deep_link() {
        let releases = vec![
            release("épisode-1", 1, &["a.mp4"]),
            release("épisode-2", 2, &["b.mp4"]),
        ];
        let mut ctrl = Controller::new(
            AppState::from_releases(&releases, false),
            FakePlayer::default(),
            BrowserHistory::with_fragment(Some("#épisode-1".into())),
            Arc::new(MarkdownHandle::new()),
        );
        ctrl.initialize();
        assert_eq!(ctrl.state().current_tag.as_deref(), Some("épisode-1"));
        assert_eq!(ctrl.address_bar().pushed(), ["#épisode-1".to_string()]);
    }

    #[test]
    fn parse_fragment_strips_hash() {
        assert_eq!(parse_fragment("#v2"), Some("v2"));
        assert_eq!(parse_fragment(" v2 "), Some("v2"));
        assert_eq!(parse_fragment("#"), None);
        assert_eq!(parse_fragment(""), None);
    }
}
