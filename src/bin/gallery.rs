#![forbid(unsafe_code)]

//! Gallery server: fetches the release feed once, then serves the playlist
//! page and the small command API the page drives.
//!
//! The browser owns the `<video>` element and the history stack. Everything
//! else (catalog, sort order, search, selection, episode panel) lives in the
//! single controller below, and every response carries the full view so the
//! page can re-render from it.

use std::{
    net::{IpAddr, SocketAddr},
    path::PathBuf,
    sync::Arc,
};

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    body::Body,
    extract::{Path as AxumPath, State},
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use parking_lot::Mutex;
use release_gallery::{
    config::{SettingsOverrides, resolve_settings},
    controller::{
        AddressBar, BrowserHistory, BrowserPlayer, CatalogStatus, Controller, PlaybackState,
    },
    detail::EpisodeDetail,
    error::{GalleryError, PlaybackError},
    markdown::MarkdownHandle,
    playlist::{PlaylistEntry, render_playlist_html},
    release::HttpReleaseSource,
};
use serde::{Deserialize, Serialize};
use tokio::signal;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const INDEX_TEMPLATE: &str = include_str!("../../assets/index.html");

#[derive(Debug, Parser)]
#[command(name = "gallery", about = "Serve a release feed as a video playlist")]
struct Cli {
    /// Releases endpoint to read episodes from
    #[arg(long)]
    releases_url: Option<String>,
    #[arg(long)]
    host: Option<String>,
    #[arg(long)]
    port: Option<u16>,
    /// Seconds to wait for the releases endpoint
    #[arg(long)]
    fetch_timeout: Option<u64>,
    /// Start with the oldest episode first
    #[arg(long)]
    ascending: bool,
    #[arg(long)]
    env_file: Option<PathBuf>,
}

impl Cli {
    fn overrides(self) -> SettingsOverrides {
        SettingsOverrides {
            releases_url: self.releases_url,
            host: self.host,
            port: self.port,
            fetch_timeout_secs: self.fetch_timeout,
            ascending: self.ascending.then_some(true),
            env_path: self.env_file,
        }
    }
}

type PageController = Controller<BrowserPlayer, BrowserHistory>;

#[derive(Clone)]
struct ServerState {
    controller: Arc<Mutex<PageController>>,
    /// Sort order a freshly loaded page starts with.
    default_ascending: bool,
}

impl ServerState {
    fn new(controller: PageController, default_ascending: bool) -> Self {
        Self {
            controller: Arc::new(Mutex::new(controller)),
            default_ascending,
        }
    }

    fn view(&self) -> ViewPayload {
        ViewPayload::from_controller(&self.controller.lock())
    }
}

/// Everything the page needs to re-render after a command.
#[derive(Debug, Clone, Serialize)]
struct ViewPayload {
    status: CatalogStatus,
    entries: Vec<PlaylistEntry>,
    current: Option<String>,
    /// Fragment the page should have in its address bar.
    fragment: Option<String>,
    player_src: Option<String>,
    /// Changes on every selection; the page loads and plays whenever it does.
    play_token: u64,
    playback: PlaybackState,
    ascending: bool,
    query: String,
    sort_label: &'static str,
    detail: Option<EpisodeDetail>,
}

impl ViewPayload {
    fn from_controller(controller: &PageController) -> Self {
        let state = controller.state();
        Self {
            status: state.status.clone(),
            entries: controller.playlist(),
            current: state.current_tag.clone(),
            fragment: controller.address_bar().pushed().last().cloned(),
            player_src: controller.player().source().map(str::to_string),
            play_token: state.selection_seq,
            playback: state.playback.clone(),
            ascending: state.ascending,
            query: state.query.clone(),
            sort_label: sort_label(state.ascending),
            detail: controller.detail(),
        }
    }
}

/// The toggle is labelled with the order it switches to.
fn sort_label(ascending: bool) -> &'static str {
    if ascending {
        "Sort Descending"
    } else {
        "Sort Ascending"
    }
}

#[derive(Debug, Deserialize)]
struct InitRequest {
    #[serde(default)]
    fragment: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchRequest {
    #[serde(default)]
    query: String,
}

#[derive(Debug, Deserialize)]
struct PlaybackReport {
    tag: String,
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }
}

impl From<GalleryError> for ApiError {
    fn from(err: GalleryError) -> Self {
        let status = match err {
            GalleryError::UnknownVideo(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": self.message,
        });
        (self.status, Json(body)).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = resolve_settings(Cli::parse().overrides())?;
    let host = settings
        .host
        .parse::<IpAddr>()
        .context("expected a valid IPv4 or IPv6 address for --host/GALLERY_HOST")?;

    let source = HttpReleaseSource::new(settings.releases_url.clone(), settings.fetch_timeout);
    let ascending = settings.ascending;
    info!(url = %source.url(), "loading episodes");
    let controller = tokio::task::spawn_blocking(move || {
        Controller::from_source(
            &source,
            ascending,
            BrowserPlayer::default(),
            BrowserHistory::default(),
            Arc::new(MarkdownHandle::new()),
        )
    })
    .await
    .context("joining release fetch")?;

    let app = router(ServerState::new(controller, ascending));

    let addr = SocketAddr::new(host, settings.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding to {}", addr))?;
    info!("gallery listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("running gallery server")?;

    Ok(())
}

fn router(state: ServerState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/init", post(init_view))
        .route("/api/view", get(current_view))
        .route("/api/search", post(search))
        .route("/api/sort/toggle", post(toggle_sort))
        .route("/api/select/{tag}", post(select_video))
        .route("/api/detail/toggle", post(toggle_detail))
        .route("/api/playback", post(report_playback))
        .fallback(fallback)
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        warn!("failed to install Ctrl+C handler: {}", err);
    }
}

async fn fallback(req: Request<Body>) -> Response {
    let path = req.uri().path();
    if path == "/api" || path.starts_with("/api/") {
        return ApiError::not_found("endpoint not found").into_response();
    }
    (StatusCode::NOT_FOUND, "not found").into_response()
}

/// Server-rendered shell. The script re-renders from `/api/init` once it
/// knows the page's fragment.
async fn index(State(state): State<ServerState>) -> Html<String> {
    let controller = state.controller.lock();
    let view = ViewPayload::from_controller(&controller);
    let status = match &view.status {
        CatalogStatus::Ready => "",
        CatalogStatus::Failed(_) => "Failed to load episodes.",
    };
    let page = INDEX_TEMPLATE
        .replace("{{PLAYLIST}}", &render_playlist_html(&view.entries))
        .replace("{{SORT_LABEL}}", view.sort_label)
        .replace("{{STATUS}}", status)
        .replace("{{PLAYER_SRC}}", "");
    Html(page)
}

/// A page load: resets the view to its defaults, adopts the page's fragment
/// and resolves the initial selection from it.
async fn init_view(
    State(state): State<ServerState>,
    Json(payload): Json<InitRequest>,
) -> Json<ViewPayload> {
    let mut controller = state.controller.lock();
    *controller.address_bar_mut() = BrowserHistory::with_fragment(payload.fragment);
    controller.reset_view(state.default_ascending);
    let selected = controller.initialize().map(|video| video.tag_name.clone());
    debug!(
        fragment = ?controller.address_bar().fragment(),
        selected = ?selected,
        "page initialized"
    );
    Json(ViewPayload::from_controller(&controller))
}

async fn current_view(State(state): State<ServerState>) -> Json<ViewPayload> {
    Json(state.view())
}

async fn search(
    State(state): State<ServerState>,
    Json(payload): Json<SearchRequest>,
) -> Json<ViewPayload> {
    state.controller.lock().on_search(&payload.query);
    Json(state.view())
}

async fn toggle_sort(State(state): State<ServerState>) -> Json<ViewPayload> {
    state.controller.lock().on_sort_toggle();
    Json(state.view())
}

async fn select_video(
    State(state): State<ServerState>,
    AxumPath(tag): AxumPath<String>,
) -> ApiResult<Json<ViewPayload>> {
    state.controller.lock().select(&tag)?;
    Ok(Json(state.view()))
}

async fn toggle_detail(State(state): State<ServerState>) -> Json<ViewPayload> {
    state.controller.lock().toggle_expanded();
    Json(state.view())
}

async fn report_playback(
    State(state): State<ServerState>,
    Json(report): Json<PlaybackReport>,
) -> Json<ViewPayload> {
    let outcome = if report.ok {
        Ok(())
    } else {
        Err(PlaybackError::new(
            report.error.unwrap_or_else(|| "unknown error".to_string()),
        ))
    };
    state.controller.lock().report_playback(&report.tag, outcome);
    Json(state.view())
}
