#![forbid(unsafe_code)]

//! Release feed model and the sources that produce it.
//!
//! The structs mirror the subset of the hosting platform's release JSON the
//! gallery reads. Everything else in the payload is ignored.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{GalleryError, GalleryResult};

pub const DEFAULT_RELEASES_URL: &str =
    "https://api.github.com/repos/TheDrillDown/TheDrillDown/releases";
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("release-gallery/", env!("CARGO_PKG_VERSION"));
const ACCEPT: &str = "application/vnd.github+json";

/// A single downloadable file attached to a release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub browser_download_url: String,
}

impl Asset {
    pub fn new(name: impl Into<String>, browser_download_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            browser_download_url: browser_download_url.into(),
        }
    }

    /// Playable video files are plain `.mp4` uploads.
    pub fn is_video(&self) -> bool {
        self.name.to_ascii_lowercase().ends_with(".mp4")
    }

    /// Slide decks are PDFs whose name mentions "slide".
    pub fn is_slide_deck(&self) -> bool {
        let lower = self.name.to_ascii_lowercase();
        lower.contains("slide") && lower.ends_with(".pdf")
    }
}

/// A published release as returned by the releases endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    /// Markdown description. The platform sends `null` for empty bodies.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub body: String,
    pub published_at: DateTime<Utc>,
    pub tag_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub html_url: String,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parses a releases document.
///
/// Only a body that is not JSON at all is an error. A document that is not an
/// array yields no releases and entries that do not look like releases are
/// skipped, so a malformed feed degrades into an empty catalog.
pub fn parse_releases(raw: &str) -> GalleryResult<Vec<Release>> {
    let document: Value = serde_json::from_str(raw)?;
    let Value::Array(items) = document else {
        warn!("releases payload is not an array; treating it as empty");
        return Ok(Vec::new());
    };

    let mut releases = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<Release>(item) {
            Ok(release) => releases.push(release),
            Err(err) => warn!(index, error = %err, "skipping malformed release entry"),
        }
    }
    Ok(releases)
}

/// Anything that can hand the gallery its list of releases.
pub trait ReleaseSource {
    fn fetch_releases(&self) -> GalleryResult<Vec<Release>>;
}

/// Fetches the first page of releases over HTTP. No pagination, no retries.
#[derive(Debug, Clone)]
pub struct HttpReleaseSource {
    url: String,
    agent: ureq::Agent,
}

impl HttpReleaseSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build();
        Self {
            url: url.into(),
            agent,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn fetch_error(&self, message: impl Into<String>) -> GalleryError {
        GalleryError::Fetch {
            url: self.url.clone(),
            message: message.into(),
        }
    }
}

impl ReleaseSource for HttpReleaseSource {
    fn fetch_releases(&self) -> GalleryResult<Vec<Release>> {
        debug!(url = %self.url, "fetching releases");
        let response = match self.agent.get(&self.url).set("Accept", ACCEPT).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                return Err(self.fetch_error(format!(
                    "HTTP {code} {}",
                    response.status_text()
                )));
            }
            Err(err) => return Err(self.fetch_error(err.to_string())),
        };
        let body = response
            .into_string()
            .map_err(|err| self.fetch_error(format!("reading body: {err}")))?;
        let releases = parse_releases(&body)?;
        debug!(count = releases.len(), "fetched releases");
        Ok(releases)
    }
}

/// Serves a fixed set of releases. Handy for tests and local previews.
#[derive(Debug, Clone, Default)]
pub struct StaticReleaseSource {
    releases: Vec<Release>,
}

impl StaticReleaseSource {
    pub fn new(releases: Vec<Release>) -> Self {
        Self { releases }
    }
}

impl ReleaseSource for StaticReleaseSource {
    fn fetch_releases(&self) -> GalleryResult<Vec<Release>> {
        Ok(self.releases.clone())
    }
}
