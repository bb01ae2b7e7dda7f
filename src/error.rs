#![forbid(unsafe_code)]

use thiserror::Error;

/// Failures surfaced by the gallery core. None of them are fatal to the rest
/// of the page; callers map them to a local fallback state.
#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("failed to fetch releases from {url}: {message}")]
    Fetch { url: String, message: String },
    #[error("releases payload is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("no video with tag `{0}` in the catalog")]
    UnknownVideo(String),
    #[error(transparent)]
    Playback(#[from] PlaybackError),
}

/// Reported by a [`crate::controller::MediaPlayer`] when it refuses to start
/// playback (autoplay policy, unsupported codec, ...).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("playback rejected: {reason}")]
pub struct PlaybackError {
    pub reason: String,
}

impl PlaybackError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

pub type GalleryResult<T> = Result<T, GalleryError>;
