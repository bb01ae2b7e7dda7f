#![forbid(unsafe_code)]

//! Runtime settings for the gallery server.
//!
//! Values are layered: command line overrides win over process environment
//! variables, which win over the `.env` file, which wins over the defaults.

use anyhow::{Context, Result};
use std::{
    collections::HashMap,
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::release::{DEFAULT_FETCH_TIMEOUT, DEFAULT_RELEASES_URL};

pub const DEFAULT_ENV_PATH: &str = ".env";
pub const DEFAULT_GALLERY_PORT: u16 = 8080;
pub const DEFAULT_GALLERY_HOST: &str = "127.0.0.1";

#[derive(Debug, Clone)]
pub struct GallerySettings {
    pub releases_url: String,
    pub host: String,
    pub port: u16,
    pub fetch_timeout: Duration,
    /// Initial sort order; newest first unless set.
    pub ascending: bool,
}

#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub releases_url: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub fetch_timeout_secs: Option<u64>,
    pub ascending: Option<bool>,
    pub env_path: Option<PathBuf>,
}

pub fn resolve_settings(overrides: SettingsOverrides) -> Result<GallerySettings> {
    let env_path = overrides
        .env_path
        .as_deref()
        .unwrap_or_else(|| Path::new(DEFAULT_ENV_PATH));
    let file_vars = read_env_file(env_path)?;
    Ok(build_settings_with_overrides(
        &file_vars,
        env_var_string,
        overrides,
    ))
}

#[cfg(test)]
fn build_settings(
    file_vars: &HashMap<String, String>,
    env_lookup: impl Fn(&str) -> Option<String>,
) -> GallerySettings {
    build_settings_with_overrides(file_vars, env_lookup, SettingsOverrides::default())
}

fn build_settings_with_overrides(
    file_vars: &HashMap<String, String>,
    env_lookup: impl Fn(&str) -> Option<String>,
    overrides: SettingsOverrides,
) -> GallerySettings {
    let releases_url = non_blank(overrides.releases_url)
        .or_else(|| lookup_value("GALLERY_RELEASES_URL", file_vars, &env_lookup))
        .unwrap_or_else(|| DEFAULT_RELEASES_URL.to_string());
    let host = non_blank(overrides.host)
        .or_else(|| lookup_value("GALLERY_HOST", file_vars, &env_lookup))
        .unwrap_or_else(|| DEFAULT_GALLERY_HOST.to_string());
    let port = overrides
        .port
        .or_else(|| {
            lookup_value("GALLERY_PORT", file_vars, &env_lookup)
                .and_then(|value| value.parse::<u16>().ok())
        })
        .unwrap_or(DEFAULT_GALLERY_PORT);
    let fetch_timeout = overrides
        .fetch_timeout_secs
        .or_else(|| {
            lookup_value("GALLERY_FETCH_TIMEOUT_SECS", file_vars, &env_lookup)
                .and_then(|value| value.parse::<u64>().ok())
        })
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_FETCH_TIMEOUT);
    let ascending = overrides
        .ascending
        .or_else(|| {
            lookup_value("GALLERY_ASCENDING", file_vars, &env_lookup)
                .and_then(|value| parse_bool(&value))
        })
        .unwrap_or(false);

    GallerySettings {
        releases_url,
        host,
        port,
        fetch_timeout,
        ascending,
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" | "asc" | "ascending" => Some(true),
        "0" | "false" | "no" | "off" | "desc" | "descending" => Some(false),
        _ => None,
    }
}

fn env_var_string(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn lookup_value(
    key: &str,
    file_vars: &HashMap<String, String>,
    env_lookup: &impl Fn(&str) -> Option<String>,
) -> Option<String> {
    env_lookup(key)
        .or_else(|| file_vars.get(key).cloned())
        .filter(|value| !value.trim().is_empty())
}

/// Parses a dotenv-style file. A missing file is an empty set of variables.
pub fn read_env_file(path: &Path) -> Result<HashMap<String, String>> {
    let mut vars = HashMap::new();
    if !path.exists() {
        return Ok(vars);
    }
    let content =
        fs::read_to_string(path).with_context(|| format!("Reading {}", path.display()))?;
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let line = trimmed.strip_prefix("export ").unwrap_or(trimmed);
        let Some((key, value_raw)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        let value = value_raw.trim();
        let value = value
            .strip_prefix('"')
            .and_then(|value| value.strip_suffix('"'))
            .or_else(|| {
                value
                    .strip_prefix('\'')
                    .and_then(|value| value.strip_suffix('\''))
            })
            .unwrap_or(value);
        vars.insert(key.to_string(), value.to_string());
    }
    Ok(vars)
}
