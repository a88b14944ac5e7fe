//! Static service configuration and the env-driven credential layer.
//! Defaults are &'static str; only the credentials are read at runtime.

use reqwest::Url;
use std::env;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing env var: {0}")] Missing(&'static str),
    #[error("Bad base URL: {0}")] BadUrl(String),
}

/// A lookup input that cannot be carried as a URL path segment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UrlError {
    #[error("Dot segment {0:?} cannot be sent as a path segment")] DotSegment(String),
}

/// Dictionary service endpoint definition
pub mod api {
    pub const URL_BASE: &str = "https://od-api.oxforddictionaries.com/api/v1";
    pub const END_POINT: &str = "entries";
    pub const TRANSLATIONS_PREFIX: &str = "translations=";
}

/// Static header names injected into every request
pub mod headers {
    pub const APP_ID_FIELD: &str = "app_id";
    pub const APP_KEY_FIELD: &str = "app_key";
    pub const ACCEPT: &str = "application/json";
}

/// Environment variable names
pub mod vars {
    pub const BASE_URL: &str = "LEXIS_BASE_URL";
    pub const APP_ID: &str = "LEXIS_APP_ID";
    pub const APP_KEY: &str = "LEXIS_APP_KEY";
}

/// Limits and thresholds
pub mod limits {
    /// Applied by the HTTP transport only; the dispatch core imposes no timeout.
    pub const REQUEST_TIMEOUT_SECS: u64 = 15;
}

/// Base URL, path template and the two credential headers.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: Url,
    pub end_point: String,
    pub app_id: String,
    pub app_key: String,
}

impl Config {
    pub fn new(base_url: &str, app_id: impl Into<String>, app_key: impl Into<String>) -> Result<Self, ConfigError> {
        let base_url = Url::parse(base_url).map_err(|e| ConfigError::BadUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ConfigError::BadUrl(base_url.to_string()));
        }
        Ok(Self {
            base_url,
            end_point: api::END_POINT.to_string(),
            app_id: app_id.into(),
            app_key: app_key.into(),
        })
    }

    /// Loads `.env` (if any) and reads credentials from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let base = env::var(vars::BASE_URL).unwrap_or_else(|_| api::URL_BASE.to_string());
        let app_id = env::var(vars::APP_ID).map_err(|_| ConfigError::Missing(vars::APP_ID))?;
        let app_key = env::var(vars::APP_KEY).map_err(|_| ConfigError::Missing(vars::APP_KEY))?;
        Self::new(&base, app_id, app_key)
    }

    /// Static header pairs, in a fixed order.
    pub fn auth_headers(&self) -> [(&'static str, String); 2] {
        [
            (headers::APP_ID_FIELD, self.app_id.clone()),
            (headers::APP_KEY_FIELD, self.app_key.clone()),
        ]
    }

    /// `{base}/{end_point}/{source}/{word}/translations={target}`
    ///
    /// `.` and `..` are rejected: URL parsing resolves them, so the request
    /// would silently address a different resource.
    pub fn translation_url(&self, word: &str, source_lang: &str, target_lang: &str) -> Result<Url, UrlError> {
        let target = format!("{}{}", api::TRANSLATIONS_PREFIX, target_lang);
        let segments = [self.end_point.as_str(), source_lang, word, target.as_str()];
        if let Some(dot) = segments.iter().find(|s| matches!(**s, "." | "..")) {
            return Err(UrlError::DotSegment(dot.to_string()));
        }

        let mut url = self.base_url.clone();
        // Only fails for cannot-be-a-base URLs, which `new` rejects.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }
}
