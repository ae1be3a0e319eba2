//! Application configuration types.
//!
//! The top-level [`Config`] struct is deserialized from TOML and carries the
//! server, upstream, image and search settings. Every section defaults
//! sensibly so an empty file is valid. A handful of environment variables
//! (`HOST`, `PORT`, `API_BASE_URL`) override the file, which keeps the usual
//! PaaS deployment style working without a config file at all.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::Error;

/// Locations searched when no explicit config path is given.
pub const DEFAULT_CONFIG_PATHS: [&str; 4] = [
    "./config.toml",
    "./phimhub.toml",
    "~/.config/phimhub/config.toml",
    "/etc/phimhub/config.toml",
];

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub images: ImageConfig,
    pub search: SearchConfig,
}

impl Config {
    /// Deserialize a `Config` from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| Error::Config(format!("config parse error: {e}")))
    }

    /// Load a configuration file. Fails on unreadable files and parse errors;
    /// [`Config::check`] runs once overrides have been applied.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read config file {}: {e}", path.display()))
        })?;
        Self::from_toml(&contents)
    }

    /// Load the given file, or the first existing file from
    /// [`DEFAULT_CONFIG_PATHS`], or fall back to defaults.
    pub fn load_or_default(custom_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = custom_path {
            return Self::load(path);
        }

        for path_str in DEFAULT_CONFIG_PATHS {
            let expanded = shellexpand::tilde(path_str);
            let path = Path::new(expanded.as_ref());
            if path.exists() {
                tracing::info!("Loading config from {}", path.display());
                return Self::load(path);
            }
        }

        tracing::info!("No config file found; using defaults");
        Ok(Self::default())
    }

    /// Apply `HOST`, `PORT` and `API_BASE_URL` from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Apply environment overrides using a custom lookup.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST").filter(|h| !h.trim().is_empty()) {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            match port.trim().parse::<u16>() {
                Ok(p) => self.server.port = p,
                Err(_) => tracing::warn!("Ignoring invalid PORT value {port:?}"),
            }
        }
        if let Some(url) = lookup("API_BASE_URL").filter(|u| !u.trim().is_empty()) {
            self.upstream.base_url = url.trim_end_matches('/').to_string();
        }
    }

    /// Hard validation errors that make the configuration unusable.
    pub fn check(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::Config("server.port cannot be 0".into()));
        }
        for (name, url) in [
            ("upstream.base_url", &self.upstream.base_url),
            ("images.cdn_base_url", &self.images.cdn_base_url),
            ("images.tmdb_base_url", &self.images.tmdb_base_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(Error::Config(format!(
                    "{name} must be an http(s) URL, got {url:?}"
                )));
            }
        }
        Ok(())
    }

    /// Return a list of validation warnings (non-fatal issues).
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.upstream.timeout_secs == 0 {
            warnings.push("upstream.timeout_secs is 0; requests will never time out".into());
        }

        if self.search.min_keyword_chars == 0 {
            warnings.push("search.min_keyword_chars is 0; empty searches are allowed".into());
        }

        if self.search.default_limit == 0 {
            warnings.push("search.default_limit is 0; searches fall back to 24".into());
        }

        if let Some(ref dir) = self.server.static_dir {
            if !dir.exists() {
                warnings.push(format!(
                    "server.static_dir {} does not exist; frontend will not be served",
                    dir.display()
                ));
            }
        }

        for (name, url) in [
            ("upstream.base_url", &self.upstream.base_url),
            ("images.cdn_base_url", &self.images.cdn_base_url),
            ("images.tmdb_base_url", &self.images.tmdb_base_url),
        ] {
            if url.ends_with('/') {
                warnings.push(format!("{name} has a trailing slash"));
            }
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Built SPA directory served with an `index.html` fallback.
    pub static_dir: Option<PathBuf>,
    /// Per-process request budget for `/api`; `0` disables rate limiting.
    pub requests_per_minute: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 5000,
            static_dir: None,
            requests_per_minute: 0,
        }
    }
}

/// Upstream catalog API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub accept_language: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://ophim1.com".into(),
            timeout_secs: 10,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .into(),
            accept_language: "vi-VN,vi;q=0.9,en-US;q=0.8,en;q=0.7".into(),
        }
    }
}

/// Base URLs used to turn relative image paths into absolute ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    /// CDN for posters and thumbnails when the upstream does not name one.
    pub cdn_base_url: String,
    /// TMDB image host for artwork and profile pictures.
    pub tmdb_base_url: String,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            cdn_base_url: "https://img.ophim.live".into(),
            tmdb_base_url: "https://image.tmdb.org/t/p".into(),
        }
    }
}

/// Search endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub min_keyword_chars: usize,
    pub default_limit: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_keyword_chars: 2,
            default_limit: 24,
        }
    }
}
