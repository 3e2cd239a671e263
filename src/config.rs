use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use reqwest::Url;

use crate::error::ConfigError;

/// How the index learns about upstream changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Crawl GlotPress on a fixed post-cycle delay.
    Poll,
    /// Wait for GlotPress to call the update endpoint. Not implemented upstream.
    Notified,
}

/// Serves WooCommerce extension language packs mirrored from GlotPress.
#[derive(Debug, Clone, Parser)]
#[command(name = "langpack-server", version)]
pub struct Config {
    /// Root of the GlotPress project API.
    #[arg(long, env = "LANGPACK_API_URL", default_value = "https://translate.wordpress.com/api/projects/")]
    pub api_url: String,

    /// Root of the GlotPress export endpoint.
    #[arg(long, env = "LANGPACK_EXPORT_URL", default_value = "https://translate.wordpress.com/projects/")]
    pub export_url: String,

    /// Slug of the root project whose sub-projects are the extensions.
    #[arg(long, env = "LANGPACK_ROOT_PROJECT", default_value = "woocommerce")]
    pub root_project: String,

    #[arg(long, env = "LANGPACK_POLL_INTERVAL", default_value = "10m", value_parser = humantime::parse_duration)]
    pub poll_interval: Duration,

    /// Timeout applied to every request made to GlotPress.
    #[arg(long, env = "LANGPACK_HTTP_TIMEOUT", default_value = "60s", value_parser = humantime::parse_duration)]
    pub http_timeout: Duration,

    /// Directory built language packs are written to and served from.
    #[arg(long, env = "LANGPACK_DOWNLOADS_PATH", default_value_os_t = default_downloads_path())]
    pub downloads_path: PathBuf,

    #[arg(long, env = "LANGPACK_LISTEN", default_value = "127.0.0.1:8081")]
    pub listen: String,

    #[arg(long, value_enum, env = "LANGPACK_MODE", default_value_t = Mode::Poll)]
    pub mode: Mode,

    /// Key GlotPress must present to the update endpoint in notified mode.
    #[arg(long, env = "LANGPACK_UPDATE_KEY", default_value = "my-secret-key")]
    pub update_key: String,

    /// Expose the whole index as JSON at /_db.
    #[arg(long, env = "LANGPACK_EXPOSE_DB")]
    pub expose_db: bool,
}

fn default_downloads_path() -> PathBuf {
    std::env::temp_dir().join("downloads")
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_url("api url", &self.api_url)?;
        check_url("export url", &self.export_url)?;

        if self.root_project.trim().trim_matches('/').is_empty() {
            return Err(ConfigError::EmptyRootProject);
        }
        if self.poll_interval.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }
        if self.http_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    /// Root project slug without surrounding slashes.
    pub fn root(&self) -> &str {
        self.root_project.trim().trim_matches('/')
    }
}

fn check_url(name: &'static str, value: &str) -> Result<(), ConfigError> {
    match Url::parse(value) {
        Ok(u) if matches!(u.scheme(), "http" | "https") => Ok(()),
        Ok(u) => Err(ConfigError::InvalidUrl {
            name,
            value: value.to_string(),
            reason: format!("unsupported scheme {}", u.scheme()),
        }),
        Err(e) => Err(ConfigError::InvalidUrl {
            name,
            value: value.to_string(),
            reason: e.to_string(),
        }),
    }
}
