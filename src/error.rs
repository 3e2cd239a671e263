//! Error types for the sync and query paths.

use std::path::PathBuf;

/// Failures talking to GlotPress, either the project API or the export
/// endpoint. Retried only by the next scheduled cycle.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// The request never produced a response (DNS, connect, timeout, body read).
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        source: reqwest::Error,
    },

    /// The remote answered with a non-success status.
    #[error("request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// The body was not a project descriptor.
    #[error("failed to decode project at {url}: {reason}")]
    Decode { url: String, reason: String },
}

/// Failures building a language pack. None of them leave an archive behind
/// that the index would point to.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The project path does not have the `<extension>/<version>` shape.
    #[error("malformed project path {path:?}: expected <extension>/<version> below the root project")]
    MalformedPath { path: String },

    /// A slug or locale that is unsafe to use as a file name.
    #[error("refusing to use {value:?} as a {kind}")]
    InvalidSegment { kind: &'static str, value: String },

    /// One of the two exports could not be fetched.
    #[error("failed to download .{format} export: {source}")]
    Download {
        format: &'static str,
        source: RemoteError,
    },

    /// A segment validation pattern failed to compile.
    #[error("invalid segment pattern: {0}")]
    Pattern(regex::Error),

    #[error("filesystem error at {path}: {source}")]
    Filesystem {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write archive {path}: {source}")]
    Archive {
        path: PathBuf,
        source: zip::result::ZipError,
    },
}

impl BuildError {
    pub(crate) fn fs(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BuildError::Filesystem {
            path: path.into(),
            source,
        }
    }
}

/// Query misses. These are answers, not faults.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("no translations for plugin {slug}")]
    MissingSlug { slug: String },

    #[error("translation for plugin {slug} version {version} does not exist")]
    MissingVersion { slug: String, version: String },

    #[error("translation {locale} for plugin {slug} version {version} does not exist")]
    MissingTranslation {
        slug: String,
        version: String,
        locale: String,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {name} {value:?}: {reason}")]
    InvalidUrl {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("root project slug must not be empty")]
    EmptyRootProject,

    #[error("poll interval must be greater than zero")]
    ZeroInterval,

    #[error("http timeout must be greater than zero")]
    ZeroTimeout,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_display() {
        let err = RemoteError::Status {
            url: "https://translate.example/api/projects/woocommerce".into(),
            status: 503,
        };
        let msg = err.to_string();
        assert!(msg.contains("HTTP 503"));
        assert!(msg.contains("api/projects/woocommerce"));
    }

    #[test]
    fn malformed_path_display() {
        let err = BuildError::MalformedPath {
            path: "woocommerce/woocommerce-bookings".into(),
        };
        assert!(err.to_string().contains("woocommerce-bookings"));
    }

    #[test]
    fn download_error_names_format() {
        let err = BuildError::Download {
            format: "mo",
            source: RemoteError::Status {
                url: "x".into(),
                status: 404,
            },
        };
        assert!(err.to_string().contains(".mo export"));
    }

    #[test]
    fn lookup_errors_carry_keys() {
        let err = LookupError::MissingTranslation {
            slug: "woocommerce-bookings".into(),
            version: "stable".into(),
            locale: "es_ES".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("es_ES"));
        assert!(msg.contains("woocommerce-bookings"));
        assert!(msg.contains("stable"));
    }
}
