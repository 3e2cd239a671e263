//! Request boundary: turns `/api/v1/...` requests into index lookups and
//! JSON replies. Transport lives in [`http`].

use std::path::PathBuf;
use std::sync::Arc;

use reqwest::Url;
use serde::Serialize;
use serde_json::json;

use crate::config::Mode;
use crate::services::index::Index;

mod command;
pub mod downloads;
pub mod http;

use command::Route;

#[derive(Debug, PartialEq, Eq)]
pub enum Body {
    Json(String),
    File(PathBuf),
}

#[derive(Debug, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub body: Body,
}

fn ok<T: Serialize>(value: &T) -> Reply {
    match serde_json::to_string(value) {
        Ok(s) => Reply {
            status: 200,
            body: Body::Json(s),
        },
        Err(e) => err("error_json_encode", e.to_string()),
    }
}

fn err(code: &str, message: impl Into<String>) -> Reply {
    Reply {
        status: error_status(code),
        body: Body::Json(error_json(code, message)),
    }
}

fn error_status(code: &str) -> u16 {
    match code {
        "missing_slug" | "missing_version" => 400,
        "translation_does_not_exist" | "not_found" => 404,
        _ => 500,
    }
}

/// `{"code": ..., "message": ...}` body shared by every error reply.
fn error_json(code: &str, message: impl Into<String>) -> String {
    json!({
        "code": code,
        "message": message.into()
    })
    .to_string()
}

pub struct Api {
    index: Arc<Index>,
    downloads_dir: PathBuf,
    mode: Mode,
    expose_db: bool,
}

impl Api {
    pub fn new(index: Arc<Index>, downloads_dir: impl Into<PathBuf>, mode: Mode, expose_db: bool) -> Self {
        Self {
            index,
            downloads_dir: downloads_dir.into(),
            mode,
            expose_db,
        }
    }

    /// Answers a request for `url` (path plus optional query string).
    pub fn handle(&self, url: &str) -> Reply {
        let parsed = match Url::parse("http://localhost").and_then(|base| base.join(url)) {
            Ok(u) => u,
            Err(_) => return err("not_found", format!("Invalid request URL {url}")),
        };

        match Route::from(parsed.path()) {
            Route::Plugins => self.plugins(&parsed),
            Route::Themes => err("error_not_implemented", "Not implemented"),
            Route::Update if self.mode == Mode::Notified => err("error_not_implemented", "Not implemented"),
            Route::Db if self.expose_db => ok(&self.index.dump()),
            Route::Downloads => match downloads::resolve(&self.downloads_dir, parsed.path()) {
                Some(path) => Reply {
                    status: 200,
                    body: Body::File(path),
                },
                None => err("not_found", format!("{} not found", parsed.path())),
            },
            _ => err("not_found", format!("{} not found", parsed.path())),
        }
    }

    fn plugins(&self, url: &Url) -> Reply {
        let query = |key: &str| {
            url.query_pairs()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.into_owned())
                .unwrap_or_default()
        };

        let slug = query("slug");
        if slug.is_empty() {
            return err("missing_slug", "Missing slug in query string");
        }

        let version = query("version");
        if version.is_empty() {
            return err("missing_version", "Missing version in query string");
        }

        // Optional. Without it every locale of the version is returned.
        let locale = query("locale");
        if locale.is_empty() {
            return match self.index.list(&slug, &version) {
                Ok(all) => ok(&all),
                Err(e) => err("translation_does_not_exist", e.to_string()),
            };
        }

        match self.index.get(&slug, &version, &locale) {
            Ok(t) => ok(&t),
            Err(e) => err("translation_does_not_exist", e.to_string()),
        }
    }
}
