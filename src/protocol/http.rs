use std::fs::File;
use std::io::{Cursor, Read};
use std::sync::Arc;
use std::thread;

use tiny_http::{Header, Request, Response, Server};
use tracing::{debug, warn};

use super::{error_json, error_status, Api, Body, Reply};

const JSON_CONTENT_TYPE: &[u8] = b"application/json; charset=UTF-8";
const ZIP_CONTENT_TYPE: &[u8] = b"application/zip";

/// Serves `api` on `server` with `workers` threads. Returns once every
/// worker has stopped, i.e. after `server.unblock()` has been called once
/// per worker or the listener failed.
pub fn serve(server: Arc<Server>, api: Arc<Api>, workers: usize) {
    thread::scope(|s| {
        for n in 0..workers.max(1) {
            let server = &server;
            let api = &api;
            let spawned = thread::Builder::new()
                .name(format!("http-{n}"))
                .spawn_scoped(s, move || {
                    while let Ok(req) = server.recv() {
                        respond(api, req);
                    }
                });
            if let Err(e) = spawned {
                warn!(error = %e, "failed to spawn http worker");
            }
        }
    });
}

fn respond(api: &Api, req: Request) {
    let url = req.url().to_string();
    let Reply { status, body } = api.handle(&url);
    debug!(method = %req.method(), %url, status, "request");

    let result = match body {
        Body::Json(json) => req.respond(json_response(status, json)),
        Body::File(path) => match File::open(&path) {
            Ok(file) => req.respond(with_content_type(
                Response::from_file(file).with_status_code(status),
                ZIP_CONTENT_TYPE,
            )),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to open language pack");
                req.respond(json_response(
                    error_status("not_found"),
                    error_json("not_found", format!("{url} not found")),
                ))
            }
        },
    };

    if let Err(e) = result {
        debug!(%url, error = %e, "failed to write response");
    }
}

fn json_response(status: u16, json: String) -> Response<Cursor<Vec<u8>>> {
    with_content_type(Response::from_string(json).with_status_code(status), JSON_CONTENT_TYPE)
}

fn with_content_type<R: Read>(resp: Response<R>, content_type: &'static [u8]) -> Response<R> {
    match Header::from_bytes(&b"Content-Type"[..], content_type) {
        Ok(h) => resp.with_header(h),
        Err(()) => {
            warn!(content_type = %String::from_utf8_lossy(content_type), "invalid content type header");
            resp
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;

    use crate::config::Mode;
    use crate::model::translation::Translation;
    use crate::services::index::Index;

    #[test]
    fn missing_pack_falls_back_to_json_not_found() {
        let resp = json_response(
            error_status("not_found"),
            error_json("not_found", "/downloads/ext/stable/ext-stable-es_ES.zip not found"),
        );
        assert_eq!(resp.status_code().0, 404);
        assert!(resp
            .headers()
            .iter()
            .any(|h| h.field.equiv("Content-Type") && h.value.as_str() == "application/json; charset=UTF-8"));
    }

    #[test]
    fn serves_lookups_and_archives_over_http() {
        let downloads = tempfile::tempdir().unwrap();
        fs::create_dir_all(downloads.path().join("ext/stable")).unwrap();
        fs::write(downloads.path().join("ext/stable/ext-stable-es_ES.zip"), b"PK\x03\x04").unwrap();

        let index = Arc::new(Index::new());
        index.commit(
            "ext",
            "stable",
            "es_ES",
            Translation {
                language: "es_ES".into(),
                last_modified: "2024-01-01 00:00:00".into(),
                english_name: "Spanish (Spain)".into(),
                native_name: "Español".into(),
                package: "/downloads/ext/stable/ext-stable-es_ES.zip".into(),
            },
        );
        let api = Arc::new(Api::new(index, downloads.path(), Mode::Poll, false));

        let server = Arc::new(Server::http("127.0.0.1:0").unwrap());
        let base = format!("http://{}", server.server_addr().to_ip().unwrap());

        thread::scope(|s| {
            let srv = Arc::clone(&server);
            s.spawn(move || serve(srv, api, 2));

            let client = reqwest::blocking::Client::builder()
                .timeout(Duration::from_secs(5))
                .build()
                .unwrap();

            let resp = client
                .get(format!("{base}/api/v1/plugins?slug=ext&version=stable&locale=es_ES"))
                .send()
                .unwrap();
            assert_eq!(resp.status().as_u16(), 200);
            assert_eq!(
                resp.headers()["content-type"].to_str().unwrap(),
                "application/json; charset=UTF-8"
            );
            let t: Translation = resp.json().unwrap();
            assert_eq!(t.language, "es_ES");

            let resp = client.get(format!("{base}{}", t.package)).send().unwrap();
            assert_eq!(resp.status().as_u16(), 200);
            assert_eq!(&resp.bytes().unwrap()[..], b"PK\x03\x04");

            let resp = client
                .get(format!("{base}/api/v1/plugins?slug=ext"))
                .send()
                .unwrap();
            assert_eq!(resp.status().as_u16(), 400);

            for _ in 0..2 {
                server.unblock();
            }
        });
    }
}
