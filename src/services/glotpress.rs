use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;

use crate::error::RemoteError;
use crate::model::project::ProjectDescriptor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Po,
    Mo,
}

impl ExportFormat {
    pub fn ext(self) -> &'static str {
        match self {
            ExportFormat::Po => "po",
            ExportFormat::Mo => "mo",
        }
    }
}

/// Everything the synchronizer needs from GlotPress. One call is one
/// request; retrying is left to the next cycle.
pub trait Remote: Send + Sync {
    fn fetch_project(&self, path: &str) -> Result<ProjectDescriptor, RemoteError>;

    /// Raw export of `locale` for the project at `path`.
    fn export(&self, path: &str, locale: &str, format: ExportFormat) -> Result<Vec<u8>, RemoteError>;
}

pub struct GlotPress {
    client: Client,
    api_root: String,
    export_root: String,
}

impl GlotPress {
    pub fn new(api_root: &str, export_root: &str, timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("langpack-server/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_root: api_root.to_string(),
            export_root: export_root.to_string(),
        })
    }

    pub fn project_url(&self, path: &str) -> String {
        join(&self.api_root, path)
    }

    pub fn export_url(&self, path: &str, locale: &str, format: ExportFormat) -> String {
        format!("{}/{}?format={}", join(&self.export_root, path), locale, format.ext())
    }

    fn get_bytes(&self, url: &str) -> Result<Vec<u8>, RemoteError> {
        let network = |source| RemoteError::Network {
            url: url.to_string(),
            source,
        };

        let resp = self.client.get(url).send().map_err(network)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(RemoteError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = resp.bytes().map_err(network)?;
        Ok(body.to_vec())
    }
}

impl Remote for GlotPress {
    fn fetch_project(&self, path: &str) -> Result<ProjectDescriptor, RemoteError> {
        let url = self.project_url(path);
        debug!(%url, "fetching project");

        let body = self.get_bytes(&url)?;

        serde_json::from_slice(&body).map_err(|e| RemoteError::Decode {
            url,
            reason: e.to_string(),
        })
    }

    fn export(&self, path: &str, locale: &str, format: ExportFormat) -> Result<Vec<u8>, RemoteError> {
        let url = self.export_url(path, locale, format);
        debug!(%url, "downloading export");
        self.get_bytes(&url)
    }
}

fn join(root: &str, path: &str) -> String {
    format!("{}/{}", root.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    use tiny_http::{Header, Response, Server};

    /// Serves `routes` (url, status, body) from a background thread and
    /// returns the base URL.
    fn serve(routes: Vec<(&'static str, u16, &'static str)>) -> String {
        let server = Server::http("127.0.0.1:0").unwrap();
        let base = format!("http://{}", server.server_addr().to_ip().unwrap());

        thread::spawn(move || {
            for req in server.incoming_requests() {
                let (status, body) = routes
                    .iter()
                    .find(|(url, _, _)| *url == req.url())
                    .map(|(_, s, b)| (*s, *b))
                    .unwrap_or((404, "{}"));

                let resp = Response::from_string(body)
                    .with_status_code(status)
                    .with_header(Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap());
                let _ = req.respond(resp);
            }
        });

        base
    }

    fn client(base: &str) -> GlotPress {
        GlotPress::new(
            &format!("{base}/api/projects/"),
            &format!("{base}/projects/"),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn builds_urls_without_double_slashes() {
        let gp = GlotPress::new(
            "https://translate.example/api/projects/",
            "https://translate.example/projects",
            Duration::from_secs(1),
        )
        .unwrap();

        assert_eq!(
            gp.project_url("woocommerce/woocommerce-bookings"),
            "https://translate.example/api/projects/woocommerce/woocommerce-bookings"
        );
        assert_eq!(
            gp.export_url("woocommerce/woocommerce-bookings/stable", "es_ES", ExportFormat::Mo),
            "https://translate.example/projects/woocommerce/woocommerce-bookings/stable/es_ES?format=mo"
        );
    }

    #[test]
    fn fetches_and_decodes_project() {
        let base = serve(vec![(
            "/api/projects/woocommerce",
            200,
            r#"{"translation_sets": [], "sub_projects": [{"slug": "woocommerce-bookings", "path": "woocommerce/woocommerce-bookings", "active": "1"}]}"#,
        )]);

        let p = client(&base).fetch_project("woocommerce").unwrap();
        assert_eq!(p.sub_projects.len(), 1);
        assert_eq!(p.sub_projects[0].slug, "woocommerce-bookings");
        assert!(p.sub_projects[0].active);
    }

    #[test]
    fn malformed_body_is_decode_error() {
        let base = serve(vec![("/api/projects/woocommerce", 200, "<html>maintenance</html>")]);

        let err = client(&base).fetch_project("woocommerce").unwrap_err();
        assert!(matches!(err, RemoteError::Decode { .. }), "{err:?}");
    }

    #[test]
    fn error_status_is_reported() {
        let base = serve(vec![]);

        let err = client(&base).fetch_project("woocommerce/missing").unwrap_err();
        assert!(matches!(err, RemoteError::Status { status: 404, .. }), "{err:?}");
    }

    #[test]
    fn export_returns_raw_body() {
        let base = serve(vec![(
            "/projects/woocommerce/ext/stable/es_ES?format=po",
            200,
            "msgid \"Hello\"\nmsgstr \"Hola\"\n",
        )]);

        let body = client(&base)
            .export("woocommerce/ext/stable", "es_ES", ExportFormat::Po)
            .unwrap();
        assert_eq!(body, b"msgid \"Hello\"\nmsgstr \"Hola\"\n");
    }

    #[test]
    fn unreachable_remote_is_network_error() {
        // Bind then drop to get a port nothing listens on.
        let addr = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        let gp = client(&format!("http://{addr}"));

        let err = gp.fetch_project("woocommerce").unwrap_err();
        assert!(matches!(err, RemoteError::Network { .. }), "{err:?}");
    }

    #[test]
    fn slow_remote_times_out() {
        let server = Server::http("127.0.0.1:0").unwrap();
        let base = format!("http://{}", server.server_addr().to_ip().unwrap());
        thread::spawn(move || {
            if let Ok(req) = server.recv() {
                thread::sleep(Duration::from_secs(3));
                let _ = req.respond(Response::from_string("{}"));
            }
        });

        let gp = GlotPress::new(
            &format!("{base}/api/projects/"),
            &format!("{base}/projects/"),
            Duration::from_millis(200),
        )
        .unwrap();

        let err = gp.fetch_project("woocommerce").unwrap_err();
        assert!(matches!(err, RemoteError::Network { .. }), "{err:?}");
    }
}
