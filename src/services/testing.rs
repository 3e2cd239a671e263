//! In-memory GlotPress used by the service tests.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::RemoteError;
use crate::model::project::ProjectDescriptor;
use crate::services::glotpress::{ExportFormat, Remote};

#[derive(Default)]
struct State {
    projects: HashMap<String, ProjectDescriptor>,
    exports: HashMap<(String, String, &'static str), Vec<u8>>,
    failing: HashSet<(String, String, &'static str)>,
    fetches: usize,
    downloads: usize,
}

/// Cheap to clone; clones share state so a test can keep a handle after
/// moving one into a builder.
#[derive(Clone, Default)]
pub struct FakeRemote {
    state: Arc<Mutex<State>>,
}

impl FakeRemote {
    pub fn with_project(self, path: &str, json: &str) -> Self {
        self.set_project(path, json);
        self
    }

    pub fn with_export(self, path: &str, locale: &str, po: &[u8], mo: &[u8]) -> Self {
        self.set_export(path, locale, po, mo);
        self
    }

    pub fn failing_export(self, path: &str, locale: &str, format: ExportFormat) -> Self {
        self.fail_export(path, locale, format);
        self
    }

    pub fn fail_export(&self, path: &str, locale: &str, format: ExportFormat) {
        self.state
            .lock()
            .failing
            .insert((path.to_string(), locale.to_string(), format.ext()));
    }

    pub fn set_project(&self, path: &str, json: &str) {
        let descriptor: ProjectDescriptor = serde_json::from_str(json).unwrap();
        self.state.lock().projects.insert(path.to_string(), descriptor);
    }

    pub fn set_export(&self, path: &str, locale: &str, po: &[u8], mo: &[u8]) {
        let mut state = self.state.lock();
        for (format, body) in [(ExportFormat::Po, po), (ExportFormat::Mo, mo)] {
            state
                .exports
                .insert((path.to_string(), locale.to_string(), format.ext()), body.to_vec());
        }
    }

    pub fn clear_failures(&self) {
        self.state.lock().failing.clear();
    }

    /// Number of requests made so far (project fetches + export downloads).
    pub fn requests(&self) -> usize {
        let state = self.state.lock();
        state.fetches + state.downloads
    }

    pub fn downloads(&self) -> usize {
        self.state.lock().downloads
    }
}

impl Remote for FakeRemote {
    fn fetch_project(&self, path: &str) -> Result<ProjectDescriptor, RemoteError> {
        let mut state = self.state.lock();
        state.fetches += 1;
        state.projects.get(path).cloned().ok_or_else(|| RemoteError::Status {
            url: format!("fake://api/{path}"),
            status: 404,
        })
    }

    fn export(&self, path: &str, locale: &str, format: ExportFormat) -> Result<Vec<u8>, RemoteError> {
        let mut state = self.state.lock();
        state.downloads += 1;

        let key = (path.to_string(), locale.to_string(), format.ext());
        let url = format!("fake://export/{path}/{locale}?format={}", format.ext());
        if state.failing.contains(&key) {
            return Err(RemoteError::Status { url, status: 500 });
        }
        state
            .exports
            .get(&key)
            .cloned()
            .ok_or(RemoteError::Status { url, status: 404 })
    }
}
