//! Crawls root → extension → version on GlotPress and rebuilds the
//! language packs whose `last_modified` changed since the last look.

use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::error::RemoteError;
use crate::locales::{locale_prop, LocaleProp};
use crate::model::project::{SubProject, TranslationSet};
use crate::model::translation::Translation;
use crate::services::glotpress::Remote;
use crate::services::index::Index;
use crate::services::package::PackageBuilder;

/// Outcome counts of one cycle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    pub built: usize,
    pub unchanged: usize,
    pub failed: usize,
    /// Extension or version nodes that could not be fetched.
    pub skipped: usize,
}

pub struct Synchronizer {
    remote: Arc<dyn Remote>,
    builder: PackageBuilder,
    index: Arc<Index>,
    root: String,
}

impl Synchronizer {
    pub fn new(remote: Arc<dyn Remote>, builder: PackageBuilder, index: Arc<Index>, root: &str) -> Self {
        Self {
            remote,
            builder,
            index,
            root: root.trim_matches('/').to_string(),
        }
    }

    /// Runs cycles back to back with `interval` of sleep after each one,
    /// until `stop` fires or its sender is dropped. A slow cycle delays the
    /// next one; two cycles never overlap.
    pub fn run(&self, interval: Duration, stop: Receiver<()>) {
        info!(interval = %humantime::format_duration(interval), "start polling");

        loop {
            if let Err(e) = self.run_cycle() {
                warn!(error = %e, "error during poll");
            }

            debug!(interval = %humantime::format_duration(interval), "sleeping");
            match stop.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => continue,
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        info!("polling stopped");
    }

    /// One full traversal. Only a failure to fetch the root project fails
    /// the cycle; anything below it is skipped and counted.
    pub fn run_cycle(&self) -> Result<CycleReport, RemoteError> {
        let started = Instant::now();
        let mut report = CycleReport::default();

        let root = self.remote.fetch_project(&self.root)?;

        for ext in &root.sub_projects {
            self.sync_extension(ext, &mut report);
        }

        info!(
            built = report.built,
            unchanged = report.unchanged,
            failed = report.failed,
            skipped = report.skipped,
            leaves = self.index.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "cycle finished"
        );
        Ok(report)
    }

    fn sync_extension(&self, ext: &SubProject, report: &mut CycleReport) {
        let project = match self.remote.fetch_project(&ext.path) {
            Ok(p) => p,
            Err(e) => {
                warn!(project = %ext.slug, error = %e, "skipping extension");
                report.skipped += 1;
                return;
            }
        };

        // Sub-projects of an extension are its versions.
        for version in &project.sub_projects {
            if !version.active {
                debug!(project = %ext.slug, version = %version.slug, "version marked inactive upstream");
            }

            let descriptor = match self.remote.fetch_project(&version.path) {
                Ok(p) => p,
                Err(e) => {
                    warn!(project = %ext.slug, version = %version.slug, error = %e, "skipping version");
                    report.skipped += 1;
                    continue;
                }
            };

            let sets = descriptor.leaf_sets();
            if sets.len() < descriptor.translation_sets.len() {
                debug!(
                    project = %ext.slug,
                    version = %version.slug,
                    ignored = descriptor.translation_sets.len() - sets.len(),
                    "ignoring translation set variants"
                );
            }
            for set in sets {
                self.sync_leaf(&ext.slug, version, set, report);
            }
        }
    }

    fn sync_leaf(&self, slug: &str, version: &SubProject, set: &TranslationSet, report: &mut CycleReport) {
        let locale = set.index_locale();
        let marker = set.marker();

        match self.index.marker(slug, &version.slug, locale) {
            Some(current) if current == marker => {
                debug!(project = slug, version = %version.slug, locale, "unchanged");
                report.unchanged += 1;
                return;
            }
            Some(current) => {
                info!(project = slug, version = %version.slug, locale, from = %current, to = %marker, "translation changed");
            }
            None => {
                info!(project = slug, version = %version.slug, locale, name = %set.name, "new translation");
            }
        }

        let built = match self.builder.build(&version.path, locale) {
            Ok(b) => b,
            Err(e) => {
                warn!(project = slug, version = %version.slug, locale, error = %e, "failed to build language pack");
                report.failed += 1;
                return;
            }
        };

        let translation = Translation {
            language: locale.to_string(),
            last_modified: marker,
            english_name: locale_prop(locale, LocaleProp::EnglishName).to_string(),
            native_name: locale_prop(locale, LocaleProp::NativeName).to_string(),
            package: built.reference,
        };

        if self.index.commit(slug, &version.slug, locale, translation) {
            debug!(project = slug, version = %version.slug, locale, sha256 = %built.sha256, path = %built.path.display(), "indexed");
            report.built += 1;
        } else {
            report.failed += 1;
        }
    }
}
