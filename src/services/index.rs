//! In-memory index of built language packs, keyed by extension slug,
//! version slug and WordPress locale.
//!
//! Readers and the synchronizer share one `Index`; every access goes
//! through a single `RwLock`, so a nested level is only ever observed
//! complete and a three-level insert is atomic for readers.

use std::collections::BTreeMap;

use parking_lot::RwLock;
use tracing::warn;

use crate::error::LookupError;
use crate::model::translation::Translation;

pub type LocaleMap = BTreeMap<String, Translation>;
pub type VersionMap = BTreeMap<String, LocaleMap>;
pub type Snapshot = BTreeMap<String, VersionMap>;

#[derive(Debug, Default)]
pub struct Index {
    db: RwLock<Snapshot>,
}

impl Index {
    pub fn new() -> Self {
        Self::default()
    }

    /// All locales built for `slug` at `version`.
    pub fn list(&self, slug: &str, version: &str) -> Result<LocaleMap, LookupError> {
        let db = self.db.read();
        let versions = db.get(slug).ok_or_else(|| LookupError::MissingSlug {
            slug: slug.to_string(),
        })?;
        let locales = versions
            .get(version)
            .ok_or_else(|| LookupError::MissingVersion {
                slug: slug.to_string(),
                version: version.to_string(),
            })?;
        Ok(locales.clone())
    }

    pub fn get(&self, slug: &str, version: &str, locale: &str) -> Result<Translation, LookupError> {
        let db = self.db.read();
        let versions = db.get(slug).ok_or_else(|| LookupError::MissingSlug {
            slug: slug.to_string(),
        })?;
        let locales = versions
            .get(version)
            .ok_or_else(|| LookupError::MissingVersion {
                slug: slug.to_string(),
                version: version.to_string(),
            })?;
        locales
            .get(locale)
            .cloned()
            .ok_or_else(|| LookupError::MissingTranslation {
                slug: slug.to_string(),
                version: version.to_string(),
                locale: locale.to_string(),
            })
    }

    /// Copy of the whole index, for diagnostics.
    pub fn dump(&self) -> Snapshot {
        self.db.read().clone()
    }

    /// Staleness marker currently stored for a leaf, if any.
    pub fn marker(&self, slug: &str, version: &str, locale: &str) -> Option<String> {
        self.db
            .read()
            .get(slug)
            .and_then(|v| v.get(version))
            .and_then(|l| l.get(locale))
            .map(|t| t.last_modified.clone())
    }

    /// Inserts or wholesale replaces the entry of a leaf, creating the
    /// project and version levels as needed, all under one write lock.
    ///
    /// Records without a marker or package are refused; returns whether the
    /// record was stored.
    pub fn commit(&self, slug: &str, version: &str, locale: &str, translation: Translation) -> bool {
        if translation.last_modified.is_empty() || translation.package.is_empty() {
            warn!(project = slug, version, locale, "refusing incomplete translation record");
            return false;
        }

        self.db
            .write()
            .entry(slug.to_string())
            .or_default()
            .entry(version.to_string())
            .or_default()
            .insert(locale.to_string(), translation);
        true
    }

    /// Number of leaves.
    pub fn len(&self) -> usize {
        self.db
            .read()
            .values()
            .flat_map(|versions| versions.values())
            .map(|locales| locales.len())
            .sum()
    }
}
