use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

pub const MARKER_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Shape of `/api/projects/{path}` as far as the synchronizer cares.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ProjectDescriptor {
    #[serde(default)]
    pub translation_sets: Vec<TranslationSet>,

    #[serde(default)]
    pub sub_projects: Vec<SubProject>,
}

/// Slug GlotPress gives the main set of a locale; variants such as
/// `formal` share its `wp_locale`.
pub const DEFAULT_SET: &str = "default";

impl ProjectDescriptor {
    /// One translation set per index key, in listing order. When several
    /// sets share a key the `default` one wins, otherwise the first listed.
    pub fn leaf_sets(&self) -> Vec<&TranslationSet> {
        let mut picked: Vec<&TranslationSet> = Vec::new();
        for set in &self.translation_sets {
            match picked.iter_mut().find(|p| p.index_locale() == set.index_locale()) {
                Some(p) => {
                    if set.slug == DEFAULT_SET && p.slug != DEFAULT_SET {
                        *p = set;
                    }
                }
                None => picked.push(set),
            }
        }
        picked
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct TranslationSet {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub slug: String,

    pub locale: String,

    #[serde(default)]
    pub wp_locale: Option<String>,

    #[serde(default)]
    pub last_modified: Option<LastModified>,
}

impl TranslationSet {
    /// Key used by the index. GlotPress leaves `wp_locale` null for a few
    /// locales; those fall back to the GlotPress locale code.
    pub fn index_locale(&self) -> &str {
        match self.wp_locale.as_deref() {
            Some(l) if !l.trim().is_empty() => l,
            _ => &self.locale,
        }
    }

    /// Staleness marker as stored in the index.
    pub fn marker(&self) -> String {
        self.marker_at(Utc::now())
    }

    /// Compatibility shim: anything but a non-empty timestamp string becomes
    /// `now`, so the stored marker is always a comparable string. A set
    /// reported this way is rebuilt on every cycle.
    pub fn marker_at(&self, now: DateTime<Utc>) -> String {
        match &self.last_modified {
            Some(LastModified::Stamp(s)) if !s.trim().is_empty() => s.clone(),
            _ => now.format(MARKER_FORMAT).to_string(),
        }
    }
}

/// `last_modified` arrives as a timestamp string, or as `false` when the
/// set has never been touched.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum LastModified {
    Stamp(String),
    Flag(bool),
}

#[derive(Debug, Deserialize, Clone)]
pub struct SubProject {
    pub slug: String,

    pub path: String,

    #[serde(default, deserialize_with = "active_flag")]
    pub active: bool,
}

// GlotPress has served `active` as "1"/"0", 1/0 and true/false over time.
fn active_flag<'de, D>(de: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Int(i64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(de)? {
        None => false,
        Some(Raw::Bool(b)) => b,
        Some(Raw::Int(n)) => n != 0,
        Some(Raw::Text(s)) => matches!(s.trim(), "1" | "true"),
    })
}
