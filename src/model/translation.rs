use serde::{Deserialize, Serialize};

/// One cached language pack. Mirrors an item of
/// `https://api.wordpress.org/translations/plugins/1.0/` so the WooCommerce
/// helper can consume it unchanged.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Translation {
    pub language: String,

    pub last_modified: String,

    #[serde(default)]
    pub english_name: String,

    #[serde(default)]
    pub native_name: String,

    /// Download reference of the built archive.
    pub package: String,
}
