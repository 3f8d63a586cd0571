//! Localized string lookup.
//!
//! All user-facing strings are resolved by key from an externally supplied
//! bundle. The core only ever asks for a key and falls back to the key itself
//! when a translation is missing.

use std::collections::HashMap;

use serde::Deserialize;

use super::error::Result;

#[derive(Debug, Clone, Deserialize)]
pub struct Bundle {
    #[serde(flatten)]
    strings: HashMap<String, String>,
}

impl Bundle {
    /// Parse a bundle from a flat JSON object of key/value pairs.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Look up a key, falling back to the key itself.
    pub fn get<'a>(&'a self, key: &'a str) -> &'a str {
        self.strings.get(key).map(String::as_str).unwrap_or(key)
    }
}

impl Default for Bundle {
    /// Built-in English strings.
    fn default() -> Self {
        let strings = [
            ("appname", "JsonPad"),
            ("new_file", "New File"),
            ("load_title", "Open File"),
            ("save_title", "Save File"),
            ("copy", "Copy"),
            ("cut", "Cut"),
            ("paste", "Paste"),
            ("format", "Format"),
            ("about", "About"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        Self { strings }
    }
}
