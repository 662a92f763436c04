//! Persisted replacement document: the serialized form of a rule set.
//!
//! The engine itself persists nothing; callers (the CLI, external tools)
//! serialize rule sets plus target settings as a document with metadata.
//! Both JSON and TOML are supported, selected by file extension. Unknown
//! fields are a construction error so typos in hand-written documents
//! surface immediately.
//!
//! ```json
//! {
//!   "metadata": { "name": "api rename", "version": "1", "created_at": "2026-07-01T10:00:00Z" },
//!   "replacements": [
//!     { "from": "getUserData", "to": "fetchUserProfile", "whole_word": true }
//!   ],
//!   "target_settings": {
//!     "extensions": ["js", "ts"],
//!     "exclude_patterns": ["node_modules/**", ".git/**"]
//!   }
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::rules::RuleSpec;
use crate::{Result, error::SwapXError};

/// Descriptive metadata carried by a replacement document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DocumentMetadata {
    /// Display name of the rule collection.
    pub name: String,
    /// Free-form document version.
    #[serde(default = "DocumentMetadata::default_version")]
    pub version: String,
    /// Creation timestamp as written by the producing tool (RFC 3339 by
    /// convention; the engine treats it as opaque).
    #[serde(default)]
    pub created_at: String,
}

impl DocumentMetadata {
    fn default_version() -> String {
        "1".to_string()
    }
}

/// Target selection carried by a replacement document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TargetSettings {
    /// Extensions to include (empty means all files).
    #[serde(default)]
    pub extensions: Vec<String>,
    /// Glob patterns excluded from discovery.
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

/// A loadable/savable rule document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ReplacementDocument {
    /// Document metadata.
    pub metadata: DocumentMetadata,
    /// Ordered replacement rules.
    pub replacements: Vec<RuleSpec>,
    /// Target selection defaults bundled with the rules.
    #[serde(default)]
    pub target_settings: TargetSettings,
}

impl ReplacementDocument {
    /// Load a document from `path`, dispatching on the file extension
    /// (`.json` or `.toml`).
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| SwapXError::read_failure(path, source))?;
        match extension_of(path).as_deref() {
            Some("json") => Ok(serde_json::from_str(&text)?),
            Some("toml") => Ok(toml::from_str(&text)?),
            other => Err(SwapXError::config(format!(
                "Unsupported rule document extension '{}' (expected .json or .toml): {}",
                other.unwrap_or(""),
                path.display()
            ))),
        }
    }

    /// Save the document to `path`, dispatching on the file extension.
    pub fn save(&self, path: &Path) -> Result<()> {
        let text = match extension_of(path).as_deref() {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)
                .map_err(|e| SwapXError::config(format!("TOML serialization error: {}", e)))?,
            other => {
                return Err(SwapXError::config(format!(
                    "Unsupported rule document extension '{}' (expected .json or .toml): {}",
                    other.unwrap_or(""),
                    path.display()
                )));
            }
        };
        std::fs::write(path, text).map_err(|source| SwapXError::write_failure(path, source))
    }
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}
