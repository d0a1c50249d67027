//! Load-time errors.
//!
//! Resolution itself never fails: missing keys and missing buckets degrade to
//! fallback text. Only loading a table (reading, parsing, shape validation)
//! can produce an error.

use std::path::PathBuf;

/// Errors raised while loading a translation table or resolving a locale file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The translation file could not be read.
    #[error("failed to read translation file {}: {source}", .path.display())]
    Io {
        /// File that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The translation file exists but contains nothing.
    #[error("translation file is empty: {}", .0.display())]
    Empty(PathBuf),

    /// The file is not valid JSON/YAML.
    #[error("failed to parse translation data: {0}")]
    Parse(String),

    /// The file extension does not map to a known format.
    #[error("unsupported translation file format: '{0}' (expected .json, .yml or .yaml)")]
    UnsupportedFormat(String),

    /// A locale code failed validation.
    #[error(
        "invalid locale code format: '{0}'. Expected format: language[-region] (e.g. 'en-US', 'de')"
    )]
    InvalidLocale(String),

    /// No file exists for the locale (or any of its fallbacks) in the locales directory.
    #[error("no translation file for locale '{locale}' in {}", .dir.display())]
    LocaleNotFound {
        /// Requested locale code.
        locale: String,
        /// Directory that was searched.
        dir: PathBuf,
    },

    /// An entry's shape does not match any of the Plain/Plural/Context forms.
    #[error("malformed entry '{key}': {reason}")]
    MalformedTable {
        /// Key of the offending entry (empty for the document root).
        key: String,
        /// Human-readable description of the problem.
        reason: String,
    },
}

impl LoadError {
    /// What: Build a `MalformedTable` error for a key.
    ///
    /// Inputs:
    /// - `key`: Translation key of the offending entry
    /// - `reason`: Description of the shape violation
    ///
    /// Output:
    /// - `LoadError::MalformedTable`
    pub(crate) fn malformed(key: &str, reason: impl Into<String>) -> Self {
        Self::MalformedTable {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}
