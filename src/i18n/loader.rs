//! Translation file loading.
//!
//! The file extension picks the parser: `.json` uses `serde_json`, `.yml` and
//! `.yaml` use `serde_norway`. Loading happens once, before any resolution.

use std::fs;
use std::path::{Path, PathBuf};

use crate::i18n::error::LoadError;
use crate::i18n::locale::is_valid_locale_format;
use crate::i18n::table::{TranslationTable, parse_json_table, parse_yaml_table};

/// Extensions probed for a locale file, in order.
const LOCALE_EXTENSIONS: [&str; 3] = ["json", "yml", "yaml"];

/// What: Load a translation file and parse it into a `TranslationTable`.
///
/// Inputs:
/// - `path`: Path to a `.json`, `.yml` or `.yaml` file
///
/// Output:
/// - `Result<TranslationTable, LoadError>`
///
/// # Errors
/// - `LoadError::UnsupportedFormat` for any other extension
/// - `LoadError::Io` when the file cannot be read
/// - `LoadError::Empty` when the file has no content
/// - `LoadError::Parse` / `LoadError::MalformedTable` for invalid content
pub fn load_translation_file(path: &Path) -> Result<TranslationTable, LoadError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let parse: fn(&str) -> Result<TranslationTable, LoadError> = match extension.as_str() {
        "json" => parse_json_table,
        "yml" | "yaml" => parse_yaml_table,
        _ => return Err(LoadError::UnsupportedFormat(extension)),
    };

    let contents = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if contents.trim().is_empty() {
        return Err(LoadError::Empty(path.to_path_buf()));
    }

    let table = parse(&contents)?;
    tracing::debug!(
        path = %path.display(),
        entries = table.len(),
        "Loaded translation file"
    );
    Ok(table)
}

/// What: Find the file for a locale inside a locales directory.
///
/// Inputs:
/// - `locale`: Locale code (e.g., "pl", "de-DE")
/// - `locales_dir`: Directory holding `{locale}.json|yml|yaml`
///
/// Output:
/// - `Some(PathBuf)` of the first existing candidate, `None` otherwise
#[must_use]
pub fn find_locale_file(locale: &str, locales_dir: &Path) -> Option<PathBuf> {
    LOCALE_EXTENSIONS
        .iter()
        .map(|ext| locales_dir.join(format!("{locale}.{ext}")))
        .find(|candidate| candidate.is_file())
}

/// What: Load the translation file of one locale.
///
/// Inputs:
/// - `locale`: Locale code
/// - `locales_dir`: Path to locales directory
///
/// Output:
/// - `Result<TranslationTable, LoadError>`
///
/// # Errors
/// - `LoadError::InvalidLocale` when the code is empty or malformed
/// - `LoadError::LocaleNotFound` when no file exists for it
/// - Any error of [`load_translation_file`]
///
/// Details:
/// - Validates the locale format before touching the filesystem
pub fn load_locale_file(locale: &str, locales_dir: &Path) -> Result<TranslationTable, LoadError> {
    if !is_valid_locale_format(locale) {
        return Err(LoadError::InvalidLocale(locale.to_string()));
    }

    let Some(path) = find_locale_file(locale, locales_dir) else {
        return Err(LoadError::LocaleNotFound {
            locale: locale.to_string(),
            dir: locales_dir.to_path_buf(),
        });
    };

    load_translation_file(&path)
}

/// Loads locale tables from one directory, trying the language-only code
/// (`de-CH` -> `de`) when the full code has no file.
#[derive(Debug, Clone)]
pub struct LocaleLoader {
    /// Directory holding the locale files.
    locales_dir: PathBuf,
}

impl LocaleLoader {
    /// What: Create a new `LocaleLoader`.
    ///
    /// Inputs:
    /// - `locales_dir`: Path to locales directory
    ///
    /// Output:
    /// - `LocaleLoader` instance
    #[must_use]
    pub const fn new(locales_dir: PathBuf) -> Self {
        Self { locales_dir }
    }

    /// What: Load the table for `locale`, or for its language if the region has none.
    ///
    /// Inputs:
    /// - `locale`: Locale code to load
    ///
    /// Output:
    /// - `(loaded locale code, table)`
    ///
    /// # Errors
    /// - Returns `Err` when neither the locale nor its language has a loadable file
    ///
    /// Details:
    /// - Every call reads the file again; callers keep the table they need
    pub fn load(&self, locale: &str) -> Result<(String, TranslationTable), LoadError> {
        match load_locale_file(locale, &self.locales_dir) {
            Ok(table) => Ok((locale.to_string(), table)),
            Err(LoadError::LocaleNotFound { .. })
                if locale.contains('-') && !locale.starts_with('-') =>
            {
                let language = locale.split('-').next().unwrap_or(locale);
                tracing::debug!(
                    "No file for locale '{}', trying language '{}'",
                    locale,
                    language
                );
                load_locale_file(language, &self.locales_dir)
                    .map(|table| (language.to_string(), table))
                    .map_err(|e| match e {
                        LoadError::LocaleNotFound { dir, .. } => LoadError::LocaleNotFound {
                            locale: locale.to_string(),
                            dir,
                        },
                        other => other,
                    })
            }
            Err(e) => {
                tracing::warn!("Failed to load locale '{}': {}", locale, e);
                Err(e)
            }
        }
    }

    /// What: Get locales directory path.
    #[must_use]
    pub fn locales_dir(&self) -> &Path {
        &self.locales_dir
    }
}
