//! Translation tables and key resolution.
//!
//! # Overview
//!
//! - **Tables**: one [`TranslationTable`] per language, keyed by the source
//!   phrase (e.g. `"%n comments"`), loaded from JSON or YAML
//! - **Entries**: plain strings, plural buckets (`none`, `0`, `1`, `-1`,
//!   `-n`, `n`, any integer), or context variants (e.g. by `gender`) whose
//!   branches may themselves be plural
//! - **Rendering**: `%n`, `-%n` and `%{name}` tokens, substituted in one pass
//! - **Resolver**: [`Resolver::resolve`] looks up a key and renders it; it
//!   never fails
//! - **Default resolver**: [`global`] holds a process-wide resolver for
//!   [`global::t`]-style calls
//! - **Locales**: [`detect_system_locale`], [`resolve_locale`] and
//!   [`LocaleLoader`] pick and load the right table file
//!
//! # Usage
//!
//! ```rust
//! use tongues::i18n::{ResolveArgs, Resolver, parse_json_table};
//!
//! let table = parse_json_table(r#"{
//!     "Due in %n days": {
//!         "none": "Expired",
//!         "-1": "Due Yesterday",
//!         "-n": "Due -%n days ago",
//!         "0": "Due Today",
//!         "n": "Due in %n days"
//!     }
//! }"#).expect("valid table");
//! let en = Resolver::new(table);
//!
//! assert_eq!(en.resolve("Due in %n days", &ResolveArgs::new().num(-3)), "Due 3 days ago");
//! assert_eq!(en.translate("Due in %n days"), "Expired");
//! ```
//!
//! # Error Handling
//!
//! - Missing keys render the caller's default text, or the key itself
//! - Missing buckets and branches fall back to `n`, the context default, and
//!   finally the missing-key text
//! - Only loading can fail ([`LoadError`]); malformed entries are rejected then

mod context;
mod detection;
mod entry;
mod error;
pub mod global;
mod loader;
mod locale;
mod plural;
mod render;
mod resolver;
mod table;

pub use context::select_branch;
pub use detection::detect_system_locale;
pub use entry::{Branch, Bucket, ContextEntry, DEFAULT_BRANCH, Entry, PluralEntry};
pub use error::LoadError;
pub use loader::{LocaleLoader, find_locale_file, load_locale_file, load_translation_file};
pub use locale::{LocaleConfig, is_valid_locale_format, resolve_locale, resolve_locale_with};
pub use plural::select_bucket;
pub use render::render;
pub use resolver::{ResolveArgs, Resolver};
pub use table::{TranslationTable, parse_json_table, parse_yaml_table};

use std::env;
use std::path::{Path, PathBuf};

/// Environment variable naming the locales directory.
pub const LOCALES_DIR_ENV: &str = "TONGUES_LOCALES_DIR";

/// File name of the locale configuration.
pub const CONFIG_FILE_NAME: &str = "i18n.yml";

/// What: Find the locales directory.
///
/// Output:
/// - `Some(PathBuf)` pointing to the first existing locales directory found, or `None` if not found
///
/// Details:
/// - Tries locations in order:
///   1. `$TONGUES_LOCALES_DIR`
///   2. `$XDG_DATA_HOME/tongues/locales` (or `~/.local/share/tongues/locales`)
///   3. `./locales`
#[must_use]
pub fn find_locales_dir() -> Option<PathBuf> {
    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Ok(dir) = env::var(LOCALES_DIR_ENV)
        && !dir.trim().is_empty()
    {
        candidates.push(PathBuf::from(dir));
    }
    if let Some(data) = data_dir() {
        candidates.push(data.join("tongues").join("locales"));
    }
    candidates.push(PathBuf::from("locales"));
    candidates.into_iter().find(|p| p.is_dir())
}

/// What: Find the locale configuration file.
///
/// Inputs:
/// - `locales_dir`: Locales directory in use, if known
///
/// Output:
/// - `Some(PathBuf)` of the first existing `i18n.yml`, or `None`
///
/// Details:
/// - Tries `locales_dir/i18n.yml`, then `$XDG_CONFIG_HOME/tongues/i18n.yml`
///   (or `~/.config/tongues/i18n.yml`)
#[must_use]
pub fn find_config_file(locales_dir: Option<&Path>) -> Option<PathBuf> {
    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Some(dir) = locales_dir {
        candidates.push(dir.join(CONFIG_FILE_NAME));
    }
    if let Some(config) = xdg_base_dir("XDG_CONFIG_HOME", &[".config"]) {
        candidates.push(config.join("tongues").join(CONFIG_FILE_NAME));
    }
    candidates.into_iter().find(|p| p.is_file())
}

/// `$XDG_DATA_HOME`, or `$HOME/.local/share`.
fn data_dir() -> Option<PathBuf> {
    xdg_base_dir("XDG_DATA_HOME", &[".local", "share"])
}

/// Resolve an XDG base directory from environment or `$HOME` + segments.
fn xdg_base_dir(var: &str, home_default: &[&str]) -> Option<PathBuf> {
    if let Ok(p) = env::var(var)
        && !p.trim().is_empty()
    {
        return Some(PathBuf::from(p));
    }
    let home = env::var("HOME").ok()?;
    Some(
        home_default
            .iter()
            .fold(PathBuf::from(home), |base, seg| base.join(seg)),
    )
}
