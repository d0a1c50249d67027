//! Locale resolution with fallback chain support.
//!
//! Decides which table file a host should load. The config lives in an
//! `i18n.yml` file:
//!
//! ```yaml
//! default_locale: en
//! locales: [en, jp, pl]
//! fallbacks:
//!   ja: jp
//!   pl-PL: pl
//! ```

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::i18n::detection::detect_system_locale;

/// Longest fallback chain followed before giving up.
const MAX_FALLBACK_STEPS: usize = 10;

/// Locale configuration (`i18n.yml`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    /// Locale used when nothing else resolves.
    pub default_locale: String,
    /// Locales that have a table file. Empty means "not restricted".
    pub locales: Vec<String>,
    /// Locale -> next locale to try.
    pub fallbacks: HashMap<String, String>,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            default_locale: "en".to_string(),
            locales: Vec::new(),
            fallbacks: HashMap::new(),
        }
    }
}

impl LocaleConfig {
    /// What: Parse a locale config from YAML text.
    ///
    /// Inputs:
    /// - `yaml`: Contents of an `i18n.yml` file
    ///
    /// Output:
    /// - `Result<LocaleConfig, String>`
    ///
    /// # Errors
    /// - Returns `Err` when the YAML is invalid or has wrongly typed fields
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_norway::from_str(yaml).map_err(|e| format!("Failed to parse i18n config: {e}"))
    }

    /// What: Load the config file, falling back to defaults on any problem.
    ///
    /// Inputs:
    /// - `path`: Path to `i18n.yml`
    ///
    /// Output:
    /// - Parsed config, or `LocaleConfig::default()` (with a warning) if unreadable
    #[must_use]
    pub fn load_or_default(path: &Path) -> Self {
        let parsed = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))
            .and_then(|contents| Self::from_yaml(&contents));
        match parsed {
            Ok(config) => {
                tracing::debug!(
                    path = %path.display(),
                    fallbacks = config.fallbacks.len(),
                    locales = config.locales.len(),
                    "Loaded locale config"
                );
                config
            }
            Err(e) => {
                tracing::warn!("{e}; using default locale config");
                Self::default()
            }
        }
    }

    /// Whether a table file is expected for `locale`.
    ///
    /// With no `locales` listed every locale counts as available and the
    /// loader decides by looking for the file.
    fn is_available(&self, locale: &str) -> bool {
        self.locales.is_empty()
            || locale == self.default_locale
            || self.locales.iter().any(|l| l == locale)
    }
}

/// What: Validate locale code format.
///
/// Inputs:
/// - `locale`: Locale code to validate
///
/// Output:
/// - `true` if format looks valid, `false` otherwise
///
/// Details:
/// - Allows `language`, `language-region`, `language-script-region`
/// - Rejects empty codes, spaces and most special characters
#[must_use]
pub fn is_valid_locale_format(locale: &str) -> bool {
    if locale.is_empty() || locale.len() > 20 {
        return false;
    }

    locale.chars().all(|c| c.is_alphanumeric() || c == '-')
        && !locale.starts_with('-')
        && !locale.ends_with('-')
        && !locale.contains("--")
}

/// What: Resolve the effective locale to use, following the fallback chain.
///
/// Inputs:
/// - `requested`: Locale asked for by the caller (e.g. `--locale`), if any
/// - `config`: Locale configuration
///
/// Output:
/// - Resolved locale code
///
/// Details:
/// - Priority: `requested` -> system locale -> `config.default_locale`
#[must_use]
pub fn resolve_locale(requested: Option<&str>, config: &LocaleConfig) -> String {
    resolve_locale_with(requested, detect_system_locale(), config)
}

/// What: `resolve_locale` with the system locale supplied by the caller.
///
/// Inputs:
/// - `requested`: Explicitly requested locale, if any
/// - `system`: Detected system locale, if any
/// - `config`: Locale configuration
///
/// Output:
/// - Resolved locale code
///
/// Details:
/// - An invalid `requested` code is logged and ignored
#[must_use]
pub fn resolve_locale_with(
    requested: Option<&str>,
    system: Option<String>,
    config: &LocaleConfig,
) -> String {
    let requested = requested.map(str::trim).filter(|l| !l.is_empty());
    let initial = match requested {
        Some(locale) if is_valid_locale_format(locale) => locale.to_string(),
        Some(locale) => {
            tracing::warn!(
                "Invalid locale format: '{}'. Using system locale or default.",
                locale
            );
            system.unwrap_or_else(|| config.default_locale.clone())
        }
        None => system.unwrap_or_else(|| {
            tracing::debug!(
                "No locale requested or detected, using default: {}",
                config.default_locale
            );
            config.default_locale.clone()
        }),
    };

    let resolved = resolve_with_fallbacks(&initial, config);
    if resolved != initial {
        tracing::debug!(
            "Locale '{}' resolved to '{}' via fallback chain",
            initial,
            resolved
        );
    }
    resolved
}

/// What: Follow the fallback chain from `locale` to an available locale.
///
/// Inputs:
/// - `locale`: Initial locale code
/// - `config`: Fallbacks, available locales and default
///
/// Output:
/// - Resolved locale code
///
/// Details:
/// - An available locale without a fallback entry is used directly
/// - Cycles and chains longer than `MAX_FALLBACK_STEPS` end at the default
fn resolve_with_fallbacks(locale: &str, config: &LocaleConfig) -> String {
    let mut current = locale.to_string();
    let mut visited = HashSet::new();

    while visited.insert(current.clone()) {
        // Explicit fallbacks win over availability
        if let Some(fallback) = config.fallbacks.get(&current) {
            tracing::debug!("Locale '{}' has fallback: {}", current, fallback);
            current.clone_from(fallback);
        } else if config.is_available(&current) {
            return current;
        } else {
            tracing::debug!(
                "Locale '{}' has no fallback and is not available, falling back to default: {}",
                current,
                config.default_locale
            );
            return config.default_locale.clone();
        }

        if visited.len() > MAX_FALLBACK_STEPS {
            tracing::warn!(
                "Fallback chain too long ({} steps) for locale '{}', using default: {}",
                visited.len(),
                locale,
                config.default_locale
            );
            return config.default_locale.clone();
        }
    }

    // Only reached when a locale repeats
    tracing::warn!(
        "Detected cycle in fallback chain for locale '{}', using default: {}",
        locale,
        config.default_locale
    );
    config.default_locale.clone()
}
