//! System locale detection utilities.

use std::env;

/// Environment variables consulted, highest priority first.
const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

/// What: Detect system locale from environment variables.
///
/// Inputs:
/// - None (reads from environment)
///
/// Output:
/// - `Option<String>` containing a locale code (e.g., "de-DE") or None if not detectable
///
/// Details:
/// - Checks `LC_ALL`, `LC_MESSAGES`, and `LANG` in order
/// - Parses locale strings like "de_DE.UTF-8" -> "de-DE"
/// - The `C`/`POSIX` locales mean "no preference" and are skipped
#[must_use]
pub fn detect_system_locale() -> Option<String> {
    LOCALE_VARS.iter().find_map(|var_name| {
        env::var(var_name)
            .ok()
            .and_then(|value| parse_locale_string(&value))
    })
}

/// What: Parse a locale string from environment variables into a standardized format.
///
/// Inputs:
/// - `locale_str`: Locale string like "de_DE.UTF-8", "de-DE", "en_US.utf8", "sr_RS@latin"
///
/// Output:
/// - `Option<String>` with standardized format (e.g., "de-DE") or None if invalid
///
/// Details:
/// - Drops the encoding suffix (.UTF-8) and modifier (@euro)
/// - Language lowercase, region uppercase, script title case ("zh-Hans-CN")
pub(crate) fn parse_locale_string(locale_str: &str) -> Option<String> {
    let trimmed = locale_str.trim();
    let locale_part = trimmed.split(['.', '@']).next()?.trim();
    if locale_part.is_empty() || locale_part == "C" || locale_part == "POSIX" {
        return None;
    }

    let normalized = locale_part.replace('_', "-");
    let parts: Vec<&str> = normalized.split('-').collect();
    if parts.iter().any(|p| p.is_empty() || !p.chars().all(char::is_alphanumeric)) {
        return None;
    }

    match parts.as_slice() {
        [language] => Some(language.to_lowercase()),
        [language, region] => Some(format!(
            "{}-{}",
            language.to_lowercase(),
            region.to_uppercase()
        )),
        [language, script, region] => Some(format!(
            "{}-{}-{}",
            language.to_lowercase(),
            title_case(script),
            region.to_uppercase()
        )),
        _ => None,
    }
}

/// Uppercase the first character, lowercase the rest ("HANS" -> "Hans").
fn title_case(part: &str) -> String {
    let mut chars = part.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_locale_string() {
        assert_eq!(
            parse_locale_string("de_DE.UTF-8"),
            Some("de-DE".to_string())
        );
        assert_eq!(parse_locale_string("en_US.utf8"), Some("en-US".to_string()));
        assert_eq!(parse_locale_string("de-DE"), Some("de-DE".to_string()));
        assert_eq!(parse_locale_string("EN"), Some("en".to_string()));
        assert_eq!(
            parse_locale_string("zh_Hans_CN.UTF-8"),
            Some("zh-Hans-CN".to_string())
        );
        assert_eq!(parse_locale_string("pl_pl"), Some("pl-PL".to_string()));
    }

    #[test]
    fn test_parse_locale_string_edge_cases() {
        assert_eq!(parse_locale_string("C"), None);
        assert_eq!(parse_locale_string("C.UTF-8"), None);
        assert_eq!(parse_locale_string("POSIX"), None);
        assert_eq!(
            parse_locale_string("en_US.ISO8859-1"),
            Some("en-US".to_string())
        );
        assert_eq!(parse_locale_string("de_DE@euro"), Some("de-DE".to_string()));
        assert_eq!(parse_locale_string(""), None);
        assert_eq!(parse_locale_string("   "), None);
        assert_eq!(parse_locale_string("en__US"), None);
        assert_eq!(parse_locale_string("a-b-c-d"), None);
    }

    #[test]
    fn test_detect_system_locale_with_env() {
        // Save original values
        let original: Vec<(&str, Option<String>)> = LOCALE_VARS
            .iter()
            .map(|name| (*name, env::var(name).ok()))
            .collect();

        unsafe {
            env::set_var("LANG", "de_DE.UTF-8");
            env::remove_var("LC_ALL");
            env::remove_var("LC_MESSAGES");
        }
        assert_eq!(detect_system_locale(), Some("de-DE".to_string()));

        unsafe {
            env::set_var("LC_MESSAGES", "it_IT.UTF-8");
        }
        assert_eq!(detect_system_locale(), Some("it-IT".to_string()));

        unsafe {
            // LC_ALL wins over everything
            env::set_var("LC_ALL", "ja_JP.UTF-8");
        }
        assert_eq!(detect_system_locale(), Some("ja-JP".to_string()));

        unsafe {
            // C is skipped, so the next variable decides
            env::set_var("LC_ALL", "C");
        }
        assert_eq!(detect_system_locale(), Some("it-IT".to_string()));

        unsafe {
            env::remove_var("LC_ALL");
            env::remove_var("LC_MESSAGES");
            env::remove_var("LANG");
        }
        assert_eq!(detect_system_locale(), None);

        // Restore original values
        unsafe {
            for (name, value) in original {
                match value {
                    Some(val) => env::set_var(name, val),
                    None => env::remove_var(name),
                }
            }
        }
    }
}
