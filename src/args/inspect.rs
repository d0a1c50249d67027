//! `--check` and `--list-keys` output.

use std::fmt::Write;

use tongues::i18n::{Entry, TranslationTable};

/// What: Summarize a loaded table.
///
/// Inputs:
/// - `label`: Locale code or file the table came from.
/// - `table`: Loaded table.
///
/// Output:
/// - One summary line plus one warning line per plural entry without an `n` bucket.
///
/// Details:
/// - Malformed tables never reach this point; they fail at load time.
pub fn handle_check(label: &str, table: &TranslationTable) -> String {
    let (mut plain, mut plural, mut context) = (0usize, 0usize, 0usize);
    let mut missing_generic: Vec<&str> = Vec::new();

    for (key, entry) in table.iter() {
        match entry {
            Entry::Plain(_) => plain += 1,
            Entry::Plural(forms) => {
                plural += 1;
                if !forms.has_generic() {
                    missing_generic.push(key);
                }
            }
            Entry::Context(_) => context += 1,
        }
    }
    missing_generic.sort_unstable();

    let mut out = format!(
        "{label}: ok, {} entries ({plain} plain, {plural} plural, {context} context)",
        table.len()
    );
    for key in missing_generic {
        let _ = write!(out, "\nwarning: plural entry '{key}' has no 'n' bucket");
    }
    out
}

/// What: List all keys, sorted, one per line.
pub fn handle_list_keys(table: &TranslationTable) -> String {
    table.sorted_keys().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tongues::i18n::{Bucket, ContextEntry, PluralEntry};

    fn table() -> TranslationTable {
        TranslationTable::new()
            .with("Cancel", "Cancel")
            .with(
                "%n comments",
                PluralEntry::new()
                    .with(Bucket::Exact(1), "%n comment")
                    .with(Bucket::Other, "%n comments"),
            )
            .with("Only one", PluralEntry::new().with(Bucket::Exact(1), "one"))
            .with("their", ContextEntry::new().with_default("their"))
    }

    #[test]
    fn test_handle_check_summary() {
        assert_eq!(
            handle_check("en", &table()),
            "en: ok, 4 entries (1 plain, 2 plural, 1 context)\n\
             warning: plural entry 'Only one' has no 'n' bucket"
        );
    }

    #[test]
    fn test_handle_list_keys_sorted() {
        assert_eq!(
            handle_list_keys(&table()),
            "%n comments\nCancel\nOnly one\ntheir"
        );
    }
}
