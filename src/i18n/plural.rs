//! Plural bucket selection.
//!
//! Buckets are authored per table; nothing here computes language plural
//! rules. Lookup order for a count is: exact bucket, then `-n` for negative
//! counts, then `n`. Without a count the `none` bucket is preferred, then `n`.

use crate::i18n::entry::{Bucket, PluralEntry};
use crate::i18n::render::render;

/// What: Pick the text of the bucket that applies to `num`.
///
/// Inputs:
/// - `entry`: Plural entry to select from
/// - `num`: Count, or `None` when the caller supplied no count
///
/// Output:
/// - `Some(text)` of the selected bucket, `None` if the chain found nothing
///
/// Details:
/// - `None` when the entry has neither the matching buckets nor `n`
#[must_use]
pub fn select_bucket(entry: &PluralEntry, num: Option<i64>) -> Option<&str> {
    match num {
        None => entry
            .get(Bucket::NoCount)
            .or_else(|| entry.get(Bucket::Other)),
        Some(n) => entry
            .get(Bucket::Exact(n))
            .or_else(|| (n < 0).then(|| entry.get(Bucket::Negative)).flatten())
            .or_else(|| entry.get(Bucket::Other)),
    }
}

/// What: Select and render a plural entry.
///
/// Inputs:
/// - `entry`: Plural entry
/// - `num`: Count passed through to `%n`/`-%n` substitution
/// - `placeholders`: Named substitutions
///
/// Output:
/// - `Some(rendered)`, or `None` when no bucket applies
#[must_use]
pub fn render_plural(
    entry: &PluralEntry,
    num: Option<i64>,
    placeholders: &[(String, String)],
) -> Option<String> {
    let Some(text) = select_bucket(entry, num) else {
        tracing::debug!(
            num = ?num,
            buckets = entry.len(),
            "No plural bucket matched and no generic 'n' bucket present"
        );
        return None;
    };
    Some(render(text, num, placeholders))
}
