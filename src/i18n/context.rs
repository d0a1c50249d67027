//! Context variant selection (e.g. grammatical gender).

use crate::i18n::entry::{Branch, ContextEntry};
use crate::i18n::plural::render_plural;
use crate::i18n::render::render;

/// What: Choose the branch of a context entry for the caller's context.
///
/// Inputs:
/// - `entry`: Context entry
/// - `context`: Caller `(key, value)` pairs, in priority order
///
/// Output:
/// - The first branch whose key and value both match, else the default branch
///
/// Details:
/// - Pairs are never merged: the first matching pair decides alone
/// - `None` only when nothing matches and no default is authored
#[must_use]
pub fn select_branch<'a>(
    entry: &'a ContextEntry,
    context: &[(String, String)],
) -> Option<&'a Branch> {
    context
        .iter()
        .find_map(|(axis, value)| entry.branch(axis, value))
        .or_else(|| entry.default_branch())
}

/// What: Select and render a context entry.
///
/// Inputs:
/// - `entry`: Context entry
/// - `num`: Count, forwarded to nested plural branches and `%n` tokens
/// - `placeholders`: Named substitutions
/// - `context`: Caller context pairs
///
/// Output:
/// - `Some(rendered)`, or `None` when no branch (or nested bucket) applies
#[must_use]
pub fn render_context(
    entry: &ContextEntry,
    num: Option<i64>,
    placeholders: &[(String, String)],
    context: &[(String, String)],
) -> Option<String> {
    match select_branch(entry, context) {
        Some(Branch::Text(text)) => Some(render(text, num, placeholders)),
        Some(Branch::Plural(plural)) => render_plural(plural, num, placeholders),
        None => {
            tracing::debug!(
                context = ?context,
                "No context branch matched and entry has no default"
            );
            None
        }
    }
}
