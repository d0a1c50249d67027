//! Number and placeholder substitution.
//!
//! Tokens:
//! - `%n` -> the count
//! - `-%n` -> the negated count (so `"-%n days ago"` with `-2` reads `"2 days ago"`)
//! - `%{name}` -> the placeholder value registered under `name`
//!
//! Substitution is one left-to-right pass over the template. Text produced by a
//! substitution is never scanned again, so placeholder values containing
//! tokens are emitted literally and the order of placeholders does not matter.

/// What: Substitute count and placeholder tokens in a translated string.
///
/// Inputs:
/// - `text`: Template text
/// - `num`: Count; `None` leaves `%n`/`-%n` untouched
/// - `placeholders`: `(name, value)` pairs for `%{name}` tokens
///
/// Output:
/// - Rendered string; unknown tokens are left verbatim
///
/// Details:
/// - `-%n` is matched before `%n`, so the sign is consumed with the token
/// - Never fails
#[must_use]
pub fn render(text: &str, num: Option<i64>, placeholders: &[(String, String)]) -> String {
    if !text.contains('%') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(idx) = rest.find('%') {
        let (before, tail) = rest.split_at(idx);

        // Count token, with or without a leading minus
        if let Some(n) = num
            && let Some(after) = tail.strip_prefix("%n")
        {
            if let Some(head) = before.strip_suffix('-') {
                out.push_str(head);
                out.push_str(&(-i128::from(n)).to_string());
            } else {
                out.push_str(before);
                out.push_str(&n.to_string());
            }
            rest = after;
            continue;
        }

        // Named placeholder; unknown names fall through untouched
        if let Some(after) = tail.strip_prefix("%{")
            && let Some(close) = after.find('}')
            && let Some(value) = lookup(placeholders, &after[..close])
        {
            out.push_str(before);
            out.push_str(value);
            rest = &after[close + 1..];
            continue;
        }

        // Lone '%'
        out.push_str(before);
        out.push('%');
        rest = &tail[1..];
    }

    out.push_str(rest);
    out
}

/// Value registered for a placeholder name.
fn lookup<'a>(placeholders: &'a [(String, String)], name: &str) -> Option<&'a str> {
    placeholders
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}
