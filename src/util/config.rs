//! `key=value` parsing shared by the CLI.

/// What: Parse a key-value pair from a line.
///
/// Inputs:
/// - `line`: Text in `key=value` form
///
/// Output:
/// - `Some((key, value))` if parsing succeeds, `None` otherwise
///
/// Details:
/// - Splits on the first `=` character, so values may contain `=`
/// - Trims whitespace from both key and value
/// - An empty key is rejected; an empty value is allowed
#[must_use]
pub fn parse_key_value(line: &str) -> Option<(String, String)> {
    let (key, value) = line.trim().split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key.to_string(), value.trim().to_string()))
}

/// What: Parse every `key=value` argument, stopping at the first invalid one.
///
/// Inputs:
/// - `items`: Raw arguments
///
/// Output:
/// - Pairs in input order
///
/// # Errors
/// - Returns `Err` naming the first argument that is not `key=value`
pub fn parse_pairs(items: &[String]) -> Result<Vec<(String, String)>, String> {
    items
        .iter()
        .map(|item| {
            parse_key_value(item)
                .ok_or_else(|| format!("Expected key=value, got '{item}'"))
        })
        .collect()
}
