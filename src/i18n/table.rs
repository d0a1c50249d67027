//! Translation table and its parsers.
//!
//! A table file is a flat mapping `key -> entry` in JSON or YAML. Each value
//! is discriminated once into an [`Entry`]:
//!
//! ```yaml
//! Cancel: Cancel                      # plain
//! "%n comments":                      # plural (all keys are bucket names)
//!   none: Comments disabled
//!   "1": "%n comment"
//!   n: "%n comments"
//! "%{name} liked %{their} post":      # context (axis -> value -> branch)
//!   gender:
//!     male: "%{name} liked his post"
//!     female: "%{name} liked her post"
//!   default: "%{name} liked their post"
//! ```
//!
//! A mapping that has a `default` key is always a context entry, so
//! `{"k": {"default": "their"}}` is a context entry with only a default.
//!
//! Shape errors are reported as [`LoadError::MalformedTable`] at load time;
//! resolution never re-validates.

use std::collections::HashMap;

use crate::i18n::entry::{Branch, Bucket, ContextEntry, DEFAULT_BRANCH, Entry, PluralEntry};
use crate::i18n::error::LoadError;

/// Key -> entry mapping for one language. Read-only once handed to a resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTable {
    /// Entries by key.
    entries: HashMap<String, Entry>,
}

impl TranslationTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry.
    pub fn insert(&mut self, key: impl Into<String>, entry: impl Into<Entry>) {
        self.entries.insert(key.into(), entry.into());
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, entry: impl Into<Entry>) -> Self {
        self.insert(key, entry);
        self
    }

    /// Entry stored for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    /// Whether the key exists.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in sorted order.
    #[must_use]
    pub fn sorted_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Iterate over `(key, entry)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, E: Into<Entry>> FromIterator<(K, E)> for TranslationTable {
    fn from_iter<I: IntoIterator<Item = (K, E)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (key, entry) in iter {
            table.insert(key, entry);
        }
        table
    }
}

/// Format-neutral document tree both parsers lower into.
#[derive(Debug)]
enum RawNode {
    /// Scalar text (numbers and booleans are stringified).
    Text(String),
    /// Mapping with string keys, in document order.
    Map(Vec<(String, RawNode)>),
    /// `null` or a sequence; never valid in a table.
    Unsupported(&'static str),
}

/// What: Parse a JSON document into a `TranslationTable`.
///
/// Inputs:
/// - `json`: JSON text whose root is an object
///
/// Output:
/// - `Result<TranslationTable, LoadError>`
///
/// # Errors
/// - `LoadError::Parse` when the text is not valid JSON
/// - `LoadError::MalformedTable` when the root or an entry has an invalid shape
pub fn parse_json_table(json: &str) -> Result<TranslationTable, LoadError> {
    let doc: serde_json::Value =
        serde_json::from_str(json).map_err(|e| LoadError::Parse(format!("JSON: {e}")))?;
    build_table(lower_json(&doc))
}

/// What: Parse a YAML document into a `TranslationTable`.
///
/// Inputs:
/// - `yaml`: YAML text whose root is a mapping
///
/// Output:
/// - `Result<TranslationTable, LoadError>`
///
/// # Errors
/// - `LoadError::Parse` when the text is not valid YAML
/// - `LoadError::MalformedTable` when the root or an entry has an invalid shape
///
/// Details:
/// - Integer mapping keys (e.g. `1:` in a plural entry) are accepted as bucket names
pub fn parse_yaml_table(yaml: &str) -> Result<TranslationTable, LoadError> {
    let doc: serde_norway::Value =
        serde_norway::from_str(yaml).map_err(|e| LoadError::Parse(format!("YAML: {e}")))?;
    build_table(lower_yaml(&doc))
}

/// Lower a JSON value into a `RawNode`.
fn lower_json(value: &serde_json::Value) -> RawNode {
    match value {
        serde_json::Value::String(s) => RawNode::Text(s.clone()),
        serde_json::Value::Number(n) => RawNode::Text(n.to_string()),
        serde_json::Value::Bool(b) => RawNode::Text(b.to_string()),
        serde_json::Value::Object(map) => RawNode::Map(
            map.iter()
                .map(|(k, v)| (k.clone(), lower_json(v)))
                .collect(),
        ),
        serde_json::Value::Array(_) => RawNode::Unsupported("a list"),
        serde_json::Value::Null => RawNode::Unsupported("null"),
    }
}

/// Lower a YAML value into a `RawNode`.
fn lower_yaml(value: &serde_norway::Value) -> RawNode {
    match value {
        serde_norway::Value::String(s) => RawNode::Text(s.clone()),
        serde_norway::Value::Number(n) => RawNode::Text(n.to_string()),
        serde_norway::Value::Bool(b) => RawNode::Text(b.to_string()),
        serde_norway::Value::Mapping(map) => RawNode::Map(
            map.iter()
                .filter_map(|(k, v)| yaml_key(k).map(|key| (key, lower_yaml(v))))
                .collect(),
        ),
        serde_norway::Value::Tagged(tagged) => lower_yaml(&tagged.value),
        serde_norway::Value::Sequence(_) => RawNode::Unsupported("a list"),
        serde_norway::Value::Null => RawNode::Unsupported("null"),
    }
}

/// Stringify a YAML mapping key; non-scalar keys are skipped with a warning.
fn yaml_key(key: &serde_norway::Value) -> Option<String> {
    match key {
        serde_norway::Value::String(s) => Some(s.clone()),
        serde_norway::Value::Number(n) => Some(n.to_string()),
        serde_norway::Value::Bool(b) => Some(b.to_string()),
        other => {
            tracing::warn!(key = ?other, "Skipping non-scalar YAML mapping key");
            None
        }
    }
}

/// Discriminate every root entry.
fn build_table(root: RawNode) -> Result<TranslationTable, LoadError> {
    let RawNode::Map(items) = root else {
        return Err(LoadError::malformed(
            "",
            "document root must be a mapping of key -> entry",
        ));
    };

    let mut table = TranslationTable::new();
    for (key, node) in items {
        let entry = build_entry(&key, node)?;
        tracing::trace!(key = %key, kind = entry.kind(), "Parsed entry");
        if let Entry::Plural(plural) = &entry
            && !plural.has_generic()
        {
            tracing::warn!(
                key = %key,
                "Plural entry has no generic 'n' bucket; unmatched counts fall back to the key"
            );
        }
        table.insert(key, entry);
    }
    tracing::debug!(entries = table.len(), "Parsed translation table");
    Ok(table)
}

/// What: Decide the shape of one entry.
///
/// Inputs:
/// - `key`: Translation key (for error messages)
/// - `node`: Raw value
///
/// Output:
/// - `Entry::Plain`, `Entry::Plural` or `Entry::Context`
///
/// Details:
/// - Mapping with a `default` key -> context
/// - Other all-string mapping -> plural; every key must be a bucket name
/// - Any other mapping -> context
fn build_entry(key: &str, node: RawNode) -> Result<Entry, LoadError> {
    match node {
        RawNode::Text(text) => Ok(Entry::Plain(text)),
        RawNode::Unsupported(what) => Err(LoadError::malformed(
            key,
            format!("expected a string or a mapping, found {what}"),
        )),
        RawNode::Map(items) if items.is_empty() => {
            Err(LoadError::malformed(key, "entry mapping is empty"))
        }
        // A `default` key always marks a context entry, even with only text values
        RawNode::Map(items) if items.iter().any(|(name, _)| name == DEFAULT_BRANCH) => {
            build_context(key, items).map(Entry::Context)
        }
        RawNode::Map(items) if items.iter().all(|(_, v)| matches!(v, RawNode::Text(_))) => {
            build_plural(key, items).map(Entry::Plural)
        }
        RawNode::Map(items) => build_context(key, items).map(Entry::Context),
    }
}

/// Build a plural entry from an all-string mapping.
fn build_plural(key: &str, items: Vec<(String, RawNode)>) -> Result<PluralEntry, LoadError> {
    if items.is_empty() {
        return Err(LoadError::malformed(key, "plural entry has no buckets"));
    }
    let mut plural = PluralEntry::new();
    for (name, node) in items {
        let Some(bucket) = Bucket::parse(&name) else {
            return Err(LoadError::malformed(
                key,
                format!("unknown plural bucket '{name}' (expected none, n, -n or an integer)"),
            ));
        };
        match node {
            RawNode::Text(text) => plural.insert(bucket, text),
            _ => {
                return Err(LoadError::malformed(
                    key,
                    format!("plural bucket '{name}' must be a string"),
                ));
            }
        }
    }
    Ok(plural)
}

/// Build a context entry: `default` plus `axis -> value -> branch` mappings.
fn build_context(key: &str, items: Vec<(String, RawNode)>) -> Result<ContextEntry, LoadError> {
    let mut entry = ContextEntry::new();
    for (axis, node) in items {
        if axis == DEFAULT_BRANCH {
            entry.set_default(build_branch(key, &axis, node)?);
            continue;
        }
        let RawNode::Map(values) = node else {
            return Err(LoadError::malformed(
                key,
                format!("context '{axis}' must map values to strings or plural forms"),
            ));
        };
        if values.is_empty() {
            return Err(LoadError::malformed(
                key,
                format!("context '{axis}' has no values"),
            ));
        }
        for (value, branch) in values {
            let branch = build_branch(key, &format!("{axis}.{value}"), branch)?;
            entry.insert_branch(axis.as_str(), value, branch);
        }
    }
    Ok(entry)
}

/// Build one context branch: a string or a plural mapping.
fn build_branch(key: &str, path: &str, node: RawNode) -> Result<Branch, LoadError> {
    match node {
        RawNode::Text(text) => Ok(Branch::Text(text)),
        RawNode::Map(items) => build_plural(key, items)
            .map(Branch::Plural)
            .map_err(|e| match e {
                LoadError::MalformedTable { key, reason } => LoadError::MalformedTable {
                    key,
                    reason: format!("in '{path}': {reason}"),
                },
                other => other,
            }),
        RawNode::Unsupported(what) => Err(LoadError::malformed(
            key,
            format!("branch '{path}' must be a string or plural forms, found {what}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHOTOS: &str = "%{name} uploaded %n photos to their %{album} album";

    #[test]
    fn test_parse_json_shapes() {
        let json = r#"{
            "Cancel": "Anuluj",
            "%n comments": {"none": "Comments disabled", "0": "%n comments", "1": "%n comment", "n": "%n comments"},
            "%{name} uploaded %n photos to their %{album} album": {
                "gender": {
                    "male": {"1": "%{name} uploaded %n photo to his %{album} album", "n": "%{name} uploaded %n photos to his %{album} album"},
                    "female": "%{name} uploaded photos to her %{album} album"
                },
                "default": "%{name} uploaded photos"
            }
        }"#;
        let table = parse_json_table(json).expect("valid JSON table");
        assert_eq!(table.len(), 3);
        assert_eq!(table.get("Cancel"), Some(&Entry::from("Anuluj")));

        let Some(Entry::Plural(plural)) = table.get("%n comments") else {
            panic!("expected plural entry");
        };
        assert_eq!(plural.get(Bucket::NoCount), Some("Comments disabled"));
        assert_eq!(plural.len(), 4);

        let Some(Entry::Context(context)) = table.get(PHOTOS) else {
            panic!("expected context entry");
        };
        assert!(matches!(
            context.branch("gender", "male"),
            Some(Branch::Plural(_))
        ));
        assert_eq!(
            context.branch("gender", "female"),
            Some(&Branch::from("%{name} uploaded photos to her %{album} album"))
        );
        assert_eq!(
            context.default_branch(),
            Some(&Branch::from("%{name} uploaded photos"))
        );
    }

    #[test]
    fn test_parse_yaml_integer_bucket_keys() {
        let yaml = r#"
"Due in %n days":
  none: Expired
  -n: "Due -%n days ago"
  -1: Due Yesterday
  0: Due Today
  1: Due Tomorrow
  n: "Due in %n days"
Cancel: Cancel
"#;
        let table = parse_yaml_table(yaml).expect("valid YAML table");
        let Some(Entry::Plural(plural)) = table.get("Due in %n days") else {
            panic!("expected plural entry");
        };
        assert_eq!(plural.get(Bucket::Exact(-1)), Some("Due Yesterday"));
        assert_eq!(plural.get(Bucket::Negative), Some("Due -%n days ago"));
        assert_eq!(plural.get(Bucket::Exact(0)), Some("Due Today"));
        assert_eq!(table.get("Cancel"), Some(&Entry::from("Cancel")));
    }

    #[test]
    fn test_scalars_are_stringified() {
        let table = parse_json_table(r#"{"answer": 42, "flag": true}"#).expect("valid table");
        assert_eq!(table.get("answer"), Some(&Entry::from("42")));
        assert_eq!(table.get("flag"), Some(&Entry::from("true")));
    }

    #[test]
    fn test_invalid_syntax_is_parse_error() {
        assert!(matches!(
            parse_json_table("{\"a\": "),
            Err(LoadError::Parse(_))
        ));
        assert!(matches!(
            parse_yaml_table("invalid: yaml: content: ["),
            Err(LoadError::Parse(_))
        ));
    }

    #[test]
    fn test_malformed_shapes() {
        let cases = [
            (r#"["not", "a", "mapping"]"#, ""),
            (r#"{"k": null}"#, "k"),
            (r#"{"k": ["a"]}"#, "k"),
            (r#"{"k": {}}"#, "k"),
            (r#"{"k": {"few": "x", "n": "y"}}"#, "k"),
            (r#"{"k": {"gender": "male"}}"#, "k"),
            (r#"{"k": {"gender": {}}}"#, "k"),
            (r#"{"k": {"gender": {"male": {"few": "x"}}}}"#, "k"),
            (r#"{"k": {"gender": {"male": {}}}}"#, "k"),
            (r#"{"k": {"default": "x", "n": "y"}}"#, "k"),
        ];
        for (json, expected_key) in cases {
            match parse_json_table(json) {
                Err(LoadError::MalformedTable { key, .. }) => {
                    assert_eq!(key, expected_key, "wrong key for {json}");
                }
                other => panic!("expected MalformedTable for {json}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_unknown_bucket_reason() {
        let err = parse_json_table(r#"{"k": {"few": "x"}}"#).expect_err("unknown bucket");
        assert!(err.to_string().contains("unknown plural bucket 'few'"));
    }

    #[test]
    fn test_plural_without_generic_bucket_still_loads() {
        let table = parse_json_table(r#"{"k": {"1": "one"}}"#).expect("loads with warning");
        assert!(matches!(table.get("k"), Some(Entry::Plural(p)) if !p.has_generic()));
    }

    #[test]
    fn test_sorted_keys() {
        let table: TranslationTable = [("b", "2"), ("a", "1"), ("c", "3")].into_iter().collect();
        assert_eq!(table.sorted_keys(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_default_key_marks_context_entry() {
        let table = parse_json_table(
            r#"{"only default": {"default": "their"}, "plural default": {"default": {"n": "their"}}}"#,
        )
        .expect("valid table");

        let Some(Entry::Context(text)) = table.get("only default") else {
            panic!("expected a context entry");
        };
        assert_eq!(
            text.default_branch(),
            Some(&Branch::Text("their".to_string()))
        );
        assert!(matches!(table.get("plural default"), Some(Entry::Context(_))));
    }
}
