//! Translation entry shapes.
//!
//! Every key in a table maps to exactly one [`Entry`]. The loader decides the
//! shape once at parse time so resolution only has to `match` on the tag.

use std::collections::HashMap;
use std::fmt;

/// Name under which a context entry stores its default branch.
pub const DEFAULT_BRANCH: &str = "default";

/// A named branch of a plural entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    /// `none`: used when no count was supplied.
    NoCount,
    /// An integer literal (`0`, `1`, `-1`, `3`, ...): matches exactly that count.
    Exact(i64),
    /// `-n`: any negative count without its own exact bucket.
    Negative,
    /// `n`: the generic bucket every other lookup falls back to.
    Other,
}

impl Bucket {
    /// What: Parse a bucket name as written in a translation file.
    ///
    /// Inputs:
    /// - `name`: Raw mapping key (e.g. `"0"`, `"-1"`, `"n"`, `"-n"`, `"none"`)
    ///
    /// Output:
    /// - `Some(Bucket)` for recognized names, `None` otherwise
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim() {
            "none" => Some(Self::NoCount),
            "n" => Some(Self::Other),
            "-n" => Some(Self::Negative),
            other => other.parse::<i64>().ok().map(Self::Exact),
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCount => f.write_str("none"),
            Self::Exact(value) => write!(f, "{value}"),
            Self::Negative => f.write_str("-n"),
            Self::Other => f.write_str("n"),
        }
    }
}

/// Plural forms of one string, keyed by bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluralEntry {
    /// Bucket -> text.
    buckets: HashMap<Bucket, String>,
}

impl PluralEntry {
    /// Create an entry with no buckets.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, bucket: Bucket, text: impl Into<String>) -> Self {
        self.insert(bucket, text);
        self
    }

    /// Insert or replace the text of a bucket.
    pub fn insert(&mut self, bucket: Bucket, text: impl Into<String>) {
        self.buckets.insert(bucket, text.into());
    }

    /// Text of a bucket, if authored.
    #[must_use]
    pub fn get(&self, bucket: Bucket) -> Option<&str> {
        self.buckets.get(&bucket).map(String::as_str)
    }

    /// Whether the generic `n` bucket is present.
    #[must_use]
    pub fn has_generic(&self) -> bool {
        self.buckets.contains_key(&Bucket::Other)
    }

    /// Number of authored buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Whether no bucket is authored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(Bucket, S)> for PluralEntry {
    fn from_iter<I: IntoIterator<Item = (Bucket, S)>>(iter: I) -> Self {
        let mut entry = Self::new();
        for (bucket, text) in iter {
            entry.insert(bucket, text);
        }
        entry
    }
}

/// What a context value (or the default) selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Branch {
    /// A single string.
    Text(String),
    /// A nested plural entry, resolved with the caller's count.
    Plural(PluralEntry),
}

impl From<&str> for Branch {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<PluralEntry> for Branch {
    fn from(entry: PluralEntry) -> Self {
        Self::Plural(entry)
    }
}

/// Variants of one string selected by caller-supplied context (e.g. gender).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextEntry {
    /// Context key -> (context value -> branch).
    axes: HashMap<String, HashMap<String, Branch>>,
    /// Branch used when no supplied context pair matches.
    default: Option<Branch>,
}

impl ContextEntry {
    /// Create an entry with no axes and no default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`ContextEntry::insert_branch`].
    #[must_use]
    pub fn with_branch(
        mut self,
        axis: impl Into<String>,
        value: impl Into<String>,
        branch: impl Into<Branch>,
    ) -> Self {
        self.insert_branch(axis, value, branch);
        self
    }

    /// Builder-style default branch.
    #[must_use]
    pub fn with_default(mut self, branch: impl Into<Branch>) -> Self {
        self.default = Some(branch.into());
        self
    }

    /// Register the branch selected by `axis == value`.
    pub fn insert_branch(
        &mut self,
        axis: impl Into<String>,
        value: impl Into<String>,
        branch: impl Into<Branch>,
    ) {
        self.axes
            .entry(axis.into())
            .or_default()
            .insert(value.into(), branch.into());
    }

    /// Set the default branch.
    pub fn set_default(&mut self, branch: impl Into<Branch>) {
        self.default = Some(branch.into());
    }

    /// Branch registered for `axis == value`, if any.
    #[must_use]
    pub fn branch(&self, axis: &str, value: &str) -> Option<&Branch> {
        self.axes.get(axis).and_then(|values| values.get(value))
    }

    /// The default branch, if authored.
    #[must_use]
    pub const fn default_branch(&self) -> Option<&Branch> {
        self.default.as_ref()
    }
}

/// The value stored for one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// No pluralization, no context.
    Plain(String),
    /// Plural forms selected by count.
    Plural(PluralEntry),
    /// Variants selected by caller context.
    Context(ContextEntry),
}

impl Entry {
    /// Short shape name used in table-load logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Plain(_) => "plain",
            Self::Plural(_) => "plural",
            Self::Context(_) => "context",
        }
    }
}

impl From<&str> for Entry {
    fn from(text: &str) -> Self {
        Self::Plain(text.to_string())
    }
}

impl From<String> for Entry {
    fn from(text: String) -> Self {
        Self::Plain(text)
    }
}

impl From<PluralEntry> for Entry {
    fn from(entry: PluralEntry) -> Self {
        Self::Plural(entry)
    }
}

impl From<ContextEntry> for Entry {
    fn from(entry: ContextEntry) -> Self {
        Self::Context(entry)
    }
}
