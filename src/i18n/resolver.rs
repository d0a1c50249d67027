//! Key resolution: lookup, fallback and dispatch on the entry shape.

use std::path::Path;

use crate::i18n::context::render_context;
use crate::i18n::entry::Entry;
use crate::i18n::error::LoadError;
use crate::i18n::loader::load_translation_file;
use crate::i18n::plural::render_plural;
use crate::i18n::render::render;
use crate::i18n::table::TranslationTable;

/// Optional arguments of a resolution.
///
/// ```
/// use tongues::i18n::ResolveArgs;
///
/// let args = ResolveArgs::new()
///     .num(3)
///     .placeholder("name", "Jane")
///     .context("gender", "female");
/// assert_eq!(args.count(), Some(3));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveArgs {
    /// Count for plural selection and `%n` substitution.
    num: Option<i64>,
    /// `%{name}` substitutions; names are unique.
    placeholders: Vec<(String, String)>,
    /// Context pairs in caller priority order.
    context: Vec<(String, String)>,
    /// Text used instead of the key when the key is missing.
    default_text: Option<String>,
}

impl ResolveArgs {
    /// Arguments with nothing set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the count.
    #[must_use]
    pub const fn num(mut self, num: i64) -> Self {
        self.num = Some(num);
        self
    }

    /// Set or clear the count.
    #[must_use]
    pub const fn maybe_num(mut self, num: Option<i64>) -> Self {
        self.num = num;
        self
    }

    /// Set a placeholder value; setting the same name twice keeps the last value.
    #[must_use]
    pub fn placeholder(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self.placeholders.iter_mut().find(|(k, _)| *k == name) {
            slot.1 = value;
        } else {
            self.placeholders.push((name, value));
        }
        self
    }

    /// Append a context pair. Earlier pairs take priority.
    #[must_use]
    pub fn context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.push((key.into(), value.into()));
        self
    }

    /// Text returned (after substitution) when the key is missing.
    #[must_use]
    pub fn default_text(mut self, text: impl Into<String>) -> Self {
        self.default_text = Some(text.into());
        self
    }

    /// The count, if set.
    #[must_use]
    pub const fn count(&self) -> Option<i64> {
        self.num
    }

    /// Placeholder pairs.
    #[must_use]
    pub fn placeholders(&self) -> &[(String, String)] {
        &self.placeholders
    }

    /// Context pairs in priority order.
    #[must_use]
    pub fn context_pairs(&self) -> &[(String, String)] {
        &self.context
    }
}

/// A translator bound to one table.
///
/// Resolution never fails: a missing key yields the default text (or the key
/// itself), and a missing bucket or branch falls back the same way.
///
/// ```
/// use tongues::i18n::{Bucket, PluralEntry, ResolveArgs, Resolver, TranslationTable};
///
/// let table = TranslationTable::new().with(
///     "%n comments",
///     PluralEntry::new()
///         .with(Bucket::NoCount, "Comments disabled")
///         .with(Bucket::Exact(1), "%n comment")
///         .with(Bucket::Other, "%n comments"),
/// );
/// let en = Resolver::new(table);
///
/// assert_eq!(en.resolve("%n comments", &ResolveArgs::new().num(1)), "1 comment");
/// assert_eq!(en.resolve("%n comments", &ResolveArgs::new().num(4)), "4 comments");
/// assert_eq!(en.translate("%n comments"), "Comments disabled");
/// assert_eq!(en.translate("Not translated"), "Not translated");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    /// The bound table; never mutated after construction.
    table: TranslationTable,
}

impl Resolver {
    /// Bind a resolver to a table.
    #[must_use]
    pub const fn new(table: TranslationTable) -> Self {
        Self { table }
    }

    /// What: Load a translation file and bind a resolver to it.
    ///
    /// Inputs:
    /// - `path`: `.json`, `.yml` or `.yaml` translation file
    ///
    /// Output:
    /// - `Result<Resolver, LoadError>`
    ///
    /// # Errors
    /// - Any error of [`load_translation_file`]
    pub fn from_file(path: &Path) -> Result<Self, LoadError> {
        load_translation_file(path).map(Self::new)
    }

    /// The bound table.
    #[must_use]
    pub const fn table(&self) -> &TranslationTable {
        &self.table
    }

    /// Resolve a key with no count, placeholders or context.
    #[must_use]
    pub fn translate(&self, key: &str) -> String {
        self.resolve(key, &ResolveArgs::default())
    }

    /// What: Resolve a key to its rendered, localized string.
    ///
    /// Inputs:
    /// - `key`: Translation key
    /// - `args`: Count, placeholders, context and default text
    ///
    /// Output:
    /// - Rendered string
    ///
    /// Details:
    /// - Missing key: renders `default_text`, else the key, with `%n`/`%{..}` applied
    /// - Plain: rendered directly
    /// - Plural: bucket chosen by count
    /// - Context: branch chosen by the first matching context pair, else the default
    /// - A plural/context entry where nothing applies renders the missing-key fallback
    #[must_use]
    pub fn resolve(&self, key: &str, args: &ResolveArgs) -> String {
        let num = args.num;
        let placeholders = args.placeholders.as_slice();
        let fallback = || {
            let text = args.default_text.as_deref().unwrap_or(key);
            render(text, num, placeholders)
        };

        match self.table.get(key) {
            None => {
                tracing::debug!("Missing translation key: '{}'. Using fallback text.", key);
                fallback()
            }
            Some(Entry::Plain(text)) => render(text, num, placeholders),
            Some(Entry::Plural(plural)) => {
                render_plural(plural, num, placeholders).unwrap_or_else(fallback)
            }
            Some(Entry::Context(context)) => {
                render_context(context, num, placeholders, &args.context)
                    .unwrap_or_else(fallback)
            }
        }
    }
}

impl From<TranslationTable> for Resolver {
    fn from(table: TranslationTable) -> Self {
        Self::new(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::entry::{Bucket, ContextEntry, PluralEntry};

    const PHOTOS: &str = "%{name} uploaded %n photos to their %{album} album";

    fn english() -> Resolver {
        let photos = ContextEntry::new()
            .with_branch(
                "gender",
                "male",
                PluralEntry::new()
                    .with(Bucket::Exact(1), "%{name} uploaded %n photo to his %{album} album")
                    .with(Bucket::Other, "%{name} uploaded %n photos to his %{album} album"),
            )
            .with_branch(
                "gender",
                "female",
                PluralEntry::new()
                    .with(Bucket::Exact(1), "%{name} uploaded %n photo to her %{album} album")
                    .with(Bucket::Other, "%{name} uploaded %n photos to her %{album} album"),
            )
            .with_default(
                PluralEntry::new()
                    .with(Bucket::Exact(1), "%{name} uploaded %n photo to their %{album} album")
                    .with(Bucket::Other, "%{name} uploaded %n photos to their %{album} album"),
            );

        Resolver::new(
            TranslationTable::new()
                .with("Cancel", "Cancel")
                .with(
                    "%n comments",
                    PluralEntry::new()
                        .with(Bucket::NoCount, "Comments disabled")
                        .with(Bucket::Exact(0), "%n comments")
                        .with(Bucket::Exact(1), "%n comment")
                        .with(Bucket::Other, "%n comments"),
                )
                .with(
                    "Due in %n days",
                    PluralEntry::new()
                        .with(Bucket::NoCount, "Expired")
                        .with(Bucket::Negative, "Due -%n days ago")
                        .with(Bucket::Exact(-1), "Due Yesterday")
                        .with(Bucket::Exact(0), "Due Today")
                        .with(Bucket::Exact(1), "Due Tomorrow")
                        .with(Bucket::Other, "Due in %n days"),
                )
                .with(PHOTOS, photos)
                .with("Only one", PluralEntry::new().with(Bucket::Exact(1), "just one"))
                .with(
                    "Pronoun only",
                    ContextEntry::new().with_branch("gender", "male", "his"),
                ),
        )
    }

    fn n(num: i64) -> ResolveArgs {
        ResolveArgs::new().num(num)
    }

    #[test]
    fn test_plain_entry() {
        assert_eq!(english().translate("Cancel"), "Cancel");
    }

    #[test]
    fn test_missing_key_falls_back_to_key() {
        let en = english();
        assert_eq!(en.translate("Not there"), "Not there");
        assert_eq!(
            en.resolve(
                "Welcome %{name}",
                &ResolveArgs::new().placeholder("name", "John")
            ),
            "Welcome John"
        );
        assert_eq!(en.resolve("%n new", &n(5)), "5 new");
    }

    #[test]
    fn test_missing_key_uses_default_text() {
        let en = english();
        assert_eq!(
            en.resolve(
                "_short_key",
                &ResolveArgs::new().default_text("This is a long piece of text")
            ),
            "This is a long piece of text"
        );
        assert_eq!(
            en.resolve(
                "_greeting",
                &ResolveArgs::new()
                    .default_text("Hi %{name}, %n new")
                    .placeholder("name", "Ann")
                    .num(2)
            ),
            "Hi Ann, 2 new"
        );
    }

    #[test]
    fn test_default_text_ignored_when_key_exists() {
        assert_eq!(
            english().resolve("Cancel", &ResolveArgs::new().default_text("Abort")),
            "Cancel"
        );
    }

    #[test]
    fn test_plural_comments() {
        let en = english();
        assert_eq!(en.resolve("%n comments", &n(0)), "0 comments");
        assert_eq!(en.resolve("%n comments", &n(1)), "1 comment");
        assert_eq!(en.resolve("%n comments", &n(2)), "2 comments");
        assert_eq!(en.translate("%n comments"), "Comments disabled");
    }

    #[test]
    fn test_plural_due_dates() {
        let en = english();
        assert_eq!(en.translate("Due in %n days"), "Expired");
        assert_eq!(en.resolve("Due in %n days", &n(-2)), "Due 2 days ago");
        assert_eq!(en.resolve("Due in %n days", &n(-1)), "Due Yesterday");
        assert_eq!(en.resolve("Due in %n days", &n(0)), "Due Today");
        assert_eq!(en.resolve("Due in %n days", &n(1)), "Due Tomorrow");
        assert_eq!(en.resolve("Due in %n days", &n(2)), "Due in 2 days");
    }

    #[test]
    fn test_context_with_plural_and_placeholders() {
        let en = english();
        let jane = ResolveArgs::new()
            .num(3)
            .placeholder("name", "Jane")
            .placeholder("album", "Hen's Night")
            .context("gender", "female");
        assert_eq!(
            en.resolve(PHOTOS, &jane),
            "Jane uploaded 3 photos to her Hen's Night album"
        );

        let john = ResolveArgs::new()
            .num(1)
            .placeholder("name", "John")
            .placeholder("album", "Buck's Night")
            .context("gender", "male");
        assert_eq!(
            en.resolve(PHOTOS, &john),
            "John uploaded 1 photo to his Buck's Night album"
        );
    }

    #[test]
    fn test_context_unknown_value_uses_default() {
        let args = ResolveArgs::new()
            .num(2)
            .placeholder("name", "Sam")
            .placeholder("album", "Trip")
            .context("gender", "unspecified");
        assert_eq!(
            english().resolve(PHOTOS, &args),
            "Sam uploaded 2 photos to their Trip album"
        );
    }

    #[test]
    fn test_plural_without_generic_bucket_falls_back_to_key() {
        let en = english();
        assert_eq!(en.resolve("Only one", &n(1)), "just one");
        assert_eq!(en.resolve("Only one", &n(2)), "Only one");
        assert_eq!(en.translate("Only one"), "Only one");
        assert_eq!(
            en.resolve("Only one", &n(2).default_text("%n items")),
            "2 items"
        );
    }

    #[test]
    fn test_context_without_default_falls_back_to_key() {
        let en = english();
        assert_eq!(
            en.resolve("Pronoun only", &ResolveArgs::new().context("gender", "male")),
            "his"
        );
        assert_eq!(en.translate("Pronoun only"), "Pronoun only");
    }

    #[test]
    fn test_placeholder_last_value_wins() {
        let args = ResolveArgs::new()
            .placeholder("name", "first")
            .placeholder("name", "second");
        assert_eq!(args.placeholders().len(), 1);
        assert_eq!(english().resolve("Hi %{name}", &args), "Hi second");
    }

    #[test]
    fn test_context_order_is_kept() {
        let args = ResolveArgs::new()
            .context("gender", "male")
            .context("formality", "polite");
        assert_eq!(
            args.context_pairs(),
            &[
                ("gender".to_string(), "male".to_string()),
                ("formality".to_string(), "polite".to_string())
            ]
        );
    }
}
