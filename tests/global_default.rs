//! Process-wide default resolver lifecycle.
//!
//! Kept in its own test binary and a single test so no other test observes
//! the shared binding while it changes.

use std::path::PathBuf;
use std::thread;

use tongues::i18n::global;
use tongues::i18n::{ResolveArgs, Resolver, TranslationTable};

fn fixture(file: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("translations")
        .join(file)
}

#[test]
fn default_resolver_lifecycle() {
    // Nothing bound: keys come back untranslated, substitutions still apply
    global::clear_default();
    assert!(!global::has_default());
    assert_eq!(global::t("Cancel"), "Cancel");
    assert_eq!(
        global::t_with("%n comments", &ResolveArgs::new().num(2)),
        "2 comments"
    );

    // Bind from file
    global::load_default(&fixture("jp.json")).expect("jp fixture loads");
    assert!(global::has_default());
    assert_eq!(global::t("Cancel"), "キャンセル");
    assert_eq!(
        global::t_with(
            "_short_key",
            &ResolveArgs::new().default_text("This is a long piece of text")
        ),
        "This is a long piece of text"
    );
    assert_eq!(global::t("_monkeys"), "猿も木から落ちる");
    assert_eq!(
        global::t_with(
            "%{name} uploaded %n photos to their %{album} album",
            &ResolveArgs::new()
                .num(1)
                .placeholder("name", "John")
                .placeholder("album", "Buck's Night")
                .context("gender", "male")
        ),
        "Johnは彼のBuck's Nightアルバムに写真1枚をアップロードしました"
    );

    // A failed load keeps the previous binding
    assert!(global::load_default(&fixture("missing.json")).is_err());
    assert_eq!(global::t("Cancel"), "キャンセル");

    // Concurrent readers
    let readers: Vec<_> = (0..8)
        .map(|_| thread::spawn(|| global::t("Cancel")))
        .collect();
    for reader in readers {
        assert_eq!(reader.join().expect("reader thread"), "キャンセル");
    }

    // Re-binding replaces the table
    global::set_default(Resolver::new(
        TranslationTable::new().with("Cancel", "Anuluj"),
    ));
    assert_eq!(global::t("Cancel"), "Anuluj");
    assert!(global::default_resolver().is_some());

    global::clear_default();
    assert_eq!(global::t("Cancel"), "Cancel");
}
