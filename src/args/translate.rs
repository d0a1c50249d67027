//! Table loading and key translation for the CLI.

use tongues::i18n::{
    self, LocaleConfig, LocaleLoader, ResolveArgs, Resolver, find_config_file, find_locales_dir,
    resolve_locale,
};
use tongues::util::config::parse_pairs;

use crate::args::Args;

/// What: Load the translation table selected by the arguments.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - `(label, resolver)`: the loaded locale code (or file path) and its resolver.
///
/// # Errors
/// - Returns `Err` when the file or locale cannot be loaded.
///
/// Details:
/// - `--file` wins; otherwise the locale is resolved (flag -> system -> config
///   default, following configured fallbacks) and loaded from the locales directory.
pub fn load_resolver(args: &Args) -> Result<(String, Resolver), String> {
    if let Some(path) = &args.file {
        let resolver = Resolver::from_file(path).map_err(|e| e.to_string())?;
        return Ok((path.display().to_string(), resolver));
    }

    let locales_dir = args
        .locales_dir
        .clone()
        .or_else(find_locales_dir)
        .ok_or_else(|| {
            format!(
                "No translation file given and no locales directory found (use --file, --locales-dir or ${})",
                i18n::LOCALES_DIR_ENV
            )
        })?;

    let config = args
        .config
        .clone()
        .or_else(|| find_config_file(Some(&locales_dir)))
        .map_or_else(
            || {
                tracing::debug!("{} not found, using default locale config", i18n::CONFIG_FILE_NAME);
                LocaleConfig::default()
            },
            |path| LocaleConfig::load_or_default(&path),
        );

    let locale = resolve_locale(args.locale.as_deref(), &config);
    let (loaded, table) = LocaleLoader::new(locales_dir)
        .load(&locale)
        .map_err(|e| e.to_string())?;
    Ok((loaded, Resolver::new(table)))
}

/// What: Build resolution arguments from the command line.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - `ResolveArgs` with count, placeholders, context (in order) and default text.
///
/// # Errors
/// - Returns `Err` for a `-p`/`-c` value that is not `key=value`.
pub fn build_resolve_args(args: &Args) -> Result<ResolveArgs, String> {
    let mut resolve_args = ResolveArgs::new().maybe_num(args.num);
    for (name, value) in parse_pairs(&args.placeholders)? {
        resolve_args = resolve_args.placeholder(name, value);
    }
    for (key, value) in parse_pairs(&args.context)? {
        resolve_args = resolve_args.context(key, value);
    }
    if let Some(text) = &args.default_text {
        resolve_args = resolve_args.default_text(text.as_str());
    }
    Ok(resolve_args)
}

/// What: Translate one key.
///
/// Inputs:
/// - `resolver`: Resolver bound to the loaded table.
/// - `key`: Translation key.
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - Rendered translation.
///
/// # Errors
/// - Returns `Err` when the placeholder/context arguments are malformed.
pub fn handle_translate(resolver: &Resolver, key: &str, args: &Args) -> Result<String, String> {
    let resolve_args = build_resolve_args(args)?;
    if !resolver.table().contains_key(key) {
        tracing::info!(key = %key, "Key not in table, printing fallback text");
    }
    Ok(resolver.resolve(key, &resolve_args))
}
