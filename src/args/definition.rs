//! Command-line argument definition and processing.

use std::path::PathBuf;

use clap::Parser;

/// tongues - resolve translation keys from JSON/YAML translation tables
#[derive(Parser, Debug)]
#[command(name = "tongues")]
#[command(version)]
#[command(about = "Resolve translation keys with plural buckets, placeholders and context variants", long_about = None)]
pub struct Args {
    /// Translation key to resolve (e.g. "%n comments")
    pub key: Option<String>,

    /// Translation file to load (.json, .yml, .yaml); overrides locale lookup
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Locale to load from the locales directory (default: system locale)
    #[arg(long)]
    pub locale: Option<String>,

    /// Directory holding {locale}.json|yml|yaml files
    #[arg(long)]
    pub locales_dir: Option<PathBuf>,

    /// Locale configuration file (i18n.yml) with default locale and fallbacks
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Count used for plural selection and %n substitution
    #[arg(short, long, allow_negative_numbers = true)]
    pub num: Option<i64>,

    /// Placeholder value for %{NAME} (repeatable)
    #[arg(short, long = "placeholder", value_name = "NAME=VALUE")]
    pub placeholders: Vec<String>,

    /// Context pair such as gender=female (repeatable; earlier pairs win)
    #[arg(short, long = "context", value_name = "KEY=VALUE")]
    pub context: Vec<String>,

    /// Text to use when the key is not in the table
    #[arg(short, long = "default", value_name = "TEXT")]
    pub default_text: Option<String>,

    /// Validate the translation table and print a summary
    #[arg(long)]
    pub check: bool,

    /// List every key in the translation table
    #[arg(long)]
    pub list_keys: bool,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// What: Run the command selected by the parsed arguments.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - `Ok(text)` to print on stdout, or `Err(message)` for stderr.
///
/// # Errors
/// - Returns `Err` when the table cannot be loaded, a `key=value` argument is
///   malformed, or no key was given for a translation.
///
/// Details:
/// - `--check` and `--list-keys` take priority over translating a key.
pub fn process_args(args: &Args) -> Result<String, String> {
    use crate::args::{inspect, translate};

    let (locale, resolver) = translate::load_resolver(args)?;
    tracing::debug!(locale = %locale, entries = resolver.table().len(), "Translation table ready");

    if args.check {
        return Ok(inspect::handle_check(&locale, resolver.table()));
    }
    if args.list_keys {
        return Ok(inspect::handle_list_keys(resolver.table()));
    }

    let Some(key) = &args.key else {
        return Err("No translation key given (see --help)".to_string());
    };
    translate::handle_translate(&resolver, key, args)
}
