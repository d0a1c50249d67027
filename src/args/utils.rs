//! Shared utilities for argument processing.

/// What: Determine the log level based on command-line arguments and environment variables.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - Log level string (trace, debug, info, warn, error).
///
/// Details:
/// - Verbose flag overrides `log_level` argument.
/// - `TONGUES_TRACE=1` enables TRACE level regardless of flags.
pub fn determine_log_level(args: &crate::args::Args) -> String {
    if std::env::var("TONGUES_TRACE").ok().as_deref() == Some("1") {
        "trace".to_string()
    } else if args.verbose {
        "debug".to_string()
    } else {
        args.log_level.clone()
    }
}
