//! Logging setup for the wpgen CLI.
//!
//! Logs go to stderr so a config written to stdout stays clean.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "wpgen=debug,wpgen_config=debug,wpgen_cli=debug";
const QUIET_FILTER: &str = "wpgen=error,wpgen_config=error,wpgen_cli=error";
const DEFAULT_FILTER: &str = "wpgen=info,wpgen_config=info,wpgen_cli=info";

/// Install the global subscriber. Call once, before any logging.
///
/// # Arguments
///
/// * `verbose` - Debug-level logging for the wpgen crates
/// * `quiet` - Errors only
/// * `no_color` - Plain output without ANSI escapes
///
/// # Verbosity Levels
///
/// First match wins:
/// 1. `verbose`: debug for wpgen crates
/// 2. `quiet`: errors only
/// 3. `RUST_LOG`
/// 4. info for wpgen crates
///
/// # Examples
///
/// ```rust,no_run
/// use wpgen_cli::logger::init_logger;
///
/// // Errors only, e.g. when the config goes to stdout in a script
/// init_logger(false, true, true);
/// ```
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = build_filter(verbose, quiet);

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn build_filter(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_filters_parse() {
        for directives in [VERBOSE_FILTER, QUIET_FILTER, DEFAULT_FILTER] {
            assert!(EnvFilter::try_new(directives).is_ok(), "{directives}");
        }
    }

    #[test]
    fn verbose_wins_over_quiet() {
        let filter = build_filter(true, true);
        assert!(filter.to_string().contains("wpgen_config=debug"));
    }
}
