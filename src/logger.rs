//! Structured logging for catalog sessions.
//!
//! Transactions, refusals and session start/stop are emitted as `tracing`
//! events; [`init`] routes them to stderr so they never interleave with the
//! menu on stdout. The level comes from `AppConfig::log_level`, which takes
//! the same filter directives whether it was set in the TOML file, in
//! `LENDING_LOG_LEVEL` or with `--log-level`.

use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// Parse a filter directive such as `warn` or `lending_catalog=debug`.
///
/// # Errors
///
/// Returns `AppError::Logger` if `directive` is blank or not a valid filter.
pub fn filter(directive: &str) -> Result<EnvFilter, AppError> {
    if directive.trim().is_empty() {
        return Err(AppError::Logger("log level must not be empty".into()));
    }
    EnvFilter::try_new(directive)
        .map_err(|e| AppError::Logger(format!("invalid log level '{directive}': {e}")))
}

/// Install the stderr subscriber for this process.
///
/// A valid `RUST_LOG` wins over `directive`.
///
/// # Errors
///
/// Returns `AppError::Logger` if `directive` is rejected by [`filter`] while
/// `RUST_LOG` is unset or invalid, or if a subscriber is already installed.
pub fn init(directive: &str) -> Result<(), AppError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(from_env) => from_env,
        Err(_) => filter(directive)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| AppError::Logger(format!("failed to set subscriber: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_levels_and_targeted_directives_are_accepted() {
        let directives = ["warn", "trace", "off", "lending_catalog=debug", "info,lending_catalog=trace"];
        for directive in directives {
            assert!(filter(directive).is_ok(), "expected '{directive}' to be accepted");
        }
    }

    #[test]
    fn blank_or_malformed_directives_are_rejected() {
        assert!(matches!(filter(""), Err(AppError::Logger(_))));
        assert!(matches!(filter("  "), Err(AppError::Logger(_))));
        assert!(matches!(filter("lending_catalog=loud"), Err(AppError::Logger(_))));
    }

    #[test]
    #[allow(clippy::panic)]
    fn second_install_reports_existing_subscriber() {
        match init("warn") {
            Ok(()) => {}
            Err(AppError::Logger(msg)) if msg.contains("set subscriber") => {}
            Err(e) => panic!("unexpected error: {e}"),
        }
        let again = init("warn");
        assert!(matches!(again, Err(AppError::Logger(msg)) if msg.contains("set subscriber")));
    }
}
