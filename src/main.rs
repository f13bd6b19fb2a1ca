use std::{
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use colored::Colorize;
use lending_catalog::{AppConfig, AppError, Catalog, Shell, logger, sample};
use tracing::{error, info};

/// Command-line arguments for the lending catalog
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML file with session settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `lending_catalog=trace`
    #[arg(short, long, value_parser = parse_log_level)]
    log_level: Option<String>,

    /// Start with an empty catalog instead of the sample items
    #[arg(long)]
    no_samples: bool,

    /// Render listings, history and statistics as JSON
    #[arg(long)]
    json: bool,
}

/// Validate a `--log-level` value the same way the config file's is used
fn parse_log_level(level: &str) -> Result<String, AppError> {
    logger::filter(level).map(|_| level.to_string())
}

/// Resolve settings: defaults, then the config file, then env, then flags
fn resolve_config(args: Args) -> Result<AppConfig, AppError> {
    let base = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    let mut config = base.apply_env()?;
    if let Some(level) = args.log_level {
        config.log_level = level;
    }
    if args.no_samples {
        config.seed_samples = false;
    }
    if args.json {
        config.json = true;
    }
    Ok(config)
}

/// Build the catalog and run the interactive session on stdin/stdout
fn run(args: Args) -> Result<(), AppError> {
    let config = resolve_config(args)?;
    logger::init(&config.log_level)?;
    info!(?config, "configuration resolved");

    let mut catalog = Catalog::new();
    if config.seed_samples {
        sample::seed(&mut catalog);
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(catalog, stdin.lock(), stdout.lock(), &config);
    shell.run()?;

    let (_, mut output) = shell.into_parts();
    output.flush()?;
    Ok(())
}

/// Parse arguments, run the session, and map failures to a non-zero exit code
fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "session failed");
            eprintln!("{} {e}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_flag_takes_filter_directives() {
        let args = Args::try_parse_from(["lending-catalog", "--log-level", "lending_catalog=debug"]);
        assert_eq!(
            args.ok().and_then(|args| args.log_level),
            Some("lending_catalog=debug".to_string())
        );
        assert!(Args::try_parse_from(["lending-catalog", "-l", "warn"]).is_ok());
        assert!(Args::try_parse_from(["lending-catalog", "-l", "lending_catalog=loud"]).is_err());
    }

    #[test]
    #[allow(clippy::expect_used)]
    fn flags_override_resolved_config() {
        let args = Args::try_parse_from(["lending-catalog", "--no-samples", "--json", "-l", "trace"])
            .expect("flags should parse");
        let config = resolve_config(args).expect("flags should resolve");
        assert_eq!(config.log_level, "trace");
        assert!(!config.seed_samples);
        assert!(config.json);
    }
}
