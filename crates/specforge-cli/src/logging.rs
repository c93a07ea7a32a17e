//! Tracing subscriber initialisation.
//!
//! Only the CLI crate is allowed to call [`init_logging`]; `specforge-core`
//! and the adapters only *emit* spans and events.
//!
//! # Verbosity mapping
//!
//! | Flag(s)  | Filter level                          |
//! |----------|---------------------------------------|
//! | (none)   | `logging.level` from config, or WARN  |
//! | `-v`     | INFO                                  |
//! | `-vv`    | DEBUG                                 |
//! | `-vvv`   | TRACE                                 |
//! | `--quiet`| ERROR                                 |
//!
//! `RUST_LOG` overrides all of the above if set. Events go to stderr so
//! stdout stays clean for `--format json` results.

use std::io::IsTerminal as _;

use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{GlobalArgs, OutputFormat};
use crate::config::LoggingConfig;

const CRATES: [&str; 3] = ["specforge", "specforge_core", "specforge_adapters"];

/// Initialise the global tracing subscriber.
///
/// Must be called exactly once, before any tracing macros fire.
pub fn init_logging(args: &GlobalArgs, config: &LoggingConfig) -> anyhow::Result<()> {
    let level = derive_level(args, config);
    let directives = CRATES
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .collect::<Vec<_>>()
        .join(",");

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));

    let json = args.format == OutputFormat::Json || config.json;
    let use_ansi = !args.no_color && std::io::stderr().is_terminal();

    let fmt_layer = if json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .with_ansi(use_ansi)
            .with_writer(std::io::stderr)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))?;

    Ok(())
}

/// Translate the verbosity counter, quiet flag and configured level.
fn derive_level(args: &GlobalArgs, config: &LoggingConfig) -> String {
    if args.quiet {
        return "error".into();
    }
    match args.verbose {
        0 => config.level.clone().unwrap_or_else(|| "warn".into()),
        1 => "info".into(),
        2 => "debug".into(),
        _ => "trace".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_with(verbose: u8, quiet: bool) -> GlobalArgs {
        GlobalArgs {
            verbose,
            quiet,
            no_color: true,
            config: None,
            format: OutputFormat::Auto,
        }
    }

    #[test]
    fn level_default() {
        assert_eq!(derive_level(&args_with(0, false), &LoggingConfig::default()), "warn");
    }

    #[test]
    fn configured_level_applies_without_flags() {
        let config = LoggingConfig {
            level: Some("info".into()),
            json: false,
        };
        assert_eq!(derive_level(&args_with(0, false), &config), "info");
        assert_eq!(derive_level(&args_with(2, false), &config), "debug");
    }

    #[test]
    fn verbosity_counts() {
        let config = LoggingConfig::default();
        assert_eq!(derive_level(&args_with(1, false), &config), "info");
        assert_eq!(derive_level(&args_with(3, false), &config), "trace");
        assert_eq!(derive_level(&args_with(10, false), &config), "trace");
    }

    #[test]
    fn quiet_overrides_verbose() {
        assert_eq!(derive_level(&args_with(3, true), &LoggingConfig::default()), "error");
    }
}
