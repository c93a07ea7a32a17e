//! Flags accepted by every subcommand.

use std::path::PathBuf;

use clap::{ArgAction, Args, ValueEnum};

#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// More log output: `-v` info, `-vv` debug, `-vvv` trace.
    ///
    /// Without it only warnings reach stderr, unless `logging.level` or
    /// `RUST_LOG` say otherwise.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print nothing but errors (JSON results are still written).
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Plain output even on a terminal. Also set by `NO_COLOR`.
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Read settings from FILE instead of `specforge.toml` or the
    /// user config directory.
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Result format on stdout. `json` also turns log lines into JSON.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Auto)]
    pub format: OutputFormat,
}

/// Rendering of command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `human` on a terminal, `plain` when piped.
    #[default]
    Auto,
    Human,
    Plain,
    Json,
}
