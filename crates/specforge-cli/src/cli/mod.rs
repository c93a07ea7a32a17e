//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use specforge_core::domain::GenerationTarget;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "specforge",
    bin_name = "specforge",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "OpenAPI to SQL, Spring and Angular source",
    long_about = "specforge reads OpenAPI documents and generates table definitions, \
                  PostgreSQL DDL, Spring DTOs and controllers, Java enums and \
                  Angular models and services.",
    after_help = "EXAMPLES:\n\
        \x20 specforge generate\n\
        \x20 specforge generate --target csv --target ddl --input specs/ --output build/\n\
        \x20 specforge list --format json\n\
        \x20 specforge completions bash > /usr/share/bash-completion/completions/specforge",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate artifacts from schema documents.
    #[command(
        visible_alias = "gen",
        about = "Generate artifacts",
        after_help = "EXAMPLES:\n\
            \x20 specforge generate                        # every target\n\
            \x20 specforge generate -t server -t client    # Java and TypeScript only\n\
            \x20 specforge generate -i api.yaml -o out/"
    )]
    Generate(GenerateArgs),

    /// List discovered schema documents.
    #[command(
        visible_alias = "ls",
        about = "List discovered APIs",
        after_help = "EXAMPLES:\n\
            \x20 specforge list\n\
            \x20 specforge list --input specs/ --format json"
    )]
    List(ListArgs),

    /// Manage the specforge configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 specforge config show\n\
            \x20 specforge config path\n\
            \x20 specforge config init --force"
    )]
    Config(ConfigCommands),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 specforge completions bash > ~/.local/share/bash-completion/completions/specforge\n\
            \x20 specforge completions zsh  > ~/.zfunc/_specforge\n\
            \x20 specforge completions fish > ~/.config/fish/completions/specforge.fish"
    )]
    Completions(CompletionsArgs),
}

// ── generate ──────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Targets to run; repeat the flag for several. Defaults to all.
    #[arg(
        short = 't',
        long = "target",
        value_name = "TARGET",
        value_enum,
        help = "Artifact family to generate (repeatable)"
    )]
    pub targets: Vec<TargetArg>,

    /// Schema file or directory. Overrides the configured input.
    #[arg(short = 'i', long = "input", value_name = "PATH", help = "Schema file or directory")]
    pub input: Option<PathBuf>,

    /// Output root. Overrides the configured output root.
    #[arg(short = 'o', long = "output", value_name = "DIR", help = "Output root directory")]
    pub output: Option<PathBuf>,
}

/// `--target` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum TargetArg {
    All,
    #[value(alias = "tables")]
    Csv,
    #[value(alias = "sql")]
    Ddl,
    #[value(alias = "spring")]
    Server,
    #[value(alias = "angular")]
    Client,
    #[value(alias = "enum")]
    Enums,
}

impl TargetArg {
    /// Expand a flag list into run targets. No flag means all.
    pub fn resolve(args: &[Self]) -> Vec<GenerationTarget> {
        if args.is_empty() || args.contains(&Self::All) {
            return GenerationTarget::ALL.to_vec();
        }
        let mut targets: Vec<GenerationTarget> = args
            .iter()
            .filter_map(|arg| match arg {
                Self::All => None,
                Self::Csv => Some(GenerationTarget::Csv),
                Self::Ddl => Some(GenerationTarget::Ddl),
                Self::Server => Some(GenerationTarget::Server),
                Self::Client => Some(GenerationTarget::Client),
                Self::Enums => Some(GenerationTarget::Enums),
            })
            .collect();
        targets.sort();
        targets.dedup();
        targets
    }
}

// ── list ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Schema file or directory. Overrides the configured input.
    #[arg(short = 'i', long = "input", value_name = "PATH", help = "Schema file or directory")]
    pub input: Option<PathBuf>,
}

// ── completions ───────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration after all layers are applied.
    Show,
    /// Print the path of the configuration file in use.
    Path,
    /// Write a configuration file with the built-in defaults.
    Init {
        /// Write to the platform config directory instead of the working directory.
        #[arg(long = "global")]
        global: bool,
        /// Overwrite an existing file.
        #[arg(short = 'f', long = "force")]
        force: bool,
    },
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn generate_defaults_to_every_target() {
        let cli = Cli::parse_from(["specforge", "generate"]);
        let Commands::Generate(args) = cli.command else {
            panic!("expected Generate command");
        };
        assert_eq!(TargetArg::resolve(&args.targets), GenerationTarget::ALL.to_vec());
    }

    #[test]
    fn targets_run_in_pipeline_order() {
        let cli = Cli::parse_from([
            "specforge", "generate", "--target", "client", "-t", "csv", "-t", "spring",
        ]);
        let Commands::Generate(args) = cli.command else {
            panic!("expected Generate command");
        };
        assert_eq!(
            TargetArg::resolve(&args.targets),
            vec![GenerationTarget::Csv, GenerationTarget::Server, GenerationTarget::Client]
        );
    }

    #[test]
    fn all_wins_over_single_targets() {
        assert_eq!(
            TargetArg::resolve(&[TargetArg::Ddl, TargetArg::All]),
            GenerationTarget::ALL.to_vec()
        );
    }

    #[test]
    fn unknown_target_is_rejected() {
        assert!(Cli::try_parse_from(["specforge", "generate", "--target", "python"]).is_err());
    }

    #[test]
    fn config_init_flags() {
        let cli = Cli::parse_from(["specforge", "config", "init", "--force"]);
        assert!(matches!(
            cli.command,
            Commands::Config(ConfigCommands::Init { force: true, global: false })
        ));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["specforge", "--quiet", "--verbose", "list"]);
        assert!(result.is_err());
    }
}
