//! Output management and formatting.
//!
//! Results go to stdout; diagnostics go through `tracing` to stderr.

use std::fmt::Display;
use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::{OwoColorize, Style};
use serde::Serialize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Writes command results in the format chosen on the command line.
pub struct OutputManager {
    format: OutputFormat,
    quiet: bool,
    color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    ///
    /// `Auto` becomes `Human` on a terminal and `Plain` otherwise. Colour is
    /// only used for `Human`.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let format = match args.format {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            other => other,
        };

        Self {
            format,
            quiet: args.quiet,
            color: format == OutputFormat::Human && !args.no_color && !config.output.no_color,
            term: Term::stdout(),
        }
    }

    /// Unadorned line; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        self.emit(msg.to_owned())
    }

    /// `✓ <msg>`
    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.marked('\u{2713}', msg, Style::new().green())
    }

    /// `⚠ <msg>`
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.marked('\u{26a0}', msg, Style::new().yellow())
    }

    /// `ℹ <msg>`
    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.marked('\u{2139}', msg, Style::new().blue())
    }

    /// Section title, e.g. one API of a run.
    pub fn header(&self, text: &str) -> io::Result<()> {
        self.emit(self.paint(text, Style::new().cyan().bold()))
    }

    /// Indented `key: value` line under a header.
    pub fn detail(&self, key: &str, value: impl Display) -> io::Result<()> {
        let key = self.paint(&format!("{key}:"), Style::new().dimmed());
        self.emit(format!("  {key} {value}"))
    }

    /// Pretty JSON on stdout. Written even in quiet mode so that
    /// `--format json -q` stays scriptable.
    pub fn json<T: Serialize>(&self, value: &T) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    pub fn supports_color(&self) -> bool {
        self.color
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    // ── helpers ───────────────────────────────────────────────────────────

    fn marked(&self, mark: char, msg: &str, style: Style) -> io::Result<()> {
        let mark = self.paint(&mark.to_string(), style.bold());
        self.emit(format!("{mark} {}", self.paint(msg, style)))
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.color {
            text.style(style).to_string()
        } else {
            text.to_owned()
        }
    }

    fn emit(&self, line: String) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(&line)
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(format: OutputFormat, no_color: bool, config: &AppConfig) -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color,
            config: None,
            format,
        };
        OutputManager::new(&args, config)
    }

    #[test]
    fn human_format_is_coloured_unless_disabled() {
        let config = AppConfig::default();
        assert!(manager(OutputFormat::Human, false, &config).supports_color());
        assert!(!manager(OutputFormat::Human, true, &config).supports_color());
    }

    #[test]
    fn plain_and_json_are_never_coloured() {
        let config = AppConfig::default();
        assert!(!manager(OutputFormat::Plain, false, &config).supports_color());

        let json = manager(OutputFormat::Json, false, &config);
        assert!(!json.supports_color());
        assert!(json.is_json());
    }

    #[test]
    fn config_no_color_is_honoured() {
        let mut config = AppConfig::default();
        config.output.no_color = true;
        assert!(!manager(OutputFormat::Human, false, &config).supports_color());
    }

    #[test]
    fn paint_is_identity_without_colour() {
        let out = manager(OutputFormat::Plain, false, &AppConfig::default());
        assert_eq!(out.paint("users", Style::new().red()), "users");
    }

    #[test]
    fn paint_wraps_in_escape_codes_with_colour() {
        let out = manager(OutputFormat::Human, false, &AppConfig::default());
        let painted = out.paint("users", Style::new().red());
        assert!(painted.contains("users"));
        assert_ne!(painted, "users");
    }

    #[test]
    fn quiet_suppresses_lines() {
        let args = GlobalArgs {
            verbose: 0,
            quiet: true,
            no_color: true,
            config: None,
            format: OutputFormat::Plain,
        };
        let out = OutputManager::new(&args, &AppConfig::default());
        assert!(out.print("hidden").is_ok());
        assert!(out.success("hidden").is_ok());
    }
}
