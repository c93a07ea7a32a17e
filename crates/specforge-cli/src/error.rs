//! Error handling for the specforge CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Proper error chaining
//! - Exit code mapping

use std::error::Error;
use std::path::PathBuf;

use owo_colors::{OwoColorize, Style};
use thiserror::Error;

use specforge_core::error::{ErrorCategory as CoreCategory, ForgeError};

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input that clap could not catch.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// `config init` would overwrite an existing file.
    #[error("Configuration file already exists at {path}")]
    ConfigExists { path: PathBuf },

    /// A configuration file could not be written or rendered.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An error propagated from `specforge-core` or an adapter.
    #[error("Generation failed: {0}")]
    Core(#[from] ForgeError),

    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { message } => vec![
                format!("Check your input: {message}"),
                "Use --help for usage information".into(),
            ],
            Self::ConfigExists { path } => vec![
                format!("Edit the existing file: {}", path.display()),
                "Use --force to overwrite it with the defaults".into(),
            ],
            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {message}"),
                "Run 'specforge config path' to see which file is in use".into(),
            ],
            Self::Core(core) => core.suggestions(),
            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {message}"),
                "Check file permissions".into(),
            ],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } | Self::ConfigExists { .. } => ErrorCategory::UserError,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category                | Code |
    /// |-------------------------|------|
    /// | Usage error             |  2   |
    /// | Everything else         |  1   |
    ///
    /// Missing input and malformed documents are runtime failures (1); only
    /// usage mistakes share clap's code.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidInput { .. } | Self::ConfigExists { .. } => 2,
            _ => 1,
        }
    }

    /// Message, cause chain (when verbose) and suggestions, ready for stderr.
    pub fn render(&self, verbose: bool, color: bool) -> String {
        let paint = |text: &str, style: Style| {
            if color {
                text.style(style).to_string()
            } else {
                text.to_owned()
            }
        };
        let mut out = String::new();

        let mark = if color { "\u{2717} " } else { "" };
        out.push_str(&format!("\n{}\n", paint(&format!("{mark}Error: {self}"), Style::new().red().bold())));

        if verbose {
            let mut cause = self.source();
            while let Some(err) = cause {
                out.push_str(&format!("  {}\n", paint(&format!("Caused by: {err}"), Style::new().dimmed())));
                cause = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str(&format!("\n{}\n", paint("Suggestions:", Style::new().yellow().bold())));
            for suggestion in &suggestions {
                out.push_str(&format!("  {suggestion}\n"));
            }
        }

        if !verbose {
            out.push_str(&format!(
                "\n{}\n",
                paint("Use -v / --verbose for more details.", Style::new().dimmed())
            ));
        }

        out
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::warn!("User error: {}", self),
            ErrorCategory::NotFound => tracing::warn!("Not found: {}", self),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    UserError,
    NotFound,
    Configuration,
    Internal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use specforge_core::application::ApplicationError;
    use std::io;

    fn no_input() -> CliError {
        CliError::Core(
            ApplicationError::NoSchemaInput {
                path: PathBuf::from("openapi"),
            }
            .into(),
        )
    }

    #[test]
    fn missing_input_exits_one_and_suggests_a_location() {
        let err = no_input();
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert!(err.suggestions().iter().any(|s| s.contains("--input")));
    }

    #[test]
    fn usage_errors_share_clap_exit_code() {
        let err = CliError::ConfigExists {
            path: PathBuf::from("specforge.toml"),
        };
        assert_eq!(err.exit_code(), 2);
        assert!(err.suggestions().iter().any(|s| s.contains("--force")));
    }

    #[test]
    fn io_errors_are_internal() {
        let err: CliError = io::Error::other("disk full").into();
        assert_eq!(err.category(), ErrorCategory::Internal);
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn plain_render_contains_error_header() {
        let s = no_input().render(false, false);
        assert!(s.contains("Error: Generation failed"));
        assert!(s.contains("Suggestions:"));
        assert!(s.contains("--verbose"));
    }

    #[test]
    fn verbose_render_shows_causes() {
        let err = CliError::ConfigError {
            message: "cannot render".into(),
            source: Some(Box::new(io::Error::other("inner"))),
        };
        let s = err.render(true, false);
        assert!(s.contains("Caused by: inner"));
        assert!(!s.contains("--verbose"));
    }
}
