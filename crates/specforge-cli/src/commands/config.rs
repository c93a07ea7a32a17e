//! `specforge config`: inspect and initialise configuration.

use std::fs;
use std::path::{Path, PathBuf};

use crate::{
    cli::ConfigCommands,
    config::{AppConfig, LoadedConfig},
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(cmd: ConfigCommands, loaded: LoadedConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Show => {
            if output.is_json() {
                output.json(&loaded.config)?;
            } else {
                output.header("Effective configuration:")?;
                output.print(&to_toml(&loaded.config)?)?;
            }
        }

        ConfigCommands::Path => match &loaded.source {
            Some(path) => output.print(&path.display().to_string())?,
            None => {
                output.info("No configuration file found; using defaults")?;
                output.detail("local", AppConfig::local_path().display())?;
                if let Some(global) = AppConfig::global_path() {
                    output.detail("global", global.display())?;
                }
            }
        },

        ConfigCommands::Init { global, force } => {
            let path = init_target(global)?;
            write_defaults(&path, force)?;
            output.success(&format!("Wrote default configuration to {}", path.display()))?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn init_target(global: bool) -> CliResult<PathBuf> {
    if !global {
        return Ok(AppConfig::local_path());
    }
    AppConfig::global_path().ok_or_else(|| CliError::ConfigError {
        message: "no platform configuration directory is available".into(),
        source: None,
    })
}

fn write_defaults(path: &Path, force: bool) -> CliResult<()> {
    if path.exists() && !force {
        return Err(CliError::ConfigExists {
            path: path.to_path_buf(),
        });
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, to_toml(&AppConfig::default())?)?;
    Ok(())
}

fn to_toml(config: &AppConfig) -> CliResult<String> {
    toml::to_string_pretty(config).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn init_writes_loadable_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/specforge.toml");

        write_defaults(&path, false).unwrap();

        let loaded = AppConfig::load(Some(&path));
        assert_eq!(loaded.source.as_deref(), Some(path.as_path()));
        assert_eq!(loaded.config, AppConfig::default());
    }

    #[test]
    fn init_refuses_to_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("specforge.toml");
        fs::write(&path, "[ddl]\ndatabase_name = \"kept\"\n").unwrap();

        assert!(matches!(
            write_defaults(&path, false),
            Err(CliError::ConfigExists { .. })
        ));
        write_defaults(&path, true).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("database_name = \"app\""));
    }
}
