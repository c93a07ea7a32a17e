//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only sees the option structs built
//! from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `SPECFORGE_*` environment variables, `__` between keys
//!    (`SPECFORGE_DDL__DATABASE_NAME=shop`)
//! 3. Config file (`--config`, else `specforge.toml` in the working
//!    directory, else the platform config directory)
//! 4. Built-in defaults (always present)

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use specforge_core::application::{GenerationOptions, OutputLayout};
use specforge_core::domain::{
    ClientOptions, DdlOptions, GenerationTarget, ProjectionOptions, RequirednessPolicy,
    ServerOptions, TableOptions,
};

const LOCAL_FILE: &str = "specforge.toml";
const ENV_PREFIX: &str = "SPECFORGE";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub validation: ValidationConfig,
    pub table: TableConfig,
    pub ddl: DdlConfig,
    pub server: ServerConfig,
    pub client: ClientConfig,
    /// Per-API overrides keyed by API name.
    pub apis: BTreeMap<String, ApiConfig>,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Schema file or directory.
    pub path: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("openapi"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Root all artifact directories are placed under.
    pub root: PathBuf,
    pub no_color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("output"),
            no_color: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Field names whose rules are optional whatever the schema says.
    pub optional_fields: Vec<String>,
    /// Package of the `@UnitCheck*` annotation types.
    pub package: String,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            optional_fields: vec!["nullableValue".into(), "notEmpty".into()],
            package: ServerOptions::default().validation_package,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub unique_columns: Vec<String>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            unique_columns: TableOptions::default().unique_columns.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DdlConfig {
    pub database_name: String,
    pub extensions: Vec<String>,
    pub timestamp_trigger: bool,
}

impl Default for DdlConfig {
    fn default() -> Self {
        let d = DdlOptions::default();
        Self {
            database_name: d.database_name,
            extensions: d.extensions,
            timestamp_trigger: d.timestamp_trigger,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub base_package: String,
    pub controller_package: String,
    pub dto_package: String,
    pub enum_package: String,
    /// Bean-validation annotations on fields without custom rules.
    pub validation_annotations: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let d = ServerOptions::default();
        Self {
            base_package: d.base_package,
            controller_package: d.controller_package,
            dto_package: d.dto_package,
            enum_package: d.enum_package,
            validation_annotations: d.validation_annotations,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_base_url: String,
    /// Relative paths resolve against the output root.
    pub models_dir: Option<PathBuf>,
    pub services_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: ClientOptions::default().api_base_url,
            models_dir: None,
            services_dir: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_package: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when neither `-v`/`-q` nor `RUST_LOG` is given.
    pub level: Option<String>,
    /// Emit log lines as JSON.
    pub json: bool,
}

/// A loaded configuration and where it came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: AppConfig,
    /// The file that was read, if any.
    pub source: Option<PathBuf>,
    /// Problems met while loading. Configuration is read before logging is
    /// set up, so the caller reports these once the subscriber exists.
    pub warnings: Vec<String>,
}

impl AppConfig {
    /// Load configuration, starting from defaults.
    ///
    /// A missing file is skipped. A file or environment layer that fails to
    /// parse is recorded as a warning and the remaining layers are used.
    pub fn load(explicit: Option<&Path>) -> LoadedConfig {
        let mut warnings = Vec::new();
        let path = Self::resolve_path(explicit);
        let file = path.as_deref().filter(|p| p.is_file());
        if let (Some(explicit), None) = (explicit, file) {
            warnings.push(format!(
                "configuration file {} not found, using defaults",
                explicit.display()
            ));
        }

        match Self::layered(file) {
            Ok(config) => LoadedConfig {
                config,
                source: file.map(Path::to_path_buf),
                warnings,
            },
            Err(e) => {
                warnings.push(format!("ignoring unreadable configuration: {e}"));
                let config = Self::layered(None).unwrap_or_else(|e| {
                    warnings.push(format!("ignoring malformed SPECFORGE_* environment: {e}"));
                    Self::default()
                });
                LoadedConfig {
                    config,
                    source: None,
                    warnings,
                }
            }
        }
    }

    fn layered(file: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);
        if let Some(file) = file {
            builder = builder.add_source(File::from(file).required(false));
        }
        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// The file `load` reads: `--config`, then `./specforge.toml`, then the
    /// platform config file.
    pub fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        let local = PathBuf::from(LOCAL_FILE);
        if local.is_file() {
            return Some(local);
        }
        Self::global_path().filter(|p| p.is_file())
    }

    /// Platform config file, e.g. `~/.config/specforge/config.toml`.
    pub fn global_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "specforge", "specforge")
            .map(|d| d.config_dir().join("config.toml"))
    }

    /// `specforge.toml` in the working directory.
    pub fn local_path() -> PathBuf {
        PathBuf::from(LOCAL_FILE)
    }

    pub fn projection_options(&self) -> ProjectionOptions {
        ProjectionOptions {
            requiredness: RequirednessPolicy::new(self.validation.optional_fields.iter().cloned()),
            table: TableOptions {
                unique_columns: self.table.unique_columns.iter().cloned().collect(),
            },
            ddl: DdlOptions {
                database_name: self.ddl.database_name.clone(),
                extensions: self.ddl.extensions.clone(),
                timestamp_trigger: self.ddl.timestamp_trigger,
            },
            server: ServerOptions {
                base_package: self.server.base_package.clone(),
                controller_package: self.server.controller_package.clone(),
                dto_package: self.server.dto_package.clone(),
                enum_package: self.server.enum_package.clone(),
                validation_package: self.validation.package.clone(),
                validation_annotations: self.server.validation_annotations,
                api_base_packages: self
                    .apis
                    .iter()
                    .filter_map(|(api, c)| c.base_package.clone().map(|p| (api.clone(), p)))
                    .collect(),
            },
            client: ClientOptions {
                api_base_url: self.client.api_base_url.clone(),
            },
        }
    }

    /// Options for one run. `input` and `output` are CLI overrides.
    pub fn generation_options(
        &self,
        targets: Vec<GenerationTarget>,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
    ) -> GenerationOptions {
        let root = output.unwrap_or_else(|| self.output.root.clone());
        let mut layout = OutputLayout::under(&root);
        if let Some(dir) = &self.client.models_dir {
            layout.client_models_dir = root.join(dir);
        }
        if let Some(dir) = &self.client.services_dir {
            layout.client_services_dir = root.join(dir);
        }

        GenerationOptions {
            input: input.unwrap_or_else(|| self.input.path.clone()),
            targets,
            layout,
            projection: self.projection_options(),
        }
    }
}
