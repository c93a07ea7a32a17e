//! Run-level options: what to generate and where it goes.

use std::path::{Path, PathBuf};

use crate::domain::{GenerationTarget, ProjectionOptions};

/// File name of the intermediate table-definition file.
pub const TABLE_FILE_STEM: &str = "table_definitions";

/// Output directories, one per artifact family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    pub csv_dir: PathBuf,
    pub ddl_dir: PathBuf,
    /// Java source root; packages become subdirectories.
    pub server_dir: PathBuf,
    pub client_models_dir: PathBuf,
    pub client_services_dir: PathBuf,
    pub metadata_path: PathBuf,
}

impl OutputLayout {
    /// The conventional layout under one output root.
    pub fn under(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            csv_dir: root.join("csv"),
            ddl_dir: root.join("ddl"),
            server_dir: root.join("spring").join("src").join("main").join("java"),
            client_models_dir: root.join("angular").join("src").join("app").join("models"),
            client_services_dir: root.join("angular").join("src").join("app").join("services"),
            metadata_path: root.join("spring_metadata.json"),
        }
    }

    pub fn table_file(&self) -> PathBuf {
        self.csv_dir.join(format!("{TABLE_FILE_STEM}.csv"))
    }
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self::under("output")
    }
}

/// Everything one `generate` call needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOptions {
    /// A schema file or a directory of them.
    pub input: PathBuf,
    /// Requested targets; they always run in [`GenerationTarget::ALL`] order.
    pub targets: Vec<GenerationTarget>,
    pub layout: OutputLayout,
    pub projection: ProjectionOptions,
}

impl GenerationOptions {
    pub fn wants(&self, target: GenerationTarget) -> bool {
        self.targets.contains(&target)
    }
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            input: PathBuf::from("openapi"),
            targets: GenerationTarget::ALL.to_vec(),
            layout: OutputLayout::default(),
            projection: ProjectionOptions::default(),
        }
    }
}
