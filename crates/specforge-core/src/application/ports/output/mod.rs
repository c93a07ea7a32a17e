//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `specforge-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::{DdlDocument, GeneratedUnit, RelativePath, SchemaDocument, TableRow};
use crate::error::ForgeResult;

/// Where one schema document lives and the API name it was given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaLocation {
    pub api_name: String,
    pub path: PathBuf,
}

/// Port for finding and parsing schema documents.
///
/// Implemented by:
/// - `specforge_adapters::schema_source::DirectorySchemaSource`
#[cfg_attr(test, mockall::automock)]
pub trait SchemaSource: Send + Sync {
    /// Documents at `input` (a file or a directory), in processing order.
    fn discover(&self, input: &Path) -> ForgeResult<Vec<SchemaLocation>>;

    /// Parse one document.
    fn load(&self, location: &SchemaLocation) -> ForgeResult<SchemaDocument>;
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `specforge_adapters::filesystem::LocalFilesystem` (production)
/// - `specforge_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> ForgeResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> ForgeResult<()>;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> ForgeResult<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// A rendered source file, relative to its target's output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub relative_path: RelativePath,
    pub contents: String,
}

/// Port for turning document trees into text.
///
/// Implemented by:
/// - `specforge_adapters::renderer::TextRenderer`
#[cfg_attr(test, mockall::automock)]
pub trait UnitRenderer: Send + Sync {
    fn render_unit(&self, unit: &GeneratedUnit) -> ForgeResult<RenderedFile>;

    fn render_ddl(&self, document: &DdlDocument) -> ForgeResult<String>;
}

/// Port for the intermediate table-definition file.
///
/// Implemented by:
/// - `specforge_adapters::table_csv::CsvTableCodec`
#[cfg_attr(test, mockall::automock)]
pub trait TableCodec: Send + Sync {
    fn encode(&self, rows: &[TableRow]) -> ForgeResult<String>;

    fn decode(&self, text: &str) -> ForgeResult<Vec<TableRow>>;
}

/// Port for the wall clock; only backup file names carry time.
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    /// `YYYYmmdd_HHMMSS`.
    fn backup_stamp(&self) -> String;
}
