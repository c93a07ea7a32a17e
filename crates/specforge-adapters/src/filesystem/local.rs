//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use specforge_core::application::{ApplicationError, ports::Filesystem};
use specforge_core::error::{ForgeError, ForgeResult};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> ForgeResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> ForgeResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn read_to_string(&self, path: &Path) -> ForgeResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> ForgeError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writes_and_reads_back() {
        let dir = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let nested = dir.path().join("out/csv");
        let file = nested.join("table_definitions.csv");

        fs.create_dir_all(&nested).unwrap();
        fs.write_file(&file, "api_name\n").unwrap();

        assert!(fs.exists(&file));
        assert_eq!(fs.read_to_string(&file).unwrap(), "api_name\n");
    }

    #[test]
    fn missing_file_maps_to_filesystem_error() {
        let dir = TempDir::new().unwrap();
        let err = LocalFilesystem::new()
            .read_to_string(&dir.path().join("absent.csv"))
            .unwrap_err();
        assert!(matches!(
            err,
            ForgeError::Application(ApplicationError::FilesystemError { .. })
        ));
    }
}
