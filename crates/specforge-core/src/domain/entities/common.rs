use crate::domain::DomainError;
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// A path below one of the output roots.
///
/// Invariant: never absolute and never climbs out with `..`. Enforced at
/// construction, so a renderer cannot write outside its target directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    /// Fallible constructor.
    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        let escapes = path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)));
        if path.is_absolute() || escapes {
            Err(DomainError::AbsolutePathNotAllowed {
                path: path.display().to_string(),
            })
        } else {
            Ok(Self(path))
        }
    }

    /// Build a path from a dotted package and a file name:
    /// `com.example.dto` + `User.java` → `com/example/dto/User.java`.
    pub fn from_package(package: &str, file_name: &str) -> Result<Self, DomainError> {
        let mut path = PathBuf::new();
        for segment in package.split('.').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.push(file_name);
        Self::try_new(path)
    }

    /// Join a segment, maintaining the relative invariant.
    pub fn join(&self, segment: impl AsRef<Path>) -> Result<Self, DomainError> {
        Self::try_new(self.0.join(segment))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}
