//! Schema discovery and loading from the local filesystem.
//!
//! An input is either one document or a directory scanned one level deep.
//! YAML documents are converted to `serde_json::Value` so the domain only
//! ever sees one tree type.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Number, Value};
use serde_yaml::Value as YamlValue;
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use specforge_core::application::ports::{SchemaLocation, SchemaSource};
use specforge_core::application::ApplicationError;
use specforge_core::domain::SchemaDocument;
use specforge_core::error::ForgeResult;

const SCHEMA_EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

/// Reads OpenAPI documents from a file or a flat directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectorySchemaSource;

impl DirectorySchemaSource {
    pub fn new() -> Self {
        Self
    }
}

impl SchemaSource for DirectorySchemaSource {
    #[instrument(skip(self), fields(input = %input.display()))]
    fn discover(&self, input: &Path) -> ForgeResult<Vec<SchemaLocation>> {
        if input.is_file() {
            return Ok(location(input).into_iter().collect());
        }
        if !input.is_dir() {
            debug!("input does not exist");
            return Ok(Vec::new());
        }

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in WalkDir::new(input).min_depth(1).max_depth(1) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable directory entry");
                    continue;
                }
            };
            if entry.file_type().is_file() && has_schema_extension(entry.path()) {
                paths.push(entry.into_path());
            }
        }
        paths.sort();

        let locations: Vec<_> = paths.iter().filter_map(|p| location(p)).collect();
        debug!(count = locations.len(), "discovered schema documents");
        Ok(locations)
    }

    #[instrument(skip(self), fields(api = %location.api_name, path = %location.path.display()))]
    fn load(&self, location: &SchemaLocation) -> ForgeResult<SchemaDocument> {
        let path = &location.path;
        let raw = fs::read_to_string(path).map_err(|e| parse_error(path, e))?;

        let root = if is_json(path) {
            serde_json::from_str(&raw).map_err(|e| parse_error(path, e))?
        } else {
            let yaml: YamlValue = serde_yaml::from_str(&raw).map_err(|e| parse_error(path, e))?;
            yaml_to_json(yaml)
        };

        let document = SchemaDocument::from_value(&location.api_name, root)?;
        debug!(
            schemas = document.schemas().map_or(0, Map::len),
            paths = document.paths().map_or(0, Map::len),
            "loaded schema document"
        );
        Ok(document)
    }
}

/// `user-api.yaml` → `user`, `openapi.yaml` → `main`.
pub fn api_name_for(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let name = stem.replace("-api", "");
    if name == "openapi" {
        Some("main".to_owned())
    } else if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

fn location(path: &Path) -> Option<SchemaLocation> {
    let Some(api_name) = api_name_for(path) else {
        warn!(path = %path.display(), "cannot derive an API name, skipping");
        return None;
    };
    Some(SchemaLocation {
        api_name,
        path: path.to_path_buf(),
    })
}

fn has_schema_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| SCHEMA_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

fn parse_error(path: &Path, e: impl std::fmt::Display) -> ApplicationError {
    ApplicationError::SchemaParse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}

/// Convert a YAML tree, stringifying non-string mapping keys such as `200:`.
fn yaml_to_json(value: YamlValue) -> Value {
    match value {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(b) => Value::Bool(b),
        YamlValue::Number(n) => yaml_number(&n),
        YamlValue::String(s) => Value::String(s),
        YamlValue::Sequence(items) => Value::Array(items.into_iter().map(yaml_to_json).collect()),
        YamlValue::Mapping(mapping) => Value::Object(
            mapping
                .into_iter()
                .map(|(k, v)| (yaml_key(k), yaml_to_json(v)))
                .collect(),
        ),
        YamlValue::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

fn yaml_number(n: &serde_yaml::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Number(i.into())
    } else if let Some(u) = n.as_u64() {
        Value::Number(u.into())
    } else {
        n.as_f64()
            .and_then(Number::from_f64)
            .map_or(Value::Null, Value::Number)
    }
}

fn yaml_key(key: YamlValue) -> String {
    match key {
        YamlValue::String(s) => s,
        YamlValue::Number(n) => n.to_string(),
        YamlValue::Bool(b) => b.to_string(),
        YamlValue::Null => "null".to_owned(),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim().to_owned())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use specforge_core::error::ForgeError;
    use tempfile::TempDir;

    const USER_API: &str = r#"
openapi: 3.0.0
components:
  schemas:
    User:
      type: object
      properties:
        id: { type: integer }
paths:
  /users/{id}:
    get:
      operationId: getUser
      responses:
        200:
          description: ok
"#;

    #[test]
    fn api_names_from_file_stems() {
        assert_eq!(api_name_for(Path::new("user-api.yaml")).as_deref(), Some("user"));
        assert_eq!(api_name_for(Path::new("openapi.yml")).as_deref(), Some("main"));
        assert_eq!(api_name_for(Path::new("dir/shop.json")).as_deref(), Some("shop"));
    }

    #[test]
    fn discovers_schema_files_sorted_and_flat() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("product-api.yaml"), USER_API).unwrap();
        fs::write(dir.path().join("auth-api.json"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/deep.yaml"), USER_API).unwrap();

        let found = DirectorySchemaSource::new().discover(dir.path()).unwrap();
        let names: Vec<_> = found.iter().map(|l| l.api_name.as_str()).collect();
        assert_eq!(names, vec!["auth", "product"]);
    }

    #[test]
    fn missing_input_discovers_nothing() {
        let dir = TempDir::new().unwrap();
        let found = DirectorySchemaSource::new()
            .discover(&dir.path().join("absent"))
            .unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn yaml_numeric_keys_become_strings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("user-api.yaml");
        fs::write(&path, USER_API).unwrap();

        let source = DirectorySchemaSource::new();
        let location = source.discover(&path).unwrap().remove(0);
        let doc = source.load(&location).unwrap();

        assert_eq!(doc.api_name(), "user");
        let get = &doc.paths().unwrap()["/users/{id}"]["get"];
        assert!(get["responses"].get("200").is_some());
        assert!(doc.schemas().unwrap().contains_key("User"));
    }

    #[test]
    fn malformed_document_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.yaml");
        fs::write(&path, "paths: [unclosed").unwrap();

        let source = DirectorySchemaSource::new();
        let location = source.discover(&path).unwrap().remove(0);
        let err = source.load(&location).unwrap_err();
        assert!(matches!(
            err,
            ForgeError::Application(ApplicationError::SchemaParse { .. })
        ));
    }
}
