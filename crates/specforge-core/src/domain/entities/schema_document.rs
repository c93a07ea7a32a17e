//! A loaded API schema document.

use serde_json::{Map, Value};

use crate::domain::DomainError;

/// One schema document, keyed by its API name.
///
/// Only the two sections the generator reads are kept. Both are optional:
/// a document without `components.schemas` or `paths` is valid and simply
/// yields nothing for that half.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDocument {
    api_name: String,
    schemas: Option<Map<String, Value>>,
    paths: Option<Map<String, Value>>,
}

impl SchemaDocument {
    /// Build from a parsed document root.
    ///
    /// # Errors
    ///
    /// Fails if the root is not a mapping.
    pub fn from_value(api_name: impl Into<String>, root: Value) -> Result<Self, DomainError> {
        let api_name = api_name.into();
        let Value::Object(mut root) = root else {
            return Err(DomainError::DocumentNotAMapping { api_name });
        };

        let schemas = match root.remove("components") {
            Some(Value::Object(mut components)) => match components.remove("schemas") {
                Some(Value::Object(schemas)) => Some(schemas),
                _ => None,
            },
            _ => None,
        };

        let paths = match root.remove("paths") {
            Some(Value::Object(paths)) => Some(paths),
            _ => None,
        };

        Ok(Self {
            api_name,
            schemas,
            paths,
        })
    }

    pub fn api_name(&self) -> &str {
        &self.api_name
    }

    pub fn schemas(&self) -> Option<&Map<String, Value>> {
        self.schemas.as_ref()
    }

    pub fn paths(&self) -> Option<&Map<String, Value>> {
        self.paths.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keeps_schemas_and_paths() {
        let doc = SchemaDocument::from_value(
            "user",
            json!({
                "openapi": "3.0.0",
                "components": { "schemas": { "User": { "type": "object" } } },
                "paths": { "/users": {} }
            }),
        )
        .unwrap();

        assert_eq!(doc.api_name(), "user");
        assert!(doc.schemas().unwrap().contains_key("User"));
        assert!(doc.paths().unwrap().contains_key("/users"));
    }

    #[test]
    fn missing_sections_are_none() {
        let doc = SchemaDocument::from_value("empty", json!({ "openapi": "3.0.0" })).unwrap();
        assert!(doc.schemas().is_none());
        assert!(doc.paths().is_none());
    }

    #[test]
    fn rejects_non_mapping_root() {
        let err = SchemaDocument::from_value("bad", json!(["not", "a", "map"])).unwrap_err();
        assert!(matches!(err, DomainError::DocumentNotAMapping { .. }));
    }
}
