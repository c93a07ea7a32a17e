//! Model and field records produced by the schema walker.

use serde_json::{Number, Value};

use crate::domain::entities::validation::ValidationRule;
use crate::domain::type_mapping::SchemaType;

/// Plain schema keywords copied off a property node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldConstraints {
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub minimum: Option<Number>,
    pub maximum: Option<Number>,
    pub min_items: Option<u64>,
    pub max_items: Option<u64>,
    pub pattern: Option<String>,
    pub default: Option<Value>,
}

/// A property within a model.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRecord {
    pub name: String,
    pub schema_type: SchemaType,
    pub required: bool,
    pub description: Option<String>,
    pub constraints: FieldConstraints,
    pub validation_rules: Vec<ValidationRule>,
}

/// One member of an opted-in enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumMember {
    /// The value as it appears on the wire.
    pub value: String,
    /// The target-language constant name.
    pub identifier: String,
}

/// What a named component turned out to be.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelKind {
    /// An object with properties in document order.
    Object { fields: Vec<FieldRecord> },
    /// A string enum carrying the explicit opt-in marker.
    Enum { members: Vec<EnumMember> },
    /// Any other named schema, e.g. a string enum without the marker.
    Alias { target: SchemaType },
}

/// A named schema component.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRecord {
    pub name: String,
    pub api_name: String,
    pub description: Option<String>,
    pub kind: ModelKind,
}

impl ModelRecord {
    /// Fields in document order; empty for enums and aliases.
    pub fn fields(&self) -> &[FieldRecord] {
        match &self.kind {
            ModelKind::Object { fields } => fields,
            _ => &[],
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldRecord> {
        self.fields().iter().find(|f| f.name == name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    pub const fn is_enum(&self) -> bool {
        matches!(self.kind, ModelKind::Enum { .. })
    }

    pub const fn is_object(&self) -> bool {
        matches!(self.kind, ModelKind::Object { .. })
    }

    /// `(raw_value, identifier)` pairs; empty unless this is an enum.
    pub fn enum_values(&self) -> &[EnumMember] {
        match &self.kind {
            ModelKind::Enum { members } => members,
            _ => &[],
        }
    }
}
