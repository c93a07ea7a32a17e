//! Type-mapping tables: schema types to SQL, server (Java) and client
//! (TypeScript) type tokens.
//!
//! Each table is a total function over [`SchemaType`]; formats that a table
//! does not know fall through to the primitive's default.

use std::collections::BTreeSet;
use std::fmt;

use crate::domain::value_objects::Format;

/// Default `VARCHAR` width when a string has no `maxLength`.
pub const DEFAULT_VARCHAR_LENGTH: u64 = 255;

// ── SchemaType ───────────────────────────────────────────────────────────────

/// The closed set of shapes a schema node can take.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SchemaType {
    String(Option<Format>),
    Integer(Option<Format>),
    Number(Option<Format>),
    Boolean,
    Array(Box<SchemaType>),
    Object,
    /// A `$ref`, holding the referenced component name.
    Reference(String),
    /// No usable `type`, `$ref` or structural hint.
    Unspecified,
}

impl SchemaType {
    /// The primitive name, as written in schema documents.
    pub const fn primitive_name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Integer(_) => "integer",
            Self::Number(_) => "number",
            Self::Boolean => "boolean",
            Self::Array(_) => "array",
            Self::Object => "object",
            Self::Reference(_) => "reference",
            Self::Unspecified => "unspecified",
        }
    }

    pub fn format(&self) -> Option<&Format> {
        match self {
            Self::String(f) | Self::Integer(f) | Self::Number(f) => f.as_ref(),
            _ => None,
        }
    }

    /// The component this type points at, looking through arrays.
    pub fn referenced_model(&self) -> Option<&str> {
        match self {
            Self::Reference(name) => Some(name),
            Self::Array(items) => items.referenced_model(),
            _ => None,
        }
    }

    pub const fn is_integer(&self) -> bool {
        matches!(self, Self::Integer(_))
    }

    /// Rewrite every reference with `f`, looking through arrays.
    pub fn map_references(&self, f: &impl Fn(&str) -> SchemaType) -> SchemaType {
        match self {
            Self::Reference(name) => f(name),
            Self::Array(items) => Self::Array(Box::new(items.map_references(f))),
            other => other.clone(),
        }
    }
}

// ── SQL ──────────────────────────────────────────────────────────────────────

/// A PostgreSQL column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    Varchar(u64),
    Uuid,
    TimestampTz,
    Date,
    Integer,
    BigInt,
    /// Auto-incrementing integer key; renders with its `PRIMARY KEY` clause.
    Serial,
    Decimal,
    Boolean,
    Jsonb,
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Varchar(n) => write!(f, "VARCHAR({n})"),
            Self::Uuid => f.write_str("UUID"),
            Self::TimestampTz => f.write_str("TIMESTAMP WITH TIME ZONE"),
            Self::Date => f.write_str("DATE"),
            Self::Integer => f.write_str("INTEGER"),
            Self::BigInt => f.write_str("BIGINT"),
            Self::Serial => f.write_str("SERIAL PRIMARY KEY"),
            Self::Decimal => f.write_str("DECIMAL"),
            Self::Boolean => f.write_str("BOOLEAN"),
            Self::Jsonb => f.write_str("JSONB"),
        }
    }
}

/// Map a schema type to a column type.
///
/// `max_length` is the string's `maxLength`; `primary_key` turns an integer
/// into `SERIAL`.
pub fn sql_type(ty: &SchemaType, max_length: Option<u64>, primary_key: bool) -> SqlType {
    match ty {
        SchemaType::String(format) => match format {
            Some(Format::Uuid) => SqlType::Uuid,
            Some(Format::DateTime) => SqlType::TimestampTz,
            Some(Format::Date) => SqlType::Date,
            Some(Format::Email) => SqlType::Varchar(DEFAULT_VARCHAR_LENGTH),
            _ => SqlType::Varchar(max_length.unwrap_or(DEFAULT_VARCHAR_LENGTH)),
        },
        SchemaType::Integer(_) if primary_key => SqlType::Serial,
        SchemaType::Integer(Some(Format::Int64)) => SqlType::BigInt,
        SchemaType::Integer(_) => SqlType::Integer,
        SchemaType::Number(_) => SqlType::Decimal,
        SchemaType::Boolean => SqlType::Boolean,
        SchemaType::Array(_) | SchemaType::Object => SqlType::Jsonb,
        SchemaType::Reference(_) | SchemaType::Unspecified => {
            SqlType::Varchar(DEFAULT_VARCHAR_LENGTH)
        }
    }
}

// ── Server (Java) ────────────────────────────────────────────────────────────

/// A Java type expression plus the imports it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaType {
    pub name: String,
    pub imports: BTreeSet<String>,
}

impl JavaType {
    fn simple(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            imports: BTreeSet::new(),
        }
    }

    fn imported(name: &str, import: &str) -> Self {
        Self {
            name: name.to_owned(),
            imports: BTreeSet::from([import.to_owned()]),
        }
    }
}

/// Map a schema type to a Java type.
///
/// References map to the referenced name verbatim; callers resolve
/// component names to class names before calling this.
pub fn server_type(ty: &SchemaType) -> JavaType {
    match ty {
        SchemaType::String(format) => match format {
            Some(Format::DateTime) => JavaType::imported("Instant", "java.time.Instant"),
            Some(Format::Date) => JavaType::imported("LocalDate", "java.time.LocalDate"),
            Some(Format::Uuid) => JavaType::imported("UUID", "java.util.UUID"),
            _ => JavaType::simple("String"),
        },
        SchemaType::Integer(Some(Format::Int64)) => JavaType::simple("Long"),
        SchemaType::Integer(_) => JavaType::simple("Integer"),
        SchemaType::Number(Some(Format::Double)) => JavaType::simple("Double"),
        SchemaType::Number(Some(Format::Float)) => JavaType::simple("Float"),
        SchemaType::Number(_) => JavaType::imported("BigDecimal", "java.math.BigDecimal"),
        SchemaType::Boolean => JavaType::simple("Boolean"),
        SchemaType::Array(items) => {
            let inner = server_type(items);
            let mut imports = inner.imports;
            imports.insert("java.util.List".to_owned());
            JavaType {
                name: format!("List<{}>", inner.name),
                imports,
            }
        }
        SchemaType::Object => JavaType::simple("Object"),
        SchemaType::Reference(name) => JavaType::simple(name),
        SchemaType::Unspecified => JavaType::simple("String"),
    }
}

// ── Client (TypeScript) ──────────────────────────────────────────────────────

/// Map a schema type to a TypeScript type.
pub fn client_type(ty: &SchemaType) -> String {
    match ty {
        SchemaType::String(Some(Format::Date | Format::DateTime)) => "Date".to_owned(),
        SchemaType::String(_) => "string".to_owned(),
        SchemaType::Integer(_) | SchemaType::Number(_) => "number".to_owned(),
        SchemaType::Boolean => "boolean".to_owned(),
        SchemaType::Array(items) => format!("{}[]", client_type(items)),
        SchemaType::Object | SchemaType::Unspecified => "any".to_owned(),
        SchemaType::Reference(name) => name.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn string(format: Option<Format>) -> SchemaType {
        SchemaType::String(format)
    }

    #[test]
    fn sql_strings_use_max_length_or_default() {
        assert_eq!(sql_type(&string(None), Some(50), false).to_string(), "VARCHAR(50)");
        assert_eq!(sql_type(&string(None), None, false).to_string(), "VARCHAR(255)");
        assert_eq!(
            sql_type(&string(Some(Format::Email)), Some(80), false).to_string(),
            "VARCHAR(255)"
        );
        assert_eq!(sql_type(&string(Some(Format::Uuid)), None, false), SqlType::Uuid);
        assert_eq!(
            sql_type(&string(Some(Format::DateTime)), None, false).to_string(),
            "TIMESTAMP WITH TIME ZONE"
        );
    }

    #[test]
    fn sql_integer_primary_key_is_serial() {
        let int = SchemaType::Integer(None);
        assert_eq!(sql_type(&int, None, true).to_string(), "SERIAL PRIMARY KEY");
        assert_eq!(sql_type(&int, None, false), SqlType::Integer);
        assert_eq!(
            sql_type(&SchemaType::Integer(Some(Format::Int64)), None, false),
            SqlType::BigInt
        );
    }

    #[test]
    fn sql_structured_types_are_jsonb() {
        let list = SchemaType::Array(Box::new(SchemaType::Boolean));
        assert_eq!(sql_type(&list, None, false), SqlType::Jsonb);
        assert_eq!(sql_type(&SchemaType::Object, None, false), SqlType::Jsonb);
        assert_eq!(sql_type(&SchemaType::Number(None), None, false), SqlType::Decimal);
    }

    #[test]
    fn server_types_carry_imports() {
        let instant = server_type(&string(Some(Format::DateTime)));
        assert_eq!(instant.name, "Instant");
        assert!(instant.imports.contains("java.time.Instant"));

        let list = server_type(&SchemaType::Array(Box::new(string(Some(Format::Uuid)))));
        assert_eq!(list.name, "List<UUID>");
        assert!(list.imports.contains("java.util.List"));
        assert!(list.imports.contains("java.util.UUID"));
    }

    #[test]
    fn server_numeric_formats() {
        assert_eq!(server_type(&SchemaType::Integer(Some(Format::Int64))).name, "Long");
        assert_eq!(server_type(&SchemaType::Integer(None)).name, "Integer");
        assert_eq!(server_type(&SchemaType::Number(Some(Format::Double))).name, "Double");
        assert_eq!(server_type(&SchemaType::Number(None)).name, "BigDecimal");
    }

    #[test]
    fn client_types() {
        assert_eq!(client_type(&string(Some(Format::Date))), "Date");
        assert_eq!(client_type(&SchemaType::Integer(None)), "number");
        assert_eq!(client_type(&SchemaType::Object), "any");
        assert_eq!(
            client_type(&SchemaType::Array(Box::new(SchemaType::Reference("User".into())))),
            "User[]"
        );
    }

    #[test]
    fn map_references_looks_through_arrays() {
        let ty = SchemaType::Array(Box::new(SchemaType::Reference("Status".into())));
        let mapped = ty.map_references(&|_| SchemaType::String(None));
        assert_eq!(mapped, SchemaType::Array(Box::new(SchemaType::String(None))));
        assert_eq!(ty.referenced_model(), Some("Status"));
    }
}
