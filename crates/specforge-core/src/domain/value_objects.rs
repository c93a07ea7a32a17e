//! Domain value objects: Format, HttpMethod, ParamLocation, PatternClass,
//! GenerationTarget.
//!
//! These are small closed value types with a canonical string form. Parsing
//! from schema text goes through `parse`/`FromStr`; everything downstream
//! matches on the enum.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Format ───────────────────────────────────────────────────────────────────

/// The `format` qualifier of a schema primitive.
///
/// Unknown formats are kept verbatim in [`Format::Other`] so the type tables
/// can fall through to their default arm.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Format {
    Date,
    DateTime,
    Email,
    Uuid,
    Int32,
    Int64,
    Float,
    Double,
    Other(String),
}

impl Format {
    /// Parse a `format` string. Never fails.
    pub fn parse(s: &str) -> Self {
        match s {
            "date" => Self::Date,
            "date-time" => Self::DateTime,
            "email" => Self::Email,
            "uuid" => Self::Uuid,
            "int32" => Self::Int32,
            "int64" => Self::Int64,
            "float" => Self::Float,
            "double" => Self::Double,
            other => Self::Other(other.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Date => "date",
            Self::DateTime => "date-time",
            Self::Email => "email",
            Self::Uuid => "uuid",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Float => "float",
            Self::Double => "double",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── HttpMethod ───────────────────────────────────────────────────────────────

/// The HTTP verbs the walker keeps. Every other path-item key is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub const ALL: [Self; 5] = [Self::Get, Self::Post, Self::Put, Self::Patch, Self::Delete];

    /// Lower-case form, as used for path-item keys.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Patch => "patch",
            Self::Delete => "delete",
        }
    }

    pub const fn as_upper(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_upper())
    }
}

impl FromStr for HttpMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(Self::Get),
            "post" => Ok(Self::Post),
            "put" => Ok(Self::Put),
            "patch" => Ok(Self::Patch),
            "delete" => Ok(Self::Delete),
            other => Err(DomainError::InvalidValue {
                kind: "http method",
                value: other.to_owned(),
            }),
        }
    }
}

// ── ParamLocation ────────────────────────────────────────────────────────────

/// The `in` discriminator of an operation parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamLocation {
    Path,
    Query,
    Header,
    Cookie,
}

impl ParamLocation {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Query => "query",
            Self::Header => "header",
            Self::Cookie => "cookie",
        }
    }
}

impl FromStr for ParamLocation {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "path" => Ok(Self::Path),
            "query" => Ok(Self::Query),
            "header" => Ok(Self::Header),
            "cookie" => Ok(Self::Cookie),
            other => Err(DomainError::InvalidValue {
                kind: "parameter location",
                value: other.to_owned(),
            }),
        }
    }
}

// ── PatternClass ─────────────────────────────────────────────────────────────

/// Named character class attached by the string-check marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PatternClass {
    /// JIS X 0213 characters plus ASCII letters, digits and symbols.
    JisX0213WithAlphanumericSymbol,
    Alphanumeric,
    /// No character restriction.
    All,
    /// Any other token, carried upper-cased.
    Custom(String),
}

impl PatternClass {
    /// Resolve a marker token. Never fails: unknown tokens become `Custom`.
    pub fn from_token(token: &str) -> Self {
        match token {
            "jisX0213withAlphaNumericSymbol" => Self::JisX0213WithAlphanumericSymbol,
            "alphanumericPattern" => Self::Alphanumeric,
            "all" => Self::All,
            other => Self::Custom(other.to_uppercase()),
        }
    }

    /// The identifier the server-side validator library knows this class by.
    pub fn identifier(&self) -> String {
        match self {
            Self::JisX0213WithAlphanumericSymbol => "JIS_X0213_WITH_ALPHANUMERIC_SYMBOL".into(),
            Self::Alphanumeric => "ALPHANUMERIC_PATTERN".into(),
            Self::All => "ALL_STRING_VALIDATION".into(),
            Self::Custom(token) => format!("CUSTOM_{token}"),
        }
    }
}

impl Serialize for PatternClass {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.identifier())
    }
}

// ── GenerationTarget ─────────────────────────────────────────────────────────

/// One family of output artifacts.
///
/// Targets always run in declaration order: the DDL target reads the table
/// file the CSV target writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationTarget {
    Csv,
    Ddl,
    Server,
    Client,
    Enums,
}

impl GenerationTarget {
    pub const ALL: [Self; 5] = [Self::Csv, Self::Ddl, Self::Server, Self::Client, Self::Enums];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Ddl => "ddl",
            Self::Server => "server",
            Self::Client => "client",
            Self::Enums => "enums",
        }
    }
}

impl fmt::Display for GenerationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenerationTarget {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" | "tables" => Ok(Self::Csv),
            "ddl" | "sql" => Ok(Self::Ddl),
            "server" | "spring" => Ok(Self::Server),
            "client" | "angular" => Ok(Self::Client),
            "enums" | "enum" | "java-enum" => Ok(Self::Enums),
            other => Err(DomainError::InvalidValue {
                kind: "target",
                value: other.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_parse_keeps_unknown_tokens() {
        assert_eq!(Format::parse("date-time"), Format::DateTime);
        assert_eq!(Format::parse("binary"), Format::Other("binary".into()));
        assert_eq!(Format::parse("binary").as_str(), "binary");
    }

    #[test]
    fn http_method_parses_case_insensitively() {
        assert_eq!("GET".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert_eq!("patch".parse::<HttpMethod>().unwrap(), HttpMethod::Patch);
        assert!("options".parse::<HttpMethod>().is_err());
    }

    #[test]
    fn pattern_class_tokens_resolve() {
        assert_eq!(
            PatternClass::from_token("jisX0213withAlphaNumericSymbol").identifier(),
            "JIS_X0213_WITH_ALPHANUMERIC_SYMBOL"
        );
        assert_eq!(
            PatternClass::from_token("alphanumericPattern").identifier(),
            "ALPHANUMERIC_PATTERN"
        );
        assert_eq!(PatternClass::from_token("all"), PatternClass::All);
        assert_eq!(
            PatternClass::from_token("katakana").identifier(),
            "CUSTOM_KATAKANA"
        );
    }

    #[test]
    fn generation_target_accepts_legacy_names() {
        assert_eq!(
            "spring".parse::<GenerationTarget>().unwrap(),
            GenerationTarget::Server
        );
        assert_eq!(
            "java-enum".parse::<GenerationTarget>().unwrap(),
            GenerationTarget::Enums
        );
        assert!("cobol".parse::<GenerationTarget>().is_err());
    }
}
