//! Normalized validation rules attached to fields.

use serde::Serialize;
use serde_json::Number;

use crate::domain::value_objects::PatternClass;

/// One validation rule produced from a vendor marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationRule {
    String(StringRule),
    Number(NumberRule),
    Array(ArrayRule),
    Object { required: bool },
    Instant { required: bool },
    Enum { required: bool },
}

impl ValidationRule {
    pub const fn required(&self) -> bool {
        match self {
            Self::String(rule) => rule.required,
            Self::Number(rule) => rule.required,
            Self::Array(rule) => rule.required,
            Self::Object { required } | Self::Instant { required } | Self::Enum { required } => {
                *required
            }
        }
    }

    pub const fn kind(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Number(_) => "number",
            Self::Array(_) => "array",
            Self::Object { .. } => "object",
            Self::Instant { .. } => "instant",
            Self::Enum { .. } => "enum",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StringRule {
    pub required: bool,
    pub pattern_class: PatternClass,
    /// Literal regular expression from the property's `pattern`.
    pub pattern: Option<String>,
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumberRule {
    pub required: bool,
    pub minimum: Option<Number>,
    pub maximum: Option<Number>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayRule {
    pub required: bool,
    pub min_items: Option<u64>,
    pub max_items: Option<u64>,
}
