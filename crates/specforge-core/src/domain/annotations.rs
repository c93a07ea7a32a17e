//! Projection of validation rules onto target annotations and validators.
//!
//! Server side, rules become custom `@UnitCheck*` annotations; fields without
//! rules fall back to standard bean-validation annotations. Client side,
//! rules become Angular form validators.

use serde_json::Number;

use crate::domain::entities::{FieldRecord, ValidationRule};
use crate::domain::type_mapping::SchemaType;
use crate::domain::value_objects::{Format, PatternClass};

const BEAN_VALIDATION_PACKAGE: &str = "jakarta.validation.constraints";

// ── Server annotations ───────────────────────────────────────────────────────

/// One annotation parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationValue {
    Bool(bool),
    Number(Number),
    /// Rendered as a quoted Java string literal.
    Text(String),
    /// Rendered verbatim, e.g. an enum constant reference.
    Symbol(String),
}

impl AnnotationValue {
    fn render(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => n.to_string(),
            Self::Text(s) => format!("\"{}\"", escape_java(s)),
            Self::Symbol(s) => s.clone(),
        }
    }
}

/// A Java annotation with ordered parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub name: String,
    pub parameters: Vec<(String, AnnotationValue)>,
    /// Fully qualified import the annotation needs.
    pub import: String,
}

impl Annotation {
    fn new(name: &str, package: &str) -> Self {
        Self {
            name: name.to_owned(),
            parameters: Vec::new(),
            import: format!("{package}.{name}"),
        }
    }

    fn with(mut self, key: &str, value: AnnotationValue) -> Self {
        self.parameters.push((key.to_owned(), value));
        self
    }

    fn with_opt(self, key: &str, value: Option<AnnotationValue>) -> Self {
        match value {
            Some(value) => self.with(key, value),
            None => self,
        }
    }

    /// Render as Java source.
    ///
    /// No parameters gives `@Name`, one gives `@Name(key = value)`, more put
    /// each parameter on its own line at a 12-space indent with the closing
    /// parenthesis at 8 spaces, matching a field declared at 4.
    pub fn render(&self) -> String {
        match self.parameters.as_slice() {
            [] => format!("@{}", self.name),
            [(key, value)] => format!("@{}({} = {})", self.name, key, value.render()),
            params => {
                let body = params
                    .iter()
                    .map(|(key, value)| format!("            {} = {}", key, value.render()))
                    .collect::<Vec<_>>()
                    .join(",\n");
                format!("@{}(\n{}\n        )", self.name, body)
            }
        }
    }
}

/// Custom annotations for a field's rules, in rule order.
pub fn to_server_annotations(rules: &[ValidationRule], validation_package: &str) -> Vec<Annotation> {
    rules
        .iter()
        .map(|rule| {
            let optional = (!rule.required()).then_some(AnnotationValue::Bool(false));
            match rule {
                ValidationRule::String(r) => Annotation::new("UnitCheckString", validation_package)
                    .with_opt("isRequired", optional)
                    .with(
                        "pattern",
                        AnnotationValue::Symbol(format!(
                            "UnitCheckString.Type.{}",
                            r.pattern_class.identifier()
                        )),
                    )
                    .with_opt("maxLength", r.max_length.map(u64_value)),
                ValidationRule::Number(r) => Annotation::new("UnitCheckNumber", validation_package)
                    .with_opt("isRequired", optional)
                    .with_opt("minLength", r.minimum.clone().map(AnnotationValue::Number))
                    .with_opt("maxLength", r.maximum.clone().map(AnnotationValue::Number)),
                ValidationRule::Array(r) => Annotation::new("UnitCheckArray", validation_package)
                    .with_opt("isRequired", optional)
                    .with_opt("minLength", r.min_items.map(u64_value))
                    .with_opt("maxLength", r.max_items.map(u64_value)),
                ValidationRule::Object { .. } => {
                    Annotation::new("UnitCheckObject", validation_package)
                }
                ValidationRule::Instant { .. } => {
                    Annotation::new("UnitCheckInstant", validation_package)
                }
                ValidationRule::Enum { .. } => Annotation::new("UnitCheckEnum", validation_package),
            }
        })
        .collect()
}

/// Standard bean-validation annotations derived from plain schema keywords.
pub fn standard_annotations(field: &FieldRecord) -> Vec<Annotation> {
    let c = &field.constraints;
    let mut out = Vec::new();

    if field.required {
        out.push(Annotation::new("NotNull", BEAN_VALIDATION_PACKAGE));
    }

    match &field.schema_type {
        SchemaType::String(format) => {
            if format.as_ref() == Some(&Format::Email) {
                out.push(Annotation::new("Email", BEAN_VALIDATION_PACKAGE));
            }
            if c.min_length.is_some() || c.max_length.is_some() {
                out.push(
                    Annotation::new("Size", BEAN_VALIDATION_PACKAGE)
                        .with_opt("min", c.min_length.map(u64_value))
                        .with_opt("max", c.max_length.map(u64_value)),
                );
            }
            if let Some(pattern) = &c.pattern {
                out.push(
                    Annotation::new("Pattern", BEAN_VALIDATION_PACKAGE)
                        .with("regexp", AnnotationValue::Text(pattern.clone())),
                );
            }
        }
        SchemaType::Integer(_) | SchemaType::Number(_) => {
            if let Some(min) = &c.minimum {
                out.push(bound("Min", "DecimalMin", min));
            }
            if let Some(max) = &c.maximum {
                out.push(bound("Max", "DecimalMax", max));
            }
        }
        SchemaType::Array(_) => {
            if c.min_items.is_some() || c.max_items.is_some() {
                out.push(
                    Annotation::new("Size", BEAN_VALIDATION_PACKAGE)
                        .with_opt("min", c.min_items.map(u64_value))
                        .with_opt("max", c.max_items.map(u64_value)),
                );
            }
        }
        _ => {}
    }

    out
}

fn bound(integral: &str, decimal: &str, value: &Number) -> Annotation {
    if value.is_i64() || value.is_u64() {
        Annotation::new(integral, BEAN_VALIDATION_PACKAGE)
            .with("value", AnnotationValue::Number(value.clone()))
    } else {
        Annotation::new(decimal, BEAN_VALIDATION_PACKAGE)
            .with("value", AnnotationValue::Text(value.to_string()))
    }
}

fn u64_value(n: u64) -> AnnotationValue {
    AnnotationValue::Number(Number::from(n))
}

fn escape_java(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

// ── Client validators ────────────────────────────────────────────────────────

/// Where a client validator comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatorSource {
    /// `Validators` from `@angular/forms`.
    Angular,
    /// The project's own `CustomValidators`.
    Custom,
}

/// One Angular form validator expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientValidator {
    pub expression: String,
    pub source: ValidatorSource,
}

impl ClientValidator {
    fn angular(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            source: ValidatorSource::Angular,
        }
    }

    fn custom(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            source: ValidatorSource::Custom,
        }
    }
}

/// Angular validators for a field's rules.
pub fn to_client_validators(rules: &[ValidationRule]) -> Vec<ClientValidator> {
    let mut out = Vec::new();

    for rule in rules {
        match rule {
            ValidationRule::String(r) => {
                if r.required {
                    out.push(ClientValidator::angular("Validators.required"));
                }
                if let Some(min) = r.min_length {
                    out.push(ClientValidator::angular(format!("Validators.minLength({min})")));
                }
                if let Some(max) = r.max_length {
                    out.push(ClientValidator::angular(format!("Validators.maxLength({max})")));
                }
                if let Some(pattern) = &r.pattern {
                    out.push(ClientValidator::angular(format!(
                        "Validators.pattern(/{}/)",
                        pattern.replace('/', "\\/")
                    )));
                }
                if r.pattern_class != PatternClass::All {
                    let name = r.pattern_class.identifier().to_lowercase().replace('_', "");
                    out.push(ClientValidator::custom(format!("CustomValidators.{name}")));
                }
            }
            ValidationRule::Number(r) => {
                if r.required {
                    out.push(ClientValidator::angular("Validators.required"));
                }
                if let Some(min) = &r.minimum {
                    out.push(ClientValidator::angular(format!("Validators.min({min})")));
                }
                if let Some(max) = &r.maximum {
                    out.push(ClientValidator::angular(format!("Validators.max({max})")));
                }
            }
            ValidationRule::Array(r) => {
                if r.required {
                    out.push(ClientValidator::angular("Validators.required"));
                }
                let bounds: Vec<String> = [("min", r.min_items), ("max", r.max_items)]
                    .into_iter()
                    .filter_map(|(k, v)| v.map(|v| format!("{k}: {v}")))
                    .collect();
                if !bounds.is_empty() {
                    out.push(ClientValidator::custom(format!(
                        "CustomValidators.arraySize({{ {} }})",
                        bounds.join(", ")
                    )));
                }
            }
            ValidationRule::Object { .. }
            | ValidationRule::Instant { .. }
            | ValidationRule::Enum { .. } => {}
        }
    }

    out.dedup();
    out
}
