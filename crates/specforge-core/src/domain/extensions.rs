//! Extension-rule parser: vendor validation markers → [`ValidationRule`]s.
//!
//! Recognized markers, all on property nodes:
//!
//! | Marker               | Rule      | Carries                              |
//! |----------------------|-----------|--------------------------------------|
//! | `x-unitCheckString`  | String    | pattern class, pattern, min/max len  |
//! | `x-unitCheckNumber`  | Number    | minimum, maximum                     |
//! | `x-unitCheckObject`  | Object    | nothing                              |
//! | `x-unitCheckArray`   | Array     | minItems, maxItems                   |
//! | `x-unitCheckInstant` | Instant   | nothing                              |
//! | `x-unitCheckEnum`    | Enum      | nothing                              |
//!
//! A marker value may be `true`, a string token or a mapping (the string
//! marker reads its pattern class from the `value` key). `false` and `null`
//! mean "absent". Anything else is logged and ignored.

use std::collections::BTreeSet;

use serde_json::{Map, Number, Value};
use tracing::warn;

use crate::domain::entities::{ArrayRule, NumberRule, StringRule, ValidationRule};
use crate::domain::value_objects::PatternClass;

pub const STRING_MARKER: &str = "x-unitCheckString";
pub const NUMBER_MARKER: &str = "x-unitCheckNumber";
pub const OBJECT_MARKER: &str = "x-unitCheckObject";
pub const ARRAY_MARKER: &str = "x-unitCheckArray";
pub const INSTANT_MARKER: &str = "x-unitCheckInstant";
pub const ENUM_MARKER: &str = "x-unitCheckEnum";

/// Field names whose rules default to optional regardless of the schema's
/// `required` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirednessPolicy {
    optional_fields: BTreeSet<String>,
}

impl RequirednessPolicy {
    pub fn new<I, S>(optional_fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            optional_fields: optional_fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Effective requiredness of a rule on `field_name`.
    pub fn rule_required(&self, field_name: &str, schema_required: bool) -> bool {
        schema_required && !self.optional_fields.contains(field_name)
    }
}

impl Default for RequirednessPolicy {
    fn default() -> Self {
        Self::new(["nullableValue", "notEmpty"])
    }
}

/// Parse every marker on one property node.
///
/// Returns an empty list when the node carries no marker.
pub fn parse_rules(
    field_name: &str,
    node: &Map<String, Value>,
    schema_required: bool,
    policy: &RequirednessPolicy,
) -> Vec<ValidationRule> {
    let required = policy.rule_required(field_name, schema_required);
    let mut rules = Vec::new();

    if let Some(token) = read_marker(node, STRING_MARKER, field_name) {
        rules.push(ValidationRule::String(StringRule {
            required,
            pattern_class: PatternClass::from_token(token.as_deref().unwrap_or("all")),
            pattern: node.get("pattern").and_then(Value::as_str).map(str::to_owned),
            min_length: node.get("minLength").and_then(Value::as_u64),
            max_length: node.get("maxLength").and_then(Value::as_u64),
        }));
    }

    if read_marker(node, NUMBER_MARKER, field_name).is_some() {
        rules.push(ValidationRule::Number(NumberRule {
            required,
            minimum: number(node, "minimum"),
            maximum: number(node, "maximum"),
        }));
    }

    if read_marker(node, OBJECT_MARKER, field_name).is_some() {
        rules.push(ValidationRule::Object { required });
    }

    if read_marker(node, ARRAY_MARKER, field_name).is_some() {
        rules.push(ValidationRule::Array(ArrayRule {
            required,
            min_items: node.get("minItems").and_then(Value::as_u64),
            max_items: node.get("maxItems").and_then(Value::as_u64),
        }));
    }

    if read_marker(node, INSTANT_MARKER, field_name).is_some() {
        rules.push(ValidationRule::Instant { required });
    }

    if read_marker(node, ENUM_MARKER, field_name).is_some() {
        rules.push(ValidationRule::Enum { required });
    }

    rules
}

/// `None` when the marker is absent; `Some(token)` when present, where the
/// token is the string form (or the mapping's `value`) if any.
fn read_marker(node: &Map<String, Value>, key: &str, field_name: &str) -> Option<Option<String>> {
    match node.get(key)? {
        Value::Null | Value::Bool(false) => None,
        Value::Bool(true) => Some(None),
        Value::String(token) => Some(Some(token.clone())),
        Value::Object(map) => Some(map.get("value").and_then(Value::as_str).map(str::to_owned)),
        other => {
            warn!(
                field = field_name,
                marker = key,
                value = %other,
                "Ignoring malformed validation marker"
            );
            None
        }
    }
}

fn number(node: &Map<String, Value>, key: &str) -> Option<Number> {
    match node.get(key) {
        Some(Value::Number(n)) => Some(n.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test node must be an object"),
        }
    }

    #[test]
    fn no_markers_means_no_rules() {
        let prop = node(json!({
            "type": "string",
            "maxLength": 50,
            "pattern": "^[a-z]+$",
            "x-other": true
        }));
        assert!(parse_rules("name", &prop, true, &RequirednessPolicy::default()).is_empty());
    }

    #[test]
    fn string_marker_with_mapping_value() {
        let prop = node(json!({
            "type": "string",
            "maxLength": 20,
            "x-unitCheckString": { "value": "alphanumericPattern" }
        }));
        let rules = parse_rules("code", &prop, true, &RequirednessPolicy::default());

        assert_eq!(
            rules,
            vec![ValidationRule::String(StringRule {
                required: true,
                pattern_class: PatternClass::Alphanumeric,
                pattern: None,
                min_length: None,
                max_length: Some(20),
            })]
        );
    }

    #[test]
    fn string_marker_true_means_all_class() {
        let prop = node(json!({ "type": "string", "x-unitCheckString": true }));
        let rules = parse_rules("memo", &prop, false, &RequirednessPolicy::default());
        match &rules[0] {
            ValidationRule::String(rule) => {
                assert_eq!(rule.pattern_class, PatternClass::All);
                assert!(!rule.required);
            }
            other => panic!("unexpected rule {other:?}"),
        }
    }

    #[test]
    fn number_and_array_bounds() {
        let number_prop = node(json!({
            "type": "integer", "minimum": 1, "maximum": 99, "x-unitCheckNumber": true
        }));
        let array_prop = node(json!({
            "type": "array", "minItems": 1, "maxItems": 5, "x-unitCheckArray": "yes"
        }));
        let policy = RequirednessPolicy::default();

        match &parse_rules("qty", &number_prop, true, &policy)[0] {
            ValidationRule::Number(rule) => {
                assert_eq!(rule.minimum.as_ref().and_then(Number::as_i64), Some(1));
                assert_eq!(rule.maximum.as_ref().and_then(Number::as_i64), Some(99));
            }
            other => panic!("unexpected rule {other:?}"),
        }
        match &parse_rules("tags", &array_prop, true, &policy)[0] {
            ValidationRule::Array(rule) => {
                assert_eq!((rule.min_items, rule.max_items), (Some(1), Some(5)));
            }
            other => panic!("unexpected rule {other:?}"),
        }
    }

    #[test]
    fn several_marker_kinds_on_one_property() {
        let prop = node(json!({
            "x-unitCheckObject": true,
            "x-unitCheckInstant": true,
            "x-unitCheckEnum": {}
        }));
        let kinds: Vec<_> = parse_rules("x", &prop, true, &RequirednessPolicy::default())
            .iter()
            .map(ValidationRule::kind)
            .collect();
        assert_eq!(kinds, vec!["object", "instant", "enum"]);
    }

    #[test]
    fn exception_names_default_to_optional() {
        let prop = node(json!({ "type": "string", "x-unitCheckString": "all" }));
        let policy = RequirednessPolicy::default();

        assert!(!parse_rules("notEmpty", &prop, true, &policy)[0].required());
        assert!(!parse_rules("nullableValue", &prop, true, &policy)[0].required());
        assert!(parse_rules("title", &prop, true, &policy)[0].required());

        let strict = RequirednessPolicy::new(Vec::<String>::new());
        assert!(parse_rules("notEmpty", &prop, true, &strict)[0].required());
    }

    #[test]
    fn malformed_and_disabled_markers_are_absent() {
        let prop = node(json!({
            "x-unitCheckString": 42,
            "x-unitCheckNumber": false,
            "x-unitCheckArray": null
        }));
        assert!(parse_rules("f", &prop, true, &RequirednessPolicy::default()).is_empty());
    }
}
