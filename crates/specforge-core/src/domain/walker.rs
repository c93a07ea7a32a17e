//! Schema walker: one [`SchemaDocument`] → models and endpoints.
//!
//! Walking never fails as a whole. A component or operation that cannot be
//! normalized is logged and left out, and a document without
//! `components.schemas` or `paths` yields an empty half.

use std::collections::BTreeSet;

use serde_json::{Map, Value};
use tracing::{debug, info, instrument, warn};

use crate::domain::DomainError;
use crate::domain::entities::{
    EndpointRecord, EnumMember, ErrorResponse, FieldConstraints, FieldRecord, ModelKind,
    ModelRecord, ParameterRecord, RequestBody, SchemaDocument,
};
use crate::domain::extensions::{self, RequirednessPolicy};
use crate::domain::naming;
use crate::domain::type_mapping::SchemaType;
use crate::domain::value_objects::{Format, HttpMethod, ParamLocation};

/// Opt-in marker that turns a string enum into a target-language enum.
pub const ENUM_OPT_IN_MARKER: &str = "x-makeEnumJava";

/// Optional side table `{Identifier: value}` naming enum members.
pub const ENUM_MEMBERS_MARKER: &str = "x-enumMembers";

/// Everything the walker extracted from one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WalkOutput {
    pub api_name: String,
    /// Components in document order.
    pub models: Vec<ModelRecord>,
    /// Operations in document order.
    pub endpoints: Vec<EndpointRecord>,
}

impl WalkOutput {
    pub fn model(&self, name: &str) -> Option<&ModelRecord> {
        self.models.iter().find(|m| m.name == name)
    }

    pub fn endpoint(&self, key: &str) -> Option<&EndpointRecord> {
        self.endpoints.iter().find(|e| e.key() == key)
    }
}

/// Walks schema documents.
pub struct SchemaWalker<'a> {
    policy: &'a RequirednessPolicy,
}

impl<'a> SchemaWalker<'a> {
    pub fn new(policy: &'a RequirednessPolicy) -> Self {
        Self { policy }
    }

    #[instrument(skip_all, fields(api = document.api_name()))]
    pub fn walk(&self, document: &SchemaDocument) -> WalkOutput {
        let api_name = document.api_name();

        let models = match document.schemas() {
            Some(schemas) => schemas
                .iter()
                .filter_map(|(name, node)| match self.walk_model(api_name, name, node) {
                    Ok(model) => Some(model),
                    Err(e) => {
                        warn!(schema = %name, error = %e, "Skipping schema");
                        None
                    }
                })
                .collect(),
            None => {
                warn!("Document has no components.schemas");
                Vec::new()
            }
        };

        let endpoints = match document.paths() {
            Some(paths) => self.walk_paths(api_name, paths),
            None => {
                warn!("Document has no paths");
                Vec::new()
            }
        };

        info!(
            models = models.len(),
            endpoints = endpoints.len(),
            "Walked schema document"
        );

        WalkOutput {
            api_name: api_name.to_owned(),
            models,
            endpoints,
        }
    }

    // -------------------------------------------------------------------------
    // Components
    // -------------------------------------------------------------------------

    fn walk_model(&self, api_name: &str, name: &str, node: &Value) -> Result<ModelRecord, DomainError> {
        let map = node.as_object().ok_or_else(|| DomainError::MalformedSchema {
            name: name.to_owned(),
            reason: "not a mapping".into(),
        })?;

        let kind = if is_opted_in_enum(map) {
            ModelKind::Enum {
                members: enum_members(name, map)?,
            }
        } else {
            match parse_schema_type(node) {
                SchemaType::Object => ModelKind::Object {
                    fields: self.walk_fields(name, map)?,
                },
                target => ModelKind::Alias { target },
            }
        };

        Ok(ModelRecord {
            name: name.to_owned(),
            api_name: api_name.to_owned(),
            description: string(map, "description"),
            kind,
        })
    }

    fn walk_fields(&self, model: &str, map: &Map<String, Value>) -> Result<Vec<FieldRecord>, DomainError> {
        let properties = match map.get("properties") {
            None => return Ok(Vec::new()),
            Some(Value::Object(props)) => props,
            Some(_) => {
                return Err(DomainError::MalformedSchema {
                    name: model.to_owned(),
                    reason: "properties is not a mapping".into(),
                });
            }
        };

        let required: BTreeSet<&str> = map
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        let mut fields = Vec::with_capacity(properties.len());
        for (field_name, prop) in properties {
            let Some(prop_map) = prop.as_object() else {
                warn!(model, field = %field_name, "Skipping property that is not a mapping");
                continue;
            };

            let schema_required = required.contains(field_name.as_str());
            fields.push(FieldRecord {
                name: field_name.clone(),
                schema_type: parse_schema_type(prop),
                required: schema_required,
                description: string(prop_map, "description"),
                constraints: constraints(prop_map),
                validation_rules: extensions::parse_rules(
                    field_name,
                    prop_map,
                    schema_required,
                    self.policy,
                ),
            });
        }

        Ok(fields)
    }

    // -------------------------------------------------------------------------
    // Paths
    // -------------------------------------------------------------------------

    fn walk_paths(&self, api_name: &str, paths: &Map<String, Value>) -> Vec<EndpointRecord> {
        let mut endpoints = Vec::new();

        for (path, item) in paths {
            let Some(item) = item.as_object() else {
                warn!(path = %path, "Skipping path item that is not a mapping");
                continue;
            };

            for (key, operation) in item {
                let Ok(method) = key.parse::<HttpMethod>() else {
                    debug!(path = %path, key = %key, "Ignoring non-verb path item key");
                    continue;
                };

                match self.walk_operation(api_name, path, method, operation) {
                    Ok(endpoint) => endpoints.push(endpoint),
                    Err(e) => warn!(path = %path, method = %method, error = %e, "Skipping operation"),
                }
            }
        }

        endpoints
    }

    fn walk_operation(
        &self,
        api_name: &str,
        path: &str,
        method: HttpMethod,
        node: &Value,
    ) -> Result<EndpointRecord, DomainError> {
        let op = node.as_object().ok_or_else(|| DomainError::MalformedOperation {
            method: method.to_string(),
            path: path.to_owned(),
            reason: "not a mapping".into(),
        })?;

        let operation_id =
            string(op, "operationId").unwrap_or_else(|| naming::default_operation_id(method, path));

        let (mut path_params, query_params) = parameters(&operation_id, op);
        for placeholder in placeholders(path) {
            if !path_params.iter().any(|p| p.name == placeholder) {
                debug!(path, param = %placeholder, "Adding undeclared path parameter");
                path_params.push(ParameterRecord {
                    name: placeholder,
                    location: ParamLocation::Path,
                    schema_type: SchemaType::String(None),
                    required: true,
                    description: None,
                });
            }
        }

        let responses = op.get("responses").and_then(Value::as_object);
        let success_status = responses
            .and_then(|r| ["200", "201", "202", "204"].into_iter().find(|c| r.contains_key(*c)))
            .and_then(|c| c.parse().ok())
            .unwrap_or(200);

        Ok(EndpointRecord {
            api_name: api_name.to_owned(),
            method,
            path: path.to_owned(),
            summary: string(op, "summary"),
            description: string(op, "description"),
            tags: op
                .get("tags")
                .and_then(Value::as_array)
                .map(|tags| tags.iter().filter_map(Value::as_str).map(str::to_owned).collect())
                .unwrap_or_default(),
            request: request_body(&operation_id, op),
            response: responses.and_then(success_schema),
            success_status,
            error_responses: responses.map(error_responses).unwrap_or_default(),
            path_params,
            query_params,
            operation_id,
        })
    }
}

// ── Schema type parsing ──────────────────────────────────────────────────────

/// Classify one schema node.
///
/// A `$ref` wins; a composition with exactly one non-null member is looked
/// through; OpenAPI 3.1 type arrays use their first non-null entry.
pub fn parse_schema_type(node: &Value) -> SchemaType {
    let Some(map) = node.as_object() else {
        return SchemaType::Unspecified;
    };

    if let Some(reference) = map.get("$ref").and_then(Value::as_str) {
        return SchemaType::Reference(ref_name(reference));
    }

    for key in ["allOf", "oneOf", "anyOf"] {
        if let Some(members) = map.get(key).and_then(Value::as_array) {
            let non_null: Vec<&Value> = members
                .iter()
                .filter(|m| m.get("type").and_then(Value::as_str) != Some("null"))
                .collect();
            if let [single] = non_null.as_slice() {
                return parse_schema_type(single);
            }
        }
    }

    let format = map.get("format").and_then(Value::as_str).map(Format::parse);
    let ty = match map.get("type") {
        Some(Value::String(s)) => Some(s.as_str()),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .find(|t| *t != "null"),
        _ => None,
    };

    match ty {
        Some("string") => SchemaType::String(format),
        Some("integer") => SchemaType::Integer(format),
        Some("number") => SchemaType::Number(format),
        Some("boolean") => SchemaType::Boolean,
        Some("array") => SchemaType::Array(Box::new(
            map.get("items").map(parse_schema_type).unwrap_or(SchemaType::Unspecified),
        )),
        Some("object") => SchemaType::Object,
        None if map.contains_key("properties") => SchemaType::Object,
        None if map.contains_key("items") => SchemaType::Array(Box::new(
            map.get("items").map(parse_schema_type).unwrap_or(SchemaType::Unspecified),
        )),
        _ => SchemaType::Unspecified,
    }
}

/// `#/components/schemas/User` → `User`.
pub fn ref_name(reference: &str) -> String {
    reference.rsplit('/').next().unwrap_or(reference).to_owned()
}

// ── Components helpers ───────────────────────────────────────────────────────

fn is_opted_in_enum(map: &Map<String, Value>) -> bool {
    map.get("type").and_then(Value::as_str) == Some("string")
        && map.get("enum").is_some_and(Value::is_array)
        && map.get(ENUM_OPT_IN_MARKER) == Some(&Value::Bool(true))
}

fn enum_members(name: &str, map: &Map<String, Value>) -> Result<Vec<EnumMember>, DomainError> {
    let values = map
        .get("enum")
        .and_then(Value::as_array)
        .ok_or_else(|| DomainError::MalformedSchema {
            name: name.to_owned(),
            reason: "enum is not a list".into(),
        })?;
    let side_table = map.get(ENUM_MEMBERS_MARKER).and_then(Value::as_object);

    let mut used = BTreeSet::new();
    let mut members = Vec::with_capacity(values.len());

    for value in values {
        let Some(raw) = scalar_text(value) else {
            warn!(schema = name, "Skipping non-scalar enum value");
            continue;
        };

        let base = side_table
            .and_then(|table| {
                table
                    .iter()
                    .find(|(_, v)| scalar_text(v).as_deref() == Some(raw.as_str()))
                    .map(|(ident, _)| ident.clone())
            })
            .unwrap_or_else(|| naming::constant_name(&raw));

        let mut identifier = base.clone();
        let mut n = 2;
        while !used.insert(identifier.clone()) {
            identifier = format!("{base}_{n}");
            n += 1;
        }

        members.push(EnumMember {
            value: raw,
            identifier,
        });
    }

    Ok(members)
}

fn constraints(map: &Map<String, Value>) -> FieldConstraints {
    let number = |key: &str| match map.get(key) {
        Some(Value::Number(n)) => Some(n.clone()),
        _ => None,
    };

    FieldConstraints {
        min_length: map.get("minLength").and_then(Value::as_u64),
        max_length: map.get("maxLength").and_then(Value::as_u64),
        minimum: number("minimum"),
        maximum: number("maximum"),
        min_items: map.get("minItems").and_then(Value::as_u64),
        max_items: map.get("maxItems").and_then(Value::as_u64),
        pattern: string(map, "pattern"),
        default: map.get("default").filter(|v| !v.is_null()).cloned(),
    }
}

// ── Operation helpers ────────────────────────────────────────────────────────

fn parameters(operation_id: &str, op: &Map<String, Value>) -> (Vec<ParameterRecord>, Vec<ParameterRecord>) {
    let mut path_params = Vec::new();
    let mut query_params = Vec::new();

    let Some(items) = op.get("parameters").and_then(Value::as_array) else {
        return (path_params, query_params);
    };

    for item in items {
        match parameter(operation_id, item) {
            Ok(param) => match param.location {
                ParamLocation::Path => path_params.push(param),
                ParamLocation::Query => query_params.push(param),
                ParamLocation::Header | ParamLocation::Cookie => {
                    debug!(operation_id, param = %param.name, "Ignoring header/cookie parameter");
                }
            },
            Err(e) => warn!(operation_id, error = %e, "Skipping parameter"),
        }
    }

    (path_params, query_params)
}

fn parameter(operation_id: &str, item: &Value) -> Result<ParameterRecord, DomainError> {
    let malformed = |reason: &str| DomainError::MalformedParameter {
        operation: operation_id.to_owned(),
        reason: reason.to_owned(),
    };

    let map = item.as_object().ok_or_else(|| malformed("not a mapping"))?;

    if let Some(reference) = map.get("$ref").and_then(Value::as_str) {
        return Err(DomainError::UnsupportedReference {
            context: format!("parameters of {operation_id}"),
            reference: reference.to_owned(),
        });
    }

    let name = string(map, "name").ok_or_else(|| malformed("missing name"))?;
    let location: ParamLocation = map
        .get("in")
        .and_then(Value::as_str)
        .ok_or_else(|| malformed("missing 'in'"))?
        .parse()?;

    let schema_type = match map.get("schema") {
        Some(schema) => parse_schema_type(schema),
        None => parse_schema_type(item),
    };

    Ok(ParameterRecord {
        required: location == ParamLocation::Path
            || map.get("required").and_then(Value::as_bool).unwrap_or(false),
        name,
        location,
        schema_type,
        description: string(map, "description"),
    })
}

/// `{id}` placeholders of a path template, in order.
fn placeholders(path: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut rest = path;
    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            break;
        };
        let name = after[..close].trim();
        if !name.is_empty() && !names.iter().any(|n| n == name) {
            names.push(name.to_owned());
        }
        rest = &after[close + 1..];
    }
    names
}

fn request_body(operation_id: &str, op: &Map<String, Value>) -> Option<RequestBody> {
    let body = op.get("requestBody")?.as_object()?;

    if let Some(reference) = body.get("$ref").and_then(Value::as_str) {
        warn!(operation_id, reference, "Request body $ref is not resolved");
        return None;
    }

    Some(RequestBody {
        schema_type: content_schema(body)?,
        required: body.get("required").and_then(Value::as_bool).unwrap_or(false),
    })
}

/// Schema of the JSON content (or the first content type) of a body/response.
fn content_schema(node: &Map<String, Value>) -> Option<SchemaType> {
    let content = node.get("content")?.as_object()?;
    let media = content
        .get("application/json")
        .or_else(|| content.values().next())?;
    media.get("schema").map(parse_schema_type)
}

fn success_schema(responses: &Map<String, Value>) -> Option<SchemaType> {
    ["200", "201"]
        .into_iter()
        .find_map(|code| responses.get(code))
        .and_then(Value::as_object)
        .and_then(content_schema)
}

fn error_responses(responses: &Map<String, Value>) -> Vec<ErrorResponse> {
    responses
        .iter()
        .filter(|(code, _)| code.starts_with('4') || code.starts_with('5') || *code == "default")
        .map(|(code, response)| {
            let map = response.as_object();
            ErrorResponse {
                status_code: code.clone(),
                description: map.and_then(|m| string(m, "description")),
                model_ref: map
                    .and_then(content_schema)
                    .and_then(|ty| ty.referenced_model().map(str::to_owned)),
            }
        })
        .collect()
}

// ── Value helpers ────────────────────────────────────────────────────────────

fn string(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_owned)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
