//! Table projector: entity models → relational table definitions.

use serde_json::Value;
use tracing::{debug, info};

use crate::domain::aggregator::ApiContext;
use crate::domain::entities::{ColumnDefinition, FieldRecord, ModelRecord, TableDefinition};
use crate::domain::naming;
use crate::domain::options::TableOptions;
use crate::domain::type_mapping::{SqlType, sql_type};

/// Name fragments that mark a model as a message rather than an entity.
const MESSAGE_MARKERS: &[&str] = &["Request", "Response", "Error", "List"];

/// Whether an object model is persisted.
///
/// Message-like names are excluded unless the model carries an `id` or both
/// timestamps.
pub fn is_entity(model: &ModelRecord) -> bool {
    if !model.is_object() {
        return false;
    }

    let message_like = MESSAGE_MARKERS.iter().any(|m| model.name.contains(m));
    let has_id = model.fields().iter().any(|f| naming::is_primary_key_name(&f.name));
    let has_timestamps = model.has_field("createdAt") && model.has_field("updatedAt");

    !message_like || has_id || has_timestamps
}

/// Tables for every entity of every document, in input order.
pub fn project_tables(apis: &[ApiContext], options: &TableOptions) -> Vec<TableDefinition> {
    let mut tables = Vec::new();

    for ctx in apis {
        let before = tables.len();
        tables.extend(
            ctx.models()
                .iter()
                .filter_map(|model| project_table(ctx, model, options)),
        );
        info!(api = ctx.api_name(), tables = tables.len() - before, "Projected tables");
    }

    tables
}

/// One table, or `None` when the model is not an entity.
pub fn project_table(
    ctx: &ApiContext,
    model: &ModelRecord,
    options: &TableOptions,
) -> Option<TableDefinition> {
    let Some(table_name) = ctx.table_name(&model.name) else {
        debug!(model = %model.name, "Not an entity");
        return None;
    };

    let mut columns: Vec<ColumnDefinition> = model
        .fields()
        .iter()
        .map(|field| column(ctx, field, options))
        .collect();

    for (camel, snake, description) in [
        ("createdAt", "created_at", "Record creation time"),
        ("updatedAt", "updated_at", "Record update time"),
    ] {
        if !model.has_field(camel) && !model.has_field(snake) {
            columns.push(timestamp_column(snake, description));
        }
    }

    Some(TableDefinition {
        api_name: ctx.api_name().to_owned(),
        table_name: table_name.to_owned(),
        model_name: Some(model.name.clone()),
        columns,
    })
}

fn column(ctx: &ApiContext, field: &FieldRecord, options: &TableOptions) -> ColumnDefinition {
    let primary_key = naming::is_primary_key_name(&field.name);
    let sql = sql_type(
        &ctx.resolve(&field.schema_type),
        field.constraints.max_length,
        primary_key,
    );

    let sql_type = match sql {
        SqlType::Serial => sql.to_string(),
        other if primary_key => format!("{other} PRIMARY KEY"),
        other => other.to_string(),
    };

    ColumnDefinition {
        name: field.name.clone(),
        sql_type,
        nullable: !field.required && !primary_key,
        primary_key,
        unique: !primary_key && options.unique_columns.contains(&field.name),
        default_value: field.constraints.default.as_ref().map(default_literal),
        description: field.description.clone(),
    }
}

fn timestamp_column(name: &str, description: &str) -> ColumnDefinition {
    ColumnDefinition {
        name: name.to_owned(),
        sql_type: SqlType::TimestampTz.to_string(),
        nullable: false,
        primary_key: false,
        unique: false,
        default_value: Some("CURRENT_TIMESTAMP".into()),
        description: Some(description.to_owned()),
    }
}

/// SQL literal for a schema `default`.
fn default_literal(value: &Value) -> String {
    match value {
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("'{}'", s.replace('\'', "''")),
        other => format!("'{}'", other.to_string().replace('\'', "''")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregator::aggregate;
    use crate::domain::entities::SchemaDocument;
    use crate::domain::extensions::RequirednessPolicy;
    use crate::domain::walker::SchemaWalker;
    use serde_json::json;

    fn context(api: &str, schemas: Value) -> ApiContext {
        let doc =
            SchemaDocument::from_value(api, json!({ "components": { "schemas": schemas } })).unwrap();
        let walk = SchemaWalker::new(&RequirednessPolicy::default()).walk(&doc);
        aggregate(vec![walk]).remove(0)
    }

    #[test]
    fn user_table_columns() {
        let ctx = context(
            "user",
            json!({ "User": {
                "type": "object",
                "required": ["id", "name"],
                "properties": {
                    "id": { "type": "integer" },
                    "name": { "type": "string", "maxLength": 50 },
                    "email": { "type": "string", "format": "email" },
                    "isActive": { "type": "boolean", "default": true }
                }
            }}),
        );
        let table = project_table(&ctx, ctx.model("User").unwrap(), &TableOptions::default()).unwrap();

        assert_eq!(table.table_name, "users");
        let id = table.column("id").unwrap();
        assert_eq!(id.sql_type, "SERIAL PRIMARY KEY");
        assert!(id.primary_key && !id.nullable && !id.unique);

        let name = table.column("name").unwrap();
        assert_eq!(name.sql_type, "VARCHAR(50)");
        assert!(!name.nullable);

        let email = table.column("email").unwrap();
        assert!(email.unique && email.nullable);
        assert_eq!(table.column("isActive").unwrap().default_value.as_deref(), Some("true"));

        let names: Vec<_> = table.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["id", "name", "email", "isActive", "created_at", "updated_at"]);
        let created = table.column("created_at").unwrap();
        assert_eq!(created.sql_type, "TIMESTAMP WITH TIME ZONE");
        assert!(!created.nullable);
        assert_eq!(created.default_value.as_deref(), Some("CURRENT_TIMESTAMP"));
    }

    #[test]
    fn declared_timestamps_are_not_duplicated() {
        let ctx = context(
            "x",
            json!({ "Audit": {
                "type": "object",
                "properties": {
                    "createdAt": { "type": "string", "format": "date-time" },
                    "updated_at": { "type": "string", "format": "date-time" }
                }
            }}),
        );
        let table = project_table(&ctx, ctx.model("Audit").unwrap(), &TableOptions::default()).unwrap();
        assert_eq!(table.columns.len(), 2);
    }

    #[test]
    fn entity_filter() {
        let ctx = context(
            "x",
            json!({
                "CreateUserRequest": { "type": "object", "properties": { "name": { "type": "string" } } },
                "UserResponse": { "type": "object", "properties": { "id": { "type": "integer" } } },
                "ErrorList": { "type": "object", "properties": {
                    "createdAt": { "type": "string" }, "updatedAt": { "type": "string" }
                }},
                "Tag": { "type": "object", "properties": { "label": { "type": "string" } } },
                "Kind": { "type": "string" }
            }),
        );
        let entities: Vec<_> = ctx.models().iter().filter(|m| is_entity(m)).map(|m| m.name.as_str()).collect();
        assert_eq!(entities, vec!["UserResponse", "ErrorList", "Tag"]);
    }

    #[test]
    fn non_integer_key_and_string_default() {
        let ctx = context(
            "x",
            json!({ "Token": {
                "type": "object",
                "properties": {
                    "id": { "type": "string", "format": "uuid" },
                    "state": { "type": "string", "default": "it's new" }
                }
            }}),
        );
        let table = project_table(&ctx, ctx.model("Token").unwrap(), &TableOptions::default()).unwrap();
        assert_eq!(table.column("id").unwrap().sql_type, "UUID PRIMARY KEY");
        assert_eq!(
            table.column("state").unwrap().default_value.as_deref(),
            Some("'it''s new'")
        );
    }
}
