//! Enum projector: opted-in enum models → Java enum units.

use crate::domain::aggregator::ApiContext;
use crate::domain::entities::EnumUnit;
use crate::domain::options::ServerOptions;

pub fn project_enums(ctx: &ApiContext, options: &ServerOptions) -> Vec<EnumUnit> {
    let package = options.enum_package_for(ctx.api_name());

    ctx.models()
        .iter()
        .filter(|model| model.is_enum())
        .map(|model| EnumUnit {
            api_name: ctx.api_name().to_owned(),
            package: package.clone(),
            class_name: ctx.class_name(&model.name),
            description: model.description.clone(),
            members: model.enum_values().to_vec(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregator::aggregate;
    use crate::domain::entities::SchemaDocument;
    use crate::domain::extensions::RequirednessPolicy;
    use crate::domain::walker::SchemaWalker;
    use serde_json::json;

    fn walk(api: &str, marked: bool) -> crate::domain::walker::WalkOutput {
        let mut status = json!({ "type": "string", "enum": ["active", "in-review"] });
        if marked {
            status["x-makeEnumJava"] = json!(true);
        }
        let doc = SchemaDocument::from_value(
            api,
            json!({ "components": { "schemas": {
                "Status": status,
                "Item": { "type": "object", "properties": {
                    "status": { "$ref": "#/components/schemas/Status" }
                }}
            }}}),
        )
        .unwrap();
        SchemaWalker::new(&RequirednessPolicy::default()).walk(&doc)
    }

    #[test]
    fn only_marked_status_becomes_an_enum() {
        let apis = aggregate(vec![walk("product", false), walk("auth", true)]);
        let options = ServerOptions::default();

        assert!(project_enums(&apis[0], &options).is_empty());

        let units = project_enums(&apis[1], &options);
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].class_name, "AuthStatus");
        assert_eq!(units[0].package, "com.example.api.enums");
        let idents: Vec<_> = units[0].members.iter().map(|m| m.identifier.as_str()).collect();
        assert_eq!(idents, vec!["ACTIVE", "IN_REVIEW"]);
    }
}
