//! Multi-document aggregation.
//!
//! Every walk output gets an [`ApiContext`] holding the names its models
//! ended up with. Tables and classes are assigned in input order: the first
//! claimant keeps the bare name, later ones are qualified by their API.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info};

use crate::domain::entities::{ModelKind, ModelRecord};
use crate::domain::naming;
use crate::domain::projectors::table::is_entity;
use crate::domain::type_mapping::SchemaType;
use crate::domain::walker::WalkOutput;

/// Alias chains longer than this are treated as unresolvable.
const MAX_ALIAS_DEPTH: usize = 8;

/// One walked document plus the names assigned to its models.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiContext {
    walk: WalkOutput,
    class_names: BTreeMap<String, String>,
    table_names: BTreeMap<String, String>,
}

impl ApiContext {
    pub fn api_name(&self) -> &str {
        &self.walk.api_name
    }

    pub fn walk(&self) -> &WalkOutput {
        &self.walk
    }

    pub fn models(&self) -> &[ModelRecord] {
        &self.walk.models
    }

    pub fn model(&self, name: &str) -> Option<&ModelRecord> {
        self.walk.model(name)
    }

    /// Class name assigned to a component; unknown names are only
    /// normalized.
    pub fn class_name(&self, model: &str) -> String {
        self.class_names
            .get(model)
            .cloned()
            .unwrap_or_else(|| naming::normalize_class_name(model))
    }

    /// Table name assigned to an entity model.
    pub fn table_name(&self, model: &str) -> Option<&str> {
        self.table_names.get(model).map(String::as_str)
    }

    /// Rewrite references for projection.
    ///
    /// References to scalar aliases become the alias's scalar type; all
    /// other references point at the assigned class name.
    pub fn resolve(&self, ty: &SchemaType) -> SchemaType {
        self.resolve_at(ty, 0)
    }

    fn resolve_at(&self, ty: &SchemaType, depth: usize) -> SchemaType {
        ty.map_references(&|name| match self.model(name).map(|m| &m.kind) {
            Some(ModelKind::Alias { target }) if depth < MAX_ALIAS_DEPTH => {
                self.resolve_at(target, depth + 1)
            }
            Some(ModelKind::Alias { .. }) => SchemaType::Unspecified,
            Some(_) => SchemaType::Reference(self.class_name(name)),
            None => {
                debug!(api = self.api_name(), reference = name, "Reference to unknown component");
                SchemaType::Reference(naming::normalize_class_name(name))
            }
        })
    }

    /// The model a type points at, looking through arrays but not aliases.
    pub fn referenced_model(&self, ty: &SchemaType) -> Option<&ModelRecord> {
        ty.referenced_model().and_then(|name| self.model(name))
    }
}

/// Assign class and table names across all documents, in input order.
pub fn aggregate(outputs: Vec<WalkOutput>) -> Vec<ApiContext> {
    let mut used_classes = BTreeSet::new();
    let mut used_tables = BTreeSet::new();

    let contexts: Vec<ApiContext> = outputs
        .into_iter()
        .map(|walk| {
            let api_pascal = naming::pascal_case(&walk.api_name);

            let class_names = walk
                .models
                .iter()
                .map(|model| {
                    let base = naming::normalize_class_name(&model.name);
                    let assigned = claim(&mut used_classes, base.clone(), || {
                        format!("{api_pascal}{base}")
                    });
                    if assigned != base {
                        info!(api = %walk.api_name, model = %model.name, class = %assigned, "Renamed colliding class");
                    }
                    (model.name.clone(), assigned)
                })
                .collect();

            let table_names = walk
                .models
                .iter()
                .filter(|model| is_entity(model))
                .map(|model| {
                    let base = naming::table_name(&model.name);
                    let assigned = claim(&mut used_tables, base.clone(), || {
                        format!("{}_{base}", walk.api_name)
                    });
                    if assigned != base {
                        info!(api = %walk.api_name, model = %model.name, table = %assigned, "Renamed colliding table");
                    }
                    (model.name.clone(), assigned)
                })
                .collect();

            ApiContext {
                walk,
                class_names,
                table_names,
            }
        })
        .collect();

    info!(apis = contexts.len(), "Aggregated schema documents");
    contexts
}

/// Take `base` if free, else the qualified name, else the qualified name
/// with a numeric suffix.
fn claim(used: &mut BTreeSet<String>, base: String, qualified: impl FnOnce() -> String) -> String {
    if used.insert(base.clone()) {
        return base;
    }

    let qualified = qualified();
    if used.insert(qualified.clone()) {
        return qualified;
    }

    let mut n = 2;
    loop {
        let candidate = format!("{qualified}{n}");
        if used.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::SchemaDocument;
    use crate::domain::extensions::RequirednessPolicy;
    use crate::domain::walker::SchemaWalker;
    use serde_json::json;

    fn items_api(api: &str) -> WalkOutput {
        let doc = SchemaDocument::from_value(
            api,
            json!({ "components": { "schemas": { "Item": {
                "type": "object",
                "properties": { "id": { "type": "integer" } }
            }}}}),
        )
        .unwrap();
        SchemaWalker::new(&RequirednessPolicy::default()).walk(&doc)
    }

    #[test]
    fn first_document_keeps_bare_table_name() {
        let apis = aggregate(vec![items_api("shop"), items_api("warehouse")]);
        assert_eq!(apis[0].table_name("Item"), Some("items"));
        assert_eq!(apis[1].table_name("Item"), Some("warehouse_items"));
    }

    #[test]
    fn reversing_input_order_swaps_the_bare_name() {
        let apis = aggregate(vec![items_api("warehouse"), items_api("shop")]);
        assert_eq!(apis[0].table_name("Item"), Some("items"));
        assert_eq!(apis[1].table_name("Item"), Some("shop_items"));
    }

    #[test]
    fn class_names_share_one_namespace() {
        let apis = aggregate(vec![items_api("shop"), items_api("order-archive"), items_api("shop")]);
        assert_eq!(apis[0].class_name("Item"), "Item");
        assert_eq!(apis[1].class_name("Item"), "OrderArchiveItem");
        assert_eq!(apis[2].class_name("Item"), "ShopItem");
    }

    #[test]
    fn claim_falls_back_to_numeric_suffix() {
        let mut used = BTreeSet::from(["items".to_owned(), "shop_items".to_owned()]);
        assert_eq!(claim(&mut used, "items".into(), || "shop_items".into()), "shop_items2");
    }

    #[test]
    fn resolve_flattens_scalar_aliases() {
        let doc = SchemaDocument::from_value(
            "product",
            json!({ "components": { "schemas": {
                "Status": { "type": "string", "enum": ["a", "b"] },
                "Code": { "$ref": "#/components/schemas/Status" },
                "Loop": { "$ref": "#/components/schemas/Loop" },
                "Product": { "type": "object", "properties": {
                    "status": { "$ref": "#/components/schemas/Status" }
                }}
            }}}),
        )
        .unwrap();
        let walk = SchemaWalker::new(&RequirednessPolicy::default()).walk(&doc);
        let ctx = aggregate(vec![walk]).remove(0);

        let status = SchemaType::Reference("Status".into());
        assert_eq!(ctx.resolve(&status), SchemaType::String(None));
        assert_eq!(
            ctx.resolve(&SchemaType::Array(Box::new(SchemaType::Reference("Code".into())))),
            SchemaType::Array(Box::new(SchemaType::String(None)))
        );
        assert_eq!(ctx.resolve(&SchemaType::Reference("Loop".into())), SchemaType::Unspecified);
        assert_eq!(
            ctx.resolve(&SchemaType::Reference("Product".into())),
            SchemaType::Reference("Product".into())
        );
        assert_eq!(ctx.table_name("Product"), Some("products"));
        assert_eq!(ctx.table_name("Status"), None);
    }
}
