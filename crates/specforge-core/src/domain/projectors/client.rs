//! Client projector: models → TypeScript model units, endpoints → Angular
//! service units grouped by resource.

use std::collections::{BTreeSet, HashSet};

use tracing::info;

use crate::domain::aggregator::ApiContext;
use crate::domain::annotations::to_client_validators;
use crate::domain::entities::{
    ClientField, ClientImport, ClientMethod, ClientModelBody, ClientModelUnit, ClientParameter,
    ClientServiceUnit, EndpointRecord, GeneratedUnit, ModelKind, ModelRecord, ParameterRecord,
};
use crate::domain::naming;
use crate::domain::options::ClientOptions;
use crate::domain::projectors::server::unique_name;
use crate::domain::type_mapping::{SchemaType, client_type};
use crate::domain::value_objects::HttpMethod;

/// Model and service units for every document, in input order.
pub fn project_client(apis: &[ApiContext], options: &ClientOptions) -> Vec<GeneratedUnit> {
    let mut units = Vec::new();
    let mut service_names = HashSet::new();

    for ctx in apis {
        let models: Vec<ClientModelUnit> = ctx
            .models()
            .iter()
            .map(|model| project_model(ctx, model))
            .collect();
        let services = project_services(ctx, options, &mut service_names);

        info!(
            api = ctx.api_name(),
            models = models.len(),
            services = services.len(),
            "Projected client units"
        );

        units.extend(models.into_iter().map(GeneratedUnit::ClientModel));
        units.extend(services.into_iter().map(GeneratedUnit::ClientService));
    }

    units
}

// ── Models ───────────────────────────────────────────────────────────────────

pub fn project_model(ctx: &ApiContext, model: &ModelRecord) -> ClientModelUnit {
    let name = ctx.class_name(&model.name);

    let body = match &model.kind {
        ModelKind::Object { fields } => {
            let mut imports = BTreeSet::new();
            let fields = fields
                .iter()
                .map(|field| {
                    if let Some(import) = model_import(ctx, &field.schema_type) {
                        if import.name != name {
                            imports.insert(import);
                        }
                    }
                    ClientField {
                        name: field.name.clone(),
                        ts_type: client_type(&ctx.resolve(&field.schema_type)),
                        optional: !field.required,
                        description: field.description.clone(),
                        validators: to_client_validators(&field.validation_rules),
                    }
                })
                .collect();
            ClientModelBody::Interface {
                imports: imports.into_iter().collect(),
                fields,
            }
        }
        ModelKind::Enum { members } => ClientModelBody::Union {
            values: members.iter().map(|m| m.value.clone()).collect(),
        },
        ModelKind::Alias { target } => ClientModelBody::Alias {
            target: client_type(&ctx.resolve(target)),
        },
    };

    ClientModelUnit {
        api_name: ctx.api_name().to_owned(),
        file_stem: model_file_stem(&name),
        name,
        description: model.description.clone(),
        body,
    }
}

/// `UserProfile` → `userprofile.model`.
pub fn model_file_stem(name: &str) -> String {
    format!("{}.model", name.to_lowercase())
}

/// Import for a referenced object or enum model; aliases flatten to
/// primitives and need none.
fn model_import(ctx: &ApiContext, ty: &SchemaType) -> Option<ClientImport> {
    let model = ctx.referenced_model(ty)?;
    if matches!(model.kind, ModelKind::Alias { .. }) {
        return None;
    }
    let name = ctx.class_name(&model.name);
    Some(ClientImport {
        file_stem: model_file_stem(&name),
        name,
    })
}

// ── Services ─────────────────────────────────────────────────────────────────

/// Services of one API. `used` holds class names already taken by earlier
/// APIs.
pub fn project_services(
    ctx: &ApiContext,
    options: &ClientOptions,
    used: &mut HashSet<String>,
) -> Vec<ClientServiceUnit> {
    let api_pascal = naming::pascal_case(ctx.api_name());

    // Resource groups in first-seen order.
    let mut groups: Vec<(String, Vec<&EndpointRecord>)> = Vec::new();
    for endpoint in &ctx.walk().endpoints {
        let resource = resource_name(endpoint).unwrap_or_else(|| api_pascal.clone());
        match groups.iter_mut().find(|(r, _)| *r == resource) {
            Some((_, members)) => members.push(endpoint),
            None => groups.push((resource, vec![endpoint])),
        }
    }

    groups
        .into_iter()
        .map(|(resource, endpoints)| {
            let stem = if resource.eq_ignore_ascii_case(&api_pascal) {
                resource.clone()
            } else {
                format!("{api_pascal}{resource}")
            };
            let stem = unique_name(used, stem);
            service(ctx, options, &resource, stem, &endpoints)
        })
        .collect()
}

fn service(
    ctx: &ApiContext,
    options: &ClientOptions,
    resource: &str,
    stem: String,
    endpoints: &[&EndpointRecord],
) -> ClientServiceUnit {
    let mut imports = BTreeSet::new();
    let mut names = HashSet::new();

    let methods = endpoints
        .iter()
        .map(|endpoint| {
            let name = method_name(endpoint, resource, &mut names);
            imports.extend(endpoint_imports(ctx, endpoint));
            client_method(ctx, endpoint, name)
        })
        .collect();

    ClientServiceUnit {
        api_name: ctx.api_name().to_owned(),
        class_name: format!("{stem}Service"),
        file_stem: format!("{}.service", naming::kebab_case(&stem)),
        base_url: options.api_base_url.trim_end_matches('/').to_owned(),
        model_imports: imports.into_iter().collect(),
        methods,
    }
}

/// First path segment that is not `api`, a version tag or a placeholder,
/// singularized and Pascal-cased.
pub fn resource_name(endpoint: &EndpointRecord) -> Option<String> {
    endpoint
        .segments()
        .find(|seg| *seg != "api" && !is_version_tag(seg) && !seg.starts_with('{'))
        .map(|seg| naming::pascal_case(&naming::singularize(seg)))
        .filter(|name| !name.is_empty())
}

fn is_version_tag(segment: &str) -> bool {
    segment
        .strip_prefix('v')
        .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()))
}

/// Verb-derived name, else the operation id, else a numeric suffix.
fn method_name(endpoint: &EndpointRecord, resource: &str, used: &mut HashSet<String>) -> String {
    let base = match endpoint.method {
        HttpMethod::Get if endpoint.has_path_params() => format!("get{resource}"),
        HttpMethod::Get => format!("get{resource}s"),
        HttpMethod::Post => format!("create{resource}"),
        HttpMethod::Put | HttpMethod::Patch => format!("update{resource}"),
        HttpMethod::Delete => format!("delete{resource}"),
    };
    if used.insert(base.clone()) {
        return base;
    }
    unique_name(used, naming::method_identifier(&endpoint.operation_id))
}

fn client_method(ctx: &ApiContext, endpoint: &EndpointRecord, name: String) -> ClientMethod {
    let parameter = |p: &ParameterRecord| ClientParameter {
        name: p.name.clone(),
        ts_type: client_type(&ctx.resolve(&p.schema_type)),
        optional: !p.required,
    };

    ClientMethod {
        name,
        http_method: endpoint.method,
        path: endpoint.path.clone(),
        path_params: endpoint.path_params.iter().map(parameter).collect(),
        query_params: endpoint.query_params.iter().map(parameter).collect(),
        body: endpoint.request.as_ref().map(|body| {
            let resolved = ctx.resolve(&body.schema_type);
            ClientParameter {
                name: match &resolved {
                    SchemaType::Reference(class) => naming::decapitalize(class),
                    _ => "body".to_owned(),
                },
                ts_type: client_type(&resolved),
                optional: !body.required,
            }
        }),
        return_type: endpoint
            .response
            .as_ref()
            .map_or_else(|| "any".to_owned(), |ty| client_type(&ctx.resolve(ty))),
    }
}

fn endpoint_imports(ctx: &ApiContext, endpoint: &EndpointRecord) -> Vec<ClientImport> {
    let params = endpoint
        .path_params
        .iter()
        .chain(&endpoint.query_params)
        .map(|p| &p.schema_type);
    let body = endpoint.request.iter().map(|b| &b.schema_type);

    params
        .chain(body)
        .chain(endpoint.response.iter())
        .filter_map(|ty| model_import(ctx, ty))
        .collect()
}
