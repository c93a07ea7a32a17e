//! Server projector: models → DTO units, endpoints → one controller per API,
//! and the metadata summary of both.

use std::collections::{BTreeSet, HashSet};

use tracing::info;

use crate::domain::aggregator::ApiContext;
use crate::domain::annotations::{standard_annotations, to_server_annotations};
use crate::domain::entities::{
    ControllerMetadata, ControllerMethod, ControllerUnit, DtoField, DtoFieldMetadata, DtoMetadata,
    DtoUnit, EndpointMetadata, EndpointRecord, FieldConstraints, FieldRecord, GenerationMetadata,
    JavaParameter, ModelKind, ModelRecord, ParameterRecord,
};
use crate::domain::naming;
use crate::domain::options::ServerOptions;
use crate::domain::type_mapping::{JavaType, SchemaType, server_type};

/// DTOs and the controller of one API.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServerProjection {
    pub dtos: Vec<DtoUnit>,
    pub controller: Option<ControllerUnit>,
}

pub fn project_server(ctx: &ApiContext, options: &ServerOptions) -> ServerProjection {
    let dtos: Vec<DtoUnit> = ctx
        .models()
        .iter()
        .filter_map(|model| project_dto(ctx, model, options))
        .collect();
    let controller = project_controller(ctx, options);

    info!(
        api = ctx.api_name(),
        dtos = dtos.len(),
        endpoints = controller.as_ref().map_or(0, |c| c.methods.len()),
        "Projected server units"
    );

    ServerProjection { dtos, controller }
}

// ── DTOs ─────────────────────────────────────────────────────────────────────

/// A DTO for an object or alias model; enums get an enum unit instead.
pub fn project_dto(ctx: &ApiContext, model: &ModelRecord, options: &ServerOptions) -> Option<DtoUnit> {
    let package = options.dto_package_for(ctx.api_name());
    let mut imports = BTreeSet::new();

    let fields = match &model.kind {
        ModelKind::Object { fields } => fields
            .iter()
            .map(|field| dto_field(ctx, field, options, &package, &mut imports))
            .collect(),
        ModelKind::Alias { target } => {
            let value = FieldRecord {
                name: "value".into(),
                schema_type: target.clone(),
                required: false,
                description: None,
                constraints: FieldConstraints::default(),
                validation_rules: Vec::new(),
            };
            vec![dto_field(ctx, &value, options, &package, &mut imports)]
        }
        ModelKind::Enum { .. } => return None,
    };

    Some(DtoUnit {
        api_name: ctx.api_name().to_owned(),
        class_name: ctx.class_name(&model.name),
        package,
        description: model.description.clone(),
        imports,
        fields,
    })
}

fn dto_field(
    ctx: &ApiContext,
    field: &FieldRecord,
    options: &ServerOptions,
    package: &str,
    imports: &mut BTreeSet<String>,
) -> DtoField {
    let java = java_type(ctx, &field.schema_type, options, package);
    imports.extend(java.imports);

    let annotations = if !field.validation_rules.is_empty() {
        to_server_annotations(&field.validation_rules, &options.validation_package)
    } else if options.validation_annotations {
        standard_annotations(field)
    } else {
        Vec::new()
    };
    imports.extend(annotations.iter().map(|a| a.import.clone()));

    let accessor = naming::capitalize(&field.name);
    DtoField {
        name: field.name.clone(),
        java_type: java.name,
        required: field.required,
        description: field.description.clone(),
        annotations,
        getter: format!("get{accessor}"),
        setter: format!("set{accessor}"),
    }
}

/// Java type for a schema type as seen from `package`, with the imports of
/// any referenced class living elsewhere.
fn java_type(ctx: &ApiContext, ty: &SchemaType, options: &ServerOptions, package: &str) -> JavaType {
    let mut java = server_type(&ctx.resolve(ty));

    if let Some(model) = ctx.referenced_model(ty) {
        let home = match model.kind {
            ModelKind::Enum { .. } => Some(options.enum_package_for(ctx.api_name())),
            ModelKind::Object { .. } => Some(options.dto_package_for(ctx.api_name())),
            ModelKind::Alias { .. } => None,
        };
        if let Some(home) = home.filter(|home| home != package) {
            java.imports
                .insert(format!("{home}.{}", ctx.class_name(&model.name)));
        }
    }

    java
}

// ── Controller ───────────────────────────────────────────────────────────────

/// `<ApiPascal>Controller` with one method per endpoint, or `None` for a
/// document without paths.
pub fn project_controller(ctx: &ApiContext, options: &ServerOptions) -> Option<ControllerUnit> {
    let endpoints = &ctx.walk().endpoints;
    if endpoints.is_empty() {
        return None;
    }

    let package = options.controller_package_for(ctx.api_name());
    let mut imports = BTreeSet::new();
    let mut used = HashSet::new();

    let methods = endpoints
        .iter()
        .map(|endpoint| {
            let name = unique_name(&mut used, naming::method_identifier(&endpoint.operation_id));
            controller_method(ctx, endpoint, name, options, &package, &mut imports)
        })
        .collect();

    Some(ControllerUnit {
        api_name: ctx.api_name().to_owned(),
        class_name: format!("{}Controller", naming::pascal_case(ctx.api_name())),
        package,
        imports,
        methods,
    })
}

fn controller_method(
    ctx: &ApiContext,
    endpoint: &EndpointRecord,
    name: String,
    options: &ServerOptions,
    package: &str,
    imports: &mut BTreeSet<String>,
) -> ControllerMethod {
    let mut parameter = |p: &ParameterRecord| {
        let java = java_type(ctx, &p.schema_type, options, package);
        imports.extend(java.imports);
        JavaParameter {
            name: p.name.clone(),
            java_type: java.name,
            required: p.required,
        }
    };

    let path_params = endpoint.path_params.iter().map(&mut parameter).collect();
    let query_params = endpoint.query_params.iter().map(&mut parameter).collect();

    let request_body = endpoint.request.as_ref().map(|body| {
        let java = java_type(ctx, &body.schema_type, options, package);
        imports.extend(java.imports);
        let name = match ctx.resolve(&body.schema_type) {
            SchemaType::Reference(class) => naming::decapitalize(&class),
            _ => "body".to_owned(),
        };
        JavaParameter {
            name,
            java_type: java.name,
            required: body.required,
        }
    });

    let response_type = match &endpoint.response {
        Some(ty) => {
            let java = java_type(ctx, ty, options, package);
            imports.extend(java.imports);
            java.name
        }
        None => "Void".to_owned(),
    };

    ControllerMethod {
        name,
        operation_id: endpoint.operation_id.clone(),
        http_method: endpoint.method,
        path: endpoint.path.clone(),
        summary: endpoint.summary.clone(),
        description: endpoint.description.clone(),
        path_params,
        query_params,
        request_body,
        response_type,
        success_status: endpoint.success_status,
    }
}

/// `base`, else `base2`, `base3`, ...
pub(crate) fn unique_name(used: &mut HashSet<String>, base: String) -> String {
    if used.insert(base.clone()) {
        return base;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{base}{n}");
        if used.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

// ── Metadata ─────────────────────────────────────────────────────────────────

/// Summary of every controller and DTO of a run.
pub fn project_metadata(
    generator_version: &str,
    controllers: &[ControllerUnit],
    dtos: &[DtoUnit],
) -> GenerationMetadata {
    GenerationMetadata {
        generator_version: generator_version.to_owned(),
        controllers: controllers
            .iter()
            .map(|c| ControllerMetadata {
                api_name: c.api_name.clone(),
                class_name: c.class_name.clone(),
                package: c.package.clone(),
                endpoints: c
                    .methods
                    .iter()
                    .map(|m| EndpointMetadata {
                        method: m.http_method,
                        path: m.path.clone(),
                        operation_id: m.operation_id.clone(),
                        request_type: m.request_body.as_ref().map(|b| b.java_type.clone()),
                        response_type: m.response_type.clone(),
                    })
                    .collect(),
            })
            .collect(),
        dtos: dtos
            .iter()
            .map(|d| DtoMetadata {
                class_name: d.class_name.clone(),
                package: d.package.clone(),
                fields: d
                    .fields
                    .iter()
                    .map(|f| DtoFieldMetadata {
                        name: f.name.clone(),
                        java_type: f.java_type.clone(),
                        required: f.required,
                        validations: f.annotations.iter().map(|a| a.render()).collect(),
                    })
                    .collect(),
            })
            .collect(),
    }
}
