//! Target-language document trees.
//!
//! Projectors build these; renderers turn them into text. Nothing in here
//! knows about output syntax beyond the names and type tokens it carries.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::domain::annotations::{Annotation, ClientValidator};
use crate::domain::entities::model::EnumMember;
use crate::domain::entities::table::TableDefinition;
use crate::domain::value_objects::HttpMethod;

/// Any unit a renderer can emit as one source file.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratedUnit {
    Dto(DtoUnit),
    Controller(ControllerUnit),
    ClientModel(ClientModelUnit),
    ClientService(ClientServiceUnit),
    Enum(EnumUnit),
}

impl GeneratedUnit {
    pub fn name(&self) -> &str {
        match self {
            Self::Dto(u) => &u.class_name,
            Self::Controller(u) => &u.class_name,
            Self::ClientModel(u) => &u.name,
            Self::ClientService(u) => &u.class_name,
            Self::Enum(u) => &u.class_name,
        }
    }

    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Dto(_) => "dto",
            Self::Controller(_) => "controller",
            Self::ClientModel(_) => "client-model",
            Self::ClientService(_) => "client-service",
            Self::Enum(_) => "enum",
        }
    }
}

// ── Server ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct DtoUnit {
    pub api_name: String,
    pub package: String,
    pub class_name: String,
    pub description: Option<String>,
    pub imports: BTreeSet<String>,
    pub fields: Vec<DtoField>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DtoField {
    pub name: String,
    pub java_type: String,
    pub required: bool,
    pub description: Option<String>,
    pub annotations: Vec<Annotation>,
    pub getter: String,
    pub setter: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ControllerUnit {
    pub api_name: String,
    pub package: String,
    pub class_name: String,
    pub imports: BTreeSet<String>,
    pub methods: Vec<ControllerMethod>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ControllerMethod {
    pub name: String,
    pub operation_id: String,
    pub http_method: HttpMethod,
    pub path: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub path_params: Vec<JavaParameter>,
    pub query_params: Vec<JavaParameter>,
    pub request_body: Option<JavaParameter>,
    /// Type argument of `ResponseEntity<...>`.
    pub response_type: String,
    pub success_status: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaParameter {
    pub name: String,
    pub java_type: String,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumUnit {
    pub api_name: String,
    pub package: String,
    pub class_name: String,
    pub description: Option<String>,
    pub members: Vec<EnumMember>,
}

// ── Client ───────────────────────────────────────────────────────────────────

/// `import { name } from './file_stem';`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ClientImport {
    pub name: String,
    pub file_stem: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientModelUnit {
    pub api_name: String,
    pub name: String,
    /// File name without `.ts`, e.g. `user.model`.
    pub file_stem: String,
    pub description: Option<String>,
    pub body: ClientModelBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClientModelBody {
    Interface {
        imports: Vec<ClientImport>,
        fields: Vec<ClientField>,
    },
    /// String-literal union for opted-in enums.
    Union { values: Vec<String> },
    /// Plain type alias for scalar components.
    Alias { target: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientField {
    pub name: String,
    pub ts_type: String,
    pub optional: bool,
    pub description: Option<String>,
    pub validators: Vec<ClientValidator>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientServiceUnit {
    pub api_name: String,
    pub class_name: String,
    /// File name without `.ts`, e.g. `product-user.service`.
    pub file_stem: String,
    pub base_url: String,
    pub model_imports: Vec<ClientImport>,
    pub methods: Vec<ClientMethod>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientMethod {
    pub name: String,
    pub http_method: HttpMethod,
    pub path: String,
    pub path_params: Vec<ClientParameter>,
    pub query_params: Vec<ClientParameter>,
    pub body: Option<ClientParameter>,
    pub return_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientParameter {
    pub name: String,
    pub ts_type: String,
    pub optional: bool,
}

// ── SQL ──────────────────────────────────────────────────────────────────────

/// A whole DDL script covering every table of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DdlDocument {
    pub database_name: String,
    pub extensions: Vec<String>,
    pub tables: Vec<TableDefinition>,
    /// Emit a shared `updated_at` trigger function and one trigger per table.
    pub timestamp_trigger: bool,
}

impl DdlDocument {
    /// Output file stem: the first (primary) table's name.
    pub fn file_stem(&self) -> Option<&str> {
        self.tables.first().map(|t| t.table_name.as_str())
    }
}

// ── Metadata ─────────────────────────────────────────────────────────────────

/// Summary of the server units of a run, for downstream test generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GenerationMetadata {
    pub generator_version: String,
    pub controllers: Vec<ControllerMetadata>,
    pub dtos: Vec<DtoMetadata>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControllerMetadata {
    pub api_name: String,
    pub class_name: String,
    pub package: String,
    pub endpoints: Vec<EndpointMetadata>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EndpointMetadata {
    pub method: HttpMethod,
    pub path: String,
    pub operation_id: String,
    pub request_type: Option<String>,
    pub response_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DtoMetadata {
    pub class_name: String,
    pub package: String,
    pub fields: Vec<DtoFieldMetadata>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DtoFieldMetadata {
    pub name: String,
    #[serde(rename = "type")]
    pub java_type: String,
    pub required: bool,
    /// Rendered annotations, one per entry.
    pub validations: Vec<String>,
}
