pub mod common;
pub mod endpoint;
pub mod model;
pub mod schema_document;
pub mod table;
pub mod units;
pub mod validation;

pub use common::RelativePath;
pub use endpoint::{EndpointRecord, ErrorResponse, ParameterRecord, RequestBody};
pub use model::{EnumMember, FieldConstraints, FieldRecord, ModelKind, ModelRecord};
pub use schema_document::SchemaDocument;
pub use table::{ColumnDefinition, TableDefinition, TableRow, tables_from_rows};
pub use units::{
    ClientField, ClientImport, ClientMethod, ClientModelBody, ClientModelUnit, ClientParameter,
    ClientServiceUnit, ControllerMetadata, ControllerMethod, ControllerUnit, DdlDocument,
    DtoField, DtoFieldMetadata, DtoMetadata, DtoUnit, EndpointMetadata, EnumUnit,
    GeneratedUnit, GenerationMetadata, JavaParameter,
};
pub use validation::{ArrayRule, NumberRule, StringRule, ValidationRule};
