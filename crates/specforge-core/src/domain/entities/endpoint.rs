//! Endpoint records produced by the schema walker.

use crate::domain::naming;
use crate::domain::type_mapping::SchemaType;
use crate::domain::value_objects::{HttpMethod, ParamLocation};

/// A path or query parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterRecord {
    pub name: String,
    pub location: ParamLocation,
    pub schema_type: SchemaType,
    pub required: bool,
    pub description: Option<String>,
}

/// The JSON request body of an operation.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestBody {
    /// `Reference` for `$ref` bodies; inline objects collapse to `Object`.
    pub schema_type: SchemaType,
    pub required: bool,
}

/// A documented 4xx/5xx/default response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    /// The status key as written, e.g. `404` or `default`.
    pub status_code: String,
    pub description: Option<String>,
    pub model_ref: Option<String>,
}

/// One HTTP operation.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointRecord {
    pub api_name: String,
    pub method: HttpMethod,
    pub path: String,
    pub operation_id: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub path_params: Vec<ParameterRecord>,
    pub query_params: Vec<ParameterRecord>,
    pub request: Option<RequestBody>,
    /// Schema of the 200 (or else 201) response.
    pub response: Option<SchemaType>,
    /// First of 200, 201, 202, 204 the operation documents; 200 otherwise.
    pub success_status: u16,
    pub error_responses: Vec<ErrorResponse>,
}

impl EndpointRecord {
    /// `METHOD_path` composite key, unique within one document.
    pub fn key(&self) -> String {
        naming::endpoint_key(self.method, &self.path)
    }

    pub fn has_path_params(&self) -> bool {
        !self.path_params.is_empty() || self.path.contains('{')
    }

    pub fn request_model_ref(&self) -> Option<&str> {
        self.request
            .as_ref()
            .and_then(|body| body.schema_type.referenced_model())
    }

    pub fn response_model_ref(&self) -> Option<&str> {
        self.response.as_ref().and_then(|ty| ty.referenced_model())
    }

    /// Path segments, without empty pieces.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.path.split('/').filter(|s| !s.is_empty())
    }
}
