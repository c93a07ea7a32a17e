//! Core domain layer for specforge.
//!
//! Pure schema-to-artifact logic: records, the extension-rule parser, type
//! tables, the walker, projectors and the multi-document aggregator. All
//! I/O and text rendering live behind the ports of the application layer.
//!
//! ## Boundaries
//!
//! - **No I/O**: documents arrive already parsed as JSON trees
//! - **No rendering**: projectors stop at document trees
//! - **Deterministic**: the same input order gives the same trees

pub mod aggregator;
pub mod annotations;
pub mod entities;
pub mod error;
pub mod extensions;
pub mod naming;
pub mod options;
pub mod projectors;
pub mod type_mapping;
pub mod value_objects;
pub mod walker;

pub use aggregator::{ApiContext, aggregate};
pub use annotations::{Annotation, AnnotationValue, ClientValidator, ValidatorSource};
pub use entities::*;
pub use error::DomainError;
pub use extensions::RequirednessPolicy;
pub use options::{ClientOptions, DdlOptions, ProjectionOptions, ServerOptions, TableOptions};
pub use type_mapping::{JavaType, SchemaType, SqlType};
pub use value_objects::{Format, GenerationTarget, HttpMethod, ParamLocation, PatternClass};
pub use walker::{SchemaWalker, WalkOutput};
