//! Application layer for specforge.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (`GenerationService`)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Options**: What to generate and where it goes
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! schema logic itself. All of that lives in `crate::domain`.

pub mod error;
pub mod options;
pub mod ports;
pub mod services;

pub use services::{ApiSummary, GenerationReport, GenerationService};

pub use options::{GenerationOptions, OutputLayout};

pub use ports::{
    Clock, Filesystem, RenderedFile, SchemaLocation, SchemaSource, TableCodec, UnitRenderer,
};

pub use error::ApplicationError;
