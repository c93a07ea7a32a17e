//! Application ports (traits) for external dependencies.
//!
//! Ports define what generation needs from the outside world. Adapters in
//! `specforge-adapters` implement them.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `SchemaSource`: Discover and parse schema documents
//!   - `Filesystem`: File operations
//!   - `UnitRenderer`: Document trees to source text
//!   - `TableCodec`: The intermediate table-definition file format
//!   - `Clock`: Stamps for backup file names
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by `GenerationService`)

pub mod output;

pub use output::{
    Clock, Filesystem, RenderedFile, SchemaLocation, SchemaSource, TableCodec, UnitRenderer,
};

#[cfg(test)]
pub use output::{MockClock, MockFilesystem, MockSchemaSource, MockTableCodec, MockUnitRenderer};
