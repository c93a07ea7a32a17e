//! Infrastructure adapters for specforge.
//!
//! This crate implements the ports defined in `specforge_core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod clock;
pub mod filesystem;
pub mod renderer;
pub mod schema_source;
pub mod table_csv;

// Re-export commonly used adapters
pub use clock::{FixedClock, SystemClock};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::TextRenderer;
pub use schema_source::DirectorySchemaSource;
pub use table_csv::CsvTableCodec;
