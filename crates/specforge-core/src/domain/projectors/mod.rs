//! Per-target projectors. Each one is a pure function from walked records
//! (through an [`ApiContext`](crate::domain::aggregator::ApiContext)) to a
//! document tree.

pub mod client;
pub mod ddl;
pub mod enums;
pub mod server;
pub mod table;

pub use client::project_client;
pub use ddl::project_ddl;
pub use enums::project_enums;
pub use server::{ServerProjection, project_metadata, project_server};
pub use table::{is_entity, project_tables};
