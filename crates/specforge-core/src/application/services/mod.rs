//! Application services (use case implementations).

mod generation_service;

pub use generation_service::{ApiSummary, GenerationReport, GenerationService};
