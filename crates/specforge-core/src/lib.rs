//! specforge Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the specforge
//! generator, which turns OpenAPI documents into SQL, Spring and Angular
//! sources, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          specforge-cli (CLI)            │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │          (GenerationService)            │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (SchemaSource, Filesystem, UnitRenderer,│
//! │        TableCodec, Clock)               │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   specforge-adapters (Infrastructure)   │
//! │ (DirectorySchemaSource, TextRenderer,   │
//! │  CsvTableCodec, LocalFilesystem, ...)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (Walker, Projectors, Aggregator, Types) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use specforge_core::prelude::*;
//!
//! let service = GenerationService::new(source, renderer, codec, filesystem, clock);
//! let report = service.generate(&GenerationOptions::default())?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

/// Public API - what external crates should use.
pub mod prelude {
    pub use crate::application::{
        ApiSummary, GenerationOptions, GenerationReport, GenerationService, OutputLayout,
        ports::{Clock, Filesystem, SchemaSource, TableCodec, UnitRenderer},
    };
    pub use crate::domain::{GenerationTarget, ProjectionOptions, SchemaDocument};
    pub use crate::error::{ForgeError, ForgeResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
