//! Subcommand handlers. Each translates parsed arguments into a core call
//! and reports the result; no generation logic lives here.

pub mod completions;
pub mod config;
pub mod generate;
pub mod list;

use specforge_adapters::{
    CsvTableCodec, DirectorySchemaSource, LocalFilesystem, SystemClock, TextRenderer,
};
use specforge_core::application::GenerationService;

/// The service wired to the production adapters.
pub(crate) fn generation_service() -> GenerationService {
    GenerationService::new(
        Box::new(DirectorySchemaSource::new()),
        Box::new(TextRenderer::new()),
        Box::new(CsvTableCodec::new()),
        Box::new(LocalFilesystem::new()),
        Box::new(SystemClock::new()),
    )
}
