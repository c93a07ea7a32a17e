//! CSV codec for the intermediate table-definition file.
//!
//! Columns follow the field order of [`TableRow`]. Booleans are written as
//! `true`/`false`; missing defaults and descriptions as empty fields.

use csv::{ReaderBuilder, WriterBuilder};
use tracing::{debug, instrument};

use specforge_core::application::ports::TableCodec;
use specforge_core::application::ApplicationError;
use specforge_core::domain::TableRow;
use specforge_core::error::ForgeResult;

#[derive(Debug, Clone, Copy, Default)]
pub struct CsvTableCodec;

impl CsvTableCodec {
    pub fn new() -> Self {
        Self
    }
}

impl TableCodec for CsvTableCodec {
    #[instrument(skip_all, fields(rows = rows.len()))]
    fn encode(&self, rows: &[TableRow]) -> ForgeResult<String> {
        let mut writer = WriterBuilder::new().has_headers(true).from_writer(Vec::new());
        for row in rows {
            writer.serialize(row).map_err(codec_error)?;
        }
        // serialize() only writes headers with the first row
        if rows.is_empty() {
            writer.write_record(HEADER).map_err(codec_error)?;
        }
        let bytes = writer.into_inner().map_err(|e| codec_error(e.error()))?;
        String::from_utf8(bytes).map_err(|e| {
            ApplicationError::TableCodec {
                reason: e.to_string(),
            }
            .into()
        })
    }

    #[instrument(skip_all)]
    fn decode(&self, text: &str) -> ForgeResult<Vec<TableRow>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Fields)
            .from_reader(text.as_bytes());

        let rows = reader
            .deserialize::<TableRow>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(codec_error)?;
        debug!(rows = rows.len(), "decoded table rows");
        Ok(rows)
    }
}

const HEADER: [&str; 9] = [
    "api_name",
    "table_name",
    "column_name",
    "data_type",
    "nullable",
    "primary_key",
    "unique",
    "default_value",
    "description",
];

fn codec_error(e: impl std::fmt::Display) -> ApplicationError {
    ApplicationError::TableCodec {
        reason: e.to_string(),
    }
}
