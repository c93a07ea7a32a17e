//! DDL projector: interchange rows → one DDL document.

use crate::domain::entities::{DdlDocument, TableRow, tables_from_rows};
use crate::domain::options::DdlOptions;

/// Group rows into tables (first-seen order) and wrap them with the
/// database settings.
pub fn project_ddl(rows: &[TableRow], options: &DdlOptions) -> DdlDocument {
    DdlDocument {
        database_name: options.database_name.clone(),
        extensions: options.extensions.clone(),
        tables: tables_from_rows(rows),
        timestamp_trigger: options.timestamp_trigger,
    }
}
