//! PostgreSQL DDL.

use specforge_core::domain::{ColumnDefinition, DdlDocument, TableDefinition};

use super::Source;

const INDENT: &str = "    ";
const UPDATED_AT: &str = "updated_at";
const TRIGGER_FUNCTION: &str = "set_updated_at";

pub(super) fn ddl(document: &DdlDocument) -> String {
    let mut src = Source::new(INDENT);

    src.line(0, "-- Generated PostgreSQL DDL")
        .blank()
        .line(0, "-- Uncomment to create the database")
        .line(0, format!("-- CREATE DATABASE {};", document.database_name))
        .line(0, format!("-- \\c {};", document.database_name))
        .blank();

    if !document.extensions.is_empty() {
        for extension in &document.extensions {
            src.line(0, format!("CREATE EXTENSION IF NOT EXISTS \"{extension}\";"));
        }
        src.blank();
    }

    for table in &document.tables {
        create_table(&mut src, table);
    }

    let triggered: Vec<&TableDefinition> = document
        .tables
        .iter()
        .filter(|t| t.column(UPDATED_AT).is_some())
        .collect();
    if document.timestamp_trigger && !triggered.is_empty() {
        src.line(0, format!("CREATE OR REPLACE FUNCTION {TRIGGER_FUNCTION}()"))
            .line(0, "RETURNS TRIGGER AS $$")
            .line(0, "BEGIN")
            .line(1, format!("NEW.{UPDATED_AT} = CURRENT_TIMESTAMP;"))
            .line(1, "RETURN NEW;")
            .line(0, "END;")
            .line(0, "$$ LANGUAGE plpgsql;")
            .blank();
        for table in triggered {
            src.line(0, format!("CREATE TRIGGER {}_{TRIGGER_FUNCTION}", table.table_name))
                .line(1, format!("BEFORE UPDATE ON {}", table.table_name))
                .line(1, format!("FOR EACH ROW EXECUTE FUNCTION {TRIGGER_FUNCTION}();"))
                .blank();
        }
    }

    src.finish()
}

fn create_table(src: &mut Source, table: &TableDefinition) {
    src.line(0, format!("-- {} table", table.table_name))
        .line(0, format!("CREATE TABLE {} (", table.table_name));

    let last = table.columns.len().saturating_sub(1);
    for (i, column) in table.columns.iter().enumerate() {
        let separator = if i == last { "" } else { "," };
        src.line(1, format!("{}{separator}", column_definition(column)));
    }
    src.line(0, ");");

    for column in &table.columns {
        if let Some(description) = &column.description {
            src.line(
                0,
                format!(
                    "COMMENT ON COLUMN {}.{} IS '{}';",
                    table.table_name,
                    column.name,
                    description.replace('\'', "''")
                ),
            );
        }
    }
    src.blank();
}

/// `name TYPE[ NOT NULL][ UNIQUE][ DEFAULT x]`
fn column_definition(column: &ColumnDefinition) -> String {
    let mut out = format!("{} {}", column.name, column.sql_type);
    if !column.nullable && !column.primary_key {
        out.push_str(" NOT NULL");
    }
    if column.unique {
        out.push_str(" UNIQUE");
    }
    if let Some(default) = &column.default_value {
        out.push_str(" DEFAULT ");
        out.push_str(default);
    }
    out
}
