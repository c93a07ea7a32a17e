//! Relational projections of entity models.

use serde::{Deserialize, Serialize};

/// One column of a generated table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDefinition {
    pub name: String,
    /// Full column type text; a serial key already carries `PRIMARY KEY`.
    pub sql_type: String,
    pub nullable: bool,
    pub primary_key: bool,
    pub unique: bool,
    pub default_value: Option<String>,
    pub description: Option<String>,
}

/// A table derived from one entity model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDefinition {
    pub api_name: String,
    pub table_name: String,
    /// Source model; unknown for tables read back from the interchange file.
    pub model_name: Option<String>,
    pub columns: Vec<ColumnDefinition>,
}

impl TableDefinition {
    pub fn column(&self, name: &str) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Flatten into interchange rows, one per column.
    pub fn to_rows(&self) -> Vec<TableRow> {
        self.columns
            .iter()
            .map(|c| TableRow {
                api_name: self.api_name.clone(),
                table_name: self.table_name.clone(),
                column_name: c.name.clone(),
                data_type: c.sql_type.clone(),
                nullable: c.nullable,
                primary_key: c.primary_key,
                unique: c.unique,
                default_value: c.default_value.clone(),
                description: c.description.clone(),
            })
            .collect()
    }
}

/// One line of the intermediate table-definition file.
///
/// Field order is the column order of the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub api_name: String,
    pub table_name: String,
    pub column_name: String,
    pub data_type: String,
    pub nullable: bool,
    pub primary_key: bool,
    pub unique: bool,
    pub default_value: Option<String>,
    pub description: Option<String>,
}

/// Regroup interchange rows into tables, in first-seen table order.
pub fn tables_from_rows(rows: &[TableRow]) -> Vec<TableDefinition> {
    let mut tables: Vec<TableDefinition> = Vec::new();

    for row in rows {
        let column = ColumnDefinition {
            name: row.column_name.clone(),
            sql_type: row.data_type.clone(),
            nullable: row.nullable,
            primary_key: row.primary_key,
            unique: row.unique,
            default_value: row.default_value.clone().filter(|d| !d.is_empty()),
            description: row.description.clone().filter(|d| !d.is_empty()),
        };

        match tables.iter_mut().find(|t| t.table_name == row.table_name) {
            Some(table) => table.columns.push(column),
            None => tables.push(TableDefinition {
                api_name: row.api_name.clone(),
                table_name: row.table_name.clone(),
                model_name: None,
                columns: vec![column],
            }),
        }
    }

    tables
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(table: &str, column: &str) -> TableRow {
        TableRow {
            api_name: "shop".into(),
            table_name: table.into(),
            column_name: column.into(),
            data_type: "INTEGER".into(),
            nullable: false,
            primary_key: false,
            unique: false,
            default_value: None,
            description: Some(String::new()),
        }
    }

    #[test]
    fn rows_regroup_in_first_seen_order() {
        let rows = vec![
            row("orders", "id"),
            row("items", "id"),
            row("orders", "total"),
        ];
        let tables = tables_from_rows(&rows);

        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].table_name, "orders");
        assert_eq!(tables[0].columns.len(), 2);
        assert_eq!(tables[1].table_name, "items");
        assert_eq!(tables[0].column("total").unwrap().description, None);
    }
}
