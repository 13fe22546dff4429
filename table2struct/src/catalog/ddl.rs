//! Offline catalog reader over a DDL file, using sqlparser-rs

use std::path::Path;

use async_trait::async_trait;
use sqlparser::ast::{
    ColumnOption, Expr, IndexColumn, IndexConstraint, ObjectName, PrimaryKeyConstraint,
    Statement, TableConstraint, UniqueConstraint, Value,
};
use sqlparser::dialect::MySqlDialect;
use sqlparser::parser::Parser;
use tracing::{debug, info};

use super::{CatalogReader, ColumnDescriptor, KeyRole};
use crate::error::{GenError, Result};

/// Catalog answered from `CREATE TABLE` statements instead of a live server.
///
/// Tables are reported in the order the DDL declares them; the schema name
/// passed to the reader methods is ignored.
#[derive(Debug, Clone, Default)]
pub struct DdlCatalog {
    tables: Vec<(String, Vec<ColumnDescriptor>)>,
}

impl DdlCatalog {
    /// Parse a SQL schema string
    pub fn from_sql(sql: &str) -> Result<Self> {
        let dialect = MySqlDialect {};
        let statements = Parser::parse_sql(&dialect, sql)?;

        let mut tables = Vec::new();
        for stmt in statements {
            if let Statement::CreateTable(create_table) = stmt {
                tables.push(extract_table(&create_table));
            }
        }

        debug!("Parsed {} CREATE TABLE statements", tables.len());
        Ok(Self { tables })
    }

    /// Read and parse a SQL schema file
    pub fn from_file(path: &Path) -> Result<Self> {
        info!("Parsing schema: {:?}", path);
        let sql = std::fs::read_to_string(path)?;
        Self::from_sql(&sql)
    }
}

#[async_trait]
impl CatalogReader for DdlCatalog {
    async fn list_tables(&self, _database: &str) -> Result<Vec<String>> {
        Ok(self.tables.iter().map(|(name, _)| name.clone()).collect())
    }

    async fn list_columns(&self, _database: &str, table: &str) -> Result<Vec<ColumnDescriptor>> {
        self.tables
            .iter()
            .find(|(name, _)| name == table)
            .map(|(_, columns)| columns.clone())
            .ok_or_else(|| GenError::Catalog(format!("table `{}` not found in schema file", table)))
    }
}

/// Extract the columns of a CREATE TABLE statement
fn extract_table(create: &sqlparser::ast::CreateTable) -> (String, Vec<ColumnDescriptor>) {
    let name = extract_table_name(&create.name);
    let mut columns: Vec<ColumnDescriptor> = create.columns.iter().map(extract_column).collect();

    for constraint in &create.constraints {
        match constraint {
            TableConstraint::PrimaryKey(PrimaryKeyConstraint {
                columns: pk_cols, ..
            }) => {
                for pk_col in pk_cols {
                    let col_name = extract_ident_from_index_column(pk_col);
                    if let Some(col) = columns.iter_mut().find(|c| c.name == col_name) {
                        col.key = KeyRole::Primary;
                        col.nullable = false;
                    }
                }
            }
            TableConstraint::Unique(UniqueConstraint {
                columns: uniq_cols, ..
            }) if uniq_cols.len() == 1 => {
                let col_name = extract_ident_from_index_column(&uniq_cols[0]);
                mark_key(&mut columns, &col_name, KeyRole::Unique);
            }
            // MySQL reports MUL for the leading column of a non-unique index
            TableConstraint::Unique(UniqueConstraint {
                columns: idx_cols, ..
            })
            | TableConstraint::Index(IndexConstraint {
                columns: idx_cols, ..
            }) => {
                if let Some(first) = idx_cols.first() {
                    let col_name = extract_ident_from_index_column(first);
                    mark_key(&mut columns, &col_name, KeyRole::Multiple);
                }
            }
            _ => {}
        }
    }

    (name, columns)
}

fn mark_key(columns: &mut [ColumnDescriptor], name: &str, role: KeyRole) {
    if let Some(col) = columns.iter_mut().find(|c| c.name == name) {
        if col.key == KeyRole::None {
            col.key = role;
        }
    }
}

/// Translate a column definition into a catalog row
fn extract_column(col_def: &sqlparser::ast::ColumnDef) -> ColumnDescriptor {
    let mut column = ColumnDescriptor::new(
        col_def.name.value.clone(),
        col_def.data_type.to_string().to_lowercase(),
    );

    for option in &col_def.options {
        match &option.option {
            ColumnOption::NotNull => {
                column.nullable = false;
            }
            ColumnOption::Null => {
                column.nullable = true;
            }
            ColumnOption::Default(expr) => {
                column.default = default_literal(expr);
            }
            ColumnOption::PrimaryKey(_) => {
                column.key = KeyRole::Primary;
                column.nullable = false;
            }
            ColumnOption::Unique(_) => {
                if column.key == KeyRole::None {
                    column.key = KeyRole::Unique;
                }
            }
            ColumnOption::Comment(c) => {
                column.comment = Some(c.clone()).filter(|c| !c.is_empty());
            }
            ColumnOption::DialectSpecific(tokens) => {
                let token_str = tokens
                    .iter()
                    .map(|t| t.to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
                    .to_uppercase();
                if token_str.contains("AUTO_INCREMENT") {
                    column.extra = "auto_increment".to_string();
                }
            }
            _ => {}
        }
    }

    column
}

/// Render a DEFAULT expression the way `information_schema.COLUMNS` reports it
fn default_literal(expr: &Expr) -> Option<String> {
    if let Expr::Value(value) = expr {
        match &value.value {
            Value::Null => return None,
            Value::SingleQuotedString(s) | Value::DoubleQuotedString(s) => {
                return Some(s.clone());
            }
            _ => {}
        }
    }
    Some(expr.to_string())
}

/// Extract a simple string from an ObjectName
fn extract_table_name(name: &ObjectName) -> String {
    name.0
        .last()
        .and_then(|part| part.as_ident())
        .map(|ident| ident.value.clone())
        .unwrap_or_default()
}

/// Extract a column name string from an IndexColumn
fn extract_ident_from_index_column(ic: &IndexColumn) -> String {
    match &ic.column.expr {
        Expr::Identifier(ident) => ident.value.clone(),
        other => format!("{}", other),
    }
}
