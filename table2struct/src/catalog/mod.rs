//! Catalog readers: where table and column descriptors come from

mod datasource;
mod ddl;
#[cfg(feature = "mysql")]
mod mysql;

pub use datasource::*;
pub use ddl::*;
#[cfg(feature = "mysql")]
pub use mysql::*;

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{GenError, Result};

/// Role a column plays in the table's keys, as reported by `COLUMN_KEY`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyRole {
    #[default]
    None,
    Primary,
    Unique,
    Multiple,
}

impl KeyRole {
    /// Parse the catalog's key-role marker (`PRI`, `UNI`, `MUL` or empty)
    pub fn from_catalog(marker: &str) -> Self {
        match marker.trim().to_ascii_uppercase().as_str() {
            "PRI" => KeyRole::Primary,
            "UNI" => KeyRole::Unique,
            "MUL" => KeyRole::Multiple,
            _ => KeyRole::None,
        }
    }

    pub fn is_primary(self) -> bool {
        self == KeyRole::Primary
    }
}

/// One raw catalog row describing a column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name as stored
    pub name: String,

    /// Declared type, possibly with a length/precision suffix (`varchar(255)`)
    pub declared_type: String,

    /// Whether the column accepts NULL
    pub nullable: bool,

    /// Key role of the column
    pub key: KeyRole,

    /// Default value expression, if any
    pub default: Option<String>,

    /// Extra attributes (`auto_increment`, `on update ...`)
    pub extra: String,

    /// Free-text column comment
    pub comment: Option<String>,
}

impl ColumnDescriptor {
    /// Minimal descriptor: nullable, no key, no default, no extras
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            nullable: true,
            key: KeyRole::None,
            default: None,
            extra: String::new(),
            comment: None,
        }
    }

    /// Build a descriptor from the string columns of `information_schema.COLUMNS`
    pub fn from_catalog_row(
        name: String,
        declared_type: String,
        is_nullable: &str,
        column_key: &str,
        default: Option<String>,
        extra: String,
        comment: Option<String>,
    ) -> Self {
        Self {
            name,
            declared_type,
            nullable: is_nullable.trim().eq_ignore_ascii_case("YES"),
            key: KeyRole::from_catalog(column_key),
            default,
            extra,
            comment: comment.filter(|c| !c.is_empty()),
        }
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.key = KeyRole::Primary;
        self
    }

    pub fn auto_increment(mut self) -> Self {
        self.extra = "auto_increment".to_string();
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Check if the extra attributes flag this column as auto-increment
    pub fn is_auto_increment(&self) -> bool {
        self.extra.to_ascii_lowercase().contains("auto_increment")
    }
}

/// Source of table and column metadata
#[async_trait]
pub trait CatalogReader: Send + Sync {
    /// Names of the tables in a schema
    async fn list_tables(&self, database: &str) -> Result<Vec<String>>;

    /// Columns of one table, in catalog order
    async fn list_columns(&self, database: &str, table: &str) -> Result<Vec<ColumnDescriptor>>;

    /// Release connections held by the reader. Called once, after the last query.
    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// In-memory catalog, keyed by table name
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    tables: BTreeMap<String, Vec<ColumnDescriptor>>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a table
    pub fn with_table(mut self, name: impl Into<String>, columns: Vec<ColumnDescriptor>) -> Self {
        self.tables.insert(name.into(), columns);
        self
    }
}

#[async_trait]
impl CatalogReader for StaticCatalog {
    async fn list_tables(&self, _database: &str) -> Result<Vec<String>> {
        Ok(self.tables.keys().cloned().collect())
    }

    async fn list_columns(&self, _database: &str, table: &str) -> Result<Vec<ColumnDescriptor>> {
        self.tables
            .get(table)
            .cloned()
            .ok_or_else(|| GenError::Catalog(format!("table `{}` not found", table)))
    }
}
