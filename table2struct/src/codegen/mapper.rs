//! Column to field mapping: type, metadata tag, serialization tag, comment

use serde::{Deserialize, Serialize};

use super::naming::{to_snake, to_upper_camel};
use super::type_resolver::{TargetType, TypeResolver};
use crate::catalog::ColumnDescriptor;

/// Source of the serialization (`json`) tag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum JsonTagSource {
    /// The column name as stored
    #[default]
    RawColumn,
    /// snake_case of the generated identifier
    Identifier,
}

/// How a primary key's nullability feeds type selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum PrimaryKeyNullability {
    /// A primary key is never nullable, whatever the catalog flag says
    #[default]
    Derived,
    /// Use the catalog nullability flag as-is
    FromColumn,
}

/// Mapping switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapperOptions {
    /// Map nullable columns to nullable wrapper types
    pub nullable_types: bool,
    pub json_tag: JsonTagSource,
    pub primary_key_nullability: PrimaryKeyNullability,
}

/// One generated field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Upper-camel identifier
    pub name: String,

    /// Column the field binds to
    pub column: String,

    pub target_type: TargetType,

    /// ORM metadata tag, e.g. `column:user_id;AUTO_INCREMENT;primaryKey`
    pub metadata_tag: String,

    /// Serialization key
    pub json_tag: String,

    /// Column comment, omitted when empty
    pub comment: Option<String>,
}

/// Maps catalog columns to fields under a fixed set of options
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldMapper {
    options: MapperOptions,
}

impl FieldMapper {
    pub fn new(options: MapperOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> MapperOptions {
        self.options
    }

    /// Map one column. Never fails: unknown types degrade to `Opaque`.
    pub fn map_column(&self, column: &ColumnDescriptor) -> FieldDescriptor {
        let name = to_upper_camel(&column.name);
        let json_tag = match self.options.json_tag {
            JsonTagSource::RawColumn => column.name.clone(),
            JsonTagSource::Identifier => to_snake(&name),
        };

        FieldDescriptor {
            target_type: TypeResolver::resolve(&column.declared_type, self.wraps_nullable(column)),
            metadata_tag: metadata_tag(column),
            json_tag,
            comment: column.comment.clone().filter(|c| !c.is_empty()),
            column: column.name.clone(),
            name,
        }
    }

    /// Map every column, preserving catalog order
    pub fn map_columns(&self, columns: &[ColumnDescriptor]) -> Vec<FieldDescriptor> {
        columns.iter().map(|c| self.map_column(c)).collect()
    }

    fn wraps_nullable(&self, column: &ColumnDescriptor) -> bool {
        if !self.options.nullable_types || !column.nullable {
            return false;
        }
        match self.options.primary_key_nullability {
            PrimaryKeyNullability::Derived => !column.key.is_primary(),
            PrimaryKeyNullability::FromColumn => true,
        }
    }
}

/// Build the ORM metadata tag for a column.
///
/// Always `column:<name>`, followed in order by `AUTO_INCREMENT`,
/// `primaryKey`, `default:<value>` and `NOT NULL` where they apply.
/// A primary key is implicitly not-null and never carries `NOT NULL`.
pub fn metadata_tag(column: &ColumnDescriptor) -> String {
    let mut clauses = vec![format!("column:{}", column.name)];

    if column.is_auto_increment() {
        clauses.push("AUTO_INCREMENT".to_string());
    }
    if column.key.is_primary() {
        clauses.push("primaryKey".to_string());
    }
    if let Some(default) = column.default.as_deref().filter(|d| !d.is_empty()) {
        clauses.push(format!("default:{}", default));
    }
    if !column.nullable && !column.key.is_primary() {
        clauses.push("NOT NULL".to_string());
    }

    clauses.join(";")
}
