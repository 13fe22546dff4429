//! Record assembly: one table's worth of mapped fields

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::naming::to_upper_camel;
use super::FieldDescriptor;

/// In-memory definition of one table, ready for emission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordDefinition {
    /// Table name as stored
    pub table: String,

    /// Schema the table lives in
    pub database: String,

    /// Fields in catalog order
    pub fields: Vec<FieldDescriptor>,

    /// Package/module name embedded in the output
    pub namespace: String,

    /// Directory the file lands in; working directory when unset
    pub output_dir: Option<PathBuf>,
}

impl RecordDefinition {
    /// Assemble a record. No validation happens here.
    pub fn assemble(
        table: impl Into<String>,
        database: impl Into<String>,
        namespace: impl Into<String>,
        fields: Vec<FieldDescriptor>,
        output_dir: Option<&Path>,
    ) -> Self {
        Self {
            table: table.into(),
            database: database.into(),
            fields,
            namespace: namespace.into(),
            output_dir: output_dir.map(Path::to_path_buf),
        }
    }

    /// Generated type name: upper-camel of the table name
    pub fn identifier(&self) -> String {
        to_upper_camel(&self.table)
    }
}
