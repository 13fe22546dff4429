//! Error types for table2struct

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for table2struct operations
pub type Result<T> = std::result::Result<T, GenError>;

/// Errors that can occur while reading the catalog or generating files
#[derive(Error, Debug)]
pub enum GenError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Catalog query failed: {0}")]
    Catalog(String),

    #[error("Failed to parse SQL schema: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to create output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid table name: {0:?}")]
    InvalidTableName(String),

    #[error("Table `{table}` failed after {completed} completed table(s): {source}")]
    Table {
        table: String,
        completed: usize,
        #[source]
        source: Box<GenError>,
    },
}

impl GenError {
    /// Wrap this error with the table it was raised for
    pub fn for_table(self, table: impl Into<String>, completed: usize) -> Self {
        GenError::Table {
            table: table.into(),
            completed,
            source: Box::new(self),
        }
    }
}

impl From<sqlparser::parser::ParserError> for GenError {
    fn from(err: sqlparser::parser::ParserError) -> Self {
        GenError::Parse(err.to_string())
    }
}

impl From<config::ConfigError> for GenError {
    fn from(err: config::ConfigError) -> Self {
        GenError::Config(err.to_string())
    }
}

#[cfg(feature = "mysql")]
impl From<mysql_async::Error> for GenError {
    fn from(err: mysql_async::Error) -> Self {
        GenError::Catalog(err.to_string())
    }
}

/// Failure of the post-render source formatter. Never fatal.
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("formatter `{command}` could not be run: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("formatter `{command}` rejected the source: {stderr}")]
    Rejected { command: String, stderr: String },

    #[error("generated source does not parse: {0}")]
    Syntax(String),
}
