//! Emitter: render a record through a dialect and write it to disk

use std::fs;
use std::path::PathBuf;

use tracing::{debug, warn};

use super::dialect::Dialect;
use super::RecordDefinition;
use crate::error::{GenError, Result};

/// Renders records and writes one file per record.
///
/// Writes go straight to the target path with no temp-file swap: a failure
/// mid-write leaves a truncated file behind.
pub struct Emitter {
    dialect: Box<dyn Dialect>,
    format: bool,
}

impl Emitter {
    pub fn new(dialect: Box<dyn Dialect>) -> Self {
        Self {
            dialect,
            format: true,
        }
    }

    /// Skip the formatter and emit rendered text as-is
    pub fn without_formatting(mut self) -> Self {
        self.format = false;
        self
    }

    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    /// `<table>.<ext>`, under the record's output directory when it has one
    pub fn output_path(&self, record: &RecordDefinition) -> PathBuf {
        let file_name = format!("{}.{}", record.table, self.dialect.extension());
        match &record.output_dir {
            Some(dir) => dir.join(file_name),
            None => PathBuf::from(file_name),
        }
    }

    /// Render and format a record. Formatter failures fall back to the
    /// unformatted text.
    pub fn render(&self, record: &RecordDefinition) -> Result<String> {
        if record.identifier().is_empty() {
            return Err(GenError::InvalidTableName(record.table.clone()));
        }

        let source = self.dialect.render(record);
        if !self.format {
            return Ok(source);
        }

        match self.dialect.format(&source) {
            Ok(formatted) => Ok(formatted),
            Err(e) => {
                warn!("Formatting {} failed, writing unformatted source: {}", record.table, e);
                Ok(source)
            }
        }
    }

    /// Render a record and write it, creating the output directory if needed
    pub fn emit(&self, record: &RecordDefinition) -> Result<PathBuf> {
        let source = self.render(record)?;
        let path = self.output_path(record);

        if let Some(dir) = &record.output_dir {
            if !dir.as_os_str().is_empty() && !dir.is_dir() {
                fs::create_dir_all(dir).map_err(|source| GenError::CreateDir {
                    path: dir.clone(),
                    source,
                })?;
            }
        }

        debug!("Writing {} -> {}", record.identifier(), path.display());
        fs::write(&path, source)?;
        Ok(path)
    }
}
