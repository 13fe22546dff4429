//! Output dialects
//!
//! A dialect owns the template for one target language: how a
//! [`RecordDefinition`] turns into source text, how semantic types are
//! spelled, and which canonical formatter cleans the result up. The mapper
//! knows nothing about dialects.

mod go;
mod rust;

pub use go::GoDialect;
pub use rust::RustDialect;

use serde::{Deserialize, Serialize};

use super::{RecordDefinition, TargetType};
use crate::error::FormatError;

/// Target language of the generated files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum DialectKind {
    /// Go structs with `gorm` and `json` struct tags
    #[default]
    Go,
    /// Rust structs with serde attributes
    Rust,
}

/// Template and formatter for one output language
pub trait Dialect: Send + Sync {
    /// File extension, without the dot
    fn extension(&self) -> &'static str;

    /// Spelling of a semantic type
    fn type_name(&self, target: TargetType) -> &'static str;

    /// Render a record to unformatted source
    fn render(&self, record: &RecordDefinition) -> String;

    /// Canonically format rendered source
    fn format(&self, source: &str) -> Result<String, FormatError>;
}

/// Build the dialect for a kind. `formatter` is the external command used
/// by dialects that shell out.
pub fn dialect_for(kind: DialectKind, formatter: &str) -> Box<dyn Dialect> {
    match kind {
        DialectKind::Go => Box::new(GoDialect::with_formatter(formatter)),
        DialectKind::Rust => Box::new(RustDialect),
    }
}

/// Collapse line breaks so a comment stays on one line
pub(crate) fn single_line(comment: &str) -> String {
    comment
        .split(['\r', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
