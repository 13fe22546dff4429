//! Configuration settings for table2struct

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::defaults;
use crate::codegen::{DialectKind, ErrorPolicy, JsonTagSource, MapperOptions, PrimaryKeyNullability};
use crate::error::{GenError, Result};

/// Main configuration struct for code generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenConfig {
    /// MySQL datasource, URL (`mysql://...`) or driver DSN (`user@tcp(host:port)/db`)
    #[serde(default)]
    pub datasource: Option<String>,

    /// Offline catalog: a DDL file of CREATE TABLE statements
    #[serde(default)]
    pub schema_file: Option<PathBuf>,

    /// Schema to introspect
    #[serde(default)]
    pub database: String,

    /// Single table to generate; empty means every table in the schema
    #[serde(default)]
    pub table: String,

    /// Tables to skip (comma-separated)
    #[serde(default = "default_exclude_tables")]
    pub exclude_tables: String,

    /// Output directory; files land in the working directory when unset
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// Package (Go) or module (Rust) name embedded in generated files
    #[serde(default = "default_model")]
    pub model: String,

    /// Output dialect
    #[serde(default)]
    pub dialect: DialectKind,

    /// External formatter command for dialects that shell out (Go)
    #[serde(default = "default_formatter")]
    pub formatter: String,

    /// Run the formatter after rendering
    #[serde(default = "default_format")]
    pub format: bool,

    /// Map nullable columns to nullable wrapper types
    #[serde(default = "default_nullable_types")]
    pub nullable_types: bool,

    /// Where the serialization tag comes from
    #[serde(default)]
    pub json_tag: JsonTagSource,

    /// How a primary key's nullability is decided
    #[serde(default)]
    pub primary_key_nullability: PrimaryKeyNullability,

    /// Abort on the first failing table, or keep going and report
    #[serde(default)]
    pub error_policy: ErrorPolicy,

    /// Dry run mode - render without writing files
    #[serde(default = "default_dry_run")]
    pub dry_run: bool,

    /// Log level (trace, debug, info, warn, error)
    /// Can be overridden by RUST_LOG env var
    #[serde(default)]
    pub log_level: Option<String>,
}

// Default value functions for serde
fn default_exclude_tables() -> String {
    defaults::EXCLUDE_TABLES.to_string()
}
fn default_model() -> String {
    defaults::MODEL.to_string()
}
fn default_formatter() -> String {
    defaults::GO_FORMATTER.to_string()
}
fn default_format() -> bool {
    defaults::FORMAT
}
fn default_nullable_types() -> bool {
    defaults::NULLABLE_TYPES
}
fn default_dry_run() -> bool {
    defaults::DRY_RUN
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            datasource: None,
            schema_file: None,
            database: String::new(),
            table: String::new(),
            exclude_tables: default_exclude_tables(),
            dir: None,
            model: default_model(),
            dialect: DialectKind::default(),
            formatter: default_formatter(),
            format: default_format(),
            nullable_types: default_nullable_types(),
            json_tag: JsonTagSource::default(),
            primary_key_nullability: PrimaryKeyNullability::default(),
            error_policy: ErrorPolicy::default(),
            dry_run: default_dry_run(),
            log_level: None,
        }
    }
}

impl GenConfig {
    /// Create a default config for the given schema
    pub fn for_database(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            ..Default::default()
        }
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: GenConfig = toml::from_str(&content).map_err(|e| {
            GenError::Config(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(config)
    }

    /// Load configuration using config-rs (file + environment variables)
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        } else {
            builder = builder.add_source(File::with_name("table2struct").required(false));
        }

        // Override with environment variables (TABLE2STRUCT_*)
        builder = builder.add_source(Environment::with_prefix(defaults::ENV_PREFIX));

        let config: GenConfig = builder.build()?.try_deserialize()?;

        Ok(config)
    }

    /// Mapper switches carried by this configuration
    pub fn mapper_options(&self) -> MapperOptions {
        MapperOptions {
            nullable_types: self.nullable_types,
            json_tag: self.json_tag,
            primary_key_nullability: self.primary_key_nullability,
        }
    }

    /// Tables listed in `exclude_tables`
    pub fn excluded(&self) -> Vec<&str> {
        self.exclude_tables
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        match (&self.datasource, &self.schema_file) {
            (Some(_), Some(_)) => {
                return Err(GenError::Validation(
                    "datasource and schema_file are mutually exclusive".into(),
                ));
            }
            (None, None) => {
                return Err(GenError::Validation(
                    "one of datasource or schema_file is required".into(),
                ));
            }
            (None, Some(path)) if !path.exists() => {
                return Err(GenError::Validation(format!(
                    "Schema file not found: {}",
                    path.display()
                )));
            }
            _ => {}
        }

        // A DDL file has no schema qualifier, so the name is only a label there
        if self.database.trim().is_empty() && self.schema_file.is_none() {
            return Err(GenError::Validation("database is required".into()));
        }

        if self.model.trim().is_empty() {
            return Err(GenError::Validation("model must not be empty".into()));
        }

        Ok(())
    }
}
