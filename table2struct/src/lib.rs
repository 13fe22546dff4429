//! table2struct: Generate struct definitions from MySQL catalog metadata
//!
//! This crate provides both a CLI tool and a library. It reads table and
//! column descriptors from a catalog (a live MySQL server's
//! `information_schema`, or an offline DDL file parsed with `sqlparser-rs`)
//! and writes one source file per table:
//!
//! - Go structs with `gorm:"..."` and `json:"..."` struct tags (default)
//! - Rust structs with serde attributes
//!
//! # CLI Usage
//!
//! ```bash
//! table2struct --datasource 'root:@tcp(localhost:3306)/shop' --database shop --dir ./model
//! table2struct --schema-file schema.sql --dialect rust --dir src/models
//! ```
//!
//! # Library Usage
//!
//! ```rust,ignore
//! let report = table2struct::GeneratorBuilder::new("shop")
//!     .schema_file("schema.sql")
//!     .output_dir("model")
//!     .generate()
//!     .await?;
//! println!("generated {} tables", report.count());
//! ```

pub mod catalog;
pub mod codegen;
pub mod config;
pub mod error;

use std::path::Path;

use tracing::{info, warn};

pub use catalog::{CatalogReader, ColumnDescriptor, DdlCatalog, KeyRole, StaticCatalog};
pub use codegen::{
    CodeGenerator, DialectKind, ErrorPolicy, FieldDescriptor, GenerationReport, JsonTagSource,
    MapperOptions, PrimaryKeyNullability, RecordDefinition, TargetType,
};
pub use config::GenConfig;
pub use error::{GenError, Result};

/// Open the catalog a configuration points at
pub async fn open_catalog(config: &GenConfig) -> Result<Box<dyn CatalogReader>> {
    if let Some(path) = &config.schema_file {
        return Ok(Box::new(DdlCatalog::from_file(path)?));
    }

    match &config.datasource {
        #[cfg(feature = "mysql")]
        Some(datasource) => Ok(Box::new(catalog::MySqlCatalog::connect(datasource).await?)),
        #[cfg(not(feature = "mysql"))]
        Some(_) => Err(GenError::Config(
            "datasource requires the `mysql` feature".into(),
        )),
        None => Err(GenError::Validation(
            "one of datasource or schema_file is required".into(),
        )),
    }
}

/// Main entry point for code generation
pub async fn generate(config: &GenConfig) -> Result<GenerationReport> {
    config.validate()?;
    let catalog = open_catalog(config).await?;
    generate_with_catalog(config, catalog.as_ref()).await
}

/// Run generation against an already-open catalog, closing it afterwards
/// whether or not the run succeeded
pub async fn generate_with_catalog(
    config: &GenConfig,
    catalog: &dyn CatalogReader,
) -> Result<GenerationReport> {
    info!(
        "Generating {:?} structs for database {:?}",
        config.dialect, config.database
    );
    let result = CodeGenerator::new(config.clone()).run(catalog).await;
    if let Err(e) = catalog.close().await {
        warn!("Closing catalog failed: {}", e);
    }
    result
}

/// Builder pattern for easy configuration in build scripts and tools
pub struct GeneratorBuilder {
    config: GenConfig,
}

impl GeneratorBuilder {
    /// Create a new builder for the given schema
    pub fn new(database: &str) -> Self {
        Self {
            config: GenConfig::for_database(database),
        }
    }

    /// Read the catalog from a live server
    pub fn datasource(mut self, datasource: &str) -> Self {
        self.config.datasource = Some(datasource.to_string());
        self
    }

    /// Read the catalog from a DDL file
    pub fn schema_file(mut self, path: impl AsRef<Path>) -> Self {
        self.config.schema_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Generate a single table
    pub fn table(mut self, table: &str) -> Self {
        self.config.table = table.to_string();
        self
    }

    /// Set tables to exclude
    pub fn exclude_tables(mut self, tables: &[&str]) -> Self {
        self.config.exclude_tables = tables.join(",");
        self
    }

    /// Set the output directory
    pub fn output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.config.dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Set the package/module name embedded in generated files
    pub fn package(mut self, name: &str) -> Self {
        self.config.model = name.to_string();
        self
    }

    pub fn dialect(mut self, dialect: DialectKind) -> Self {
        self.config.dialect = dialect;
        self
    }

    /// Map nullable columns to nullable wrapper types
    pub fn nullable_types(mut self) -> Self {
        self.config.nullable_types = true;
        self
    }

    pub fn json_tag(mut self, source: JsonTagSource) -> Self {
        self.config.json_tag = source;
        self
    }

    /// Skip failing tables instead of aborting
    pub fn keep_going(mut self) -> Self {
        self.config.error_policy = ErrorPolicy::CollectAndReport;
        self
    }

    /// Write unformatted source
    pub fn without_formatting(mut self) -> Self {
        self.config.format = false;
        self
    }

    /// Enable dry run mode (render without writing files)
    pub fn dry_run(mut self) -> Self {
        self.config.dry_run = true;
        self
    }

    pub fn build(self) -> GenConfig {
        self.config
    }

    /// Generate the code
    pub async fn generate(self) -> Result<GenerationReport> {
        generate(&self.config).await
    }
}
