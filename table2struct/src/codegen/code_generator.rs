//! Main code generator orchestrator

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::dialect::dialect_for;
use super::{Emitter, FieldMapper, RecordDefinition};
use crate::catalog::{CatalogReader, ColumnDescriptor};
use crate::config::GenConfig;
use crate::error::{GenError, Result};

/// What happens when one table fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Stop the run at the first failing table
    #[default]
    AbortOnFirst,
    /// Record the failure and move on to the next table
    CollectAndReport,
}

/// A table that could not be generated
#[derive(Debug)]
pub struct TableFailure {
    pub table: String,
    pub error: GenError,
}

/// Outcome of a generation run
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Files written (or, in dry-run mode, that would have been written)
    pub generated: Vec<PathBuf>,

    /// Tables skipped under [`ErrorPolicy::CollectAndReport`]
    pub failures: Vec<TableFailure>,
}

impl GenerationReport {
    /// Number of tables completed
    pub fn count(&self) -> usize {
        self.generated.len()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Main code generator: catalog -> mapper -> assembler -> emitter, one table at a time
pub struct CodeGenerator {
    config: GenConfig,
    mapper: FieldMapper,
    emitter: Emitter,
}

impl CodeGenerator {
    /// Create a new code generator with the given configuration
    pub fn new(config: GenConfig) -> Self {
        let mut emitter = Emitter::new(dialect_for(config.dialect, &config.formatter));
        if !config.format {
            emitter = emitter.without_formatting();
        }
        Self {
            mapper: FieldMapper::new(config.mapper_options()),
            emitter,
            config,
        }
    }

    pub fn config(&self) -> &GenConfig {
        &self.config
    }

    pub fn mapper(&self) -> &FieldMapper {
        &self.mapper
    }

    pub fn emitter(&self) -> &Emitter {
        &self.emitter
    }

    /// Tables to process: the configured table, or every table in the schema,
    /// minus exclusions
    pub async fn select_tables(&self, catalog: &dyn CatalogReader) -> Result<Vec<String>> {
        let tables = if self.config.table.trim().is_empty() {
            catalog.list_tables(&self.config.database).await?
        } else {
            vec![self.config.table.trim().to_string()]
        };

        let excluded = self.config.excluded();
        let selected: Vec<String> = tables
            .into_iter()
            .filter(|t| !excluded.contains(&t.as_str()))
            .collect();
        debug!(
            "Selected {} tables (exclude={})",
            selected.len(),
            self.config.exclude_tables
        );
        Ok(selected)
    }

    /// Map columns and assemble the record for one table
    pub fn build_record(&self, table: &str, columns: &[ColumnDescriptor]) -> RecordDefinition {
        RecordDefinition::assemble(
            table,
            self.config.database.as_str(),
            self.config.model.as_str(),
            self.mapper.map_columns(columns),
            self.config.dir.as_deref(),
        )
    }

    /// Generate one table, returning the path written
    pub async fn generate_table(
        &self,
        catalog: &dyn CatalogReader,
        table: &str,
    ) -> Result<PathBuf> {
        info!("Gen {}", table);
        let columns = catalog.list_columns(&self.config.database, table).await?;
        let record = self.build_record(table, &columns);

        if self.config.dry_run {
            self.emitter.render(&record)?;
            return Ok(self.emitter.output_path(&record));
        }
        self.emitter.emit(&record)
    }

    /// Run the whole pipeline against a catalog
    pub async fn run(&self, catalog: &dyn CatalogReader) -> Result<GenerationReport> {
        let tables = self.select_tables(catalog).await?;
        let mut report = GenerationReport::default();

        for table in &tables {
            match self.generate_table(catalog, table).await {
                Ok(path) => report.generated.push(path),
                Err(error) => match self.config.error_policy {
                    ErrorPolicy::AbortOnFirst => {
                        warn!(
                            "Aborting at table {} after {} completed",
                            table,
                            report.count()
                        );
                        return Err(error.for_table(table.as_str(), report.count()));
                    }
                    ErrorPolicy::CollectAndReport => {
                        warn!("Skipping table {}: {}", table, error);
                        report.failures.push(TableFailure {
                            table: table.clone(),
                            error,
                        });
                    }
                },
            }
        }

        info!("Over! total {}", report.count());
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;

    fn config() -> GenConfig {
        GenConfig {
            format: false,
            dry_run: true,
            ..GenConfig::for_database("shop")
        }
    }

    fn catalog() -> StaticCatalog {
        StaticCatalog::new()
            .with_table("users", vec![ColumnDescriptor::new("id", "bigint")])
            .with_table("orders", vec![ColumnDescriptor::new("id", "bigint")])
            .with_table("migrations", vec![])
    }

    #[tokio::test]
    async fn test_select_all_minus_excluded() {
        let generator = CodeGenerator::new(GenConfig {
            exclude_tables: "migrations".into(),
            ..config()
        });
        let tables = generator.select_tables(&catalog()).await.unwrap();
        assert_eq!(tables, vec!["orders", "users"]);
    }

    #[tokio::test]
    async fn test_select_explicit_table() {
        let generator = CodeGenerator::new(GenConfig {
            table: "users".into(),
            ..config()
        });
        let tables = generator.select_tables(&catalog()).await.unwrap();
        assert_eq!(tables, vec!["users"]);
    }

    #[tokio::test]
    async fn test_dry_run_reports_paths() {
        let generator = CodeGenerator::new(config());
        let report = generator.run(&catalog()).await.unwrap();
        assert_eq!(report.count(), 3);
        assert!(report.is_success());
        assert_eq!(report.generated[0], PathBuf::from("migrations.go"));
        assert!(!PathBuf::from("migrations.go").exists());
    }

    #[test]
    fn test_build_record_uses_config() {
        let generator = CodeGenerator::new(GenConfig {
            model: "entity".into(),
            dir: Some(PathBuf::from("gen")),
            ..config()
        });
        let record = generator.build_record("users", &[ColumnDescriptor::new("id", "bigint")]);
        assert_eq!(record.namespace, "entity");
        assert_eq!(record.database, "shop");
        assert_eq!(record.output_dir, Some(PathBuf::from("gen")));
        assert_eq!(record.fields.len(), 1);
    }
}
