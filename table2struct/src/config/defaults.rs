//! Default configuration values - single source of truth

/// Default datasource (local MySQL, `test` schema)
pub const DATASOURCE: &str = "mysql://root@localhost:3306/test";

/// Default exclude tables pattern (none)
pub const EXCLUDE_TABLES: &str = "";

/// Default package/namespace embedded in generated files
pub const MODEL: &str = "model";

/// Default formatter command for Go output
pub const GO_FORMATTER: &str = "gofmt";

/// Whether generated source is passed through the formatter by default
pub const FORMAT: bool = true;

/// Whether nullable columns map to nullable wrapper types by default
pub const NULLABLE_TYPES: bool = false;

/// Whether to run in dry-run mode by default
pub const DRY_RUN: bool = false;

/// Prefix for environment variable overrides (`TABLE2STRUCT_*`)
pub const ENV_PREFIX: &str = "TABLE2STRUCT";
