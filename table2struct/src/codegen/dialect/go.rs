//! Go structs carrying `gorm` and `json` struct tags

use std::io::Write;
use std::process::{Command, Stdio};

use super::{single_line, Dialect};
use crate::codegen::{RecordDefinition, TargetType};
use crate::config::defaults;
use crate::error::FormatError;

/// Go output, formatted by piping through `gofmt` (or a configured command)
#[derive(Debug, Clone)]
pub struct GoDialect {
    formatter: String,
}

impl Default for GoDialect {
    fn default() -> Self {
        Self::with_formatter(defaults::GO_FORMATTER)
    }
}

impl GoDialect {
    /// Use `formatter` (program plus arguments) to format rendered source
    pub fn with_formatter(formatter: &str) -> Self {
        Self {
            formatter: formatter.to_string(),
        }
    }

    fn imports(&self, record: &RecordDefinition) -> Vec<&'static str> {
        let mut imports = Vec::new();
        if record
            .fields
            .iter()
            .any(|f| f.target_type.is_nullable_wrapper())
        {
            imports.push("database/sql");
        }
        if record
            .fields
            .iter()
            .any(|f| f.target_type == TargetType::Timestamp)
        {
            imports.push("time");
        }
        imports
    }
}

impl Dialect for GoDialect {
    fn extension(&self) -> &'static str {
        "go"
    }

    fn type_name(&self, target: TargetType) -> &'static str {
        match target {
            TargetType::Int8 => "int8",
            TargetType::Int64 => "int64",
            TargetType::Float64 => "float64",
            TargetType::Text => "string",
            TargetType::Timestamp => "time.Time",
            TargetType::Opaque => "interface{}",
            TargetType::NullInt64 => "sql.NullInt64",
            TargetType::NullFloat64 => "sql.NullFloat64",
            TargetType::NullText => "sql.NullString",
            TargetType::NullTimestamp => "sql.NullTime",
        }
    }

    fn render(&self, record: &RecordDefinition) -> String {
        let ident = record.identifier();
        let mut code = String::new();

        code.push_str(&format!("package {}\n\n", record.namespace));

        let imports = self.imports(record);
        if !imports.is_empty() {
            code.push_str("import (\n");
            for import in imports {
                code.push_str(&format!("\t\"{}\"\n", import));
            }
            code.push_str(")\n\n");
        }

        code.push_str(&format!(
            "// {} struct is a row record of the {} table in the {} database\n",
            ident, record.table, record.database
        ));
        code.push_str(&format!("type {} struct {{\n", ident));
        for field in &record.fields {
            code.push_str(&format!(
                "\t{} {} `gorm:\"{}\" json:\"{}\"`",
                field.name,
                self.type_name(field.target_type),
                field.metadata_tag,
                field.json_tag
            ));
            if let Some(comment) = &field.comment {
                code.push_str(&format!(" // {}", single_line(comment)));
            }
            code.push('\n');
        }
        code.push_str("}\n\n");

        code.push_str(&format!(
            "const tableName{} = \"{}\"\n\n",
            ident, record.table
        ));
        code.push_str("// TableName sets the insert table name for this struct type\n");
        code.push_str(&format!("func (p {}) TableName() string {{\n", ident));
        code.push_str(&format!("\treturn tableName{}\n", ident));
        code.push_str("}\n");

        code
    }

    fn format(&self, source: &str) -> Result<String, FormatError> {
        let mut parts = self.formatter.split_whitespace();
        let program = parts.next().ok_or_else(|| FormatError::Spawn {
            command: self.formatter.clone(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty command"),
        })?;

        let spawn_err = |source| FormatError::Spawn {
            command: self.formatter.clone(),
            source,
        };

        let mut child = Command::new(program)
            .args(parts)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_err)?;

        // Feed stdin on its own thread while stdout/stderr drain, so a formatter
        // that streams output cannot fill its pipe and stall. A formatter that
        // exits early closes the pipe; its exit status decides.
        let stdin = child.stdin.take();
        let (written, output) = std::thread::scope(|scope| {
            let writer = stdin.map(|mut stdin| {
                scope.spawn(move || match stdin.write_all(source.as_bytes()) {
                    Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => Ok(()),
                    other => other,
                })
            });
            let output = child.wait_with_output();
            let written = match writer {
                Some(handle) => handle
                    .join()
                    .unwrap_or_else(|_| Err(std::io::Error::other("stdin writer panicked"))),
                None => Ok(()),
            };
            (written, output)
        });

        let output = output.map_err(spawn_err)?;
        written.map_err(spawn_err)?;
        if !output.status.success() {
            return Err(FormatError::Rejected {
                command: self.formatter.clone(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        String::from_utf8(output.stdout).map_err(|e| FormatError::Rejected {
            command: self.formatter.clone(),
            stderr: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ColumnDescriptor;
    use crate::codegen::{FieldMapper, MapperOptions};

    fn record(columns: Vec<ColumnDescriptor>, options: MapperOptions) -> RecordDefinition {
        let fields = FieldMapper::new(options).map_columns(&columns);
        RecordDefinition::assemble("order_items", "shop", "model", fields, None)
    }

    #[test]
    fn test_render_fields_and_accessor() {
        let record = record(
            vec![
                ColumnDescriptor::new("user_id", "bigint")
                    .not_null()
                    .primary_key()
                    .auto_increment(),
                ColumnDescriptor::new("note", "text").with_comment("free\ntext"),
            ],
            MapperOptions::default(),
        );
        let code = GoDialect::default().render(&record);

        assert!(code.starts_with("package model\n"));
        assert!(code.contains(
            "// OrderItems struct is a row record of the order_items table in the shop database"
        ));
        assert!(code.contains("type OrderItems struct {"));
        assert!(code.contains(
            "\tUserId int64 `gorm:\"column:user_id;AUTO_INCREMENT;primaryKey\" json:\"user_id\"`\n"
        ));
        assert!(code.contains(
            "\tNote string `gorm:\"column:note\" json:\"note\"` // free text\n"
        ));
        assert!(code.contains("const tableNameOrderItems = \"order_items\""));
        assert!(code.contains("func (p OrderItems) TableName() string {"));
        assert!(code.contains("\treturn tableNameOrderItems\n"));
        assert!(!code.contains("import"));
    }

    #[test]
    fn test_imports_follow_types() {
        let plain = record(
            vec![ColumnDescriptor::new("created_at", "datetime")],
            MapperOptions::default(),
        );
        let code = GoDialect::default().render(&plain);
        assert!(code.contains("\t\"time\"\n"));
        assert!(!code.contains("database/sql"));
        assert!(code.contains("CreatedAt time.Time"));

        let wrapped = record(
            vec![ColumnDescriptor::new("created_at", "datetime")],
            MapperOptions {
                nullable_types: true,
                ..Default::default()
            },
        );
        let code = GoDialect::default().render(&wrapped);
        assert!(code.contains("\t\"database/sql\"\n"));
        assert!(!code.contains("\t\"time\"\n"));
        assert!(code.contains("CreatedAt sql.NullTime"));
    }

    #[test]
    fn test_empty_record() {
        let record = RecordDefinition::assemble("audit_log", "shop", "model", vec![], None);
        let code = GoDialect::default().render(&record);
        assert!(code.contains("type AuditLog struct {\n}\n"));
        assert!(code.contains("func (p AuditLog) TableName() string"));
    }

    #[test]
    fn test_type_names() {
        let go = GoDialect::default();
        assert_eq!(go.type_name(TargetType::Int8), "int8");
        assert_eq!(go.type_name(TargetType::Opaque), "interface{}");
        assert_eq!(go.type_name(TargetType::NullText), "sql.NullString");
    }

    #[test]
    fn test_missing_formatter_is_spawn_error() {
        let go = GoDialect::with_formatter("table2struct-no-such-formatter");
        let err = go.format("package model\n").unwrap_err();
        assert!(matches!(err, FormatError::Spawn { .. }));

        let err = GoDialect::with_formatter("  ").format("package model\n").unwrap_err();
        assert!(matches!(err, FormatError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_formatter_output_is_used() {
        let go = GoDialect::with_formatter("cat");
        assert_eq!(go.format("package model\n").unwrap(), "package model\n");

        let go = GoDialect::with_formatter("false");
        let err = go.format("package model\n").unwrap_err();
        assert!(matches!(err, FormatError::Rejected { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_streaming_formatter_with_large_input() {
        // Far beyond a pipe buffer; `cat` echoes while still reading
        let mut source = String::from("package model\n");
        while source.len() < 1 << 20 {
            source.push_str("// padding line for a formatter that streams its output\n");
        }

        let (tx, rx) = std::sync::mpsc::channel();
        let input = source.clone();
        std::thread::spawn(move || {
            let _ = tx.send(GoDialect::with_formatter("cat").format(&input));
        });
        let formatted = rx
            .recv_timeout(std::time::Duration::from_secs(30))
            .expect("formatter stalled")
            .unwrap();
        assert_eq!(formatted, source);
    }
}
