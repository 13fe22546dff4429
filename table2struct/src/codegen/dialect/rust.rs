//! Rust structs with serde attributes, formatted with prettyplease

use super::{single_line, Dialect};
use crate::codegen::naming::escape_field_name;
use crate::codegen::{RecordDefinition, TargetType};
use crate::error::FormatError;

/// Rust output. Only serde's derives are emitted, so the metadata tag rides
/// in each field's doc comment rather than an attribute no derive owns.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustDialect;

impl Dialect for RustDialect {
    fn extension(&self) -> &'static str {
        "rs"
    }

    fn type_name(&self, target: TargetType) -> &'static str {
        match target {
            TargetType::Int8 => "i8",
            TargetType::Int64 => "i64",
            TargetType::Float64 => "f64",
            TargetType::Text => "String",
            TargetType::Timestamp => "chrono::NaiveDateTime",
            TargetType::Opaque => "serde_json::Value",
            TargetType::NullInt64 => "Option<i64>",
            TargetType::NullFloat64 => "Option<f64>",
            TargetType::NullText => "Option<String>",
            TargetType::NullTimestamp => "Option<chrono::NaiveDateTime>",
        }
    }

    fn render(&self, record: &RecordDefinition) -> String {
        let ident = record.identifier();
        let mut code = String::new();

        // prettyplease drops plain comments, so everything worth keeping is a doc comment
        code.push_str(&format!(
            "//! `{}` models generated from the `{}` database\n\n",
            record.namespace, record.database
        ));
        code.push_str("use serde::{Deserialize, Serialize};\n\n");

        code.push_str(&format!(
            "/// {} is a row record of the `{}` table in the `{}` database\n",
            ident, record.table, record.database
        ));
        code.push_str("#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]\n");
        code.push_str(&format!("pub struct {} {{\n", ident));
        for field in &record.fields {
            if let Some(comment) = &field.comment {
                code.push_str(&format!("    /// {}\n", single_line(comment)));
                code.push_str("    ///\n");
            }
            code.push_str(&format!(
                "    /// ORM tag: `{}`\n",
                single_line(&field.metadata_tag)
            ));
            code.push_str(&format!("    #[serde(rename = {:?})]\n", field.json_tag));
            code.push_str(&format!(
                "    pub {}: {},\n",
                escape_field_name(&field.column),
                self.type_name(field.target_type)
            ));
        }
        code.push_str("}\n\n");

        code.push_str(&format!("impl {} {{\n", ident));
        code.push_str(&format!(
            "    pub const TABLE_NAME: &'static str = {:?};\n\n",
            record.table
        ));
        code.push_str("    /// Storage name of the table backing this record\n");
        code.push_str("    pub fn table_name() -> &'static str {\n");
        code.push_str("        Self::TABLE_NAME\n");
        code.push_str("    }\n");
        code.push_str("}\n");

        code
    }

    fn format(&self, source: &str) -> Result<String, FormatError> {
        let file = syn::parse_file(source).map_err(|e| FormatError::Syntax(e.to_string()))?;
        Ok(prettyplease::unparse(&file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ColumnDescriptor;
    use crate::codegen::FieldMapper;

    fn users() -> RecordDefinition {
        let columns = vec![
            ColumnDescriptor::new("user_id", "bigint")
                .not_null()
                .primary_key()
                .auto_increment(),
            ColumnDescriptor::new("type", "varchar(16)")
                .not_null()
                .with_comment("account \"kind\""),
            ColumnDescriptor::new("createdAt", "timestamp"),
        ];
        let fields = FieldMapper::default().map_columns(&columns);
        RecordDefinition::assemble("users", "shop", "model", fields, None)
    }

    #[test]
    fn test_render_and_format() {
        let dialect = RustDialect;
        let rendered = dialect.render(&users());
        let code = dialect.format(&rendered).unwrap();

        assert!(code.contains("pub struct Users {"));
        assert!(code.contains("pub user_id: i64,"));
        assert!(code.contains("pub r#type: String,"));
        assert!(code.contains("pub created_at: chrono::NaiveDateTime,"));
        assert!(code.contains("/// ORM tag: `column:user_id;AUTO_INCREMENT;primaryKey`"));
        assert!(code.contains("/// account \"kind\""));
        assert!(code.contains(r#""createdAt""#));
        assert!(code.contains(r#"pub const TABLE_NAME: &'static str = "users";"#));
        assert!(code.contains("pub fn table_name() -> &'static str"));
    }

    #[test]
    fn test_empty_record_formats() {
        let record = RecordDefinition::assemble("audit_log", "shop", "model", vec![], None);
        let code = RustDialect.format(&RustDialect.render(&record)).unwrap();
        assert!(code.contains("pub struct AuditLog"));
        assert!(code.contains("Self::TABLE_NAME"));
    }

    #[test]
    fn test_only_derive_and_serde_attributes() {
        let code = RustDialect.format(&RustDialect.render(&users())).unwrap();
        for line in code.lines().map(str::trim) {
            if line.starts_with("#[") {
                assert!(
                    line.starts_with("#[derive(") || line.starts_with("#[serde("),
                    "unexpected attribute: {line}"
                );
            }
        }
    }

    #[test]
    fn test_awkward_column_names_still_parse() {
        let columns = vec![
            ColumnDescriptor::new("self", "int"),
            ColumnDescriptor::new("super", "int"),
            ColumnDescriptor::new("crate", "int"),
            ColumnDescriptor::new("2fa_secret", "varchar(32)"),
            ColumnDescriptor::new("type", "varchar(16)"),
        ];
        let fields = FieldMapper::default().map_columns(&columns);
        let record = RecordDefinition::assemble("tricky", "shop", "model", fields, None);
        let code = RustDialect.format(&RustDialect.render(&record)).unwrap();

        assert!(code.contains("pub self_: i64,"));
        assert!(code.contains("pub super_: i64,"));
        assert!(code.contains("pub crate_: i64,"));
        assert!(code.contains("pub _2fa_secret: String,"));
        assert!(code.contains("pub r#type: String,"));
        assert!(code.contains(r#""self""#));
    }

    #[test]
    fn test_invalid_identifier_is_syntax_error() {
        let record = RecordDefinition::assemble("9lives", "shop", "model", vec![], None);
        let err = RustDialect.format(&RustDialect.render(&record)).unwrap_err();
        assert!(matches!(err, FormatError::Syntax(_)));
    }
}
