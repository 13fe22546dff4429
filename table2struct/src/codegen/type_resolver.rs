//! Declared SQL type to semantic target type mapping

use serde::{Deserialize, Serialize};

/// Semantic type of a generated field, independent of the output dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetType {
    /// 8-bit signed integer
    Int8,
    /// 64-bit signed integer
    Int64,
    /// 64-bit floating point
    Float64,
    Text,
    Timestamp,
    /// Dynamically-typed value for anything unrecognized
    Opaque,
    NullInt64,
    NullFloat64,
    NullText,
    NullTimestamp,
}

impl TargetType {
    /// Whether this is one of the possibly-absent wrapper variants
    pub fn is_nullable_wrapper(self) -> bool {
        matches!(
            self,
            TargetType::NullInt64
                | TargetType::NullFloat64
                | TargetType::NullText
                | TargetType::NullTimestamp
        )
    }

    /// The possibly-absent variant of this type. `Opaque` already admits absence.
    pub fn nullable(self) -> Self {
        match self {
            TargetType::Int8 | TargetType::Int64 => TargetType::NullInt64,
            TargetType::Float64 => TargetType::NullFloat64,
            TargetType::Text => TargetType::NullText,
            TargetType::Timestamp => TargetType::NullTimestamp,
            other => other,
        }
    }
}

/// Family of a declared type: the text before any `(`, lowercased, first word.
///
/// `decimal(10,2)` -> `decimal`, `INT UNSIGNED` -> `int`, `(x)` -> ``.
pub fn declared_family(declared_type: &str) -> String {
    let head = match declared_type.find('(') {
        Some(index) => &declared_type[..index],
        None => declared_type,
    };
    head.split_whitespace()
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

/// Resolve declared SQL types to target types
pub struct TypeResolver;

impl TypeResolver {
    /// Map a declared type; `nullable` selects the wrapper variant
    pub fn resolve(declared_type: &str, nullable: bool) -> TargetType {
        let base = Self::resolve_base_type(&declared_family(declared_type));
        if nullable {
            base.nullable()
        } else {
            base
        }
    }

    /// Map a declared-type family to its non-nullable target type
    pub fn resolve_base_type(family: &str) -> TargetType {
        match family {
            "tinyint" | "smallint" | "mediumint" => TargetType::Int8,
            "bigint" | "int" => TargetType::Int64,
            "float" | "double" | "decimal" => TargetType::Float64,
            "char" | "varchar" | "enum" | "set" | "text" | "mediumtext" | "longtext" => {
                TargetType::Text
            }
            "date" | "datetime" | "timestamp" => TargetType::Timestamp,
            _ => TargetType::Opaque,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &[(&[&str], TargetType)] = &[
        (&["tinyint", "smallint", "mediumint"], TargetType::Int8),
        (&["bigint", "int"], TargetType::Int64),
        (&["float", "double", "decimal"], TargetType::Float64),
        (
            &["char", "varchar", "enum", "set", "text", "mediumtext", "longtext"],
            TargetType::Text,
        ),
        (&["date", "datetime", "timestamp"], TargetType::Timestamp),
    ];

    #[test]
    fn test_every_documented_family() {
        for (families, expected) in TABLE {
            for family in *families {
                assert_eq!(
                    TypeResolver::resolve(family, false),
                    *expected,
                    "family {family}"
                );
            }
        }
    }

    #[test]
    fn test_unrecognized_is_opaque() {
        for declared in ["json", "blob", "bit(1)", "integer", "", "(11)", "geometry"] {
            assert_eq!(TypeResolver::resolve(declared, false), TargetType::Opaque);
            assert_eq!(TypeResolver::resolve(declared, true), TargetType::Opaque);
        }
    }

    #[test]
    fn test_suffix_is_stripped() {
        assert_eq!(declared_family("decimal(10,2)"), "decimal");
        assert_eq!(declared_family("varchar(255)"), "varchar");
        assert_eq!(declared_family("datetime(3)"), "datetime");
        assert_eq!(declared_family("INT UNSIGNED"), "int");
        assert_eq!(declared_family("(11)"), "");
        assert_eq!(
            TypeResolver::resolve("datetime(3)", false),
            TargetType::Timestamp
        );
        assert_eq!(TypeResolver::resolve("BIGINT(20)", false), TargetType::Int64);
    }

    #[test]
    fn test_nullable_wrappers() {
        assert_eq!(TypeResolver::resolve("tinyint", true), TargetType::NullInt64);
        assert_eq!(TypeResolver::resolve("bigint", true), TargetType::NullInt64);
        assert_eq!(TypeResolver::resolve("double", true), TargetType::NullFloat64);
        assert_eq!(TypeResolver::resolve("varchar(8)", true), TargetType::NullText);
        assert_eq!(TypeResolver::resolve("date", true), TargetType::NullTimestamp);
        assert!(TargetType::NullText.is_nullable_wrapper());
        assert!(!TargetType::Text.is_nullable_wrapper());
    }
}
