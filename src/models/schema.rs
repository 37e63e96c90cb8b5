//! Schema-related data models.

use schemars::JsonSchema;
use serde::Serialize;

/// A single column of a table schema as reported by `DESCRIBE`.
///
/// Derived on demand, never cached.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ColumnDescriptor {
    /// Column name
    pub name: String,
    /// Full column type (e.g. `varchar(255)`, `bigint(20) unsigned`)
    #[serde(rename = "type")]
    pub data_type: String,
    /// True iff the engine reports the column as nullable ("YES")
    pub nullable: bool,
    /// Key role: "PRI", "UNI", "MUL", or empty
    pub key: String,
    /// Default value as reported by the engine, if any
    pub default: Option<String>,
    /// Extra attributes (e.g. `auto_increment`)
    pub extra: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_descriptor_serializes_type_field() {
        let col = ColumnDescriptor {
            name: "id".to_string(),
            data_type: "bigint(20) unsigned".to_string(),
            nullable: false,
            key: "PRI".to_string(),
            default: None,
            extra: "auto_increment".to_string(),
        };
        let json = serde_json::to_value(&col).unwrap();
        assert_eq!(json["type"], "bigint(20) unsigned");
        assert_eq!(json["nullable"], false);
        assert_eq!(json["key"], "PRI");
    }
}
