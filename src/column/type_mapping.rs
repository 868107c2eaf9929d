//! Declared data type names and their `SeaQuery` `ColumnDef` mapping.
//!
//! Custom column types declare storage with a plain name (`"text"`,
//! `"varchar"`, ...). This module turns that name into a column type on a
//! `ColumnDef`.

use sea_query::ColumnDef;

/// Storage data type declared by a custom column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlDataType {
    Text,
    Varchar,
    Char,
    Binary,
    Json,
    Integer,
    BigInteger,
    Boolean,
    Uuid,
    Timestamp,
}

impl SqlDataType {
    /// Parse a declared data type name.
    ///
    /// Matching is case-insensitive. Unknown names map to [`SqlDataType::Text`].
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "text" | "string" => SqlDataType::Text,
            "varchar" | "character varying" => SqlDataType::Varchar,
            "char" | "character" => SqlDataType::Char,
            "bytea" | "binary" | "bytes" | "blob" => SqlDataType::Binary,
            "json" | "jsonb" => SqlDataType::Json,
            "integer" | "int" | "int4" => SqlDataType::Integer,
            "bigint" | "int8" => SqlDataType::BigInteger,
            "boolean" | "bool" => SqlDataType::Boolean,
            "uuid" => SqlDataType::Uuid,
            "timestamp" | "timestamptz" | "datetime" => SqlDataType::Timestamp,
            other => {
                log::debug!("unknown column data type {other:?}, storing as text");
                SqlDataType::Text
            }
        }
    }

    pub(crate) fn apply(self, def: &mut ColumnDef) {
        match self {
            SqlDataType::Text => {
                def.text();
            }
            SqlDataType::Varchar => {
                def.string();
            }
            SqlDataType::Char => {
                def.char();
            }
            SqlDataType::Binary => {
                def.binary();
            }
            SqlDataType::Json => {
                def.json_binary();
            }
            SqlDataType::Integer => {
                def.integer();
            }
            SqlDataType::BigInteger => {
                def.big_integer();
            }
            SqlDataType::Boolean => {
                def.boolean();
            }
            SqlDataType::Uuid => {
                def.uuid();
            }
            SqlDataType::Timestamp => {
                def.timestamp();
            }
        }
    }
}
