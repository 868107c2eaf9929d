//! Column definition metadata.
//!
//! `ColumnDefinition` carries what the schema layer needs to know about a
//! custom column: its declared data type, nullability and constraints.

use super::type_mapping::SqlDataType;
use crate::config::ColumnSettings;
use sea_query::{ColumnDef, IntoIden};

/// Column definition metadata
///
/// Produced by [`CustomColumnType::definition`](super::CustomColumnType::definition)
/// and turned into a `SeaQuery` `ColumnDef` for table creation and migrations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDefinition {
    /// Declared data type (e.g., "text", "varchar")
    pub column_type: Option<String>,
    /// Whether the column is nullable
    pub nullable: bool,
    /// Whether the column is unique
    pub unique: bool,
    /// Whether the column is indexed
    pub indexed: bool,
    /// Column comment/documentation
    pub comment: Option<String>,
}

impl Default for ColumnDefinition {
    fn default() -> Self {
        Self {
            column_type: None,
            nullable: true,
            unique: false,
            indexed: false,
            comment: None,
        }
    }
}

impl ColumnDefinition {
    /// Nullable column of the given declared data type.
    pub fn for_data_type(data_type: &str) -> Self {
        Self {
            column_type: Some(data_type.to_string()),
            ..Default::default()
        }
    }

    /// Apply schema settings. The declared data type is left untouched.
    pub fn with_settings(mut self, settings: &ColumnSettings) -> Self {
        self.nullable = settings.nullable;
        self.unique = settings.unique;
        self.indexed = settings.indexed;
        self.comment = settings.comment.clone();
        self
    }

    /// The declared data type, text when none was declared.
    pub fn data_type(&self) -> SqlDataType {
        self.column_type
            .as_deref()
            .map(SqlDataType::parse)
            .unwrap_or(SqlDataType::Text)
    }

    /// Convert to SeaQuery's ColumnDef for use in table creation and migrations
    ///
    /// # Example
    ///
    /// ```rust
    /// use encrypted_column::ColumnDefinition;
    /// use sea_query::{Iden, PostgresQueryBuilder, Table};
    ///
    /// struct Users;
    /// impl Iden for Users {
    ///     fn unquoted(&self) -> &str { "users" }
    /// }
    ///
    /// struct Ssn;
    /// impl Iden for Ssn {
    ///     fn unquoted(&self) -> &str { "ssn" }
    /// }
    ///
    /// let def = ColumnDefinition::for_data_type("text");
    /// let sql = Table::create()
    ///     .table(Users)
    ///     .col(def.to_column_def(Ssn))
    ///     .to_string(PostgresQueryBuilder);
    /// assert!(sql.contains("\"ssn\" text"));
    /// ```
    pub fn to_column_def<T: IntoIden>(&self, column_name: T) -> ColumnDef {
        let mut def = ColumnDef::new(column_name);

        self.data_type().apply(&mut def);

        if self.nullable {
            def.null();
        } else {
            def.not_null();
        }

        if self.unique {
            def.unique_key();
        }

        if let Some(ref comment) = self.comment {
            def.comment(comment.clone());
        }

        // Indexes are built through IndexDef by migration code; `indexed` is
        // carried as metadata only.

        def
    }
}
