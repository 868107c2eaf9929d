//! The custom column type hook.

use super::definition::ColumnDefinition;
use sea_query::{ColumnDef, IntoIden};

/// Trait for column types that convert values on their way to and from storage
///
/// Implementors declare the storage data type and two conversions:
/// `from_driver` for values read back from the database and `to_driver` for
/// values about to be written. Reads cannot fail; writes may.
///
/// # Example
///
/// ```rust
/// use encrypted_column::CustomColumnType;
/// use std::convert::Infallible;
///
/// /// Stores text upper-cased.
/// struct Shouting;
///
/// impl CustomColumnType for Shouting {
///     type Data = Option<String>;
///     type Driver = Option<String>;
///     type Error = Infallible;
///
///     fn data_type(&self) -> &'static str {
///         "text"
///     }
///
///     fn from_driver(&self, value: Option<String>) -> Option<String> {
///         value
///     }
///
///     fn to_driver(&self, value: Option<String>) -> Result<Option<String>, Infallible> {
///         Ok(value.map(|v| v.to_uppercase()))
///     }
/// }
///
/// assert_eq!(Shouting.to_driver(Some("hi".into())), Ok(Some("HI".into())));
/// assert!(Shouting.definition().nullable);
/// ```
pub trait CustomColumnType {
    /// Value as seen by application code.
    type Data;
    /// Value as handed to and returned by the driver.
    type Driver;
    /// Failure of a write conversion.
    type Error: std::error::Error + 'static;

    /// Declared storage data type (e.g., "text").
    fn data_type(&self) -> &'static str;

    /// Convert a value read from the database.
    fn from_driver(&self, value: Self::Driver) -> Self::Data;

    /// Convert a value before it is written to the database.
    fn to_driver(&self, value: Self::Data) -> Result<Self::Driver, Self::Error>;

    /// Column metadata for schema generation.
    ///
    /// Defaults to a nullable column of [`data_type`](Self::data_type).
    fn definition(&self) -> ColumnDefinition {
        ColumnDefinition::for_data_type(self.data_type())
    }

    /// `SeaQuery` column definition for table creation.
    fn column_def<T: IntoIden>(&self, column_name: T) -> ColumnDef {
        self.definition().to_column_def(column_name)
    }
}
