//! Custom column types for schema definitions.
//!
//! A custom column type tells the schema layer how a field is stored and
//! converts values between their application and storage representations.
//!
//! # Structure
//!
//! - `custom`: the `CustomColumnType` hook implemented by column types
//! - `definition`: column metadata and `ColumnDef` generation
//! - `type_mapping`: declared data type names (internal)

mod type_mapping;
pub mod custom;
pub mod definition;

pub use custom::CustomColumnType;
pub use definition::ColumnDefinition;
pub use type_mapping::SqlDataType;
