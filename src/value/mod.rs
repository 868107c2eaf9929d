//! Driver values for custom columns
//!
//! Helpers for moving text between application code and `sea_query::Value`,
//! the representation handed to and returned by the database driver.

pub mod text;

pub use text::{stored_text, text_value, variant_name};
