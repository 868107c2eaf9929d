//! # Encrypted Column
//!
//! Encrypted text column type for sea-query based PostgreSQL schemas.
//!
//! [`encrypted_text`] wraps an application-supplied [`Encryption`]
//! collaborator in a [`CustomColumnType`]: the column is declared as `text`,
//! non-empty values are encrypted before they reach the driver, and values
//! read back are returned exactly as stored. Decryption stays an explicit step
//! in application code.
//!
//! ```rust
//! use encrypted_column::{encrypted_text, CustomColumnType, Encryption};
//! use sea_query::{Iden, PostgresQueryBuilder, Query};
//! use std::convert::Infallible;
//! use std::sync::Arc;
//!
//! struct Tagging;
//!
//! impl Encryption for Tagging {
//!     type Error = Infallible;
//!
//!     fn encrypt(&self, plaintext: &str) -> Result<String, Infallible> {
//!         Ok(format!("ENC({plaintext})"))
//!     }
//!
//!     fn decrypt(&self, ciphertext: &str) -> Result<String, Infallible> {
//!         Ok(ciphertext.trim_start_matches("ENC(").trim_end_matches(')').to_string())
//!     }
//! }
//!
//! struct Users;
//! impl Iden for Users {
//!     fn unquoted(&self) -> &str { "users" }
//! }
//!
//! struct Email;
//! impl Iden for Email {
//!     fn unquoted(&self) -> &str { "email" }
//! }
//!
//! let email = encrypted_text(Arc::new(Tagging));
//! let value = email.to_driver_value(Some("ada@example.com")).unwrap();
//!
//! let sql = Query::insert()
//!     .into_table(Users)
//!     .columns([Email])
//!     .values_panic([value.into()])
//!     .to_string(PostgresQueryBuilder);
//! assert!(sql.contains("'ENC(ada@example.com)'"));
//! ```

pub mod column;
pub mod config;
pub mod encrypted;
pub mod encryption;
pub mod error;
pub mod metrics;
pub mod value;

pub use column::{ColumnDefinition, CustomColumnType, SqlDataType};
pub use crate::config::ColumnSettings;
pub use encrypted::{encrypted_text, EncryptedText, ENCRYPTED_TEXT_DATA_TYPE};
pub use encryption::Encryption;
pub use error::ColumnError;
pub use value::{stored_text, text_value};
