//! Encrypted column types.

pub mod text;

pub use text::{encrypted_text, EncryptedText, ENCRYPTED_TEXT_DATA_TYPE};
