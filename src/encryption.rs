//! The encryption collaborator consumed by encrypted columns.
//!
//! The column type never picks an algorithm, owns a key, or parses the
//! ciphertext it stores. Whatever implements [`Encryption`] decides all of
//! that, including how several ciphertext components (nonce, tag, payload)
//! are packed into the single string that lands in the column.

use std::sync::Arc;

/// Symmetric string encryption supplied by the application.
///
/// # Example
///
/// ```rust
/// use encrypted_column::Encryption;
///
/// struct Rot13;
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("rot13 never fails")]
/// struct Never;
///
/// fn rot(s: &str) -> String {
///     s.chars()
///         .map(|c| match c {
///             'a'..='z' => (((c as u8 - b'a') + 13) % 26 + b'a') as char,
///             'A'..='Z' => (((c as u8 - b'A') + 13) % 26 + b'A') as char,
///             _ => c,
///         })
///         .collect()
/// }
///
/// impl Encryption for Rot13 {
///     type Error = Never;
///
///     fn encrypt(&self, plaintext: &str) -> Result<String, Never> {
///         Ok(rot(plaintext))
///     }
///
///     fn decrypt(&self, ciphertext: &str) -> Result<String, Never> {
///         Ok(rot(ciphertext))
///     }
/// }
///
/// assert_eq!(Rot13.encrypt("secret").unwrap(), "frperg");
/// ```
pub trait Encryption {
    /// Failure reported by the collaborator (bad key, encoding error, ...).
    ///
    /// Columns hand this error back to the caller unmodified.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Encrypt `plaintext` into its storage representation.
    fn encrypt(&self, plaintext: &str) -> Result<String, Self::Error>;

    /// Decrypt a storage representation back to plaintext.
    ///
    /// Columns never call this; reading an encrypted column yields the
    /// ciphertext and application code decrypts explicitly.
    fn decrypt(&self, ciphertext: &str) -> Result<String, Self::Error>;
}

impl<E: Encryption + ?Sized> Encryption for &E {
    type Error = E::Error;

    fn encrypt(&self, plaintext: &str) -> Result<String, Self::Error> {
        (**self).encrypt(plaintext)
    }

    fn decrypt(&self, ciphertext: &str) -> Result<String, Self::Error> {
        (**self).decrypt(ciphertext)
    }
}

impl<E: Encryption + ?Sized> Encryption for Box<E> {
    type Error = E::Error;

    fn encrypt(&self, plaintext: &str) -> Result<String, Self::Error> {
        (**self).encrypt(plaintext)
    }

    fn decrypt(&self, ciphertext: &str) -> Result<String, Self::Error> {
        (**self).decrypt(ciphertext)
    }
}

impl<E: Encryption + ?Sized> Encryption for Arc<E> {
    type Error = E::Error;

    fn encrypt(&self, plaintext: &str) -> Result<String, Self::Error> {
        (**self).encrypt(plaintext)
    }

    fn decrypt(&self, ciphertext: &str) -> Result<String, Self::Error> {
        (**self).decrypt(ciphertext)
    }
}
