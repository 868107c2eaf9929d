//! Encrypted text column type.
//!
//! Writes go through the [`Encryption`] collaborator; reads come back exactly
//! as stored. Decrypting a value read from the column is left to application
//! code, which can reach the collaborator through [`EncryptedText::encryption`].

use crate::column::{ColumnDefinition, CustomColumnType};
use crate::config::ColumnSettings;
use crate::encryption::Encryption;
use crate::error::ColumnError;
use crate::value::{text_value, variant_name};
use sea_query::Value;
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "metrics")]
use crate::metrics::METRICS;
#[cfg(feature = "tracing")]
use crate::metrics::tracing_helpers;

/// Storage data type of every encrypted column.
pub const ENCRYPTED_TEXT_DATA_TYPE: &str = "text";

/// Build an encrypted text column type around a shared collaborator.
///
/// ```rust
/// use encrypted_column::{encrypted_text, CustomColumnType, Encryption};
/// use std::convert::Infallible;
/// use std::sync::Arc;
///
/// struct Tagging;
///
/// impl Encryption for Tagging {
///     type Error = Infallible;
///
///     fn encrypt(&self, plaintext: &str) -> Result<String, Infallible> {
///         Ok(format!("ENC({plaintext})"))
///     }
///
///     fn decrypt(&self, ciphertext: &str) -> Result<String, Infallible> {
///         Ok(ciphertext.trim_start_matches("ENC(").trim_end_matches(')').to_string())
///     }
/// }
///
/// let ssn = encrypted_text(Arc::new(Tagging));
/// assert_eq!(ssn.data_type(), "text");
///
/// let stored = ssn.to_driver(Some("123-45-6789".to_string())).unwrap();
/// assert_eq!(stored.as_deref(), Some("ENC(123-45-6789)"));
///
/// // Reads are not decrypted.
/// assert_eq!(ssn.from_driver(stored.clone()), stored);
/// ```
pub fn encrypted_text<E: Encryption>(encryption: Arc<E>) -> EncryptedText<E> {
    EncryptedText::from_shared(encryption)
}

/// Column type whose values are encrypted on write and returned as stored on read.
pub struct EncryptedText<E> {
    encryption: Arc<E>,
    definition: ColumnDefinition,
}

impl<E: Encryption> EncryptedText<E> {
    /// Take ownership of a collaborator.
    pub fn new(encryption: E) -> Self {
        Self::from_shared(Arc::new(encryption))
    }

    /// Share a collaborator that is also used elsewhere (e.g. to decrypt).
    pub fn from_shared(encryption: Arc<E>) -> Self {
        Self {
            encryption,
            definition: ColumnDefinition::for_data_type(ENCRYPTED_TEXT_DATA_TYPE),
        }
    }

    /// Build the column with schema settings read from `settings` under `section`.
    pub fn from_config(
        encryption: Arc<E>,
        settings: &::config::Config,
        section: &str,
    ) -> Result<Self, ColumnError<E::Error>> {
        let column = ColumnSettings::from_config(settings, section)?;
        Ok(Self::from_shared(encryption).with_settings(&column))
    }

    /// Apply schema settings. The column stays text.
    pub fn with_settings(mut self, settings: &ColumnSettings) -> Self {
        self.definition = self.definition.with_settings(settings);
        self
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.definition.nullable = nullable;
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.definition.comment = Some(comment.into());
        self
    }

    /// The collaborator, for explicit decryption in application code.
    pub fn encryption(&self) -> &E {
        &self.encryption
    }

    /// Read conversion at the driver level.
    ///
    /// Every value is returned unchanged. Text is still ciphertext; anything
    /// that is not text is passed back as-is without failing.
    pub fn from_driver_value(&self, raw: Value) -> Value {
        if !matches!(raw, Value::String(_)) {
            log::debug!(
                "non-text {} value read from encrypted column, returned unchanged",
                variant_name(&raw)
            );
        }
        raw
    }

    /// Write conversion at the driver level.
    ///
    /// Produces `Value::String`, encrypted unless the input is `None` or empty.
    pub fn to_driver_value(&self, value: Option<&str>) -> Result<Value, E::Error> {
        self.to_driver(value.map(str::to_owned)).map(text_value)
    }

    /// Write conversion for a batch of values, e.g. the rows of a multi-row insert.
    ///
    /// Stops at the first collaborator failure and returns no values.
    pub fn to_driver_many<I, S>(&self, values: I) -> Result<Vec<Value>, E::Error>
    where
        I: IntoIterator<Item = Option<S>>,
        S: AsRef<str>,
    {
        #[cfg(feature = "tracing")]
        let span = tracing_helpers::encrypt_batch_span();
        #[cfg(feature = "tracing")]
        let _entered = span.enter();

        let values = values
            .into_iter()
            .map(|value| self.to_driver_value(value.as_ref().map(AsRef::as_ref)))
            .collect::<Result<Vec<_>, _>>()?;

        #[cfg(feature = "tracing")]
        span.record("rows", values.len() as u64);
        Ok(values)
    }

    fn encrypt(&self, plaintext: &str) -> Result<String, E::Error> {
        #[cfg(feature = "tracing")]
        let _span = tracing_helpers::encrypt_span().entered();
        #[cfg(feature = "metrics")]
        let start = std::time::Instant::now();

        match self.encryption.encrypt(plaintext) {
            Ok(ciphertext) => {
                #[cfg(feature = "metrics")]
                METRICS.record_encrypted(start.elapsed());
                log::trace!("encrypted {} byte value for text column", plaintext.len());
                Ok(ciphertext)
            }
            Err(err) => {
                #[cfg(feature = "metrics")]
                METRICS.record_failure();
                log::debug!("encryption failed, write aborted: {err}");
                Err(err)
            }
        }
    }
}

impl<E: Encryption> CustomColumnType for EncryptedText<E> {
    type Data = Option<String>;
    type Driver = Option<String>;
    type Error = E::Error;

    fn data_type(&self) -> &'static str {
        ENCRYPTED_TEXT_DATA_TYPE
    }

    fn from_driver(&self, value: Option<String>) -> Option<String> {
        value
    }

    fn to_driver(&self, value: Option<String>) -> Result<Option<String>, E::Error> {
        match value {
            Some(plaintext) if !plaintext.is_empty() => self.encrypt(&plaintext).map(Some),
            passthrough => {
                #[cfg(feature = "metrics")]
                METRICS.record_passthrough();
                Ok(passthrough)
            }
        }
    }

    fn definition(&self) -> ColumnDefinition {
        self.definition.clone()
    }
}

impl<E> Clone for EncryptedText<E> {
    fn clone(&self) -> Self {
        Self {
            encryption: Arc::clone(&self.encryption),
            definition: self.definition.clone(),
        }
    }
}

impl<E> fmt::Debug for EncryptedText<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptedText")
            .field("definition", &self.definition)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encryption::test_support::{Failing, KeyUnavailable, Wrapping};
    use mockall::mock;
    use mockall::predicate::eq;

    mock! {
        Cipher {}

        impl Encryption for Cipher {
            type Error = KeyUnavailable;

            fn encrypt(&self, plaintext: &str) -> Result<String, KeyUnavailable>;
            fn decrypt(&self, ciphertext: &str) -> Result<String, KeyUnavailable>;
        }
    }

    fn column() -> EncryptedText<Wrapping> {
        EncryptedText::new(Wrapping::default())
    }

    #[test]
    fn test_declares_text_storage() {
        let column = column();
        assert_eq!(column.data_type(), "text");
        let def = column.definition();
        assert_eq!(def.column_type.as_deref(), Some("text"));
        assert!(def.nullable);
    }

    #[test]
    fn test_to_driver_encrypts_non_empty() {
        let column = column();
        assert_eq!(
            column.to_driver(Some("secret".to_string())).unwrap(),
            Some("ENC(secret)".to_string())
        );
        assert_eq!(column.encryption().calls(), 1);
    }

    #[test]
    fn test_to_driver_matches_collaborator_output() {
        let column = column();
        for plaintext in ["a", " ", "héllo wörld", "line\nbreak", "ENC(already)"] {
            let expected = Wrapping::default().encrypt(plaintext).unwrap();
            assert_eq!(
                column.to_driver(Some(plaintext.to_string())).unwrap(),
                Some(expected)
            );
        }
    }

    #[test]
    fn test_to_driver_passes_through_null_and_empty() {
        let column = column();
        assert_eq!(column.to_driver(None).unwrap(), None);
        assert_eq!(
            column.to_driver(Some(String::new())).unwrap(),
            Some(String::new())
        );
        assert_eq!(column.encryption().calls(), 0);
    }

    #[test]
    fn test_to_driver_propagates_collaborator_error() {
        let column = EncryptedText::new(Failing);
        let err = column.to_driver(Some("secret".to_string())).unwrap_err();
        assert_eq!(err, KeyUnavailable("dek-1".to_string()));
    }

    #[test]
    fn test_from_driver_returns_ciphertext_unchanged() {
        let column = column();
        assert_eq!(
            column.from_driver(Some("ENC(secret)".to_string())),
            Some("ENC(secret)".to_string())
        );
        assert_eq!(column.from_driver(None), None);
    }

    #[test]
    fn test_round_trip_is_not_transparent() {
        let column = column();
        let stored = column.to_driver(Some("secret".to_string())).unwrap();
        let read = column.from_driver(stored);
        assert_ne!(read.as_deref(), Some("secret"));
        assert_eq!(read.as_deref(), Some("ENC(secret)"));

        // Application code decrypts explicitly.
        let plaintext = column.encryption().decrypt(read.as_deref().unwrap()).unwrap();
        assert_eq!(plaintext, "secret");
    }

    #[test]
    fn test_from_driver_value_is_identity() {
        let column = column();
        for raw in [
            Value::String(Some("ENC(x)".to_string())),
            Value::String(None),
            Value::Int(Some(7)),
            Value::Bool(None),
            Value::Bytes(Some(vec![0xde, 0xad])),
        ] {
            assert_eq!(column.from_driver_value(raw.clone()), raw);
        }
    }

    #[test]
    fn test_to_driver_value() {
        let column = column();
        assert_eq!(
            column.to_driver_value(Some("secret")).unwrap(),
            Value::String(Some("ENC(secret)".to_string()))
        );
        assert_eq!(
            column.to_driver_value(Some("")).unwrap(),
            Value::String(Some(String::new()))
        );
        assert_eq!(column.to_driver_value(None).unwrap(), Value::String(None));
    }

    #[test]
    fn test_to_driver_many() {
        let column = column();
        let values = column
            .to_driver_many(vec![Some("a"), None, Some(""), Some("b")])
            .unwrap();
        assert_eq!(
            values,
            vec![
                Value::String(Some("ENC(a)".to_string())),
                Value::String(None),
                Value::String(Some(String::new())),
                Value::String(Some("ENC(b)".to_string())),
            ]
        );
        assert_eq!(column.encryption().calls(), 2);
    }

    #[test]
    fn test_to_driver_many_fails_fast() {
        let mut cipher = MockCipher::new();
        cipher
            .expect_encrypt()
            .with(eq("first"))
            .times(1)
            .returning(|_| Err(KeyUnavailable("rotated".to_string())));
        let column = EncryptedText::new(cipher);

        let err = column
            .to_driver_many([Some("first".to_string()), Some("second".to_string())])
            .unwrap_err();
        assert_eq!(err, KeyUnavailable("rotated".to_string()));
    }

    #[test]
    fn test_collaborator_called_once_with_plaintext() {
        let mut cipher = MockCipher::new();
        cipher
            .expect_encrypt()
            .with(eq("4111 1111 1111 1111"))
            .times(1)
            .returning(|p| Ok(format!("v1.nonce.{}", p.len())));
        cipher.expect_decrypt().never();
        let column = EncryptedText::new(cipher);

        let stored = column
            .to_driver(Some("4111 1111 1111 1111".to_string()))
            .unwrap();
        assert_eq!(stored.as_deref(), Some("v1.nonce.19"));
        assert_eq!(column.from_driver(stored.clone()), stored);
    }

    #[test]
    fn test_collaborator_not_called_for_empty() {
        let mut cipher = MockCipher::new();
        cipher.expect_encrypt().never();
        let column = EncryptedText::new(cipher);

        assert_eq!(column.to_driver(None).unwrap(), None);
        assert_eq!(column.to_driver(Some(String::new())).unwrap(), Some(String::new()));
    }

    #[test]
    fn test_clones_share_collaborator() {
        let shared = Arc::new(Wrapping::default());
        let column = encrypted_text(Arc::clone(&shared));
        let copy = column.clone();
        column.to_driver(Some("a".to_string())).unwrap();
        copy.to_driver(Some("b".to_string())).unwrap();
        assert_eq!(shared.calls(), 2);
    }

    #[test]
    fn test_builder_settings_keep_text() {
        let column = column().nullable(false).comment("encrypted email");
        let def = column.definition();
        assert_eq!(def.column_type.as_deref(), Some("text"));
        assert!(!def.nullable);
        assert_eq!(def.comment.as_deref(), Some("encrypted email"));
    }

    #[test]
    fn test_from_config() {
        let settings = config::Config::builder()
            .set_override("columns.users.ssn.nullable", false)
            .unwrap()
            .build()
            .unwrap();
        let column =
            EncryptedText::from_config(Arc::new(Wrapping::default()), &settings, "columns.users.ssn")
                .unwrap();
        assert!(!column.definition().nullable);
        assert_eq!(column.data_type(), "text");
    }

    #[test]
    fn test_debug_hides_collaborator() {
        let rendered = format!("{:?}", column());
        assert!(rendered.starts_with("EncryptedText"));
        assert!(!rendered.contains("Wrapping"));
    }
}
