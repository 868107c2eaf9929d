//! Column settings loaded from application configuration.
//!
//! The crate owns no configuration file and no environment prefix. The
//! application builds its own `config::Config` and points
//! [`ColumnSettings::from_config`] at the section describing one column:
//!
//! ```toml
//! [columns.users.ssn]
//! nullable = false
//! comment = "social security number, encrypted"
//! ```

use config::{Config, ConfigError};
use serde::Deserialize;

/// Schema attributes of an encrypted column.
///
/// The storage data type is not configurable; encrypted columns are always text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ColumnSettings {
    #[serde(default = "default_nullable")]
    pub nullable: bool,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub indexed: bool,
    #[serde(default)]
    pub comment: Option<String>,
}

fn default_nullable() -> bool {
    true
}

impl Default for ColumnSettings {
    fn default() -> Self {
        Self {
            nullable: default_nullable(),
            unique: false,
            indexed: false,
            comment: None,
        }
    }
}

impl ColumnSettings {
    /// Read the settings stored under `section` (e.g. `"columns.users.ssn"`).
    ///
    /// A missing section yields [`ColumnSettings::default`]; a present but
    /// malformed one is an error.
    pub fn from_config(settings: &Config, section: &str) -> Result<Self, ConfigError> {
        match settings.get::<ColumnSettings>(section) {
            Ok(column) => Ok(column),
            Err(ConfigError::NotFound(_)) => {
                log::debug!("no settings for column {section}, using defaults");
                Ok(Self::default())
            }
            Err(err) => Err(ConfigError::Message(format!(
                "column settings under {section} could not be loaded: {err}"
            ))),
        }
    }
}
