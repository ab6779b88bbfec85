//! Backend configuration, read from TOML.
//!
//! ```toml
//! namespace = "WritingStudio metrics"
//! region = "us-east-1"
//!
//! [credentials]
//! iam_role = "any"
//! ```

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::credentials::{CredentialSource, Credentials, RoleSelector};
use super::error::{ConfigError, CredentialsError};

pub const DEFAULT_NAMESPACE: &str = "statsd";

/// `iam_role` value that accepts whichever role the instance has.
pub const ANY_ROLE: &str = "any";

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Tags every exported data point.
    pub namespace: String,
    /// Not read by the backend itself; publisher builders given to
    /// `Backend::start` see it along with the rest of the config.
    pub region: Option<String>,
    pub credentials: CredentialsConfig,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            namespace: DEFAULT_NAMESPACE.to_string(),
            region: None,
            credentials: CredentialsConfig::default(),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct CredentialsConfig {
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub session_token: Option<String>,
    /// Fetch credentials for this instance role instead of using keys.
    pub iam_role: Option<String>,
}

impl Config {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        text.parse()
    }

    /// Pick the credential strategy. An IAM role wins over static keys.
    pub fn credential_source(&self) -> Result<CredentialSource, CredentialsError> {
        let credentials = &self.credentials;

        if let Some(ref role) = credentials.iam_role {
            let selector = if role == ANY_ROLE {
                RoleSelector::Any
            } else {
                RoleSelector::Named(role.clone())
            };
            return Ok(CredentialSource::InstanceRole(selector));
        }

        match (&credentials.access_key_id, &credentials.secret_access_key) {
            (Some(id), Some(secret)) => {
                let mut keys = Credentials::new(id.as_str(), secret.as_str());
                keys.session_token = credentials.session_token.clone();
                Ok(CredentialSource::Static(keys))
            }
            (None, None) => Ok(CredentialSource::Default),
            (Some(_), None) => Err(CredentialsError::Incomplete(
                "access_key_id is set but secret_access_key is missing".to_string(),
            )),
            (None, Some(_)) => Err(CredentialsError::Incomplete(
                "secret_access_key is set but access_key_id is missing".to_string(),
            )),
        }
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(text: &str) -> Result<Config, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}
