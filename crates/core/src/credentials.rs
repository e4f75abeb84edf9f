//! Credential resolution
//!
//! Credentials come from exactly one place: explicit access/secret key
//! flags, or a properties file holding `AWSAccessKeyId` and `AWSSecretKey`.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::properties::Properties;

/// Property holding the access key in a credentials file
pub const ACCESS_KEY_PROPERTY: &str = "AWSAccessKeyId";

/// Property holding the secret key in a credentials file
pub const SECRET_KEY_PROPERTY: &str = "AWSSecretKey";

/// An access/secret key pair
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    access_key: String,
    secret_key: String,
}

impl Credentials {
    /// Create credentials, rejecting empty keys
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Result<Self> {
        let access_key = access_key.into();
        let secret_key = secret_key.into();

        if access_key.is_empty() {
            return Err(Error::MissingCredential(ACCESS_KEY_PROPERTY.to_string()));
        }
        if secret_key.is_empty() {
            return Err(Error::MissingCredential(SECRET_KEY_PROPERTY.to_string()));
        }

        Ok(Self {
            access_key,
            secret_key,
        })
    }

    /// Read credentials from a properties file
    pub fn from_properties_file(path: &Path) -> Result<Self> {
        let props = Properties::load(path).map_err(|e| match e {
            Error::Io(source) => Error::CredentialsFile {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;

        if props.is_empty() {
            tracing::warn!("Credentials file {} has no properties", path.display());
        } else {
            tracing::debug!("Read {} properties from {}", props.len(), path.display());
        }

        let access_key = props
            .get(ACCESS_KEY_PROPERTY)
            .ok_or_else(|| Error::MissingCredential(format!("{ACCESS_KEY_PROPERTY} in {}", path.display())))?;
        let secret_key = props
            .get(SECRET_KEY_PROPERTY)
            .ok_or_else(|| Error::MissingCredential(format!("{SECRET_KEY_PROPERTY} in {}", path.display())))?;

        Self::new(access_key, secret_key)
    }

    /// Access key ID
    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    /// Secret access key
    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"** redacted **")
            .finish()
    }
}

/// Where the credentials for a run come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Keys given directly on the command line
    Explicit {
        access_key: String,
        secret_key: String,
    },
    /// Properties file with `AWSAccessKeyId` and `AWSSecretKey`
    File(PathBuf),
}

impl CredentialSource {
    /// Pick the credential source from the raw options.
    ///
    /// Exactly one mode is accepted: a credentials file alone, or both keys.
    pub fn from_options(
        access_key: Option<&str>,
        secret_key: Option<&str>,
        creds_file: Option<&Path>,
    ) -> Result<Self> {
        match (creds_file, access_key, secret_key) {
            (Some(path), None, None) => Ok(Self::File(path.to_path_buf())),
            (None, Some(access_key), Some(secret_key)) => Ok(Self::Explicit {
                access_key: access_key.to_string(),
                secret_key: secret_key.to_string(),
            }),
            (Some(_), _, _) => Err(Error::Usage(
                "Options -k and (-a and -s) cannot coexist.".to_string(),
            )),
            (None, _, _) => Err(Error::Usage(
                "Either -k or (-a and -s) options are mandatory.".to_string(),
            )),
        }
    }

    /// Resolve the source into a credential pair
    pub fn resolve(&self) -> Result<Credentials> {
        match self {
            Self::Explicit {
                access_key,
                secret_key,
            } => Credentials::new(access_key.as_str(), secret_key.as_str()),
            Self::File(path) => {
                tracing::debug!("Reading credentials from {}", path.display());
                Credentials::from_properties_file(path)
            }
        }
    }
}
