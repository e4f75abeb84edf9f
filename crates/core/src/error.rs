//! Error types for s3upload-core
//!
//! Provides a unified error type that can be converted to appropriate exit codes.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for s3upload-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for s3upload operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid command-line usage
    #[error("{0}")]
    Usage(String),

    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Credentials file could not be opened or read
    #[error("Cannot read AWS credentials file {}: {source}", .path.display())]
    CredentialsFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Local file could not be read during upload
    #[error("Cannot read {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Required credential is missing or empty
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    /// Authentication or permission failure
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Network error
    #[error("Network error: {0}")]
    Network(String),

    /// Request rejected by the storage service
    #[error("Storage service error: {0}")]
    Service(String),

    /// System error: request could not be built or signed
    #[error("System error: {0}")]
    System(String),
}

impl Error {
    /// Get the appropriate exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::Usage(_) | Error::Config(_) | Error::TomlParse(_) | Error::InvalidUrl(_) => 1,
            Error::Io(_) | Error::CredentialsFile { .. } | Error::ReadFile { .. } => 2,
            Error::Auth(_) | Error::Network(_) | Error::Service(_) => 3,
            Error::MissingCredential(_) | Error::System(_) => 4,
        }
    }

    /// Whether this error should be followed by the usage line
    pub const fn is_usage(&self) -> bool {
        matches!(self, Error::Usage(_))
    }
}
