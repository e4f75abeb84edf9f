//! s3upload-core: Core library for the s3upload CLI
//!
//! This crate provides the core functionality for s3upload, including:
//! - Credential resolution from flags or a properties file
//! - Configuration management
//! - Upload target derivation and local file checks
//! - ObjectStore trait for S3 operations
//!
//! This crate is designed to be independent of any specific S3 SDK,
//! allowing the upload loop to be tested against a mock store.

pub mod config;
pub mod credentials;
pub mod error;
pub mod path;
pub mod properties;
pub mod traits;

pub use config::{ClientOptions, Config, ConfigManager, Defaults};
pub use credentials::{CredentialSource, Credentials};
pub use error::{Error, Result};
pub use path::{ObjectTarget, is_readable_file, object_key_for, validate_bucket};
pub use properties::Properties;
pub use traits::{ObjectInfo, ObjectStore, PutRequest};
