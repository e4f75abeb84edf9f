//! ObjectStore trait definition
//!
//! This trait defines the storage operations the uploader needs.
//! It allows the CLI to be decoupled from the specific S3 SDK implementation.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::Result;
use crate::path::ObjectTarget;

/// Metadata for an uploaded object
#[derive(Debug, Clone, Serialize)]
pub struct ObjectInfo {
    /// Bucket name
    pub bucket: String,

    /// Object key
    pub key: String,

    /// Size in bytes
    pub size_bytes: u64,

    /// Human-readable size
    pub size_human: String,

    /// ETag returned by the service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,

    /// Content type sent with the object
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl ObjectInfo {
    /// Create a new ObjectInfo for an uploaded object
    pub fn uploaded(target: &ObjectTarget, size: u64) -> Self {
        Self {
            bucket: target.bucket.clone(),
            key: target.key.clone(),
            size_bytes: size,
            size_human: humansize::format_size(size, humansize::BINARY),
            etag: None,
            content_type: None,
        }
    }
}

/// A single put-object request
#[derive(Debug, Clone)]
pub struct PutRequest {
    /// Where the object goes
    pub target: ObjectTarget,

    /// Object body
    pub body: Vec<u8>,

    /// Content type, if known
    pub content_type: Option<String>,
}

/// Trait for S3-compatible storage operations
///
/// This trait is implemented by the S3 adapter and can be mocked for testing.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store one object
    async fn put_object(&self, request: PutRequest) -> Result<ObjectInfo>;

    /// Release the session once all uploads are done
    async fn shutdown(&self) -> Result<()>;
}
