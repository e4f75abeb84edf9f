//! Upload targets and local file checks
//!
//! Each local file is stored in the destination bucket under its base name.

use std::fs::File;
use std::path::Path;

use crate::error::{Error, Result};

/// Destination of a single upload: bucket plus object key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectTarget {
    /// Bucket name
    pub bucket: String,
    /// Object key
    pub key: String,
}

impl ObjectTarget {
    /// Create a new ObjectTarget
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Target for a local file: the key is the file's base name
    pub fn for_file(bucket: &str, path: &Path) -> Result<Self> {
        let key = object_key_for(path).ok_or_else(|| {
            Error::Usage(format!("Cannot derive object key from '{}'", path.display()))
        })?;
        Ok(Self::new(bucket, key))
    }
}

impl std::fmt::Display for ObjectTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "s3://{}/{}", self.bucket, self.key)
    }
}

/// Object key for a local path, i.e. its final component
pub fn object_key_for(path: &Path) -> Option<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
}

/// Check that a bucket name is usable
pub fn validate_bucket(bucket: &str) -> Result<()> {
    if bucket.trim().is_empty() {
        return Err(Error::Usage("Bucket name cannot be empty".into()));
    }
    Ok(())
}

/// Whether the path names an existing regular file that can be opened
pub fn is_readable_file(path: &Path) -> bool {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => File::open(path).is_ok(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_object_key_is_base_name() {
        assert_eq!(
            object_key_for(Path::new("/var/log/report.txt")),
            Some("report.txt".to_string())
        );
        assert_eq!(
            object_key_for(Path::new("report.txt")),
            Some("report.txt".to_string())
        );
        assert_eq!(
            object_key_for(Path::new("./nested/dir/data.tar.gz")),
            Some("data.tar.gz".to_string())
        );
    }

    #[test]
    fn test_object_key_without_file_name() {
        assert_eq!(object_key_for(Path::new("/")), None);
        assert_eq!(object_key_for(Path::new("..")), None);
    }

    #[test]
    fn test_target_for_file() {
        let target = ObjectTarget::for_file("mybucket", Path::new("docs/report.txt")).unwrap();
        assert_eq!(target.bucket, "mybucket");
        assert_eq!(target.key, "report.txt");
        assert_eq!(target.to_string(), "s3://mybucket/report.txt");
    }

    #[test]
    fn test_validate_bucket() {
        assert!(validate_bucket("mybucket").is_ok());
        assert!(validate_bucket("").is_err());
        assert!(validate_bucket("   ").is_err());
    }

    #[test]
    fn test_is_readable_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("present.txt");
        std::fs::write(&file, b"hello").unwrap();

        assert!(is_readable_file(&file));
        assert!(!is_readable_file(&temp_dir.path().join("absent.txt")));
        assert!(!is_readable_file(temp_dir.path()));
    }
}
