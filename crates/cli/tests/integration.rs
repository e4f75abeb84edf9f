//! Integration tests for s3upload
//!
//! These tests require a running S3-compatible server with an existing bucket.
//!
//! Run with:
//! ```bash
//! # Start a local S3-compatible server
//! docker run -d --name rustfs -p 9000:9000 \
//!     -e RUSTFS_ACCESS_KEY=accesskey \
//!     -e RUSTFS_SECRET_KEY=secretkey \
//!     rustfs/rustfs:1.0.0-alpha.81
//!
//! # Run tests
//! TEST_S3_ENDPOINT=http://localhost:9000 TEST_S3_ACCESS_KEY=accesskey \
//! TEST_S3_SECRET_KEY=secretkey TEST_S3_BUCKET=uploads \
//!     cargo test --features integration
//! ```

#![cfg(feature = "integration")]

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

/// S3 test configuration from environment
struct TestConfig {
    endpoint: String,
    access_key: String,
    secret_key: String,
    bucket: String,
}

fn get_test_config() -> Option<TestConfig> {
    Some(TestConfig {
        endpoint: std::env::var("TEST_S3_ENDPOINT").ok()?,
        access_key: std::env::var("TEST_S3_ACCESS_KEY").ok()?,
        secret_key: std::env::var("TEST_S3_SECRET_KEY").ok()?,
        bucket: std::env::var("TEST_S3_BUCKET").ok()?,
    })
}

/// Run s3upload against the test endpoint
fn run_s3upload(args: &[&str], config: &TestConfig, dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_s3upload"))
        .args(["--endpoint-url", &config.endpoint, "--path-style", "--json"])
        .args(args)
        .current_dir(dir)
        .env("S3UPLOAD_CONFIG_DIR", dir.join("config"))
        .output()
        .expect("Failed to execute s3upload")
}

/// Generate unique suffix for test objects
fn uuid_suffix() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{:x}", duration.as_nanos() % 0xFFFFFFFF)
}

mod upload {
    use super::*;

    #[test]
    fn test_upload_with_explicit_keys() {
        let config = match get_test_config() {
            Some(c) => c,
            None => {
                eprintln!("Skipping: S3 test config not available");
                return;
            }
        };

        let dir = TempDir::new().expect("Failed to create temp dir");
        let first = format!("first-{}.txt", uuid_suffix());
        let second = format!("second-{}.json", uuid_suffix());
        std::fs::write(dir.path().join(&first), "hello").unwrap();
        std::fs::write(dir.path().join(&second), "{}").unwrap();

        let output = run_s3upload(
            &[
                "-a",
                &config.access_key,
                "-s",
                &config.secret_key,
                "-b",
                &config.bucket,
                &first,
                "missing.txt",
                &second,
            ],
            &config,
            dir.path(),
        );
        assert_eq!(
            output.status.code(),
            Some(0),
            "Upload failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        let json: serde_json::Value =
            serde_json::from_slice(&output.stdout).expect("Invalid JSON output");
        let uploaded = json["uploaded"].as_array().unwrap();
        assert_eq!(uploaded.len(), 2);
        assert_eq!(uploaded[0]["key"], first.as_str());
        assert_eq!(uploaded[1]["key"], second.as_str());
        assert_eq!(uploaded[1]["content_type"], "application/json");
        assert_eq!(json["skipped"][0], "missing.txt");
        assert!(String::from_utf8_lossy(&output.stderr).contains("Failed: missing.txt"));
    }

    #[test]
    fn test_upload_with_credentials_file() {
        let config = match get_test_config() {
            Some(c) => c,
            None => {
                eprintln!("Skipping: S3 test config not available");
                return;
            }
        };

        let dir = TempDir::new().expect("Failed to create temp dir");
        std::fs::write(
            dir.path().join("aws.properties"),
            format!(
                "AWSAccessKeyId={}\nAWSSecretKey={}\n",
                config.access_key, config.secret_key
            ),
        )
        .unwrap();
        let name = format!("creds-{}.txt", uuid_suffix());
        std::fs::write(dir.path().join(&name), "from properties").unwrap();

        let output = run_s3upload(
            &["-k", "aws.properties", "-b", &config.bucket, &name],
            &config,
            dir.path(),
        );
        assert_eq!(
            output.status.code(),
            Some(0),
            "Upload failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    #[test]
    fn test_bad_credentials_fail_fast() {
        let config = match get_test_config() {
            Some(c) => c,
            None => {
                eprintln!("Skipping: S3 test config not available");
                return;
            }
        };

        let dir = TempDir::new().expect("Failed to create temp dir");
        std::fs::write(dir.path().join("a.txt"), "a").unwrap();
        std::fs::write(dir.path().join("b.txt"), "b").unwrap();

        let output = run_s3upload(
            &[
                "-a",
                "not-a-key",
                "-s",
                "not-a-secret",
                "-b",
                &config.bucket,
                "a.txt",
                "b.txt",
            ],
            &config,
            dir.path(),
        );
        assert_eq!(output.status.code(), Some(3));
        assert!(output.stdout.is_empty(), "No summary expected on failure");
    }
}
