//! Upload driver
//!
//! Uploads each file argument in command-line order. Files that cannot be
//! read are reported and skipped; any storage failure stops the run.

use std::path::{Path, PathBuf};

use s3upload_core::{
    CredentialSource, Error, ObjectInfo, ObjectStore, ObjectTarget, PutRequest, Result,
    is_readable_file, validate_bucket,
};
use serde::Serialize;

use super::Cli;
use crate::output::Formatter;

/// Validated upload request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPlan {
    /// Destination bucket
    pub bucket: String,
    /// Files in command-line order
    pub files: Vec<PathBuf>,
    /// Content type override
    pub content_type: Option<String>,
}

/// Check the parsed command line and split it into credentials and work
pub fn validate(cli: &Cli) -> Result<(CredentialSource, UploadPlan)> {
    let source = CredentialSource::from_options(
        cli.access_key.as_deref(),
        cli.secret_key.as_deref(),
        cli.creds_file.as_deref(),
    )?;

    validate_bucket(&cli.bucket)?;

    if cli.files.is_empty() {
        return Err(Error::Usage(
            "At least one file to upload is required.".to_string(),
        ));
    }

    let plan = UploadPlan {
        bucket: cli.bucket.clone(),
        files: cli.files.clone(),
        content_type: cli.content_type.clone(),
    };

    Ok((source, plan))
}

/// A file that made it into the bucket
#[derive(Debug, Serialize)]
pub struct UploadedFile {
    /// Local path as given on the command line
    pub source: String,
    #[serde(flatten)]
    pub object: ObjectInfo,
}

/// Outcome of a completed run
#[derive(Debug, Default, Serialize)]
pub struct UploadSummary {
    pub bucket: String,
    pub uploaded: Vec<UploadedFile>,
    /// Paths skipped because they were not readable files
    pub skipped: Vec<String>,
}

#[derive(Serialize)]
struct SummaryOutput<'a> {
    status: &'static str,
    #[serde(flatten)]
    summary: &'a UploadSummary,
}

/// Upload every file in the plan, then shut the store down.
///
/// Returns on the first storage or read error without touching the
/// remaining files.
pub async fn upload_files(
    store: &dyn ObjectStore,
    plan: &UploadPlan,
    formatter: &Formatter,
) -> Result<UploadSummary> {
    let mut summary = UploadSummary {
        bucket: plan.bucket.clone(),
        ..Default::default()
    };

    for path in &plan.files {
        if !is_readable_file(path) {
            tracing::warn!("Skipping {}: not a readable file", path.display());
            formatter.failed(path);
            summary.skipped.push(path.display().to_string());
            continue;
        }

        let target = ObjectTarget::for_file(&plan.bucket, path)?;
        let body = tokio::fs::read(path).await.map_err(|source| Error::ReadFile {
            path: path.clone(),
            source,
        })?;
        let content_type = plan
            .content_type
            .clone()
            .or_else(|| guess_content_type(path));

        let info = store
            .put_object(PutRequest {
                target,
                body,
                content_type,
            })
            .await?;

        if !formatter.is_json() {
            formatter.println(&format!(
                "{} -> s3://{}/{} ({})",
                path.display(),
                info.bucket,
                info.key,
                info.size_human
            ));
        }

        summary.uploaded.push(UploadedFile {
            source: path.display().to_string(),
            object: info,
        });
    }

    store.shutdown().await?;

    Ok(summary)
}

fn guess_content_type(path: &Path) -> Option<String> {
    mime_guess::from_path(path)
        .first()
        .map(|m| m.essence_str().to_string())
}

/// Print the end-of-run summary
pub fn report(summary: &UploadSummary, formatter: &Formatter) {
    if formatter.is_json() {
        formatter.json(&SummaryOutput {
            status: "success",
            summary,
        });
        return;
    }

    let mut message = format!(
        "Uploaded {} file(s) to {}.",
        summary.uploaded.len(),
        summary.bucket
    );
    if !summary.skipped.is_empty() {
        message.push_str(&format!(" Skipped {}.", summary.skipped.len()));
    }
    formatter.success(&message);
}
