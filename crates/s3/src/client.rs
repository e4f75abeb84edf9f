//! S3 client implementation
//!
//! Wraps aws-sdk-s3 and implements the ObjectStore trait from s3upload-core.

use async_trait::async_trait;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::primitives::ByteStream;

use s3upload_core::{
    ClientOptions, Credentials, Error, ObjectInfo, ObjectStore, PutRequest, Result,
};

/// Service error codes that mean the credentials were not accepted
const AUTH_ERROR_CODES: &[&str] = &[
    "AccessDenied",
    "InvalidAccessKeyId",
    "SignatureDoesNotMatch",
    "ExpiredToken",
    "InvalidToken",
];

/// S3 client wrapper
pub struct S3Client {
    inner: aws_sdk_s3::Client,
}

impl S3Client {
    /// Create a new S3 client from static credentials
    pub async fn new(credentials: Credentials, options: &ClientOptions) -> Result<Self> {
        // Build credentials provider
        let credentials = aws_credential_types::Credentials::new(
            credentials.access_key(),
            credentials.secret_key(),
            None, // session token
            None, // expiry
            "s3upload-static-credentials",
        );

        // Build SDK config
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .credentials_provider(credentials)
            .region(aws_config::Region::new(options.region.clone()));

        if let Some(endpoint) = &options.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        let config = loader.load().await;

        let s3_config = aws_sdk_s3::config::Builder::from(&config)
            .force_path_style(options.force_path_style)
            .build();

        tracing::debug!(
            region = %options.region,
            endpoint = options.endpoint_url.as_deref().unwrap_or("default"),
            path_style = options.force_path_style,
            "Created S3 client"
        );

        Ok(Self {
            inner: aws_sdk_s3::Client::from_conf(s3_config),
        })
    }

    /// Get the underlying aws-sdk-s3 client
    pub fn inner(&self) -> &aws_sdk_s3::Client {
        &self.inner
    }
}

#[async_trait]
impl ObjectStore for S3Client {
    async fn put_object(&self, request: PutRequest) -> Result<ObjectInfo> {
        let PutRequest {
            target,
            body,
            content_type,
        } = request;

        let size = body.len() as u64;

        let mut put = self
            .inner
            .put_object()
            .bucket(&target.bucket)
            .key(&target.key)
            .body(ByteStream::from(body));

        if let Some(ct) = &content_type {
            put = put.content_type(ct);
        }

        tracing::debug!("Uploading {size} bytes to {target}");
        let response = put.send().await.map_err(classify_sdk_error)?;

        let mut info = ObjectInfo::uploaded(&target, size);
        info.etag = response.e_tag().map(|etag| etag.trim_matches('"').to_string());
        info.content_type = content_type;

        Ok(info)
    }

    async fn shutdown(&self) -> Result<()> {
        // The SDK client owns no session to close; its connection pool is
        // released when the last handle is dropped.
        tracing::debug!("Releasing S3 client");
        Ok(())
    }
}

/// Map an SDK failure onto the error classes the CLI reports
pub(crate) fn classify_sdk_error<E, R>(err: SdkError<E, R>) -> Error
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug,
{
    let message = DisplayErrorContext(&err).to_string();

    match &err {
        SdkError::ConstructionFailure(_) => Error::System(message),
        SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) | SdkError::ResponseError(_) => {
            Error::Network(message)
        }
        SdkError::ServiceError(service) => classify_service_code(service.err().code(), message),
        _ => Error::Network(message),
    }
}

fn classify_service_code(code: Option<&str>, message: String) -> Error {
    match code {
        Some(code) if AUTH_ERROR_CODES.contains(&code) => Error::Auth(message),
        _ => Error::Service(message),
    }
}
