use async_trait::async_trait;
use chrono::{DateTime, Utc};
use object_store::{path::Path as ObjectPath, signer::Signer};
use std::sync::Arc;
use std::time::Duration;

use crate::{
    adapters::outbound::storage::error::signing_failure,
    domain::{
        errors::{PresignResult, SigningError, ValidationError},
        models::{SignedUrl, SignedUrlMethod, SigningOptions},
        value_objects::{BucketName, Endpoint, ObjectKey},
    },
    ports::signing::SigningClient,
};

/// Longest validity SigV4 accepts for a query-string signature (7 days)
pub const MAX_PRESIGN_SECS: u64 = 7 * 24 * 60 * 60;

/// S3 signing client that implements the SigningClient port on top of
/// `object_store`'s SigV4 signer
#[derive(Clone)]
pub struct S3SigningClient {
    signer: Arc<dyn Signer>,
    endpoint: Endpoint,
    bucket: BucketName,
}

impl S3SigningClient {
    /// `endpoint` is where issued URLs point, `bucket` the bucket they address
    pub fn new(signer: Arc<dyn Signer>, endpoint: Endpoint, bucket: BucketName) -> Self {
        Self {
            signer,
            endpoint,
            bucket,
        }
    }

    pub fn bucket(&self) -> &BucketName {
        &self.bucket
    }

    /// Convert a caller path to an object_store Path
    fn to_object_path(path: &str) -> Result<ObjectPath, SigningError> {
        let key = ObjectKey::new(path).map_err(|e| match e {
            ValidationError::EmptyObjectKey => SigningError::EmptyPath,
            other => SigningError::InvalidPath {
                path: path.to_string(),
                reason: other.to_string(),
            },
        })?;

        ObjectPath::parse(key.as_str()).map_err(|e| SigningError::InvalidPath {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }

    async fn sign(
        &self,
        method: SignedUrlMethod,
        path: &str,
        expiration: DateTime<Utc>,
        options: &SigningOptions,
    ) -> PresignResult<SignedUrl> {
        let location = Self::to_object_path(path)?;
        let now = Utc::now();
        let expires_in = expires_in(expiration, now)?;
        let headers = options.validated_headers()?;

        let url = self
            .signer
            .signed_url(method.http_method(), &location, expires_in)
            .await
            .map_err(|e| signing_failure(path, e))?;

        // Report the instant the signature actually lapses, not the request
        let expires_at = now + chrono::Duration::seconds(expires_in.as_secs() as i64);

        Ok(SignedUrl::new(url, method, expires_at, headers))
    }
}

impl std::fmt::Debug for S3SigningClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3SigningClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("bucket", &self.bucket.as_str())
            .finish()
    }
}

/// Time left until `expiration`, rounded to the nearest second and bounded to
/// what SigV4 accepts
fn expires_in(expiration: DateTime<Utc>, now: DateTime<Utc>) -> Result<Duration, SigningError> {
    let remaining_ms = expiration.signed_duration_since(now).num_milliseconds();
    let remaining = (remaining_ms + 500).div_euclid(1000);
    if remaining < 1 {
        return Err(SigningError::ExpirationInPast { expiration });
    }

    let remaining = remaining as u64;
    if remaining > MAX_PRESIGN_SECS {
        return Err(SigningError::ExpirationTooFar {
            requested_secs: remaining,
            max_secs: MAX_PRESIGN_SECS,
        });
    }

    Ok(Duration::from_secs(remaining))
}

#[async_trait]
impl SigningClient for S3SigningClient {
    fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    async fn sign_download_url(
        &self,
        path: &str,
        expiration: DateTime<Utc>,
        options: &SigningOptions,
    ) -> PresignResult<SignedUrl> {
        self.sign(SignedUrlMethod::Download, path, expiration, options)
            .await
    }

    async fn sign_upload_url(
        &self,
        path: &str,
        expiration: DateTime<Utc>,
        options: &SigningOptions,
    ) -> PresignResult<SignedUrl> {
        self.sign(SignedUrlMethod::Upload, path, expiration, options)
            .await
    }
}
