use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::domain::{
    errors::PresignResult,
    models::{SignedUrl, SigningOptions, StorageEndpointConfig},
    value_objects::Endpoint,
};

/// Port for anything that can issue pre-signed URLs against one endpoint.
///
/// Implementations own argument validation: an empty or malformed path, an
/// expiration that is not in the future, or malformed options must be reported
/// as `SigningError`. Implementations must be safe to share across threads.
#[async_trait]
pub trait SigningClient: Send + Sync + 'static {
    /// Endpoint the issued URLs are anchored at
    fn endpoint(&self) -> &Endpoint;

    /// Pre-signed GET URL for `path`, valid until `expiration`
    async fn sign_download_url(
        &self,
        path: &str,
        expiration: DateTime<Utc>,
        options: &SigningOptions,
    ) -> PresignResult<SignedUrl>;

    /// Pre-signed PUT URL for direct-to-storage uploads of `path`
    async fn sign_upload_url(
        &self,
        path: &str,
        expiration: DateTime<Utc>,
        options: &SigningOptions,
    ) -> PresignResult<SignedUrl>;
}

/// Port for constructing signing clients from disk configuration.
///
/// Construction must not touch the network. Missing or malformed required
/// fields fail with `ConfigurationError`; connectivity problems may only
/// surface later, from the client itself.
pub trait ClientFactory: Send + Sync + 'static {
    fn build_client(&self, config: &StorageEndpointConfig)
        -> PresignResult<Arc<dyn SigningClient>>;
}
