use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::debug;

use crate::{
    domain::{
        errors::PresignResult,
        models::{SignedUrl, SigningOptions, StorageEndpointConfig},
        value_objects::Endpoint,
    },
    ports::signing::{ClientFactory, SigningClient},
};

/// Issues pre-signed URLs through a public endpoint when one is configured.
///
/// Holds the primary client, used for every storage operation, and an
/// optional public client built from the disk's `temporary_url`. Signing goes
/// to the public client whenever it exists, otherwise to the primary. Errors
/// from the delegated client are returned unchanged.
#[derive(Clone)]
pub struct DualEndpointIssuer {
    primary: Arc<dyn SigningClient>,
    public: Option<Arc<dyn SigningClient>>,
}

impl DualEndpointIssuer {
    /// Compose an issuer from already-built clients
    pub fn new(primary: Arc<dyn SigningClient>, public: Option<Arc<dyn SigningClient>>) -> Self {
        Self { primary, public }
    }

    /// Build the primary client from `config`, plus a public client from the
    /// same config with `endpoint` replaced by `temporary_url` when that is set.
    ///
    /// A `temporary_url` equal to `endpoint` still yields a second client.
    /// If either build fails, the factory's error is returned as-is.
    pub fn create(config: &StorageEndpointConfig, factory: &dyn ClientFactory) -> PresignResult<Self> {
        let primary = factory.build_client(config)?;

        let public = match config.for_temporary_urls() {
            Some(public_config) => Some(factory.build_client(&public_config)?),
            None => None,
        };

        debug!(
            endpoint = %primary.endpoint(),
            public_endpoint = ?public.as_ref().map(|client| client.endpoint().as_str()),
            "created dual-endpoint issuer"
        );

        Ok(Self::new(primary, public))
    }

    /// Client for all non-signing storage work
    pub fn primary(&self) -> &Arc<dyn SigningClient> {
        &self.primary
    }

    pub fn public(&self) -> Option<&Arc<dyn SigningClient>> {
        self.public.as_ref()
    }

    pub fn has_public_endpoint(&self) -> bool {
        self.public.is_some()
    }

    fn signer(&self) -> &Arc<dyn SigningClient> {
        self.public.as_ref().unwrap_or(&self.primary)
    }
}

impl std::fmt::Debug for DualEndpointIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DualEndpointIssuer")
            .field("primary", &self.primary.endpoint().as_str())
            .field(
                "public",
                &self.public.as_ref().map(|client| client.endpoint().as_str()),
            )
            .finish()
    }
}

#[async_trait]
impl SigningClient for DualEndpointIssuer {
    /// Endpoint signed URLs are anchored at
    fn endpoint(&self) -> &Endpoint {
        self.signer().endpoint()
    }

    async fn sign_download_url(
        &self,
        path: &str,
        expiration: DateTime<Utc>,
        options: &SigningOptions,
    ) -> PresignResult<SignedUrl> {
        self.signer()
            .sign_download_url(path, expiration, options)
            .await
    }

    async fn sign_upload_url(
        &self,
        path: &str,
        expiration: DateTime<Utc>,
        options: &SigningOptions,
    ) -> PresignResult<SignedUrl> {
        self.signer()
            .sign_upload_url(path, expiration, options)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::storage::S3ClientFactory;
    use crate::domain::models::Credentials;

    fn config() -> StorageEndpointConfig {
        StorageEndpointConfig::new("https://internal.minio:9000", "b")
            .with_credentials(Credentials::new("minioadmin", "minioadmin"))
    }

    #[test]
    fn test_create_without_temporary_url() {
        let issuer = DualEndpointIssuer::create(&config(), &S3ClientFactory::new()).unwrap();
        assert!(!issuer.has_public_endpoint());
        assert!(issuer.public().is_none());
        assert_eq!(issuer.endpoint().as_str(), "https://internal.minio:9000");
    }

    #[test]
    fn test_create_with_temporary_url() {
        let config = config().with_temporary_url("https://public.example.com");
        let issuer = DualEndpointIssuer::create(&config, &S3ClientFactory::new()).unwrap();

        assert!(issuer.has_public_endpoint());
        assert_eq!(issuer.primary().endpoint().as_str(), "https://internal.minio:9000");
        assert_eq!(issuer.endpoint().as_str(), "https://public.example.com");
    }

    #[test]
    fn test_empty_temporary_url_falls_back_to_primary() {
        let config = config().with_temporary_url("");
        let issuer = DualEndpointIssuer::create(&config, &S3ClientFactory::new()).unwrap();
        assert!(!issuer.has_public_endpoint());
    }

    #[test]
    fn test_invalid_temporary_url_aborts_construction() {
        let config = config().with_temporary_url("not a url");
        let err = DualEndpointIssuer::create(&config, &S3ClientFactory::new()).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_debug_shows_both_endpoints() {
        let config = config().with_temporary_url("https://public.example.com");
        let issuer = DualEndpointIssuer::create(&config, &S3ClientFactory::new()).unwrap();
        let debug = format!("{:?}", issuer);
        assert!(debug.contains("https://internal.minio:9000"));
        assert!(debug.contains("https://public.example.com"));
    }
}
