//! S3 signing adapter implementation using the object_store crate
//!
//! This module provides the S3-compatible signing client and the factory that
//! builds it from a disk's `StorageEndpointConfig`.

pub mod s3_adapter;

pub use s3_adapter::{S3SigningClient, MAX_PRESIGN_SECS};

use object_store::aws::{AmazonS3, AmazonS3Builder};
use std::sync::Arc;
use tracing::debug;

use crate::{
    adapters::outbound::storage::error::configuration_error,
    domain::{
        errors::{ConfigurationError, PresignResult},
        models::{Credentials, StorageEndpointConfig},
        value_objects::{BucketName, Endpoint},
    },
    ports::signing::{ClientFactory, SigningClient},
};

/// Region used when a disk does not name one
pub const DEFAULT_REGION: &str = "us-east-1";

/// Validated configuration for one S3 signing client
#[derive(Debug, Clone)]
pub struct S3Config {
    pub bucket: BucketName,
    pub region: String,
    pub credentials: Credentials,
    pub endpoint: Endpoint,
    pub path_style: bool,
}

impl S3Config {
    /// Validate a disk configuration. Blank values count as missing.
    pub fn from_endpoint_config(config: &StorageEndpointConfig) -> Result<Self, ConfigurationError> {
        let endpoint = non_blank(config.endpoint.as_deref())
            .ok_or(ConfigurationError::MissingField { field: "endpoint" })?;
        let endpoint =
            Endpoint::parse(endpoint).map_err(|e| ConfigurationError::invalid("endpoint", e))?;

        let bucket = non_blank(config.bucket.as_deref())
            .ok_or(ConfigurationError::MissingField { field: "bucket" })?;
        let bucket =
            BucketName::new(bucket).map_err(|e| ConfigurationError::invalid("bucket", e))?;

        let credentials = config
            .credentials()
            .ok_or(ConfigurationError::MissingField {
                field: "credentials",
            })?;
        if credentials.key.trim().is_empty() || credentials.secret.trim().is_empty() {
            return Err(ConfigurationError::InvalidField {
                field: "credentials",
                reason: "access key and secret must both be non-empty".to_string(),
            });
        }

        let region = non_blank(config.region.as_deref())
            .unwrap_or(DEFAULT_REGION)
            .to_string();

        let path_style = config.uses_path_style();
        if !path_style && !bucket.is_dns_compatible() {
            return Err(ConfigurationError::InvalidField {
                field: "path_style",
                reason: format!(
                    "bucket '{}' is not a valid host label and needs path-style addressing",
                    bucket
                ),
            });
        }

        Ok(Self {
            bucket,
            region,
            credentials,
            endpoint,
            path_style,
        })
    }

    /// Base URL every signed URL starts with: the endpoint itself for
    /// path-style addressing, `{bucket}.{host}` for virtual-hosted style
    pub fn signing_endpoint(&self) -> Result<Endpoint, ConfigurationError> {
        if self.path_style {
            Ok(self.endpoint.clone())
        } else {
            self.endpoint
                .with_bucket_subdomain(self.bucket.as_str())
                .map_err(|e| ConfigurationError::invalid("endpoint", e))
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Create an S3 store from configuration. No network access happens here.
pub fn create_s3_store(config: &S3Config) -> PresignResult<AmazonS3> {
    let signing_endpoint = config.signing_endpoint()?;

    let mut builder = AmazonS3Builder::new()
        .with_bucket_name(config.bucket.as_str())
        .with_region(&config.region)
        .with_access_key_id(&config.credentials.key)
        .with_secret_access_key(&config.credentials.secret)
        .with_endpoint(signing_endpoint.as_str())
        .with_allow_http(signing_endpoint.allows_http())
        .with_virtual_hosted_style_request(!config.path_style);

    if let Some(token) = &config.credentials.token {
        builder = builder.with_token(token);
    }

    builder.build().map_err(configuration_error)
}

/// Factory producing `S3SigningClient`s
#[derive(Debug, Clone, Default)]
pub struct S3ClientFactory;

impl S3ClientFactory {
    pub fn new() -> Self {
        Self
    }

    /// Build the concrete client, for callers that want the S3 type itself
    pub fn build_s3_client(&self, config: &StorageEndpointConfig) -> PresignResult<S3SigningClient> {
        let s3_config = S3Config::from_endpoint_config(config)?;
        let store = create_s3_store(&s3_config)?;
        let signing_endpoint = s3_config.signing_endpoint()?;

        debug!(
            endpoint = %signing_endpoint,
            bucket = %s3_config.bucket,
            region = %s3_config.region,
            path_style = s3_config.path_style,
            "built S3 signing client"
        );

        Ok(S3SigningClient::new(
            Arc::new(store),
            signing_endpoint,
            s3_config.bucket,
        ))
    }
}

impl ClientFactory for S3ClientFactory {
    fn build_client(
        &self,
        config: &StorageEndpointConfig,
    ) -> PresignResult<Arc<dyn SigningClient>> {
        Ok(Arc::new(self.build_s3_client(config)?))
    }
}
