use std::path::Path;
use std::sync::Arc;

use crate::{
    adapters::outbound::storage::S3ClientFactory,
    domain::{
        errors::{ConfigurationError, PresignResult},
        models::{Credentials, FilesystemConfig, StorageEndpointConfig},
    },
    ports::signing::ClientFactory,
    services::{DiskManager, DualEndpointIssuer},
};

pub const ENV_ENDPOINT: &str = "S3_ENDPOINT";
pub const ENV_BUCKET: &str = "S3_BUCKET";
pub const ENV_REGION: &str = "S3_REGION";
pub const ENV_ACCESS_KEY: &str = "S3_ACCESS_KEY";
pub const ENV_SECRET_KEY: &str = "S3_SECRET_KEY";
pub const ENV_SESSION_TOKEN: &str = "S3_SESSION_TOKEN";
pub const ENV_USE_PATH_STYLE_ENDPOINT: &str = "S3_USE_PATH_STYLE_ENDPOINT";
pub const ENV_TEMPORARY_URL: &str = "S3_TEMPORARY_URL";

impl StorageEndpointConfig {
    /// Read a disk configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read a disk configuration through `lookup`, using the same variable
    /// names as [`StorageEndpointConfig::from_env`]. Required fields are
    /// checked later, by the client factory.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credentials = match (lookup(ENV_ACCESS_KEY), lookup(ENV_SECRET_KEY)) {
            (Some(key), Some(secret)) => {
                let credentials = Credentials::new(key, secret);
                Some(match lookup(ENV_SESSION_TOKEN) {
                    Some(token) => credentials.with_token(token),
                    None => credentials,
                })
            }
            _ => None,
        };

        let path_style = lookup(ENV_USE_PATH_STYLE_ENDPOINT)
            .map(|value| parse_bool(ENV_USE_PATH_STYLE_ENDPOINT, &value))
            .transpose()?;

        Ok(Self {
            endpoint: lookup(ENV_ENDPOINT),
            bucket: lookup(ENV_BUCKET),
            region: lookup(ENV_REGION),
            credentials,
            path_style,
            temporary_url: lookup(ENV_TEMPORARY_URL),
            ..Self::default()
        })
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool, ConfigurationError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigurationError::Source {
            message: format!("{} must be a boolean, got '{}'", name, value),
        }),
    }
}

impl FilesystemConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigurationError> {
        serde_json::from_str(json).map_err(|e| ConfigurationError::Source {
            message: format!("invalid filesystem configuration: {}", e),
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| ConfigurationError::Source {
            message: format!("failed to read {}: {}", path.display(), e),
        })?;
        Self::from_json_str(&json)
    }
}

/// Builder wiring a disk configuration to a client factory
pub struct IssuerBuilder {
    config: StorageEndpointConfig,
    factory: Arc<dyn ClientFactory>,
}

impl IssuerBuilder {
    /// Create a new builder using the S3 client factory
    pub fn new() -> Self {
        Self {
            config: StorageEndpointConfig::default(),
            factory: Arc::new(S3ClientFactory::new()),
        }
    }

    pub fn with_config(mut self, config: StorageEndpointConfig) -> Self {
        self.config = config;
        self
    }

    /// Swap the client factory (e.g. for a mock in tests)
    pub fn with_factory(mut self, factory: Arc<dyn ClientFactory>) -> Self {
        self.factory = factory;
        self
    }

    pub fn build(self) -> PresignResult<DualEndpointIssuer> {
        DualEndpointIssuer::create(&self.config, self.factory.as_ref())
    }

    /// Disk manager over `filesystem`, sharing this builder's factory
    pub fn build_disk_manager(self, filesystem: FilesystemConfig) -> DiskManager {
        DiskManager::new(filesystem, self.factory)
    }
}

impl Default for IssuerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Create an issuer for a MinIO deployment, optionally signing through a
/// public endpoint
pub fn create_minio_issuer(
    endpoint: String,
    bucket: String,
    access_key: String,
    secret_key: String,
    temporary_url: Option<String>,
) -> PresignResult<DualEndpointIssuer> {
    let mut config = StorageEndpointConfig::new(endpoint, bucket)
        .with_credentials(Credentials::new(access_key, secret_key))
        .with_path_style(true);
    config.temporary_url = temporary_url;

    IssuerBuilder::new().with_config(config).build()
}

/// Create an issuer from environment variables
pub fn create_issuer_from_env() -> PresignResult<DualEndpointIssuer> {
    let config = StorageEndpointConfig::from_env()?;
    IssuerBuilder::new().with_config(config).build()
}
