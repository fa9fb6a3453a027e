use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::{
    domain::{
        errors::{ConfigurationError, PresignResult},
        models::FilesystemConfig,
    },
    ports::signing::ClientFactory,
    services::DualEndpointIssuer,
};

/// Resolves named disks to issuers, building each one on first use and
/// serving it from a cache afterwards
pub struct DiskManager {
    config: FilesystemConfig,
    factory: Arc<dyn ClientFactory>,
    issuers: RwLock<HashMap<String, Arc<DualEndpointIssuer>>>,
}

impl DiskManager {
    pub fn new(config: FilesystemConfig, factory: Arc<dyn ClientFactory>) -> Self {
        Self {
            config,
            factory,
            issuers: RwLock::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &FilesystemConfig {
        &self.config
    }

    pub fn disk_names(&self) -> Vec<&str> {
        self.config.disk_names()
    }

    /// Issuer for the named disk. A failed build is not cached.
    pub async fn disk(&self, name: &str) -> PresignResult<Arc<DualEndpointIssuer>> {
        {
            let issuers = self.issuers.read().await;
            if let Some(issuer) = issuers.get(name) {
                debug!(disk = name, "serving cached issuer");
                return Ok(Arc::clone(issuer));
            }
        }

        let disk_config =
            self.config
                .disks
                .get(name)
                .ok_or_else(|| ConfigurationError::UnknownDisk {
                    name: name.to_string(),
                })?;

        let mut issuers = self.issuers.write().await;

        // Another task may have built it while we waited for the write lock
        if let Some(issuer) = issuers.get(name) {
            return Ok(Arc::clone(issuer));
        }

        let issuer = Arc::new(DualEndpointIssuer::create(
            disk_config,
            self.factory.as_ref(),
        )?);
        debug!(
            disk = name,
            public_endpoint = issuer.has_public_endpoint(),
            "built issuer for disk"
        );

        issuers.insert(name.to_string(), Arc::clone(&issuer));
        Ok(issuer)
    }

    /// Issuer for the configured default disk
    pub async fn default_disk(&self) -> PresignResult<Arc<DualEndpointIssuer>> {
        self.disk(&self.config.default).await
    }

    /// Drop the cached issuer for `name`; returns whether one was cached
    pub async fn forget_disk(&self, name: &str) -> bool {
        self.issuers.write().await.remove(name).is_some()
    }
}

impl std::fmt::Debug for DiskManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiskManager")
            .field("default", &self.config.default)
            .field("disks", &self.config.disk_names())
            .finish()
    }
}
