use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::models::StorageEndpointConfig;

fn default_disk_name() -> String {
    "s3".to_string()
}

/// Named storage disks plus the name of the default one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilesystemConfig {
    #[serde(default = "default_disk_name")]
    pub default: String,

    #[serde(default)]
    pub disks: HashMap<String, StorageEndpointConfig>,
}

impl Default for FilesystemConfig {
    fn default() -> Self {
        Self {
            default: default_disk_name(),
            disks: HashMap::new(),
        }
    }
}

impl FilesystemConfig {
    pub fn with_default(mut self, name: impl Into<String>) -> Self {
        self.default = name.into();
        self
    }

    pub fn with_disk(mut self, name: impl Into<String>, config: StorageEndpointConfig) -> Self {
        self.disks.insert(name.into(), config);
        self
    }

    /// Configured disk names, sorted
    pub fn disk_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.disks.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
