pub mod endpoint_config;
pub mod filesystem_config;
pub mod signing;

pub use endpoint_config::{Credentials, StorageEndpointConfig};
pub use filesystem_config::FilesystemConfig;
pub use signing::{SignedUrl, SignedUrlMethod, SigningOptions};
