// Infrastructure error mapping
pub mod error;

// Provider-specific implementations
pub mod s3;

// Re-export key types
pub use s3::{S3ClientFactory, S3Config, S3SigningClient};
