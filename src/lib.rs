pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

// Re-export key types for convenience

// Domain types - configuration, signing models, value objects and errors
pub use domain::{
    BucketName,
    // Errors
    ConfigurationError,
    // Models
    Credentials,
    // Value objects
    Endpoint,
    FilesystemConfig,
    ObjectKey,
    PresignError,
    PresignResult,
    SignedUrl,
    SignedUrlMethod,
    SigningError,
    SigningOptions,
    StorageEndpointConfig,
    ValidationError,
};

// Port types - interfaces for external collaborators
pub use ports::{ClientFactory, SigningClient};

// Service implementations - dual-endpoint signing and disk resolution
pub use services::{DiskManager, DualEndpointIssuer};

// Application wiring
pub use app::{create_issuer_from_env, create_minio_issuer, IssuerBuilder};

// Adapter types - infrastructure implementations
pub use adapters::outbound::storage::{S3ClientFactory, S3Config, S3SigningClient};

// Public facade for easy construction
pub mod prelude {
    pub use crate::{
        create_issuer_from_env, create_minio_issuer, ClientFactory, Credentials, DiskManager,
        DualEndpointIssuer, FilesystemConfig, IssuerBuilder, PresignError, PresignResult,
        S3ClientFactory, SignedUrl, SigningClient, SigningOptions, StorageEndpointConfig,
    };
}
