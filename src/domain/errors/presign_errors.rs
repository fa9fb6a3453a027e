use chrono::{DateTime, Utc};

use crate::domain::errors::ValidationError;

/// Configuration problems detected while building a signing client.
/// Construction aborts on any of these.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Missing required configuration field '{field}'")]
    MissingField { field: &'static str },

    #[error("Invalid configuration field '{field}': {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("Disk [{name}] is not configured")]
    UnknownDisk { name: String },

    #[error("Failed to load configuration: {message}")]
    Source { message: String },

    #[error("Storage backend rejected configuration: {message}")]
    Backend { message: String },
}

impl ConfigurationError {
    /// Wrap a value-object validation failure for the given config field
    pub fn invalid(field: &'static str, err: ValidationError) -> Self {
        ConfigurationError::InvalidField {
            field,
            reason: err.to_string(),
        }
    }
}

/// Invalid arguments to a signing call
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SigningError {
    #[error("Object path cannot be empty")]
    EmptyPath,

    #[error("Invalid object path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Expiration {expiration} is not in the future")]
    ExpirationInPast { expiration: DateTime<Utc> },

    #[error("Expiration too far in the future: {requested_secs}s requested (max: {max_secs}s)")]
    ExpirationTooFar { requested_secs: u64, max_secs: u64 },

    #[error("Invalid signing option '{name}': {reason}")]
    InvalidOption { name: String, reason: String },

    #[error("Signer failed: {message}")]
    Backend { message: String },
}

/// Errors surfaced by clients and the dual-endpoint issuer
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PresignError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Signing error: {0}")]
    Signing(#[from] SigningError),

    /// Only raised lazily, when a client first needs the network
    /// (e.g. to fetch credentials).
    #[error("Connectivity error: {message}")]
    Connectivity { message: String },
}

impl PresignError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, PresignError::Configuration(_))
    }

    pub fn is_signing(&self) -> bool {
        matches!(self, PresignError::Signing(_))
    }

    pub fn is_connectivity(&self) -> bool {
        matches!(self, PresignError::Connectivity { .. })
    }
}

/// Result type for client construction and signing
pub type PresignResult<T> = Result<T, PresignError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_predicates() {
        let err: PresignError = ConfigurationError::MissingField { field: "bucket" }.into();
        assert!(err.is_configuration());
        assert!(!err.is_signing());

        let err: PresignError = SigningError::EmptyPath.into();
        assert!(err.is_signing());

        let err = PresignError::Connectivity {
            message: "timed out".to_string(),
        };
        assert!(err.is_connectivity());
    }

    #[test]
    fn test_display_messages() {
        let err: PresignError = ConfigurationError::MissingField { field: "endpoint" }.into();
        assert_eq!(
            err.to_string(),
            "Configuration error: Missing required configuration field 'endpoint'"
        );

        let err = ConfigurationError::invalid("bucket", ValidationError::EmptyBucketName);
        assert_eq!(
            err.to_string(),
            "Invalid configuration field 'bucket': Bucket name cannot be empty"
        );

        let err = SigningError::ExpirationTooFar {
            requested_secs: 700_000,
            max_secs: 604_800,
        };
        assert!(err.to_string().contains("700000s"));
    }
}
