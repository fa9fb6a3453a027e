use crate::domain::errors::{ConfigurationError, PresignError, SigningError};

/// Map an `object_store` error raised while building a client.
/// Anything the builder rejects is a configuration problem.
pub fn configuration_error(err: object_store::Error) -> PresignError {
    match err {
        object_store::Error::UnknownConfigurationKey { key, .. } => {
            ConfigurationError::InvalidField {
                field: "config",
                reason: format!("unknown configuration key '{}'", key),
            }
            .into()
        }
        _ => ConfigurationError::Backend {
            message: err.to_string(),
        }
        .into(),
    }
}

/// Map an `object_store` error raised while signing `path`.
///
/// Static credentials never fail here; providers that fetch credentials over
/// the network report their failures as `Generic`, which is surfaced as a
/// connectivity problem.
pub fn signing_failure(path: &str, err: object_store::Error) -> PresignError {
    match err {
        object_store::Error::InvalidPath { source } => SigningError::InvalidPath {
            path: path.to_string(),
            reason: source.to_string(),
        }
        .into(),
        object_store::Error::Generic { .. }
        | object_store::Error::Unauthenticated { .. }
        | object_store::Error::PermissionDenied { .. } => PresignError::Connectivity {
            message: err.to_string(),
        },
        _ => SigningError::Backend {
            message: err.to_string(),
        }
        .into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_errors_are_configuration_errors() {
        let err = object_store::Error::Generic {
            store: "S3",
            source: "Missing bucket name".into(),
        };
        let mapped = configuration_error(err);
        assert!(mapped.is_configuration());
        assert!(mapped.to_string().contains("Missing bucket name"));
    }

    #[test]
    fn test_credential_failures_are_connectivity_errors() {
        let err = object_store::Error::Generic {
            store: "S3",
            source: "error sending request for url (http://169.254.169.254/latest/api/token)"
                .into(),
        };
        assert!(signing_failure("a/b.png", err).is_connectivity());
    }

    #[test]
    fn test_other_signing_failures_are_signing_errors() {
        let err = object_store::Error::NotImplemented;
        assert!(signing_failure("a/b.png", err).is_signing());
    }

    #[test]
    fn test_invalid_path_names_the_path() {
        let source = object_store::path::Path::parse("a//b").unwrap_err();
        let mapped = signing_failure("a//b", object_store::Error::from(source));

        match mapped {
            PresignError::Signing(SigningError::InvalidPath { path, .. }) => {
                assert_eq!(path, "a//b")
            }
            other => panic!("expected an invalid path error, got {other}"),
        }
    }
}
