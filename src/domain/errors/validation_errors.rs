/// Validation errors for domain value objects
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    // ObjectKey validation errors
    EmptyObjectKey,
    ObjectKeyTooLong {
        actual: usize,
        max: usize,
    },
    InvalidObjectKeyCharacter(char),
    ObjectKeyStartsWithSlash,
    ObjectKeyContainsDoubleSlash,
    ObjectKeyEndsWithSlash,

    // BucketName validation errors
    EmptyBucketName,
    BucketNameTooLong {
        actual: usize,
        max: usize,
    },
    BucketNameInvalidCharacter(char),

    // Endpoint validation errors
    EmptyEndpoint,
    MalformedEndpoint {
        value: String,
        reason: String,
    },
    UnsupportedEndpointScheme(String),
    EndpointMissingHost,
    EndpointHasQueryOrFragment,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ObjectKey errors
            ValidationError::EmptyObjectKey => write!(f, "Object key cannot be empty"),
            ValidationError::ObjectKeyTooLong { actual, max } => {
                write!(f, "Object key too long: {} bytes (max: {})", actual, max)
            }
            ValidationError::InvalidObjectKeyCharacter(c) => {
                write!(f, "Invalid character in object key: {:?}", c)
            }
            ValidationError::ObjectKeyStartsWithSlash => {
                write!(f, "Object key cannot start with '/'")
            }
            ValidationError::ObjectKeyContainsDoubleSlash => {
                write!(f, "Object key cannot contain '//'")
            }
            ValidationError::ObjectKeyEndsWithSlash => {
                write!(f, "Object key cannot end with '/'")
            }

            // BucketName errors
            ValidationError::EmptyBucketName => write!(f, "Bucket name cannot be empty"),
            ValidationError::BucketNameTooLong { actual, max } => {
                write!(
                    f,
                    "Bucket name too long: {} bytes (max: {})",
                    actual, max
                )
            }
            ValidationError::BucketNameInvalidCharacter(c) => {
                write!(f, "Invalid character in bucket name: {:?}", c)
            }

            // Endpoint errors
            ValidationError::EmptyEndpoint => write!(f, "Endpoint cannot be empty"),
            ValidationError::MalformedEndpoint { value, reason } => {
                write!(f, "Malformed endpoint '{}': {}", value, reason)
            }
            ValidationError::UnsupportedEndpointScheme(scheme) => {
                write!(
                    f,
                    "Unsupported endpoint scheme '{}' (expected http or https)",
                    scheme
                )
            }
            ValidationError::EndpointMissingHost => write!(f, "Endpoint must include a host"),
            ValidationError::EndpointHasQueryOrFragment => {
                write!(f, "Endpoint cannot carry a query string or fragment")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
