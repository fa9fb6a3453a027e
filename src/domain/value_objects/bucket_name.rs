use crate::domain::errors::ValidationError;

const MAX_BUCKET_BYTES: usize = 255;

/// A validated bucket name
///
/// Accepts anything an S3-compatible server can address as the first path
/// segment. The stricter DNS naming rules only matter for virtual-hosted
/// addressing and are checked by [`BucketName::is_dns_compatible`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BucketName(String);

impl BucketName {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();

        if value.is_empty() {
            return Err(ValidationError::EmptyBucketName);
        }

        if value.len() > MAX_BUCKET_BYTES {
            return Err(ValidationError::BucketNameTooLong {
                actual: value.len(),
                max: MAX_BUCKET_BYTES,
            });
        }

        if let Some(c) = value.chars().find(|&c| !is_path_segment_char(c)) {
            return Err(ValidationError::BucketNameInvalidCharacter(c));
        }

        Ok(Self(value))
    }

    /// Get the bucket name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the name can be used as a host label for virtual-hosted
    /// addressing: 3 to 63 lowercase letters, digits and hyphens, starting and
    /// ending with a letter or digit. Dotted names are excluded because they
    /// break certificate matching.
    pub fn is_dns_compatible(&self) -> bool {
        let name = self.0.as_str();
        let alphanumeric = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit();

        (3..=63).contains(&name.len())
            && name.chars().all(|c| alphanumeric(c) || c == '-')
            && name.starts_with(alphanumeric)
            && name.ends_with(alphanumeric)
    }
}

fn is_path_segment_char(c: char) -> bool {
    !c.is_control() && !c.is_whitespace() && !matches!(c, '/' | '\\' | '?' | '#' | '%')
}

impl std::fmt::Display for BucketName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
