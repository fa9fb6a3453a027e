use serde::{Deserialize, Serialize};

/// Access key pair (plus optional session token) for an S3-compatible endpoint
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(alias = "access_key_id", alias = "access_key")]
    pub key: String,
    #[serde(alias = "secret_access_key", alias = "secret_key")]
    pub secret: String,
    #[serde(default, alias = "session_token", skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Credentials {
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Configuration of one S3-compatible storage disk.
///
/// Deserializes from the usual disk mapping: `endpoint`, `bucket`, `region`,
/// `credentials` (or flat `key` / `secret` / `token`), `path_style`
/// (alias `use_path_style_endpoint`) and the optional `temporary_url` endpoint
/// used only for signed URLs. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageEndpointConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Credentials>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(
        default,
        alias = "use_path_style_endpoint",
        skip_serializing_if = "Option::is_none"
    )]
    pub path_style: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temporary_url: Option<String>,
}

impl StorageEndpointConfig {
    pub fn new(endpoint: impl Into<String>, bucket: impl Into<String>) -> Self {
        Self {
            endpoint: Some(endpoint.into()),
            bucket: Some(bucket.into()),
            ..Self::default()
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn with_path_style(mut self, path_style: bool) -> Self {
        self.path_style = Some(path_style);
        self
    }

    pub fn with_temporary_url(mut self, temporary_url: impl Into<String>) -> Self {
        self.temporary_url = Some(temporary_url.into());
        self
    }

    /// The endpoint override for signed URLs. Empty or blank values count as unset.
    pub fn temporary_url(&self) -> Option<&str> {
        self.temporary_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Configuration for the public signing client: identical to this one
    /// except that `endpoint` is replaced by `temporary_url`.
    /// `None` when no temporary URL is configured.
    pub fn for_temporary_urls(&self) -> Option<Self> {
        let temporary_url = self.temporary_url()?;
        Some(self.clone().with_endpoint(temporary_url))
    }

    /// Resolved credentials. A nested `credentials` entry wins over the flat keys.
    pub fn credentials(&self) -> Option<Credentials> {
        if let Some(credentials) = &self.credentials {
            return Some(credentials.clone());
        }

        match (&self.key, &self.secret) {
            (Some(key), Some(secret)) => Some(Credentials {
                key: key.clone(),
                secret: secret.clone(),
                token: self.token.clone(),
            }),
            _ => None,
        }
    }

    /// Path-style addressing unless explicitly disabled
    pub fn uses_path_style(&self) -> bool {
        self.path_style.unwrap_or(true)
    }
}
