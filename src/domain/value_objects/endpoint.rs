use url::{Host, Url};

use crate::domain::errors::ValidationError;

/// A validated S3-compatible endpoint: an absolute http(s) URL with a host,
/// an optional path prefix, and no query or fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    url: Url,
    normalized: String,
}

impl Endpoint {
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyEndpoint);
        }

        let url = Url::parse(trimmed).map_err(|e| ValidationError::MalformedEndpoint {
            value: trimmed.to_string(),
            reason: e.to_string(),
        })?;

        Self::from_url(url)
    }

    fn from_url(url: Url) -> Result<Self, ValidationError> {
        match url.scheme() {
            "http" | "https" => {}
            other => return Err(ValidationError::UnsupportedEndpointScheme(other.to_string())),
        }

        if url.host_str().map_or(true, str::is_empty) {
            return Err(ValidationError::EndpointMissingHost);
        }

        if url.query().is_some() || url.fragment().is_some() {
            return Err(ValidationError::EndpointHasQueryOrFragment);
        }

        let normalized = url.as_str().trim_end_matches('/').to_string();
        Ok(Self { url, normalized })
    }

    /// The endpoint without a trailing slash, ready to have `/{bucket}` appended
    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or_default()
    }

    /// Explicit port, if the endpoint names a non-default one
    pub fn port(&self) -> Option<u16> {
        self.url.port()
    }

    pub fn allows_http(&self) -> bool {
        self.url.scheme() == "http"
    }

    /// Virtual-hosted-style endpoint: `https://{bucket}.{host}[:port][/prefix]`
    pub fn with_bucket_subdomain(&self, bucket: &str) -> Result<Self, ValidationError> {
        let host = match self.url.host() {
            Some(Host::Domain(domain)) => domain.to_string(),
            _ => {
                return Err(ValidationError::MalformedEndpoint {
                    value: self.normalized.clone(),
                    reason: "virtual-hosted addressing needs a DNS host name".to_string(),
                });
            }
        };

        let mut url = self.url.clone();
        url.set_host(Some(&format!("{}.{}", bucket, host)))
            .map_err(|e| ValidationError::MalformedEndpoint {
                value: self.normalized.clone(),
                reason: e.to_string(),
            })?;

        Self::from_url(url)
    }
}

impl std::str::FromStr for Endpoint {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Endpoint::parse(s)
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.normalized)
    }
}
