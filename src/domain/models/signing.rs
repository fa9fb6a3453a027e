use chrono::{DateTime, Utc};
use http::{HeaderName, HeaderValue, Method};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;

use crate::domain::errors::SigningError;

/// Which request a signed URL authorizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignedUrlMethod {
    /// GET the object
    Download,
    /// PUT the object (direct-to-storage upload)
    Upload,
}

impl SignedUrlMethod {
    pub fn http_method(&self) -> Method {
        match self {
            SignedUrlMethod::Download => Method::GET,
            SignedUrlMethod::Upload => Method::PUT,
        }
    }
}

impl std::fmt::Display for SignedUrlMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.http_method())
    }
}

/// Per-call signing options: request headers the holder of the URL has to
/// send along (e.g. `Content-Type` for an upload).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningOptions {
    #[serde(default)]
    headers: BTreeMap<String, String>,
}

impl SigningOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_content_type(self, content_type: impl Into<String>) -> Self {
        self.with_header("Content-Type", content_type)
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Check every header and return them with lowercase names.
    /// `host` is rejected since it is bound by the signature itself.
    pub fn validated_headers(&self) -> Result<BTreeMap<String, String>, SigningError> {
        let mut headers = BTreeMap::new();

        for (name, value) in &self.headers {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| SigningError::InvalidOption {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;

            if header_name == http::header::HOST {
                return Err(SigningError::InvalidOption {
                    name: name.clone(),
                    reason: "the host header is fixed by the signature".to_string(),
                });
            }

            HeaderValue::from_str(value).map_err(|e| SigningError::InvalidOption {
                name: name.clone(),
                reason: e.to_string(),
            })?;

            headers.insert(header_name.as_str().to_string(), value.clone());
        }

        Ok(headers)
    }
}

/// A pre-signed URL together with what its holder needs to use it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedUrl {
    url: Url,
    method: SignedUrlMethod,
    expires_at: DateTime<Utc>,
    headers: BTreeMap<String, String>,
}

impl SignedUrl {
    pub fn new(
        url: Url,
        method: SignedUrlMethod,
        expires_at: DateTime<Utc>,
        headers: BTreeMap<String, String>,
    ) -> Self {
        Self {
            url,
            method,
            expires_at,
            headers,
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    pub fn method(&self) -> SignedUrlMethod {
        self.method
    }

    /// When the signature lapses
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Headers the request must carry
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Value of a query parameter, decoded
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    pub fn into_url(self) -> Url {
        self.url
    }
}

impl std::fmt::Display for SignedUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_mapping() {
        assert_eq!(SignedUrlMethod::Download.http_method(), Method::GET);
        assert_eq!(SignedUrlMethod::Upload.http_method(), Method::PUT);
        assert_eq!(SignedUrlMethod::Upload.to_string(), "PUT");
    }

    #[test]
    fn test_validated_headers_are_lowercased() {
        let options = SigningOptions::new()
            .with_content_type("image/png")
            .with_header("X-Amz-Meta-Owner", "alice");

        let headers = options.validated_headers().unwrap();
        assert_eq!(headers.get("content-type").map(String::as_str), Some("image/png"));
        assert_eq!(headers.get("x-amz-meta-owner").map(String::as_str), Some("alice"));
    }

    #[test]
    fn test_malformed_options_rejected() {
        let bad_name = SigningOptions::new().with_header("Bad Header", "x");
        assert!(matches!(
            bad_name.validated_headers(),
            Err(SigningError::InvalidOption { name, .. }) if name == "Bad Header"
        ));

        let bad_value = SigningOptions::new().with_header("Content-Type", "text/plain\n");
        assert!(bad_value.validated_headers().is_err());

        let host = SigningOptions::new().with_header("Host", "evil.example.com");
        assert!(host.validated_headers().is_err());
    }

    #[test]
    fn test_empty_options_deserialize() {
        let options: SigningOptions = serde_json::from_str("{}").unwrap();
        assert!(options.is_empty());
        assert!(options.validated_headers().unwrap().is_empty());
    }

    #[test]
    fn test_signed_url_query_param() {
        let url = Url::parse("https://public.example.com/b/a/b.png?X-Amz-Expires=3600").unwrap();
        let signed = SignedUrl::new(url, SignedUrlMethod::Download, Utc::now(), BTreeMap::new());
        assert_eq!(signed.query_param("X-Amz-Expires").as_deref(), Some("3600"));
        assert_eq!(signed.query_param("missing"), None);
    }
}
