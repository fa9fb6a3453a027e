#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use s3_temporary_urls::{
    domain::errors::{ConfigurationError, SigningError},
    ClientFactory, Endpoint, PresignResult, SignedUrl, SignedUrlMethod, SigningClient,
    SigningOptions, StorageEndpointConfig,
};
use std::sync::{Arc, Mutex};
use url::Url;

/// One signing call seen by a `RecordingClient`
#[derive(Debug, Clone, PartialEq)]
pub struct SignCall {
    pub method: SignedUrlMethod,
    pub path: String,
    pub expiration: DateTime<Utc>,
    pub options: SigningOptions,
}

/// Signing client that records its calls and answers with
/// `{endpoint}/{path}?expires={unix}`
pub struct RecordingClient {
    endpoint: Endpoint,
    calls: Mutex<Vec<SignCall>>,
}

impl RecordingClient {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: Endpoint::parse(endpoint).unwrap(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<SignCall> {
        self.calls.lock().unwrap().clone()
    }

    fn sign(
        &self,
        method: SignedUrlMethod,
        path: &str,
        expiration: DateTime<Utc>,
        options: &SigningOptions,
    ) -> PresignResult<SignedUrl> {
        self.calls.lock().unwrap().push(SignCall {
            method,
            path: path.to_string(),
            expiration,
            options: options.clone(),
        });

        if path.is_empty() {
            return Err(SigningError::EmptyPath.into());
        }

        let url = Url::parse(&format!(
            "{}/{}?expires={}",
            self.endpoint,
            path,
            expiration.timestamp()
        ))
        .unwrap();

        Ok(SignedUrl::new(
            url,
            method,
            expiration,
            options.headers().clone(),
        ))
    }
}

#[async_trait]
impl SigningClient for RecordingClient {
    fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    async fn sign_download_url(
        &self,
        path: &str,
        expiration: DateTime<Utc>,
        options: &SigningOptions,
    ) -> PresignResult<SignedUrl> {
        self.sign(SignedUrlMethod::Download, path, expiration, options)
    }

    async fn sign_upload_url(
        &self,
        path: &str,
        expiration: DateTime<Utc>,
        options: &SigningOptions,
    ) -> PresignResult<SignedUrl> {
        self.sign(SignedUrlMethod::Upload, path, expiration, options)
    }
}

/// Factory handing out `RecordingClient`s and remembering every config it saw.
/// Fails with a backend configuration error for `fail_on_endpoint`.
#[derive(Default)]
pub struct RecordingFactory {
    fail_on_endpoint: Option<String>,
    configs: Mutex<Vec<StorageEndpointConfig>>,
    clients: Mutex<Vec<Arc<RecordingClient>>>,
}

impl RecordingFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(endpoint: &str) -> Self {
        Self {
            fail_on_endpoint: Some(endpoint.to_string()),
            ..Self::default()
        }
    }

    pub fn configs(&self) -> Vec<StorageEndpointConfig> {
        self.configs.lock().unwrap().clone()
    }

    pub fn clients(&self) -> Vec<Arc<RecordingClient>> {
        self.clients.lock().unwrap().clone()
    }
}

impl ClientFactory for RecordingFactory {
    fn build_client(
        &self,
        config: &StorageEndpointConfig,
    ) -> PresignResult<Arc<dyn SigningClient>> {
        self.configs.lock().unwrap().push(config.clone());

        let endpoint = config
            .endpoint
            .as_deref()
            .ok_or(ConfigurationError::MissingField { field: "endpoint" })?;

        if self.fail_on_endpoint.as_deref() == Some(endpoint) {
            return Err(ConfigurationError::Backend {
                message: format!("refusing to build client for {}", endpoint),
            }
            .into());
        }

        let client = Arc::new(RecordingClient::new(endpoint));
        self.clients.lock().unwrap().push(Arc::clone(&client));
        Ok(client)
    }
}
