//! # HTTP Translation Service
//!
//! A blocking json client for a remote translation server.
//!
//! Requests are `POST {base_url}/translate`:
//!
//! ```json
//! {"model": "opus-mt", "source_lang": "ko", "target_lang": "en", "device": "cpu", "texts": ["..."]}
//! ```
//!
//! and responses are `{"translations": ["..."]}`.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::{
    errors::{NBResult, NmtBatchError},
    runtime::Device,
    translate::{DEFAULT_MODEL_NAME, TranslationService, check_translation_count},
};

/// The default translation server.
pub const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:24080";

/// Options for [`HttpTranslationService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpServiceOptions {
    /// The server base url.
    pub base_url: String,

    /// The model the server should translate with.
    pub model: String,

    /// The device hint forwarded to the server.
    pub device: Device,

    /// Optional bearer token.
    pub api_key: Option<String>,

    /// Request timeout; `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for HttpServiceOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SERVICE_URL.to_string(),
            model: DEFAULT_MODEL_NAME.to_string(),
            device: Device::Cpu,
            api_key: None,
            timeout: None,
        }
    }
}

impl HttpServiceOptions {
    /// Sets the server base url.
    pub fn with_base_url<S: Into<String>>(
        mut self,
        base_url: S,
    ) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the model name.
    pub fn with_model<S: Into<String>>(
        mut self,
        model: S,
    ) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the device hint.
    pub fn with_device(
        mut self,
        device: Device,
    ) -> Self {
        self.device = device;
        self
    }

    /// Sets the bearer token.
    pub fn with_api_key(
        mut self,
        api_key: Option<String>,
    ) -> Self {
        self.api_key = api_key;
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(
        mut self,
        timeout: Option<Duration>,
    ) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build a [`HttpTranslationService`] from these options.
    pub fn build(&self) -> NBResult<HttpTranslationService> {
        HttpTranslationService::new(self.clone())
    }

    /// The translate endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}/translate", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    model: &'a str,
    source_lang: &'a str,
    target_lang: &'a str,
    device: String,
    texts: &'a [String],
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    translations: Vec<String>,
}

/// A [`TranslationService`] backed by a remote json endpoint.
#[derive(Debug, Clone)]
pub struct HttpTranslationService {
    options: HttpServiceOptions,
    http: Client,
}

impl HttpTranslationService {
    /// Create a new client.
    pub fn new(options: HttpServiceOptions) -> NBResult<Self> {
        let mut builder = Client::builder().timeout(options.timeout);
        if let Some(key) = &options.api_key {
            let mut headers = reqwest::header::HeaderMap::new();
            let value = reqwest::header::HeaderValue::from_str(&format!("Bearer {key}"))
                .map_err(|e| NmtBatchError::Translation(format!("invalid api key: {e}")))?;
            headers.insert(reqwest::header::AUTHORIZATION, value);
            builder = builder.default_headers(headers);
        }

        let http = builder
            .build()
            .map_err(|e| NmtBatchError::Translation(e.to_string()))?;

        Ok(Self { options, http })
    }

    /// The client options.
    pub fn options(&self) -> &HttpServiceOptions {
        &self.options
    }
}

impl TranslationService for HttpTranslationService {
    fn translate(
        &self,
        texts: &[String],
        source_lang: &str,
        target_lang: &str,
    ) -> NBResult<Vec<String>> {
        let url = self.options.endpoint();
        log::debug!("POST {url}: {} texts", texts.len());

        let request = TranslateRequest {
            model: &self.options.model,
            source_lang,
            target_lang,
            device: self.options.device.to_string(),
            texts,
        };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .map_err(|e| NmtBatchError::Translation(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NmtBatchError::Translation(format!(
                "HTTP error: {status} - {}",
                response.text().unwrap_or_default()
            )));
        }

        let body: TranslateResponse = response
            .json()
            .map_err(|e| NmtBatchError::Translation(format!("bad response: {e}")))?;

        check_translation_count(texts.len(), &body.translations)?;
        Ok(body.translations)
    }
}
