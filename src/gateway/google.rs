//! Google Translate API v2 gateway
//!
//! # Request
//!
//! `POST {proxy_prefix}{endpoint}?key={api_key}` (key form-encoded) with body
//! `{"q": text, "target": code}`. The first element of `data.translations`
//! carries the result.
//!
//! # Example
//!
//! ```ignore
//! use site_lingo::config::GoogleTranslateConfig;
//! use site_lingo::gateway::{GoogleTranslateGateway, Translator};
//!
//! let gateway = GoogleTranslateGateway::new("api-key", &GoogleTranslateConfig::default())?;
//! let text = gateway.translate("Hello", "hr").await?;
//! ```

use crate::config::GoogleTranslateConfig;
use crate::gateway::{GatewayError, GatewayResult, Translator};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Gateway to the Google Translate v2 REST API
#[derive(Clone)]
pub struct GoogleTranslateGateway {
    client: Client,
    /// Proxy prefix and endpoint, without the key
    url: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    target: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct Translation {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

impl GoogleTranslateGateway {
    /// Creates a gateway with an explicit API key
    ///
    /// # Returns
    ///
    /// * `Ok(Self)` - New gateway
    /// * `Err(GatewayError)` - If the key is empty or the HTTP client cannot be built
    pub fn new(api_key: impl Into<String>, config: &GoogleTranslateConfig) -> GatewayResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GatewayError::Config("API key cannot be empty".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| GatewayError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: format!("{}{}", config.proxy_prefix, config.endpoint),
            api_key,
        })
    }

    /// Creates a gateway from the `GOOGLE_TRANSLATE_API_KEY` environment variable
    pub fn from_env(config: &GoogleTranslateConfig) -> GatewayResult<Self> {
        let api_key = std::env::var("GOOGLE_TRANSLATE_API_KEY").map_err(|_| {
            GatewayError::Config("GOOGLE_TRANSLATE_API_KEY environment variable not set".to_string())
        })?;
        Self::new(api_key, config)
    }
}

impl std::fmt::Debug for GoogleTranslateGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleTranslateGateway")
            .field("url", &self.url)
            .field("api_key", &"***")
            .finish()
    }
}

#[async_trait]
impl Translator for GoogleTranslateGateway {
    async fn translate(&self, text: &str, target_code: &str) -> GatewayResult<String> {
        let response = self
            .client
            .post(&self.url)
            .query(&[("key", self.api_key.as_str())])
            .header(ACCEPT, "application/json")
            .json(&TranslateRequest {
                q: text,
                target: target_code,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let parsed: TranslateResponse = serde_json::from_str(&body)
            .map_err(|e| GatewayError::MalformedResponse(e.to_string()))?;

        parsed
            .data
            .translations
            .into_iter()
            .next()
            .map(|t| t.translated_text)
            .ok_or_else(|| {
                GatewayError::MalformedResponse("empty 'data.translations' array".to_string())
            })
    }

    fn provider_name(&self) -> &str {
        "Google Translate"
    }
}
