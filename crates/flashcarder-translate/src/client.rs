//! MyMemory translation client.

use crate::error::TranslateError;
use async_trait::async_trait;
use flashcarder_core::config::DEFAULT_TRANSLATION_ENDPOINT;
use serde::Deserialize;
use tracing::debug;

/// Language code for the English side of every card.
pub const ENGLISH: &str = "en-US";

/// One lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateRequest {
    pub text: String,
    /// Language code of `text`, e.g. `de-DE`.
    pub source: String,
    /// Language code to translate into.
    pub target: String,
}

impl TranslateRequest {
    pub fn new(
        text: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            source: source.into(),
            target: target.into(),
        }
    }

    /// The `source|target` pair using the two-letter language prefixes.
    pub fn lang_pair(&self) -> Result<String, TranslateError> {
        Ok(format!(
            "{}|{}",
            short_code(&self.source)?,
            short_code(&self.target)?
        ))
    }
}

fn short_code(code: &str) -> Result<&str, TranslateError> {
    code.get(..2)
        .filter(|s| s.chars().all(|c| c.is_ascii_alphabetic()))
        .ok_or_else(|| TranslateError::UnsupportedLanguage(code.to_string()))
}

/// Something that can translate text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranslationClient: Send + Sync {
    async fn translate(&self, request: &TranslateRequest) -> Result<String, TranslateError>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MyMemoryResponse {
    response_data: Option<ResponseData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseData {
    translated_text: Option<String>,
}

/// Client for the MyMemory `get` endpoint.
pub struct MyMemoryClient {
    client: reqwest::Client,
    base_url: String,
}

impl MyMemoryClient {
    /// Create a client for `base_url`, or the public endpoint.
    pub fn new(base_url: Option<&str>) -> Self {
        let base_url = base_url
            .unwrap_or(DEFAULT_TRANSLATION_ENDPOINT)
            .trim_end_matches('/')
            .to_string();

        Self {
            client: reqwest::Client::builder()
                .user_agent(concat!("flashcarder/", env!("CARGO_PKG_VERSION")))
                .build()
                .unwrap_or_default(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for MyMemoryClient {
    fn default() -> Self {
        Self::new(None)
    }
}

#[async_trait]
impl TranslationClient for MyMemoryClient {
    async fn translate(&self, request: &TranslateRequest) -> Result<String, TranslateError> {
        let url = format!("{}/get", self.base_url);
        let lang_pair = request.lang_pair()?;
        debug!(lang_pair = %lang_pair, "Translating");

        let response = self
            .client
            .get(&url)
            .query(&[("q", request.text.as_str()), ("langpair", lang_pair.as_str())])
            .send()
            .await
            .map_err(|e| TranslateError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(TranslateError::Api {
                status,
                message: body,
            });
        }

        let body: MyMemoryResponse = response
            .json()
            .await
            .map_err(|e| TranslateError::Parse(e.to_string()))?;

        body.response_data
            .and_then(|d| d.translated_text)
            .ok_or_else(|| TranslateError::Parse("translation response format unexpected".into()))
    }
}
