//! HTTP transport to the remote generation proxy

use super::base::{AnalysisReply, ChatReply, ChatRequest, Proxy};
use crate::assessment::AssessmentRequest;
use crate::config::ProxyConfig;
use crate::error::{Result, SoulCareError};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// `reqwest`-backed [`Proxy`]
#[derive(Debug, Clone)]
pub struct HttpProxy {
    client: Client,
    config: ProxyConfig,
}

impl HttpProxy {
    /// Create a proxy client from configuration
    ///
    /// # Errors
    ///
    /// Returns `SoulCareError::Gateway` if the HTTP client cannot be built
    ///
    /// # Examples
    ///
    /// ```
    /// use soulcare::config::ProxyConfig;
    /// use soulcare::providers::HttpProxy;
    ///
    /// let proxy = HttpProxy::new(ProxyConfig::default());
    /// assert!(proxy.is_ok());
    /// ```
    pub fn new(config: ProxyConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("soulcare/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SoulCareError::Gateway(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!("Initialized proxy client: base_url={}", config.base_url);

        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + Sync + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.url(path);
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(SoulCareError::from)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SoulCareError::Gateway(format!(
                "Proxy returned error {}: {}",
                status, error_text
            ))
            .into());
        }

        let reply = response.json().await.map_err(SoulCareError::from)?;
        Ok(reply)
    }
}

#[async_trait]
impl Proxy for HttpProxy {
    async fn chat(&self, prompt: &str) -> Result<ChatReply> {
        let body = ChatRequest {
            prompt: prompt.to_string(),
        };
        self.post_json(&self.config.chat_path, &body).await
    }

    async fn analyze(&self, request: &AssessmentRequest) -> Result<AnalysisReply> {
        self.post_json(&self.config.assessment_path, request).await
    }
}
