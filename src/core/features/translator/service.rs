use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use super::types::{detected_language, parse_response, TranslationRequest};
use super::TranslationProvider;
use crate::shared::error::{AppError, AppResult, TranslationError, TranslatorResult};
use crate::shared::settings::TranslationSettings;
use crate::shared::types::{TranslationOutcome, AUTO_LANGUAGE};

/// HTTP client for the public translation endpoint
pub struct TranslatorService {
    http: Client,
    endpoint: String,
}

impl TranslatorService {
    pub fn new(settings: &TranslationSettings) -> AppResult<Self> {
        let http = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(Duration::from_millis(settings.timeout_ms))
            .build()
            .map_err(|e| AppError::Network(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: settings.endpoint.clone(),
        })
    }

    fn request_url(&self, req: &TranslationRequest) -> String {
        format!(
            "{}?client=gtx&sl={}&tl={}&dt=t&q={}",
            self.endpoint,
            AUTO_LANGUAGE,
            urlencoding::encode(&req.target),
            urlencoding::encode(&req.text)
        )
    }

    async fn fetch(&self, req: &TranslationRequest) -> TranslatorResult<serde_json::Value> {
        let res = self
            .http
            .get(self.request_url(req))
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "translation request failed");
                TranslationError::ServiceUnavailable(format!("request failed: {}", e))
            })?;

        if !res.status().is_success() {
            warn!(status = %res.status(), "translation API returned error");
            return Err(TranslationError::ServiceUnavailable(format!("API error: {}", res.status())));
        }

        res.json::<serde_json::Value>().await.map_err(|e| {
            warn!(error = %e, "failed to parse translation response");
            TranslationError::ServiceUnavailable(format!("Failed to parse JSON: {}", e))
        })
    }
}

#[async_trait]
impl TranslationProvider for TranslatorService {
    async fn translate(&self, text: &str, target: &str) -> TranslatorResult<TranslationOutcome> {
        let req = TranslationRequest::new(text, target)?;
        debug!(target_lang = %req.target, chars = req.text.chars().count(), "translating");

        let json = self.fetch(&req).await?;
        parse_response(&json)
    }

    async fn detect_language(&self, text: &str) -> TranslatorResult<Option<String>> {
        let req = TranslationRequest::new(text, "en")?;
        let json = self.fetch(&req).await?;
        Ok(detected_language(&json).filter(|code| code != AUTO_LANGUAGE))
    }
}
