//! HTTP client for the generative-language API

use std::sync::Arc;

use async_trait::async_trait;

use super::types::{
    GenerateContentRequest, GenerateContentResponse, GenerationConfig, GoogleSearch, Tool,
};
use super::{ContentGenerator, GeneratedImage, TextOptions};
use crate::error::AppError;

const DEFAULT_IMAGE_MIME: &str = "image/png";

/// Client for one caller's credential
///
/// Constructed per generation request: the credential is supplied by
/// the caller, not by server configuration.
pub struct GenAiClient {
    http_client: Arc<reqwest::Client>,
    base_url: String,
    api_key: String,
}

impl GenAiClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `http_client` - Shared HTTP client
    /// * `base_url` - API base URL (no trailing path)
    /// * `api_key` - Caller-supplied credential
    pub fn new(
        http_client: Arc<reqwest::Client>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// POST a generateContent request to one model
    ///
    /// # Errors
    /// Transport failures and non-success upstream statuses both map to
    /// `AppError::Generation` so the whole request fails as a generation
    /// failure, never as a partial newspaper.
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, AppError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model
        );

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::Generation(format!("request to model {} failed: {}", model, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Generation(format!(
                "model {} returned HTTP {}: {}",
                model,
                status,
                snippet(&body)
            )));
        }

        response.json().await.map_err(|e| {
            AppError::Generation(format!("invalid response body from model {}: {}", model, e))
        })
    }
}

#[async_trait]
impl ContentGenerator for GenAiClient {
    async fn generate_text(
        &self,
        model: &str,
        prompt: &str,
        options: TextOptions,
    ) -> Result<String, AppError> {
        let mut request = GenerateContentRequest::from_prompt(prompt);
        request.generation_config = Some(GenerationConfig {
            temperature: Some(options.temperature),
            max_output_tokens: Some(options.max_output_tokens),
            response_modalities: None,
        });
        if options.grounded_search {
            request.tools = Some(vec![Tool {
                google_search: Some(GoogleSearch {}),
            }]);
        }

        let response = self.generate_content(model, &request).await?;
        Ok(response.text().unwrap_or_default())
    }

    async fn generate_image(&self, model: &str, prompt: &str) -> Result<GeneratedImage, AppError> {
        let mut request = GenerateContentRequest::from_prompt(prompt);
        request.generation_config = Some(GenerationConfig {
            temperature: None,
            max_output_tokens: None,
            response_modalities: Some(vec!["IMAGE".to_string(), "TEXT".to_string()]),
        });

        let response = self.generate_content(model, &request).await?;

        let inline = response
            .inline_data()
            .ok_or_else(|| AppError::Generation("no image data in response".to_string()))?;

        let mime_type = if inline.mime_type.is_empty() {
            DEFAULT_IMAGE_MIME.to_string()
        } else {
            inline.mime_type.clone()
        };

        Ok(GeneratedImage {
            mime_type,
            data: inline.data.clone(),
        })
    }
}

/// First 200 characters of an upstream error body
fn snippet(body: &str) -> String {
    body.chars().take(200).collect()
}
