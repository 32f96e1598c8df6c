//! Upstream generative API client
//!
//! Speaks the generative-language REST surface used for the two text
//! calls (grounded search, formatting) and the per-article image calls.
//! The orchestrator depends on the [`ContentGenerator`] trait so the
//! client can be mocked in tests.

mod client;
pub mod types;

pub use client::GenAiClient;

use async_trait::async_trait;

use crate::error::AppError;

/// Options for a text generation call
#[derive(Debug, Clone)]
pub struct TextOptions {
    pub temperature: f32,
    pub max_output_tokens: u32,
    /// Attach the upstream's live web-search tool to ground the response
    pub grounded_search: bool,
}

/// An inline image returned by the image model
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedImage {
    /// MIME type, e.g. "image/png"
    pub mime_type: String,
    /// Base64-encoded image bytes
    pub data: String,
}

/// Text and image generation against an upstream model
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Generate free text from a prompt
    ///
    /// Returns the first candidate's text, or an empty string when the
    /// response carries no text parts.
    async fn generate_text(
        &self,
        model: &str,
        prompt: &str,
        options: TextOptions,
    ) -> Result<String, AppError>;

    /// Generate one illustration from a prompt
    ///
    /// # Errors
    /// Returns `AppError::Generation` when the call fails or the
    /// response carries no inline image data.
    async fn generate_image(&self, model: &str, prompt: &str) -> Result<GeneratedImage, AppError>;
}
