use anyhow::Result;

use crate::models::ContentPart;

/// Trait for inference backends (Gemini, test doubles, ...)
#[async_trait::async_trait]
pub trait InferenceService: Send + Sync {
    /// Send all parts as one request and return the generated text.
    async fn generate(&self, parts: &[ContentPart]) -> Result<String>;
}
