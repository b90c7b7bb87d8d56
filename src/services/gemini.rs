use anyhow::Result;
use base64::{engine::general_purpose, Engine};
use serde::{Deserialize, Serialize};

use crate::models::ContentPart;
use crate::services::InferenceService;

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

impl From<&ContentPart> for Part {
    fn from(part: &ContentPart) -> Self {
        match part {
            ContentPart::Text(text) => Part::Text { text: text.clone() },
            ContentPart::InlineImage { mime_type, data } => Part::InlineData {
                inline_data: InlineData {
                    mime_type: mime_type.clone(),
                    data: general_purpose::STANDARD.encode(data),
                },
            },
        }
    }
}

/// Client for the Gemini `generateContent` endpoint. Built once at startup
/// and shared read-only.
pub struct GeminiService {
    api_key: String,
    model: String,
    api_base: String,
    client: reqwest::Client,
}

impl GeminiService {
    pub fn new(api_key: String, model: String, api_base: String) -> Self {
        Self {
            api_key,
            model,
            api_base: api_base.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }

    fn extract_text(response: GenerateResponse) -> Result<String> {
        let Some(candidate) = response.candidates.into_iter().next() else {
            match response.prompt_feedback.and_then(|f| f.block_reason) {
                Some(reason) => anyhow::bail!("Gemini returned no candidates (blocked: {})", reason),
                None => anyhow::bail!("Gemini returned no candidates"),
            }
        };

        let finish_reason = candidate.finish_reason;
        let text: String = candidate
            .content
            .map(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|p| p.text)
            .collect();

        if text.is_empty() {
            match finish_reason {
                Some(reason) => anyhow::bail!("Gemini returned an empty answer (finish reason: {})", reason),
                None => anyhow::bail!("Gemini returned an empty answer"),
            }
        }

        Ok(text)
    }
}

#[async_trait::async_trait]
impl InferenceService for GeminiService {
    async fn generate(&self, parts: &[ContentPart]) -> Result<String> {
        let request = GenerateRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: parts.iter().map(Part::from).collect(),
            }],
        };

        log::info!("🤖 Sending request to Gemini with model: {} ({} parts)", self.model, parts.len());

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        log::debug!("📥 Gemini response status: {}", status);

        if !status.is_success() {
            let error_text = response.text().await?;
            log::error!("❌ Gemini API error ({}): {}", status, error_text);
            let message = serde_json::from_str::<ErrorEnvelope>(&error_text)
                .map(|e| e.error.message)
                .unwrap_or(error_text);
            anyhow::bail!("Gemini API error ({}): {}", status, message);
        }

        let body: GenerateResponse = response.json().await?;
        let text = Self::extract_text(body)?;
        log::info!("✅ Received advice from Gemini ({} chars)", text.len());

        Ok(text)
    }
}
