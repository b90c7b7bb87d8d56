use std::sync::Arc;

use crate::handlers::NutritionPrompt;
use crate::models::{AdviceOutcome, AdviceResponse, UserQuery, MISSING_INPUT_WARNING};
use crate::services::InferenceService;

/// What a submission turned into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Nothing to ask; the inference service was not called.
    NeedsInput(String),
    Answered(AdviceResponse),
}

pub struct AdviceHandler {
    ai: Arc<dyn InferenceService>,
}

impl AdviceHandler {
    pub fn new(ai: Arc<dyn InferenceService>) -> Self {
        Self { ai }
    }

    /// Entry point for the UI: guards against empty input, then dispatches.
    pub async fn handle_submission(&self, query: UserQuery) -> Submission {
        if query.is_empty() {
            log::warn!("⚠️ Empty submission, nothing dispatched");
            return Submission::NeedsInput(MISSING_INPUT_WARNING.to_string());
        }

        Submission::Answered(self.respond(&query).await)
    }

    pub async fn respond(&self, query: &UserQuery) -> AdviceResponse {
        self.compose_and_dispatch(query).await.into()
    }

    /// Build the prompt, make one inference call and fold every fault into
    /// `AdviceOutcome::Failure`.
    pub async fn compose_and_dispatch(&self, query: &UserQuery) -> AdviceOutcome {
        log::info!(
            "📨 New query - has text: {} | image: {:?}",
            query.has_text(),
            query.image.as_ref().map(|i| i.file_name.as_deref().unwrap_or("<unnamed>"))
        );
        log::debug!("💬 Query text: '{}'", query.text);

        let prompt = match NutritionPrompt::build(query) {
            Ok(prompt) => prompt,
            Err(e) => {
                log::warn!("⚠️ Could not build prompt: {:#}", e);
                return AdviceOutcome::Failure(format!("{:#}", e));
            }
        };

        log::debug!("📝 Prompt question slot: '{}'", prompt.query_text());

        match self.ai.generate(&prompt.into_parts()).await {
            Ok(text) => AdviceOutcome::Success(text),
            Err(e) => {
                log::error!("❌ Inference call failed: {:#}", e);
                AdviceOutcome::Failure(format!("{:#}", e))
            }
        }
    }
}
