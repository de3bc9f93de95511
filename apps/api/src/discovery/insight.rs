use tracing::warn;

use crate::discovery::prompts::{INSIGHT_FALLBACK, INSIGHT_PROMPT, STRUCTURED_MODEL};
use crate::errors::AppError;
use crate::llm_client::{GenerationRequest, GenerativeProvider};

/// Requests one short admissions insight. Free text, no schema.
pub async fn fetch_admission_insight(provider: &dyn GenerativeProvider) -> Result<String, AppError> {
    let response = provider
        .generate(GenerationRequest::new(STRUCTURED_MODEL, INSIGHT_PROMPT))
        .await
        .map_err(|e| AppError::Llm(format!("Insight request failed: {e}")))?;

    response
        .non_empty_text()
        .map(str::to_string)
        .ok_or_else(|| AppError::Llm("Insight request returned no text".to_string()))
}

/// Insight with the fixed fallback sentence on any failure or blank answer.
pub async fn admission_insight_or_default(provider: &dyn GenerativeProvider) -> String {
    match fetch_admission_insight(provider).await {
        Ok(insight) => insight,
        Err(e) => {
            warn!("Using fallback admission insight: {e}");
            INSIGHT_FALLBACK.to_string()
        }
    }
}
