/// LLM client: the single point of entry for all generative-provider calls in Navigator.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// Every operation receives a `&dyn GenerativeProvider` built once at startup,
/// so tests can substitute a fake.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;

#[cfg(test)]
pub mod fake;
pub mod schema;

pub use schema::Schema;

const JSON_MIME_TYPE: &str = "application/json";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("Prompt blocked by provider: {0}")]
    Blocked(String),
}

/// Capabilities the provider may use while answering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    /// Ground the answer in map/place listings.
    MapsGrounding,
}

/// A provider-agnostic generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub model: &'static str,
    pub prompt: String,
    /// When set, the provider is asked for JSON matching this shape.
    pub response_schema: Option<Schema>,
    pub tools: Vec<Tool>,
}

impl GenerationRequest {
    pub fn new(model: &'static str, prompt: impl Into<String>) -> Self {
        Self {
            model,
            prompt: prompt.into(),
            response_schema: None,
            tools: Vec::new(),
        }
    }

    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.response_schema = Some(schema);
        self
    }

    pub fn with_tool(mut self, tool: Tool) -> Self {
        self.tools.push(tool);
        self
    }
}

/// Citation record exactly as the provider sent it. Validation into
/// `GroundingSource` happens in the caller that needs it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawGroundingChunk {
    #[serde(default)]
    pub web: Option<RawSource>,
    #[serde(default)]
    pub maps: Option<RawSource>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawSource {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
    #[serde(default)]
    pub total_token_count: u32,
}

/// What came back from one generation call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationResponse {
    /// Concatenated text parts of the first candidate. `None` when the candidate had no text.
    pub text: Option<String>,
    pub grounding_chunks: Vec<RawGroundingChunk>,
    pub usage: Option<UsageMetadata>,
}

impl GenerationResponse {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Text with surrounding whitespace removed, or `None` if blank.
    pub fn non_empty_text(&self) -> Option<&str> {
        self.text.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }
}

/// The seam every discovery operation calls through.
#[async_trait]
pub trait GenerativeProvider: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, LlmError>;
}

/// Calls the provider and deserializes its text as JSON.
/// `empty_fallback` is parsed instead when the provider returns no text.
pub async fn generate_json<T: DeserializeOwned>(
    provider: &dyn GenerativeProvider,
    request: GenerationRequest,
    empty_fallback: Option<&str>,
) -> Result<T, LlmError> {
    let response = provider.generate(request).await?;

    let text = match (response.non_empty_text(), empty_fallback) {
        (Some(text), _) => text,
        (None, Some(fallback)) => fallback,
        (None, None) => return Err(LlmError::EmptyContent),
    };

    // Strip markdown code fences if the model wraps JSON in them
    let text = strip_json_fences(text);

    serde_json::from_str(text).map_err(LlmError::Parse)
}

// ────────────────────────────────────────────────────────────────────────────
// Gemini wire format
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<WireContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<WireGenerationConfig<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<serde_json::Value>,
}

#[derive(Debug, Serialize)]
struct WireContent<'a> {
    role: &'a str,
    parts: Vec<WirePart<'a>>,
}

#[derive(Debug, Serialize)]
struct WirePart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireGenerationConfig<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<&'a Schema>,
}

impl<'a> GenerateContentRequest<'a> {
    fn from_request(request: &'a GenerationRequest) -> Self {
        let generation_config = request
            .response_schema
            .as_ref()
            .map(|schema| WireGenerationConfig {
                response_mime_type: Some(JSON_MIME_TYPE),
                response_schema: Some(schema),
            });

        let tools = request
            .tools
            .iter()
            .map(|tool| match tool {
                Tool::MapsGrounding => serde_json::json!({ "googleMaps": {} }),
            })
            .collect();

        Self {
            contents: vec![WireContent {
                role: "user",
                parts: vec![WirePart {
                    text: &request.prompt,
                }],
            }],
            generation_config,
            tools,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<WireCandidate>,
    #[serde(default)]
    prompt_feedback: Option<WirePromptFeedback>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireCandidate {
    #[serde(default)]
    content: Option<WireCandidateContent>,
    #[serde(default)]
    grounding_metadata: Option<WireGroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct WireCandidateContent {
    #[serde(default)]
    parts: Vec<WireResponsePart>,
}

#[derive(Debug, Deserialize)]
struct WireResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireGroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<RawGroundingChunk>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

impl GenerateContentResponse {
    fn into_generation_response(self) -> Result<GenerationResponse, LlmError> {
        let Some(candidate) = self.candidates.into_iter().next() else {
            if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
                return Err(LlmError::Blocked(reason));
            }
            return Ok(GenerationResponse {
                usage: self.usage_metadata,
                ..Default::default()
            });
        };

        let text: String = candidate
            .content
            .map(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|p| p.text)
            .collect();

        Ok(GenerationResponse {
            text: (!text.is_empty()).then_some(text),
            grounding_chunks: candidate
                .grounding_metadata
                .map(|m| m.grounding_chunks)
                .unwrap_or_default(),
            usage: self.usage_metadata,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// GeminiClient
// ────────────────────────────────────────────────────────────────────────────

/// The production provider: Gemini `generateContent` over HTTPS.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    max_attempts: u32,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(config.llm_timeout).build()?,
            api_key: config.api_key.clone(),
            base_url: config.gemini_base_url.clone(),
            max_attempts: config.llm_max_attempts.max(1),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    /// One round trip. The body is read as text first so a malformed payload
    /// surfaces as `Parse`, not as a transport error.
    async fn send_once(
        &self,
        url: &str,
        body: &GenerateContentRequest<'_>,
    ) -> Result<GenerationResponse, LlmError> {
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if status.as_u16() == 429 || status.is_server_error() {
            warn!("Gemini API returned {}: {}", status, text);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        if !status.is_success() {
            let message = serde_json::from_str::<GeminiError>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let wire: GenerateContentResponse = serde_json::from_str(&text)?;
        wire.into_generation_response()
    }
}

impl LlmError {
    /// Transport failures, 429 and 5xx are worth another attempt.
    fn is_retryable(&self) -> bool {
        match self {
            LlmError::Http(_) => true,
            LlmError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

#[async_trait]
impl GenerativeProvider for GeminiClient {
    /// Makes a generateContent call. Retries on transport errors, 429 and 5xx
    /// with exponential backoff only when `max_attempts` is above 1.
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, LlmError> {
        let url = self.endpoint(request.model);
        let body = GenerateContentRequest::from_request(&request);

        let mut attempt = 1;
        loop {
            match self.send_once(&url, &body).await {
                Ok(generation) => {
                    if let Some(usage) = &generation.usage {
                        debug!(
                            "Gemini call succeeded: model={}, prompt_tokens={}, output_tokens={}, total_tokens={}",
                            request.model,
                            usage.prompt_token_count,
                            usage.candidates_token_count,
                            usage.total_token_count
                        );
                    }
                    return Ok(generation);
                }
                Err(e) if e.is_retryable() && attempt < self.max_attempts => {
                    // Exponential backoff: 1s, 2s, 4s
                    let delay = Duration::from_millis(1000 * (1 << (attempt - 1).min(5)));
                    warn!(
                        "Gemini call attempt {} failed ({}), retrying after {}ms...",
                        attempt,
                        e,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
