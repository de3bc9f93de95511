use tracing::warn;

use crate::discovery::prompts::{
    fill_template, RESOURCES_PROMPT_TEMPLATE, RESOURCE_COUNT, STRUCTURED_MODEL,
};
use crate::errors::AppError;
use crate::llm_client::{generate_json, GenerationRequest, GenerativeProvider, Schema};
use crate::models::resource::{PracticeResource, ResourceType};

pub fn resource_list_schema() -> Schema {
    Schema::array(
        Schema::object([
            ("title", Schema::string()),
            ("description", Schema::string()),
            ("link", Schema::string()),
            (
                "type",
                Schema::string_enum(ResourceType::ALL.iter().map(|t| t.label())),
            ),
        ])
        .require(&["title", "description", "link", "type"]),
    )
}

pub fn build_resources_prompt(location: &str) -> String {
    let count = RESOURCE_COUNT.to_string();
    fill_template(
        RESOURCES_PROMPT_TEMPLATE,
        &[("location", location), ("count", count.as_str())],
    )
}

/// Practice materials for a location. The count is requested, not enforced.
pub async fn fetch_state_resources(
    provider: &dyn GenerativeProvider,
    location: &str,
) -> Result<Vec<PracticeResource>, AppError> {
    let request = GenerationRequest::new(STRUCTURED_MODEL, build_resources_prompt(location))
        .with_schema(resource_list_schema());

    generate_json(provider, request, Some("[]"))
        .await
        .map_err(|e| AppError::Llm(format!("Resource lookup failed: {e}")))
}

/// Best-effort resource lookup: any failure degrades to an empty list.
pub async fn state_resources_or_empty(
    provider: &dyn GenerativeProvider,
    location: &str,
) -> Vec<PracticeResource> {
    fetch_state_resources(provider, location)
        .await
        .unwrap_or_else(|e| {
            warn!("Resource lookup for {location} degraded to empty list: {e}");
            Vec::new()
        })
}
