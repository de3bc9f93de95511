use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceType {
    Test,
    Syllabus,
    Drill,
}

impl ResourceType {
    pub const ALL: [ResourceType; 3] = [ResourceType::Test, ResourceType::Syllabus, ResourceType::Drill];

    pub fn label(&self) -> &'static str {
        match self {
            ResourceType::Test => "Test",
            ResourceType::Syllabus => "Syllabus",
            ResourceType::Drill => "Drill",
        }
    }
}

/// A free practice material for a given location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PracticeResource {
    pub title: String,
    pub description: String,
    pub link: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
}
