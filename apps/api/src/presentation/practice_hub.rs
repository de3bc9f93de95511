use serde::Serialize;

use crate::models::resource::{PracticeResource, ResourceType};

const LOADING_SKELETONS: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceCard {
    pub badge: &'static str,
    /// "document" for tests, "grid" for everything else.
    pub icon: &'static str,
    pub title: String,
    pub description: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PracticeHubBody {
    Loading { skeletons: usize },
    Resources { cards: Vec<ResourceCard> },
    Empty { message: &'static str },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PracticeHubView {
    pub title: String,
    pub subtitle: &'static str,
    pub body: PracticeHubBody,
}

fn resource_card(resource: &PracticeResource) -> ResourceCard {
    ResourceCard {
        badge: resource.resource_type.label(),
        icon: match resource.resource_type {
            ResourceType::Test => "document",
            ResourceType::Syllabus | ResourceType::Drill => "grid",
        },
        title: resource.title.clone(),
        description: resource.description.clone(),
        link: resource.link.clone(),
    }
}

pub fn render_practice_hub(
    location: &str,
    resources: &[PracticeResource],
    loading: bool,
) -> PracticeHubView {
    let body = if loading {
        PracticeHubBody::Loading {
            skeletons: LOADING_SKELETONS,
        }
    } else if resources.is_empty() {
        PracticeHubBody::Empty {
            message: "Enter a location to discover local practice materials.",
        }
    } else {
        PracticeHubBody::Resources {
            cards: resources.iter().map(resource_card).collect(),
        }
    };

    PracticeHubView {
        title: format!("Practice Hub: {location}"),
        subtitle: "Latest state-wide syllabus updates and free practice materials.",
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource(resource_type: ResourceType) -> PracticeResource {
        PracticeResource {
            title: "Title".to_string(),
            description: "Description".to_string(),
            link: "https://ex.org".to_string(),
            resource_type,
        }
    }

    #[test]
    fn test_loading_shows_four_skeletons() {
        let view = render_practice_hub("Ohio", &[], true);
        assert_eq!(view.body, PracticeHubBody::Loading { skeletons: 4 });
        assert_eq!(view.title, "Practice Hub: Ohio");
    }

    #[test]
    fn test_cards_carry_type_badge_and_icon() {
        let view = render_practice_hub(
            "Ohio",
            &[resource(ResourceType::Test), resource(ResourceType::Drill)],
            false,
        );
        match view.body {
            PracticeHubBody::Resources { cards } => {
                assert_eq!(cards[0].badge, "Test");
                assert_eq!(cards[0].icon, "document");
                assert_eq!(cards[1].badge, "Drill");
                assert_eq!(cards[1].icon, "grid");
            }
            other => panic!("expected resources, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_prompts_for_location() {
        let view = render_practice_hub("Ohio", &[], false);
        assert!(matches!(view.body, PracticeHubBody::Empty { .. }));
    }
}
