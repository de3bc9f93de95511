use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementSlot {
    /// Between the filter bar and the results.
    Top,
    /// Below the practice hub and tutor finder.
    Bottom,
}

/// A fixed promotional banner. Carries no session data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SponsoredPlacement {
    pub slot: PlacementSlot,
    pub label: &'static str,
    pub headline: &'static str,
    pub body: &'static str,
    pub cta: &'static str,
}

fn placement(slot: PlacementSlot) -> SponsoredPlacement {
    SponsoredPlacement {
        slot,
        label: "Sponsored",
        headline: "Need 1-on-1 Ivy League Mentorship?",
        body: "Connect with Stanford & MIT alumni for personalized college essays.",
        cta: "Learn More",
    }
}

pub fn render_sponsored() -> Vec<SponsoredPlacement> {
    vec![placement(PlacementSlot::Top), placement(PlacementSlot::Bottom)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_placements_top_then_bottom() {
        let placements = render_sponsored();
        let slots: Vec<PlacementSlot> = placements.iter().map(|p| p.slot).collect();
        assert_eq!(slots, vec![PlacementSlot::Top, PlacementSlot::Bottom]);
        assert!(placements.iter().all(|p| p.label == "Sponsored" && p.cta == "Learn More"));
    }

    #[test]
    fn test_slot_serializes_snake_case() {
        let json = serde_json::to_value(&render_sponsored()[1]).unwrap();
        assert_eq!(json["slot"], "bottom");
        assert_eq!(json["headline"], "Need 1-on-1 Ivy League Mentorship?");
    }
}
