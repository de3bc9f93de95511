use serde::Serialize;

use crate::models::tutor::{GroundingSource, TutorFilters};
use crate::search::session::TutorLookup;

const RATING_OPTIONS: [(&str, &str); 3] = [("", "Any Rating"), ("4.0", "4.0+ Stars"), ("4.5", "4.5+ Stars")];
const PRICE_OPTIONS: [(&str, &str); 3] = [("", "Any Price"), ("Budget", "$ Budget"), ("Moderate", "$$ Moderate")];
const AVAILABILITY_OPTIONS: [(&str, &str); 3] = [("", "Any Time"), ("Weekends", "Weekends"), ("Weekdays", "Weekdays")];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapListing {
    pub title: String,
    pub uri: String,
    pub caption: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TutorPanel {
    Prompt { message: &'static str },
    Loading { label: &'static str },
    Results {
        summary: String,
        listings_heading: Option<&'static str>,
        listings: Vec<MapListing>,
    },
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextInput {
    pub value: String,
    pub placeholder: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSelect {
    /// Key in the `filters` object of a tutor search request.
    pub field: &'static str,
    pub options: Vec<SelectOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorForm {
    pub subject: TextInput,
    pub location: TextInput,
    pub filters_toggle_label: &'static str,
    /// Filters start open when the last search used any of them.
    pub filters_expanded: bool,
    pub filters: Vec<FilterSelect>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorFinderView {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub form: TutorForm,
    pub submit_label: &'static str,
    pub panel: TutorPanel,
}

fn select(field: &'static str, options: &[(&'static str, &'static str)], current: &str) -> FilterSelect {
    // An unrecognized value selects nothing rather than guessing.
    FilterSelect {
        field,
        options: options
            .iter()
            .map(|&(value, label)| SelectOption {
                value,
                label,
                selected: value == current,
            })
            .collect(),
    }
}

fn render_form(location: &str, subject: &str, filters: &TutorFilters) -> TutorForm {
    let filters_expanded =
        !(filters.rating.is_empty() && filters.price.is_empty() && filters.availability.is_empty());
    TutorForm {
        subject: TextInput {
            value: subject.to_string(),
            placeholder: "Subject (e.g. Essay Writing)",
        },
        location: TextInput {
            value: location.to_string(),
            placeholder: "City or State",
        },
        filters_toggle_label: if filters_expanded {
            "Hide Filters"
        } else {
            "Advanced Filters"
        },
        filters_expanded,
        filters: vec![
            select("rating", &RATING_OPTIONS, &filters.rating),
            select("price", &PRICE_OPTIONS, &filters.price),
            select("availability", &AVAILABILITY_OPTIONS, &filters.availability),
        ],
    }
}

fn listing(source: &GroundingSource) -> MapListing {
    MapListing {
        title: source.title().to_string(),
        uri: source.uri().to_string(),
        caption: "Verified Location",
    }
}

pub fn render_tutor_finder(
    lookup: &TutorLookup,
    location: &str,
    subject: &str,
    filters: &TutorFilters,
) -> TutorFinderView {
    let loading = matches!(lookup, TutorLookup::Loading);
    let panel = match lookup {
        TutorLookup::Idle => TutorPanel::Prompt {
            message: "Enter your location and subject to find certified tutors.",
        },
        TutorLookup::Loading => TutorPanel::Loading {
            label: "Searching Maps...",
        },
        TutorLookup::Ready { response } => {
            let listings: Vec<MapListing> = response.grounding_chunks.iter().map(listing).collect();
            TutorPanel::Results {
                summary: response.text.clone(),
                listings_heading: (!listings.is_empty()).then_some("Verified Map Listings"),
                listings,
            }
        }
        TutorLookup::Failed { message } => TutorPanel::Failed {
            message: message.clone(),
        },
    };

    TutorFinderView {
        title: "Local Experts",
        subtitle: "Find high school tutors for Vocab, Essay Writing, and Math.",
        form: render_form(location, subject, filters),
        submit_label: if loading {
            "Searching Maps..."
        } else {
            "Find Local Experts"
        },
        panel,
    }
}
