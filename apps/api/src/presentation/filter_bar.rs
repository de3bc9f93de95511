use serde::Serialize;

use crate::models::course::{CourseCategory, CourseFormat};
use crate::models::search::{PreferredFormat, SearchCriteria};

const BUDGET_MIN: u32 = 0;
const BUDGET_MAX: u32 = 3000;
const BUDGET_STEP: u32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTab {
    pub category: CourseCategory,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormatOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSlider {
    pub min: u32,
    pub max: u32,
    pub step: u32,
    pub value: u32,
    pub display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchButton {
    pub label: &'static str,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterBarView {
    pub tabs: Vec<CategoryTab>,
    pub budget: BudgetSlider,
    pub formats: Vec<FormatOption>,
    pub target_score_increase: u32,
    pub search_button: SearchButton,
}

pub fn render_filter_bar(criteria: &SearchCriteria, busy: bool) -> FilterBarView {
    let any = FormatOption {
        value: PreferredFormat::Any.label().to_string(),
        label: "Any Format".to_string(),
        selected: criteria.preferred_format == PreferredFormat::Any,
    };
    let formats = std::iter::once(any)
        .chain(CourseFormat::ALL.iter().map(|f| FormatOption {
            value: f.label().to_string(),
            label: f.label().to_string(),
            selected: criteria.preferred_format == PreferredFormat::Only(*f),
        }))
        .collect();

    FilterBarView {
        tabs: CourseCategory::ALL
            .iter()
            .map(|c| CategoryTab {
                category: *c,
                active: *c == criteria.category,
            })
            .collect(),
        budget: BudgetSlider {
            min: BUDGET_MIN,
            max: BUDGET_MAX,
            step: BUDGET_STEP,
            value: criteria.budget_max,
            display: format!("${}", criteria.budget_max),
        },
        formats,
        target_score_increase: criteria.target_score_increase,
        search_button: if busy {
            SearchButton {
                label: "Scanning Database...",
                disabled: true,
            }
        } else {
            SearchButton {
                label: "Update Insights",
                disabled: false,
            }
        },
    }
}
