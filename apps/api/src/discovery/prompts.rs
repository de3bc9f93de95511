// All provider prompt templates and model choices for the discovery operations.

/// Model used for course lists, insights and practice resources.
pub const STRUCTURED_MODEL: &str = "gemini-3-flash-preview";

/// Lighter model used for maps-grounded tutor lookups.
pub const GROUNDED_MODEL: &str = "gemini-2.5-flash-lite-latest";

/// Course list prompt. Replace: {category}, {budget}, {format}, {target}
pub const COURSES_PROMPT_TEMPLATE: &str = "Generate a list of the top 5 SAT preparation courses \
specifically categorized as '{category}'. Budget: ${budget}, Format: {format}, \
Target Increase: {target}+ points. Focus on college admission success for high-tier schools.";

pub const INSIGHT_PROMPT: &str = "Write a short, encouraging 2-sentence insight about how \
specific SAT improvements correlate with elite college acceptance.";

/// Shown whenever the insight cannot be produced.
pub const INSIGHT_FALLBACK: &str = "High scores open doors to elite opportunities.";

/// Tutor lookup prompt. Replace: {subject}, {location}, {filters}
pub const TUTORS_PROMPT_TEMPLATE: &str = "Find tutors for Grade 8-12 students specializing in \
'{subject}' in {location}{filters}. Provide a detailed summary.";

/// Narrative used when the tutor lookup succeeds without any text.
pub const TUTORS_EMPTY_TEXT: &str = "No information found.";

/// Number of practice resources requested per location.
pub const RESOURCE_COUNT: usize = 4;

/// Practice resource prompt. Replace: {location}, {count}
pub const RESOURCES_PROMPT_TEMPLATE: &str = "Find free SAT practice materials, latest syllabus \
updates (including NJ or specific state-wide requirements), and drill resources for students \
in {location}. Return {count} highly relevant items.";

/// Fills `{name}` placeholders in one left-to-right pass. Substituted values
/// are never rescanned, so braces typed by a user reach the provider verbatim.
/// Unknown placeholders are left as they are.
pub fn fill_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let known = after.find('}').and_then(|close| {
            let name = &after[..close];
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (close, *value))
        });
        match known {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_template_substitutes_known_names() {
        let filled = fill_template("{a} and {b}, {a}", &[("a", "x"), ("b", "y")]);
        assert_eq!(filled, "x and y, x");
    }

    #[test]
    fn test_fill_template_does_not_rescan_values() {
        let filled = fill_template("{a} then {b}", &[("a", "{b}"), ("b", "second")]);
        assert_eq!(filled, "{b} then second");
    }

    #[test]
    fn test_fill_template_keeps_unknown_and_unbalanced_braces() {
        assert_eq!(fill_template("{nope} {a", &[("a", "x")]), "{nope} {a");
    }
}
