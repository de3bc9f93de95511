// View models: stateless renderers from session state to what the client paints.
// No business rules here beyond display formatting.

pub mod chart;
pub mod course_card;
pub mod filter_bar;
pub mod page;
pub mod practice_hub;
pub mod results;
pub mod sponsored;
pub mod tutor_finder;
