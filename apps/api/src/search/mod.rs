// Filter/search state: per-session criteria, result slots and the controller
// that keeps them fresh.

pub mod controller;
pub mod handlers;
pub mod sequence;
pub mod session;
