pub mod course;
pub mod resource;
pub mod search;
pub mod tutor;
