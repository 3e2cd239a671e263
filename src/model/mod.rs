pub mod project;
pub mod translation;
