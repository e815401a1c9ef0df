pub mod edit;
pub mod render;
