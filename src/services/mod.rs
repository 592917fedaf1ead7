//! The template lifecycle engine and its supporting services.

pub mod render;
pub mod resolver;
pub mod template;
pub mod tree;

pub use template::{InitOptions, Template};
