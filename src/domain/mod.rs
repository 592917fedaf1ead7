//! Pure domain types: errors, source classification, locals, the entry manifest.

pub mod error;
pub mod locals;
pub mod manifest;
pub mod source;

pub use error::AppError;
pub use locals::Locals;
pub use manifest::{Hooks, PromptSpec, TemplateManifest};
pub use source::SourceKind;
