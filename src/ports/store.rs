//! Template registry port.
//!
//! The store maps template names to saved templates under a storage root.
//! The lifecycle engine only needs existence checks and registration;
//! lookup and listing belong to the adapter's own surface.

use crate::domain::AppError;

/// Port for registering saved templates under the store root.
pub trait TemplateStorePort {
    /// Whether a template with this name is registered.
    fn contains(&self, name: &str) -> bool;

    /// Register a saved template under `name`.
    fn register(&mut self, name: &str, src: Option<&str>) -> Result<(), AppError>;

    /// Drop the registration for `name`. Unknown names are ignored.
    fn unregister(&mut self, name: &str);
}
