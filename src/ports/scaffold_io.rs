use crate::domain::{AppError, Locals};

/// Port for file and process operations bound to a scaffold invocation's
/// source and target roots.
pub trait ScaffoldIoPort {
    /// Read a file relative to the source root.
    fn read(&self, path: &str) -> Result<String, AppError>;

    /// Write a file relative to the target root, rendering `content`
    /// against `locals` when given.
    fn write(&self, path: &str, content: &str, locals: Option<&Locals>) -> Result<(), AppError>;

    /// Rename a path relative to the target root.
    fn rename(&self, from: &str, to: &str) -> Result<(), AppError>;

    /// Remove paths relative to the target root. Absent paths are ignored.
    fn remove(&self, paths: &[&str]) -> Result<(), AppError>;

    /// Run a shell command with the target root (or a path relative to it)
    /// as working directory, returning captured stdout.
    fn exec(&self, command: &str, cwd: Option<&str>) -> Result<String, AppError>;
}
