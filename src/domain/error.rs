use std::io;

use thiserror::Error;

/// Library-wide error type for burgeon operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Template name is missing or empty.
    #[error("name required")]
    NameRequired,

    /// Template has no source to save from.
    #[error("no source provided for template '{0}'")]
    NoSource(String),

    /// Network reachability probe failed before a remote clone.
    #[error("no internet connection")]
    NoInternet,

    /// Local source path does not exist.
    #[error("source {0} does not exist")]
    SourceNotFound(String),

    /// Path exists but is not a git repository.
    #[error("{0} is not a git repository")]
    NotAGitRepository(String),

    /// Template has neither an init.toml nor an init.json entry manifest.
    #[error("neither init.toml nor init.json exists in template '{0}'")]
    MissingEntryModule(String),

    /// Template has no root/ directory to scaffold from.
    #[error("root path doesn't exist in template '{0}'")]
    MissingRoot(String),

    /// No saved template is registered under the given name.
    #[error("template '{0}' does not exist")]
    TemplateNotFound(String),

    /// Operation requires a target path.
    #[error("target path required")]
    TargetRequired,

    /// Target already exists on disk.
    #[error("{0} already exists")]
    TargetExists(String),

    /// Target does not exist on disk.
    #[error("{0} does not exist")]
    TargetNotFound(String),

    /// Requested branch or tag does not exist in the template repository.
    #[error("ref '{0}' does not exist")]
    RefNotFound(String),

    /// External configuration file could not be opened or parsed.
    #[error("invalid config file {path}: {details}")]
    InvalidConfigFile { path: String, details: String },

    /// `run` was called without a generator name.
    #[error("generator name required")]
    GeneratorNameRequired,

    /// Named generator is not declared in the entry manifest.
    #[error("'{generator}' is not a generator in template '{name}'")]
    GeneratorNotFound { name: String, generator: String },

    /// Entry manifest exists but could not be loaded.
    #[error("failed to load entry manifest for template '{name}': {details}")]
    ModuleLoadError { name: String, details: String },

    /// Template expression could not be rendered.
    #[error("failed to render {file}: {details}")]
    RenderError { file: String, details: String },

    /// Hook or generator subprocess failed.
    #[error("script '{script}' failed: {details}")]
    ScriptError { script: String, details: String },

    /// Git execution failed.
    #[error("git error running '{command}': {details}")]
    GitError { command: String, details: String },
}

impl AppError {
    /// Provide an `io::ErrorKind`-like view for callers branching on failure class.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::NameRequired
            | AppError::NoSource(_)
            | AppError::TargetRequired
            | AppError::GeneratorNameRequired
            | AppError::InvalidConfigFile { .. }
            | AppError::ModuleLoadError { .. }
            | AppError::RenderError { .. } => io::ErrorKind::InvalidInput,
            AppError::SourceNotFound(_)
            | AppError::TemplateNotFound(_)
            | AppError::TargetNotFound(_)
            | AppError::RefNotFound(_)
            | AppError::MissingEntryModule(_)
            | AppError::MissingRoot(_)
            | AppError::GeneratorNotFound { .. } => io::ErrorKind::NotFound,
            AppError::TargetExists(_) => io::ErrorKind::AlreadyExists,
            AppError::NotAGitRepository(_) => io::ErrorKind::InvalidData,
            AppError::NoInternet | AppError::ScriptError { .. } | AppError::GitError { .. } => {
                io::ErrorKind::Other
            }
        }
    }
}
