//! burgeon: manage git-backed project templates and scaffold new projects
//! from them.
//!
//! A template is a git repository whose `root/` directory holds the files to
//! scaffold and whose `init.toml` (or `init.json`) entry manifest declares
//! default locals, an ignore list, questionnaire prompts, lifecycle hooks,
//! and named generators. [`Burgeon`] is the embedding handle over a template
//! store; the CLI in `main.rs` is a thin layer over it.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

use std::path::{Path, PathBuf};

use adapters::{DnsNetworkProbe, FilesystemStore, GitCommandAdapter, ShellScriptRunner};

pub use domain::AppError;
pub use domain::Locals;
pub use domain::locals::parse_key_values;
pub use services::{InitOptions, Template};

/// Handle over a template store root, wired to the production adapters.
pub struct Burgeon {
    store: FilesystemStore,
    git: GitCommandAdapter,
    probe: DnsNetworkProbe,
    scripts: ShellScriptRunner,
}

impl Burgeon {
    /// Open an existing store root directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, AppError> {
        Ok(Self {
            store: FilesystemStore::open(root)?,
            git: GitCommandAdapter::new(),
            probe: DnsNetworkProbe,
            scripts: ShellScriptRunner,
        })
    }

    /// The store root directory.
    pub fn root(&self) -> &Path {
        self.store.root()
    }

    /// Save a template under `name` from a remote URL or local working tree.
    pub fn add(&mut self, name: &str, src: &str) -> Result<(), AppError> {
        let template = Template::new(self.store.root(), name, Some(src))?;
        template.save(&self.git, &self.probe, &mut self.store)
    }

    /// Delete a saved template from disk and unregister it.
    pub fn remove(&mut self, name: &str) -> Result<(), AppError> {
        let template = self.lookup(name)?.clone();
        template.remove(&mut self.store)
    }

    /// Sorted names of all saved templates.
    pub fn list(&self) -> Vec<&str> {
        self.store.names()
    }

    /// Scaffold a new project at `target` from the named template.
    pub fn init(
        &self,
        name: &str,
        target: &Path,
        options: &InitOptions<'_>,
    ) -> Result<(), AppError> {
        self.lookup(name)?.init(&self.git, &self.scripts, target, options)
    }

    /// Run a named generator of the template against a scaffolded `target`.
    pub fn run(
        &self,
        name: &str,
        target: &Path,
        generator: &str,
        args: &[String],
    ) -> Result<(), AppError> {
        self.lookup(name)?.run(&self.scripts, target, generator, args)
    }

    /// Pull the latest content for a saved template.
    pub fn update(&self, name: &str) -> Result<(), AppError> {
        self.lookup(name)?.update(&self.git)
    }

    fn lookup(&self, name: &str) -> Result<&Template, AppError> {
        self.store.lookup(name).ok_or_else(|| AppError::TemplateNotFound(name.to_string()))
    }
}
