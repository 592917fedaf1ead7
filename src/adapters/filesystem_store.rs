use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::domain::AppError;
use crate::ports::TemplateStorePort;
use crate::services::Template;

/// Template registry over a storage root directory.
///
/// Every immediate subdirectory of the root is a candidate template; the
/// subdirectory name is the template name. Hidden entries (staging
/// directories among them) are not templates.
#[derive(Debug)]
pub struct FilesystemStore {
    root: PathBuf,
    templates: BTreeMap<String, Template>,
}

impl FilesystemStore {
    /// Scan `root` and build the registry. The root must be an existing
    /// directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, AppError> {
        let root = root.into();
        if !root.exists() {
            return Err(AppError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", root.display()),
            )));
        }
        if !root.is_dir() {
            return Err(AppError::Io(io::Error::new(
                io::ErrorKind::NotADirectory,
                format!("{} is not a directory", root.display()),
            )));
        }

        let mut templates = BTreeMap::new();
        for entry in fs::read_dir(&root)? {
            let entry = entry?;
            if !entry.path().is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }
            templates.insert(name.clone(), Template::new(&root, &name, None)?);
        }

        Ok(Self { root, templates })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Saved template registered under `name`, if any.
    pub fn lookup(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    /// Sorted names of all registered templates.
    pub fn names(&self) -> Vec<&str> {
        self.templates.keys().map(String::as_str).collect()
    }
}

impl TemplateStorePort for FilesystemStore {
    fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    fn register(&mut self, name: &str, src: Option<&str>) -> Result<(), AppError> {
        let template = Template::new(&self.root, name, src)?;
        self.templates.insert(name.to_string(), template);
        Ok(())
    }

    fn unregister(&mut self, name: &str) {
        self.templates.remove(name);
    }
}
