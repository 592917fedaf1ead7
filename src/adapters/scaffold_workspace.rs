use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::domain::{AppError, Locals};
use crate::ports::ScaffoldIoPort;
use crate::services::render;

/// Process-helper capability bound to one scaffold invocation: reads resolve
/// against the source root, writes and commands against the target root.
#[derive(Debug, Clone)]
pub struct ScaffoldWorkspace {
    source_root: PathBuf,
    target_root: PathBuf,
}

impl ScaffoldWorkspace {
    pub fn new(source_root: impl Into<PathBuf>, target_root: impl Into<PathBuf>) -> Self {
        Self { source_root: source_root.into(), target_root: target_root.into() }
    }
}

impl ScaffoldIoPort for ScaffoldWorkspace {
    fn read(&self, path: &str) -> Result<String, AppError> {
        fs::read_to_string(self.source_root.join(path)).map_err(AppError::from)
    }

    fn write(&self, path: &str, content: &str, locals: Option<&Locals>) -> Result<(), AppError> {
        let rendered = match locals {
            Some(locals_map) => render::render_str(content, locals_map, path)?,
            None => content.to_string(),
        };
        let full_path = self.target_root.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(full_path, rendered).map_err(AppError::from)
    }

    fn rename(&self, from: &str, to: &str) -> Result<(), AppError> {
        fs::rename(self.target_root.join(from), self.target_root.join(to)).map_err(AppError::from)
    }

    fn remove(&self, paths: &[&str]) -> Result<(), AppError> {
        for path in paths {
            let full_path = self.target_root.join(path);
            if full_path.is_dir() {
                fs::remove_dir_all(full_path)?;
            } else if full_path.exists() {
                fs::remove_file(full_path)?;
            }
        }
        Ok(())
    }

    fn exec(&self, command: &str, cwd: Option<&str>) -> Result<String, AppError> {
        let dir = match cwd {
            Some(rel) => self.target_root.join(rel),
            None => self.target_root.clone(),
        };
        let output = Command::new("sh")
            .args(["-c", command])
            .current_dir(&dir)
            .output()
            .map_err(AppError::from)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(AppError::ScriptError {
                script: command.to_string(),
                details: if stderr.is_empty() {
                    format!("exit status {}", output.status)
                } else {
                    stderr
                },
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}
