//! Directory-tree copying for template acquisition and scaffolding.

use std::fs;
use std::io;
use std::path::Path;

use ignore::WalkBuilder;
use walkdir::WalkDir;

use crate::domain::AppError;

/// Copy a local git working tree into `dest`, honoring the repository's own
/// ignore rules. The `.git` directory is carried along verbatim.
pub fn copy_working_tree(src: &Path, dest: &Path) -> Result<(), AppError> {
    fs::create_dir_all(dest)?;

    let walker = WalkBuilder::new(src)
        .hidden(false)
        .git_ignore(true)
        .git_exclude(true)
        .git_global(false)
        .filter_entry(|entry| entry.file_name() != ".git")
        .build();

    for entry in walker {
        let entry = entry.map_err(|e| AppError::Io(io::Error::other(e)))?;
        let rel = entry.path().strip_prefix(src).map_err(|e| AppError::Io(io::Error::other(e)))?;
        if rel.as_os_str().is_empty() {
            continue;
        }
        let dest_path = dest.join(rel);
        if entry.file_type().is_some_and(|t| t.is_dir()) {
            fs::create_dir_all(&dest_path)?;
        } else {
            if let Some(parent) = dest_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &dest_path)?;
        }
    }

    let git_dir = src.join(".git");
    if git_dir.is_dir() {
        copy_dir(&git_dir, &dest.join(".git"))?;
    }
    Ok(())
}

/// Copy the scaffold `root` into `target` verbatim, creating `target`, and
/// return the relative paths of every copied file.
pub fn copy_scaffold(root: &Path, target: &Path) -> Result<Vec<String>, AppError> {
    fs::create_dir_all(target)?;

    let mut copied = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| AppError::Io(io::Error::other(e)))?;
        let rel = entry.path().strip_prefix(root).map_err(|e| AppError::Io(io::Error::other(e)))?;
        if rel.as_os_str().is_empty() {
            continue;
        }
        let dest_path = target.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest_path)?;
        } else {
            if let Some(parent) = dest_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &dest_path)?;
            copied.push(rel.to_string_lossy().into_owned());
        }
    }
    copied.sort();
    Ok(copied)
}

fn copy_dir(src: &Path, dest: &Path) -> Result<(), AppError> {
    for entry in WalkDir::new(src) {
        let entry = entry.map_err(|e| AppError::Io(io::Error::other(e)))?;
        let rel = entry.path().strip_prefix(src).map_err(|e| AppError::Io(io::Error::other(e)))?;
        let dest_path = dest.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest_path)?;
        } else {
            if let Some(parent) = dest_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &dest_path)?;
        }
    }
    Ok(())
}
