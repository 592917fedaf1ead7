//! The template entry manifest.
//!
//! Every saved template carries a declarative manifest, `init.toml` or
//! `init.json` (`init.toml` wins when both exist), describing default
//! locals, the ignore list, questionnaire prompts, lifecycle hooks, and
//! named generators. Hooks and generators are shell commands executed over
//! the subprocess contract in `services::template`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::{AppError, Locals};

/// Preferred entry manifest file name.
pub const ENTRY_TOML: &str = "init.toml";
/// Fallback entry manifest file name.
pub const ENTRY_JSON: &str = "init.json";

/// Parsed entry manifest of a saved template.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateManifest {
    /// Default locals, lowest precedence in configuration resolution.
    #[serde(default)]
    pub config: Locals,

    /// Relative paths copied verbatim and excluded from rendering.
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Questionnaire prompts answered interactively during `init`.
    #[serde(default)]
    pub prompts: Vec<PromptSpec>,

    /// Lifecycle hook commands.
    #[serde(default)]
    pub hooks: Hooks,

    /// Named generator commands invokable via `run`.
    #[serde(default)]
    pub generators: BTreeMap<String, String>,
}

/// One questionnaire prompt.
#[derive(Debug, Clone, Deserialize)]
pub struct PromptSpec {
    /// Locals key the answer is stored under.
    pub key: String,
    /// Message shown to the user.
    pub message: String,
    /// Default answer, if any.
    #[serde(default)]
    pub default: Option<String>,
}

/// Commands run at fixed pipeline stages of `init`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Hooks {
    /// Runs before the scaffold is copied; the target may not exist yet.
    #[serde(default)]
    pub before: Option<String>,
    /// Runs after the copy; stdout is parsed as `key=value` locals.
    #[serde(default)]
    pub before_render: Option<String>,
    /// Runs last, with the target as working directory.
    #[serde(default)]
    pub after: Option<String>,
}

impl TemplateManifest {
    /// Path of the entry manifest inside `template_path`, preferring
    /// `init.toml` over `init.json`. `None` when neither exists.
    pub fn entry_path(template_path: &Path) -> Option<PathBuf> {
        let toml_entry = template_path.join(ENTRY_TOML);
        if toml_entry.is_file() {
            return Some(toml_entry);
        }
        let json_entry = template_path.join(ENTRY_JSON);
        if json_entry.is_file() { Some(json_entry) } else { None }
    }

    /// Load and parse the entry manifest of the template at `template_path`.
    ///
    /// Fails `MissingEntryModule` when no manifest exists and
    /// `ModuleLoadError` when one exists but cannot be read or parsed.
    pub fn load(template_path: &Path, template_name: &str) -> Result<Self, AppError> {
        let entry = Self::entry_path(template_path)
            .ok_or_else(|| AppError::MissingEntryModule(template_name.to_string()))?;

        let content = fs::read_to_string(&entry).map_err(|e| AppError::ModuleLoadError {
            name: template_name.to_string(),
            details: e.to_string(),
        })?;

        let manifest = if entry.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content).map_err(|e| AppError::ModuleLoadError {
                name: template_name.to_string(),
                details: e.to_string(),
            })?
        } else {
            toml::from_str(&content).map_err(|e| AppError::ModuleLoadError {
                name: template_name.to_string(),
                details: e.to_string(),
            })?
        };

        Ok(manifest)
    }
}
