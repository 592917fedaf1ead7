//! The template lifecycle engine: save, init, run, update, remove.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::adapters::ScaffoldWorkspace;
use crate::domain::{AppError, Locals, SourceKind, TemplateManifest, locals, source};
use crate::ports::{
    GitPort, NetworkProbePort, QuestionnairePort, ScaffoldIoPort, ScriptInvocation,
    ScriptRunnerPort, TemplateStorePort,
};
use crate::services::{resolver, tree};

/// Subdirectory of a saved template holding the scaffold content.
/// Everything outside it is template machinery.
pub const ROOT_DIR: &str = "root";

/// Options accepted by [`Template::init`].
#[derive(Default)]
pub struct InitOptions<'a> {
    /// Explicit locals, highest precedence in configuration resolution.
    pub locals: Locals,
    /// External configuration file merged beneath the questionnaire.
    pub config: Option<PathBuf>,
    /// Branch checked out in the stored template for the duration of init.
    pub branch: Option<String>,
    /// Tag checked out in the stored template for the duration of init.
    pub tag: Option<String>,
    /// Questionnaire asked the manifest's prompts during resolution.
    pub questionnaire: Option<&'a dyn QuestionnairePort>,
}

/// A named, git-backed scaffold source managed under a store root.
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    src: Option<String>,
    path: PathBuf,
}

impl Template {
    /// Construct an in-memory template. Nothing touches disk until `save`.
    pub fn new(store_root: &Path, name: &str, src: Option<&str>) -> Result<Self, AppError> {
        if name.trim().is_empty() {
            return Err(AppError::NameRequired);
        }
        Ok(Self {
            name: name.to_string(),
            src: src.map(str::to_string),
            path: store_root.join(name),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn src(&self) -> Option<&str> {
        self.src.as_deref()
    }

    /// Managed on-disk location of the saved template.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The scaffold content directory inside `path`.
    pub fn root(&self) -> PathBuf {
        self.path.join(ROOT_DIR)
    }

    /// Whether the source is a git-clonable URL rather than a local path.
    pub fn is_remote(&self) -> bool {
        self.src.as_deref().is_some_and(|s| SourceKind::classify(s).is_remote())
    }

    /// Whether the template has been saved to its managed location.
    pub fn is_saved(&self) -> bool {
        self.path.is_dir()
    }

    /// Persist the template's source into the store under its name.
    ///
    /// The source is materialized into a staging directory first and only
    /// swapped into place after structural validation, so a failed save
    /// leaves either the previous template or nothing.
    pub fn save<G, N>(
        &self,
        git: &G,
        probe: &N,
        store: &mut dyn TemplateStorePort,
    ) -> Result<(), AppError>
    where
        G: GitPort,
        N: NetworkProbePort,
    {
        let src = self.src.as_deref().ok_or_else(|| AppError::NoSource(self.name.clone()))?;
        let store_root = self.path.parent().map(Path::to_path_buf).unwrap_or_default();

        let staging = tempfile::Builder::new()
            .prefix(".staging-")
            .tempdir_in(&store_root)
            .map_err(AppError::Io)?;

        if SourceKind::classify(src).is_remote() {
            let host = source::clone_host(src).unwrap_or_else(|| "github.com".to_string());
            if !probe.is_reachable(&host) {
                return Err(AppError::NoInternet);
            }
            git.clone_repository(src, staging.path())?;
        } else {
            let src_path = Path::new(src);
            if !src_path.exists() {
                return Err(AppError::SourceNotFound(src.to_string()));
            }
            if !src_path.join(".git").exists() {
                return Err(AppError::NotAGitRepository(src.to_string()));
            }
            tree::copy_working_tree(src_path, staging.path())?;
        }

        // Structural validation. Dropping the staging handle on the error
        // paths deletes the materialized copy.
        if TemplateManifest::entry_path(staging.path()).is_none() {
            return Err(AppError::MissingEntryModule(self.name.clone()));
        }
        if !staging.path().join(ROOT_DIR).is_dir() {
            return Err(AppError::MissingRoot(self.name.clone()));
        }

        if self.path.exists() {
            fs::remove_dir_all(&self.path)?;
        }
        fs::rename(staging.keep(), &self.path)?;
        store.register(&self.name, Some(src))?;
        Ok(())
    }

    /// Materialize a ready-to-use project at `target`.
    ///
    /// On any failure past the preconditions the partially created target
    /// is removed and the stored template is returned to its original
    /// branch before the error propagates.
    pub fn init<G, S>(
        &self,
        git: &G,
        scripts: &S,
        target: &Path,
        options: &InitOptions<'_>,
    ) -> Result<(), AppError>
    where
        G: GitPort,
        S: ScriptRunnerPort,
    {
        if !self.path.is_dir() {
            return Err(AppError::TemplateNotFound(self.name.clone()));
        }
        if !self.root().is_dir() {
            return Err(AppError::MissingRoot(self.name.clone()));
        }
        if target.as_os_str().is_empty() {
            return Err(AppError::TargetRequired);
        }
        if target.exists() {
            return Err(AppError::TargetExists(target.display().to_string()));
        }
        if !self.path.join(".git").exists() {
            return Err(AppError::NotAGitRepository(self.name.clone()));
        }

        // Ref selection is scoped to the stored copy: snapshot the branch,
        // check out the requested ref, and restore afterwards whatever the
        // outcome so future inits see the default ref.
        let requested = options.tag.as_deref().or(options.branch.as_deref());
        let original_branch = match requested {
            Some(reference) => {
                if !git.ref_exists(&self.path, reference) {
                    return Err(AppError::RefNotFound(reference.to_string()));
                }
                let branch = git.current_branch(&self.path)?;
                git.checkout(&self.path, reference)?;
                Some(branch)
            }
            None => None,
        };

        let result = self.materialize(scripts, target, options);

        if let Some(branch) = original_branch {
            let restored = git.checkout(&self.path, &branch);
            if result.is_ok() {
                restored?;
            }
        }
        result
    }

    fn materialize<S: ScriptRunnerPort>(
        &self,
        scripts: &S,
        target: &Path,
        options: &InitOptions<'_>,
    ) -> Result<(), AppError> {
        let outcome = self.materialize_stages(scripts, target, options);
        if outcome.is_err() && target.exists() {
            // Best-effort rollback; the original error wins.
            let _ = fs::remove_dir_all(target);
        }
        outcome
    }

    fn materialize_stages<S: ScriptRunnerPort>(
        &self,
        scripts: &S,
        target: &Path,
        options: &InitOptions<'_>,
    ) -> Result<(), AppError> {
        let manifest = TemplateManifest::load(&self.path, &self.name)?;
        let mut resolved = resolver::resolve(
            &manifest,
            options.config.as_deref(),
            options.questionnaire,
            &options.locals,
        )?;

        let root = self.root();

        // The target may not exist yet; a before hook that needs it is
        // responsible for creating it.
        if let Some(before) = &manifest.hooks.before {
            self.run_script(scripts, before, &root, target, &resolved, &self.path, &[])?;
        }

        let copied = tree::copy_scaffold(&root, target)?;

        if let Some(before_render) = &manifest.hooks.before_render {
            let stdout =
                self.run_script(scripts, before_render, &root, target, &resolved, &self.path, &[])?;
            let lines: Vec<&str> =
                stdout.lines().map(str::trim).filter(|line| !line.is_empty()).collect();
            locals::merge(&mut resolved, locals::parse_key_values(&lines));
        }

        let ignored: BTreeSet<&str> = manifest.ignore.iter().map(String::as_str).collect();
        let workspace = ScaffoldWorkspace::new(&root, target);
        for rel in &copied {
            if ignored.contains(rel.as_str()) {
                continue;
            }
            let raw = fs::read(target.join(rel))?;
            // Binary content stays exactly as copied.
            let Ok(content) = String::from_utf8(raw) else {
                continue;
            };
            workspace.write(rel, &content, Some(&resolved))?;
        }

        if target.join("package.json").is_file() {
            workspace.exec("npm install", None)?;
        }

        if let Some(after) = &manifest.hooks.after {
            self.run_script(scripts, after, &root, target, &resolved, target, &[])?;
        }
        Ok(())
    }

    /// Execute a named generator from the entry manifest against `target`.
    pub fn run<S: ScriptRunnerPort>(
        &self,
        scripts: &S,
        target: &Path,
        generator: &str,
        args: &[String],
    ) -> Result<(), AppError> {
        if target.as_os_str().is_empty() {
            return Err(AppError::TargetRequired);
        }
        if !target.exists() {
            return Err(AppError::TargetNotFound(target.display().to_string()));
        }
        if generator.is_empty() {
            return Err(AppError::GeneratorNameRequired);
        }

        let manifest = TemplateManifest::load(&self.path, &self.name)?;
        let command = manifest.generators.get(generator).ok_or_else(|| {
            AppError::GeneratorNotFound {
                name: self.name.clone(),
                generator: generator.to_string(),
            }
        })?;

        // Generators look things up from the template path itself, not root.
        self.run_script(scripts, command, &self.path, target, &manifest.config, target, args)?;
        Ok(())
    }

    /// Pull the latest content for the saved template.
    pub fn update<G: GitPort>(&self, git: &G) -> Result<(), AppError> {
        if !self.path.join(".git").exists() {
            return Err(AppError::NotAGitRepository(self.name.clone()));
        }
        git.pull(&self.path)
    }

    /// Delete the saved template from disk and unregister it. Removing an
    /// already-absent template is not an error.
    pub fn remove(&self, store: &mut dyn TemplateStorePort) -> Result<(), AppError> {
        if self.path.exists() {
            fs::remove_dir_all(&self.path)?;
        }
        store.unregister(&self.name);
        Ok(())
    }

    fn run_script<S: ScriptRunnerPort>(
        &self,
        scripts: &S,
        command: &str,
        source_root: &Path,
        target: &Path,
        locals_map: &Locals,
        cwd: &Path,
        args: &[String],
    ) -> Result<String, AppError> {
        let invocation = ScriptInvocation {
            command: command.to_string(),
            args: args.to_vec(),
            cwd: cwd.to_path_buf(),
            env: scaffold_env(&self.path, source_root, target, locals_map),
        };
        scripts.run(&invocation)
    }
}

/// Context environment handed to hook and generator subprocesses.
fn scaffold_env(
    template_path: &Path,
    source_root: &Path,
    target: &Path,
    locals_map: &Locals,
) -> Vec<(String, String)> {
    vec![
        ("BURGEON_TEMPLATE_PATH".to_string(), template_path.display().to_string()),
        ("BURGEON_SOURCE_PATH".to_string(), source_root.display().to_string()),
        ("BURGEON_TARGET_PATH".to_string(), target.display().to_string()),
        (
            "BURGEON_LOCALS".to_string(),
            serde_json::Value::Object(locals_map.clone()).to_string(),
        ),
    ]
}
