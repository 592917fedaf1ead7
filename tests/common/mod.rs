//! Shared testing utilities for burgeon tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command as StdCommand;

use assert_cmd::Command;
use tempfile::TempDir;

/// Isolated environment: a template store root, a work directory for
/// targets, and builders for local fixture templates.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    store_dir: PathBuf,
    work_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let store_dir = root.path().join("store");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&store_dir).expect("Failed to create test store directory");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");
        Self { root, store_dir, work_dir }
    }

    /// The template store root.
    pub fn store_dir(&self) -> &Path {
        &self.store_dir
    }

    /// Directory for scaffold targets.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// A target path inside the work directory (not created).
    pub fn target(&self, name: &str) -> PathBuf {
        self.work_dir.join(name)
    }

    /// Build a command for the compiled `burgeon` binary against this store.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("burgeon").expect("Failed to locate burgeon binary");
        cmd.current_dir(&self.work_dir).env("BURGEON_PATH", &self.store_dir);
        cmd
    }

    /// Start a local fixture template named `name` under this context.
    pub fn fixture(&self, name: &str) -> FixtureTemplate {
        FixtureTemplate::new(self.root.path().join("fixtures").join(name))
    }

    /// Source path string of a fixture created earlier.
    pub fn fixture_src(&self, name: &str) -> String {
        self.root.path().join("fixtures").join(name).to_string_lossy().into_owned()
    }
}

/// A local git working tree shaped like a template source.
#[allow(dead_code)]
pub struct FixtureTemplate {
    dir: PathBuf,
}

#[allow(dead_code)]
impl FixtureTemplate {
    fn new(dir: PathBuf) -> Self {
        fs::create_dir_all(&dir).expect("Failed to create fixture directory");
        let fixture = Self { dir };
        fixture.git(&["init"]);
        fixture.git(&["config", "user.name", "Test User"]);
        fixture.git(&["config", "user.email", "test@example.com"]);
        fixture
    }

    /// Source path to hand to `add`/`save`.
    pub fn path(&self) -> &Path {
        &self.dir
    }

    pub fn src(&self) -> String {
        self.dir.to_string_lossy().into_owned()
    }

    /// Write the entry manifest.
    pub fn manifest(&self, content: &str) -> &Self {
        self.file("init.toml", content)
    }

    /// Write a file under the scaffold root.
    pub fn scaffold_file(&self, rel: &str, content: &str) -> &Self {
        self.file(&format!("root/{rel}"), content)
    }

    /// Write an arbitrary file relative to the fixture.
    pub fn file(&self, rel: &str, content: &str) -> &Self {
        let path = self.dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create fixture subdirectory");
        }
        fs::write(path, content).expect("Failed to write fixture file");
        self
    }

    /// Ensure the scaffold root exists even when empty.
    pub fn empty_root(&self) -> &Self {
        fs::create_dir_all(self.dir.join("root")).expect("Failed to create fixture root");
        self
    }

    /// Stage and commit everything.
    pub fn commit(&self, message: &str) -> &Self {
        self.git(&["add", "-A"]);
        self.git(&["commit", "--allow-empty", "-m", message]);
        self
    }

    /// Create a branch at the current commit.
    pub fn branch(&self, name: &str) -> &Self {
        self.git(&["branch", name]);
        self
    }

    /// Check out an existing ref.
    pub fn checkout(&self, reference: &str) -> &Self {
        self.git(&["checkout", reference]);
        self
    }

    /// Tag the current commit.
    pub fn tag(&self, name: &str) -> &Self {
        self.git(&["tag", name]);
        self
    }

    /// Run a git subcommand inside the fixture.
    pub fn git(&self, args: &[&str]) -> String {
        let output = StdCommand::new("git")
            .args(args)
            .current_dir(&self.dir)
            .output()
            .expect("Failed to spawn git");
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    /// A minimal valid template: manifest plus one rendered file.
    pub fn minimal(&self) -> &Self {
        self.manifest("[config]\nfoo = \"bar\"\n")
            .scaffold_file("foo.txt", "{{ foo }}\n")
            .commit("template")
    }
}
