use std::path::Path;
use std::process::Command;

use git2::Repository;

use crate::domain::AppError;
use crate::ports::GitPort;

/// Git client backed by the `git` binary, with `git2` for repository
/// introspection that subcommand output makes awkward (branch snapshots).
#[derive(Debug, Clone, Copy, Default)]
pub struct GitCommandAdapter;

impl GitCommandAdapter {
    pub fn new() -> Self {
        Self
    }

    fn repo(&self, path: &Path) -> Result<Repository, AppError> {
        Repository::open(path).map_err(|e| AppError::GitError {
            command: "git2::Repository::open".to_string(),
            details: e.to_string(),
        })
    }

    fn run(&self, args: &[&str], cwd: &Path) -> Result<String, AppError> {
        let mut command = Command::new("git");
        command.args(args);
        command.current_dir(cwd);

        let output = command.output().map_err(|e| AppError::GitError {
            command: format!("git {}", args.join(" ")),
            details: e.to_string(),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(AppError::GitError {
                command: format!("git {}", args.join(" ")),
                details: if stderr.is_empty() { "Unknown error".to_string() } else { stderr },
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl GitPort for GitCommandAdapter {
    fn clone_repository(&self, src: &str, dest: &Path) -> Result<(), AppError> {
        let parent = dest.parent().unwrap_or(Path::new("."));
        let dest_str = dest.to_string_lossy();
        self.run(&["clone", src, dest_str.as_ref()], parent)?;
        Ok(())
    }

    fn pull(&self, repo: &Path) -> Result<(), AppError> {
        self.run(&["pull"], repo)?;
        Ok(())
    }

    fn checkout(&self, repo: &Path, reference: &str) -> Result<(), AppError> {
        self.run(&["checkout", reference], repo)?;
        Ok(())
    }

    fn ref_exists(&self, repo: &Path, reference: &str) -> bool {
        let revision = format!("{}^{{commit}}", reference);
        self.run(&["rev-parse", "--verify", "--quiet", &revision], repo).is_ok()
    }

    fn current_branch(&self, repo: &Path) -> Result<String, AppError> {
        let repo = self.repo(repo)?;

        match repo.head() {
            Ok(head) => {
                let shorthand = head.shorthand().ok_or_else(|| AppError::GitError {
                    command: "git2::Reference::shorthand".to_string(),
                    details: "HEAD has no shorthand".to_string(),
                })?;
                Ok(shorthand.to_string())
            }
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => {
                let head_ref = repo.find_reference("HEAD").map_err(|e| AppError::GitError {
                    command: "git2::Repository::find_reference(HEAD)".to_string(),
                    details: e.to_string(),
                })?;

                if let Some(target) = head_ref.symbolic_target() {
                    Ok(target.strip_prefix("refs/heads/").unwrap_or(target).to_string())
                } else {
                    Err(AppError::GitError {
                        command: "current_branch".to_string(),
                        details: "HEAD is detached and unborn".to_string(),
                    })
                }
            }
            Err(e) => Err(AppError::GitError {
                command: "git2::Repository::head".to_string(),
                details: e.to_string(),
            }),
        }
    }

    fn run_command(&self, repo: &Path, args: &[&str]) -> Result<String, AppError> {
        self.run(args, repo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use tempfile::TempDir;

    fn setup_repo() -> (TempDir, GitCommandAdapter) {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        let git = GitCommandAdapter::new();
        git.run(&["init"], root).expect("Failed to init git repo");
        git.run(&["config", "user.name", "Test User"], root).unwrap();
        git.run(&["config", "user.email", "test@example.com"], root).unwrap();

        fs::write(root.join("README.md"), "# Test").unwrap();
        git.run(&["add", "."], root).unwrap();
        git.run(&["commit", "-m", "Initial commit"], root).unwrap();

        (temp_dir, git)
    }

    #[test]
    fn current_branch_of_fresh_repo() {
        let (dir, git) = setup_repo();
        let branch = git.current_branch(dir.path()).expect("Failed to get branch");
        assert!(!branch.is_empty());
    }

    #[test]
    fn current_branch_of_unborn_repo() {
        let temp_dir = TempDir::new().unwrap();
        let git = GitCommandAdapter::new();
        git.run(&["init"], temp_dir.path()).unwrap();

        let branch = git.current_branch(temp_dir.path()).expect("Failed to get branch");
        assert!(!branch.is_empty());
    }

    #[test]
    fn clone_of_local_repository() {
        let (dir, git) = setup_repo();
        let dest_root = TempDir::new().unwrap();
        let dest = dest_root.path().join("clone");

        git.clone_repository(&dir.path().to_string_lossy(), &dest).expect("Failed to clone");
        assert!(dest.join(".git").exists());
        assert!(dest.join("README.md").exists());
    }

    #[test]
    fn ref_exists_for_branches_and_tags() {
        let (dir, git) = setup_repo();
        let root = dir.path();
        git.run(&["tag", "v1.0"], root).unwrap();
        git.run(&["branch", "feature"], root).unwrap();

        assert!(git.ref_exists(root, "v1.0"));
        assert!(git.ref_exists(root, "feature"));
        assert!(!git.ref_exists(root, "no-such-ref"));
    }

    #[test]
    fn checkout_switches_and_returns() {
        let (dir, git) = setup_repo();
        let root = dir.path();
        let original = git.current_branch(root).unwrap();

        git.run(&["branch", "feature"], root).unwrap();
        git.checkout(root, "feature").expect("Failed to checkout");
        assert_eq!(git.current_branch(root).unwrap(), "feature");

        git.checkout(root, &original).unwrap();
        assert_eq!(git.current_branch(root).unwrap(), original);
    }
}
