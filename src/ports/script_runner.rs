use std::path::PathBuf;

use crate::domain::AppError;

/// A hook or generator command ready to execute.
#[derive(Debug, Clone)]
pub struct ScriptInvocation {
    /// Shell command text from the entry manifest.
    pub command: String,
    /// Positional arguments appended to the command.
    pub args: Vec<String>,
    /// Working directory for the subprocess.
    pub cwd: PathBuf,
    /// Context environment (`BURGEON_*` variables).
    pub env: Vec<(String, String)>,
}

/// Port for executing user-authored scaffolding commands.
///
/// Scripts run with full trust; there is no sandboxing.
pub trait ScriptRunnerPort {
    /// Run the invocation to completion, returning captured stdout.
    fn run(&self, invocation: &ScriptInvocation) -> Result<String, AppError>;
}
