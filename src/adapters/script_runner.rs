use std::process::Command;

use crate::domain::AppError;
use crate::ports::{ScriptInvocation, ScriptRunnerPort};

/// Executes hook and generator commands through `sh -c`.
///
/// Caller arguments become the shell positional parameters, so a command
/// references them as `$1..$n` (or forwards them all with `"$@"`, e.g.
/// `sh scripts/component.sh "$@"`).
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellScriptRunner;

impl ScriptRunnerPort for ShellScriptRunner {
    fn run(&self, invocation: &ScriptInvocation) -> Result<String, AppError> {
        let mut command = Command::new("sh");
        command.arg("-c");
        command.arg(&invocation.command);
        if !invocation.args.is_empty() {
            command.arg("sh");
            command.args(&invocation.args);
        }
        command.current_dir(&invocation.cwd);
        for (key, value) in &invocation.env {
            command.env(key, value);
        }

        let output = command.output().map_err(|e| AppError::ScriptError {
            script: invocation.command.clone(),
            details: e.to_string(),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(AppError::ScriptError {
                script: invocation.command.clone(),
                details: if stderr.is_empty() {
                    format!("exit status {}", output.status)
                } else {
                    stderr
                },
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}
