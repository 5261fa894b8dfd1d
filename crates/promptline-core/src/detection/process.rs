//! Helper process execution with a hard timeout

use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use crate::error::{ContextError, ContextResult};

/// Launches helper processes.
///
/// Returns stdout of a successful exit. A spawn failure or non-zero exit is a
/// [`ContextError::Process`]; exceeding the budget is a
/// [`ContextError::Timeout`]. The timeout is enforced by the runner, and a
/// timed-out process is killed, not left running in the background.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    async fn run(&self, program: &Path, args: &[String], budget: Duration) -> ContextResult<String>;
}

/// [`ProcessRunner`] backed by `tokio::process`
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioProcessRunner;

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn run(&self, program: &Path, args: &[String], budget: Duration) -> ContextResult<String> {
        let name = program.display().to_string();
        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = cmd
            .spawn()
            .map_err(|e| ContextError::process(&name, format!("failed to spawn: {}", e)))?;

        // Dropping the child on timeout kills it (kill_on_drop)
        let output = match timeout(budget, child.wait_with_output()).await {
            Ok(result) => {
                result.map_err(|e| ContextError::process(&name, format!("failed to wait: {}", e)))?
            }
            Err(_) => {
                debug!("{} exceeded {:?}", name, budget);
                return Err(ContextError::timeout(budget.as_millis() as u64, name));
            }
        };

        if output.status.success() {
            return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
        }
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = stderr.trim();
        let message = if stderr.is_empty() {
            format!("exited with code {:?}", output.status.code())
        } else {
            stderr.to_string()
        };
        Err(ContextError::process(name, message))
    }
}
