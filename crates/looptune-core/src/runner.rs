//! Running the external tools.
//!
//! Every child is spawned with `kill_on_drop` and awaited before the call
//! returns, so nothing keeps running after the caller moves on.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::ToolError;

/// What a captured run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    /// Non-blank stdout lines, trimmed.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.stdout.lines().map(str::trim).filter(|l| !l.is_empty())
    }
}

#[async_trait]
pub trait ToolRunner: Send + Sync {
    /// Run to completion with stdout and stderr captured.
    async fn capture(&self, program: &Path, args: &[String]) -> Result<ToolOutput, ToolError>;

    /// Run to completion attached to the current terminal. Returns the exit
    /// code, `None` when the child was killed by a signal.
    async fn interactive(&self, program: &Path, args: &[String]) -> Result<Option<i32>, ToolError>;
}

/// Spawns real processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

fn program_name(program: &Path) -> String {
    program.display().to_string()
}

#[async_trait]
impl ToolRunner for SystemRunner {
    async fn capture(&self, program: &Path, args: &[String]) -> Result<ToolOutput, ToolError> {
        debug!("exec: {} {}", program.display(), args.join(" "));

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| ToolError::Spawn {
                program: program_name(program),
                source,
            })?;

        let out = ToolOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        if !out.success {
            warn!(
                "{} exited with {:?}: {}",
                program.display(),
                out.code,
                out.stderr.trim()
            );
        }
        Ok(out)
    }

    async fn interactive(&self, program: &Path, args: &[String]) -> Result<Option<i32>, ToolError> {
        debug!("exec (interactive): {} {}", program.display(), args.join(" "));

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ToolError::Spawn {
                program: program_name(program),
                source,
            })?;

        let status = child.wait().await.map_err(|source| ToolError::Wait {
            program: program_name(program),
            source,
        })?;
        Ok(status.code())
    }
}
