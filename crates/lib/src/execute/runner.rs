//! Process runner seam.
//!
//! The orchestrator never spawns processes directly; it hands each
//! [`ToolCommand`] to a [`ProcessRunner`]. [`SystemRunner`] runs the real
//! program, tests substitute a recording runner.

use std::io;
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::cmake::ToolCommand;

/// Exit status of an external process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStatus {
  code: Option<i32>,
}

impl RunStatus {
  pub fn from_code(code: i32) -> Self {
    RunStatus { code: Some(code) }
  }

  /// Status of a process terminated without an exit code, e.g. by a signal.
  pub fn terminated() -> Self {
    RunStatus { code: None }
  }

  pub fn success(&self) -> bool {
    self.code == Some(0)
  }

  pub fn code(&self) -> Option<i32> {
    self.code
  }
}

impl From<std::process::ExitStatus> for RunStatus {
  fn from(status: std::process::ExitStatus) -> Self {
    RunStatus { code: status.code() }
  }
}

/// Runs one external process to completion.
pub trait ProcessRunner {
  /// Run `command` and wait for it to exit.
  ///
  /// `Err` means the process could not be started at all; a process that
  /// starts and fails reports a non-success [`RunStatus`].
  fn run(&self, command: &ToolCommand) -> impl Future<Output = io::Result<RunStatus>> + Send;
}

/// Spawns real processes with the caller's environment.
///
/// stdout and stderr are inherited so the tool's own diagnostics reach the
/// console unchanged. stdin is closed.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
  async fn run(&self, command: &ToolCommand) -> io::Result<RunStatus> {
    let mut process = Command::new(&command.program);
    process.args(&command.args).stdin(Stdio::null());

    if let Some(cwd) = &command.cwd {
      process.current_dir(cwd);
    }

    debug!(program = %command.program.display(), cwd = ?command.cwd, "spawning process");

    let status = process.status().await?;
    debug!(code = ?status.code(), "process exited");

    Ok(status.into())
  }
}
