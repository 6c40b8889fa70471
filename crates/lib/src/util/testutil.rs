//! Test utilities for clangstrap-lib.
//!
//! Cross-platform shell helpers for tests that spawn real processes, and a
//! recording [`MockRunner`] for tests that must not.

use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::cmake::ToolCommand;
use crate::execute::{ProcessRunner, RunStatus};

/// Returns the shell command and args to execute a shell script.
#[cfg(unix)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("/bin/sh", vec!["-c".to_string(), script.to_string()])
}

#[cfg(windows)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("cmd.exe", vec!["/C".to_string(), script.to_string()])
}

/// Returns the command and args to create a marker file in the current directory.
#[cfg(unix)]
pub fn touch_file(filename: &str) -> (&'static str, Vec<String>) {
  ("/bin/sh", vec!["-c".to_string(), format!(": > '{filename}'")])
}

#[cfg(windows)]
pub fn touch_file(filename: &str) -> (&'static str, Vec<String>) {
  (
    "powershell.exe",
    vec![
      "-NoProfile".to_string(),
      "-Command".to_string(),
      format!("New-Item -ItemType File -Path '{}' -Force | Out-Null", filename),
    ],
  )
}

/// Records every command instead of running it.
///
/// The install step creates the configured install prefix and `-E touch
/// <path>` creates the file, so the tree looks the way real CMake leaves it. A single call can be made to fail, either
/// with an exit code or with a spawn error.
#[derive(Debug, Default)]
pub struct MockRunner {
  calls: Mutex<Vec<ToolCommand>>,
  install_prefix: Mutex<Option<PathBuf>>,
  fail_at: Option<(usize, Failure)>,
}

#[derive(Debug, Clone, Copy)]
enum Failure {
  Exit(i32),
  Spawn,
}

impl MockRunner {
  pub fn new() -> Self {
    Self::default()
  }

  /// Make the `index`-th call (0-based) exit with `code`.
  pub fn failing_at(index: usize, code: i32) -> Self {
    MockRunner {
      fail_at: Some((index, Failure::Exit(code))),
      ..Self::default()
    }
  }

  /// Make the `index`-th call fail to spawn.
  pub fn unspawnable_at(index: usize) -> Self {
    MockRunner {
      fail_at: Some((index, Failure::Spawn)),
      ..Self::default()
    }
  }

  pub fn calls(&self) -> Vec<ToolCommand> {
    self.calls.lock().unwrap().clone()
  }

  pub fn call_count(&self) -> usize {
    self.calls.lock().unwrap().len()
  }
}

impl ProcessRunner for MockRunner {
  async fn run(&self, command: &ToolCommand) -> io::Result<RunStatus> {
    let index = {
      let mut calls = self.calls.lock().unwrap();
      calls.push(command.clone());
      calls.len() - 1
    };

    match self.fail_at {
      Some((at, Failure::Exit(code))) if at == index => return Ok(RunStatus::from_code(code)),
      Some((at, Failure::Spawn)) if at == index => {
        return Err(io::Error::new(io::ErrorKind::NotFound, "mock: program not found"));
      }
      _ => {}
    }

    if let Some(prefix) = command
      .args
      .iter()
      .find_map(|arg| arg.strip_prefix("-DCMAKE_INSTALL_PREFIX="))
    {
      *self.install_prefix.lock().unwrap() = Some(PathBuf::from(prefix));
    }

    if command.has_arg("install")
      && let Some(prefix) = self.install_prefix.lock().unwrap().as_ref()
    {
      std::fs::create_dir_all(prefix)?;
    }

    if let [flag, mode, path] = command.args.as_slice()
      && flag == "-E"
      && mode == "touch"
    {
      std::fs::write(PathBuf::from(path), b"")?;
    }

    Ok(RunStatus::from_code(0))
  }
}
