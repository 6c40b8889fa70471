//! Types for orchestrating a toolchain build.
//!
//! This module defines the error type, the step names used in logs and
//! errors, and the outcome of a successful run.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::install_lock::InstallLockError;

/// One external-process step of the build protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
  Configure,
  Build,
  Install,
  /// Writing the completion marker.
  Stamp,
}

impl fmt::Display for Step {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Step::Configure => "configure",
      Step::Build => "build",
      Step::Install => "install",
      Step::Stamp => "stamp",
    })
  }
}

/// Errors that abort an orchestrator run.
///
/// Every variant is fatal. The build directory is left in place whatever
/// the failure.
#[derive(Debug, Error)]
pub enum BuildError {
  /// The caller's configuration can't be used.
  #[error("invalid build configuration: {0}")]
  InvalidConfig(String),

  /// An external tool exited non-zero (or was killed by a signal).
  #[error("{step} step {}: {command}", describe_exit(.code))]
  ToolFailed {
    step: Step,
    command: String,
    code: Option<i32>,
  },

  /// An external tool could not be started.
  #[error("failed to start {program} for {step} step: {source}")]
  Spawn {
    step: Step,
    program: String,
    #[source]
    source: io::Error,
  },

  #[error("failed to resolve path {}: {source}", .path.display())]
  ResolvePath {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to create build directory {}: {source}", .path.display())]
  CreateBuildDir {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to create temporary build directory: {0}")]
  CreateTempDir(#[source] io::Error),

  #[error("failed to remove build directory {}: {source}", .path.display())]
  RemoveBuildDir {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error(transparent)]
  Lock(#[from] InstallLockError),
}

fn describe_exit(code: &Option<i32>) -> String {
  match code {
    Some(code) => format!("failed with exit code {code}"),
    None => "was terminated by a signal".to_string(),
  }
}

/// Result of a successful [`ensure_built`](crate::execute::ensure_built) call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
  /// The marker already existed; nothing was run.
  AlreadyBuilt { stamp: PathBuf },
  /// A full configure/build/install ran and the marker was written.
  Built {
    stamp: PathBuf,
    /// Build directory that was used and has since been removed.
    build_dir: PathBuf,
    elapsed: Duration,
  },
}

impl Outcome {
  pub fn stamp(&self) -> &Path {
    match self {
      Outcome::AlreadyBuilt { stamp } | Outcome::Built { stamp, .. } => stamp,
    }
  }

  pub fn was_built(&self) -> bool {
    matches!(self, Outcome::Built { .. })
  }
}
