//! CMake invocations used by the orchestrator.
//!
//! Each function returns a [`ToolCommand`] describing one external process.
//! Nothing here spawns anything; see [`crate::execute::ProcessRunner`].

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::{BuildConfig, BuildType};
use crate::consts::{ENABLED_PROJECTS, PARALLEL_LINK_JOBS};

/// One external process invocation: program, arguments and working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
  pub program: PathBuf,
  pub args: Vec<String>,
  /// Working directory. Inherits the caller's when `None`.
  pub cwd: Option<PathBuf>,
}

impl ToolCommand {
  pub fn new(program: impl Into<PathBuf>) -> Self {
    ToolCommand {
      program: program.into(),
      args: Vec::new(),
      cwd: None,
    }
  }

  pub fn arg(mut self, arg: impl Into<String>) -> Self {
    self.args.push(arg.into());
    self
  }

  pub fn args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.args.extend(args.into_iter().map(Into::into));
    self
  }

  pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
    self.cwd = Some(dir.into());
    self
  }

  /// True if any argument equals `arg`.
  #[cfg(test)]
  pub fn has_arg(&self, arg: &str) -> bool {
    self.args.iter().any(|a| a == arg)
  }
}

impl fmt::Display for ToolCommand {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.program.display())?;
    for arg in &self.args {
      write!(f, " {arg}")?;
    }
    Ok(())
  }
}

/// Configure an LLVM/Clang build tree in `build_dir` from the config's source tree.
pub fn configure(config: &BuildConfig, build_type: BuildType, build_dir: &Path) -> ToolCommand {
  ToolCommand::new(&config.cmake)
    .args(["-Wno-dev", "-GNinja"])
    .arg(format!("-DCMAKE_INSTALL_PREFIX={}", config.install_dir.display()))
    .arg(format!("-DLLVM_ENABLE_PROJECTS={ENABLED_PROJECTS}"))
    .arg(format!("-DLLVM_TARGETS_TO_BUILD={}", config.targets.as_cmake_value()))
    .arg(format!("-DLLVM_PARALLEL_LINK_JOBS={PARALLEL_LINK_JOBS}"))
    .arg("-DLLVM_ENABLE_ASSERTIONS=OFF")
    .arg("-DLLVM_BUILD_LLVM_DYLIB=OFF")
    .arg(format!("-DCMAKE_BUILD_TYPE={build_type}"))
    .arg("-DLLVM_USE_LINKER=lld")
    .arg(config.source_dir.display().to_string())
    .current_dir(build_dir)
}

/// Build everything in a configured tree.
pub fn build(cmake: &Path, build_dir: &Path) -> ToolCommand {
  ToolCommand::new(cmake).args(["--build", "."]).current_dir(build_dir)
}

/// Build the `install` target of a configured tree.
pub fn install(cmake: &Path, build_dir: &Path) -> ToolCommand {
  ToolCommand::new(cmake)
    .args(["--build", ".", "--target", "install"])
    .current_dir(build_dir)
}

/// Create (or update the timestamp of) `path` using CMake's command mode.
pub fn touch(cmake: &Path, path: &Path) -> ToolCommand {
  ToolCommand::new(cmake)
    .args(["-E", "touch"])
    .arg(path.display().to_string())
}
