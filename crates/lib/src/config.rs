//! Build configuration.
//!
//! A [`BuildConfig`] is assembled once per invocation from the caller's
//! arguments and stays immutable while the orchestrator runs.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::consts::{CMAKE_ENV, DEFAULT_CMAKE};
use crate::execute::BuildError;
use crate::stamp;

/// CMake build type passed as `CMAKE_BUILD_TYPE`.
///
/// The outer pipeline's configuration names don't map 1:1 onto CMake's, so
/// only two values are ever produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BuildType {
  /// Optimized, keeps debug info. Used for debug-oriented requests.
  RelWithDebInfo,
  /// Optimized, no debug info.
  Release,
}

impl BuildType {
  /// Map a caller configuration name onto a CMake build type.
  ///
  /// `Debug` and `RelWithDebInfo` keep debug info; every other name,
  /// including unknown ones, builds `Release`. Matching is case-sensitive.
  pub fn from_config_name(name: &str) -> Self {
    match name {
      "Debug" | "RelWithDebInfo" => BuildType::RelWithDebInfo,
      _ => BuildType::Release,
    }
  }

  pub fn as_cmake_str(self) -> &'static str {
    match self {
      BuildType::RelWithDebInfo => "RelWithDebInfo",
      BuildType::Release => "Release",
    }
  }
}

impl fmt::Display for BuildType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_cmake_str())
  }
}

/// Non-empty list of LLVM targets, e.g. `X86` or `X86;AArch64`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetList(Vec<String>);

impl TargetList {
  /// Parse a `;` or `,` separated target list. Empty entries are dropped.
  pub fn parse(raw: &str) -> Result<Self, BuildError> {
    let targets: Vec<String> = raw
      .split([';', ','])
      .map(str::trim)
      .filter(|t| !t.is_empty())
      .map(str::to_string)
      .collect();

    if targets.is_empty() {
      return Err(BuildError::InvalidConfig(format!(
        "target architecture list is empty: {raw:?}"
      )));
    }

    Ok(TargetList(targets))
  }

  /// The list in CMake's `;`-joined form.
  pub fn as_cmake_value(&self) -> String {
    self.0.join(";")
  }
}

impl fmt::Display for TargetList {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.as_cmake_value())
  }
}

/// Everything one orchestrator run needs to know.
#[derive(Debug, Clone)]
pub struct BuildConfig {
  pub install_dir: PathBuf,
  pub source_dir: PathBuf,
  /// Caller's configuration name, before mapping to a [`BuildType`].
  pub config_name: String,
  pub targets: TargetList,
  /// Caller-supplied build directory. A temp directory is generated when `None`.
  pub build_dir: Option<PathBuf>,
  /// Caller-supplied marker path. Defaults to `<install_dir>/built.stamp`.
  pub stamp_file: Option<PathBuf>,
  /// CMake program to invoke.
  pub cmake: PathBuf,
}

impl BuildConfig {
  pub fn new(
    install_dir: impl Into<PathBuf>,
    source_dir: impl Into<PathBuf>,
    config_name: impl Into<String>,
    targets: TargetList,
  ) -> Self {
    BuildConfig {
      install_dir: install_dir.into(),
      source_dir: source_dir.into(),
      config_name: config_name.into(),
      targets,
      build_dir: None,
      stamp_file: None,
      cmake: default_cmake(),
    }
  }

  pub fn with_build_dir(mut self, build_dir: impl Into<PathBuf>) -> Self {
    self.build_dir = Some(build_dir.into());
    self
  }

  pub fn with_stamp_file(mut self, stamp_file: impl Into<PathBuf>) -> Self {
    self.stamp_file = Some(stamp_file.into());
    self
  }

  pub fn with_cmake(mut self, cmake: impl Into<PathBuf>) -> Self {
    self.cmake = cmake.into();
    self
  }

  pub fn build_type(&self) -> BuildType {
    BuildType::from_config_name(&self.config_name)
  }

  /// Resolved completion marker path.
  pub fn stamp_path(&self) -> PathBuf {
    stamp::stamp_path(&self.install_dir, self.stamp_file.as_deref())
  }

  /// Make every directory and the marker path absolute against the current
  /// directory.
  ///
  /// The configure step runs inside the build directory, so relative paths
  /// handed to CMake would otherwise resolve against the wrong base. Only the
  /// current directory is read; nothing on disk is touched.
  pub fn absolutize(&self) -> Result<Self, BuildError> {
    let mut resolved = self.clone();
    resolved.install_dir = absolute(&self.install_dir)?;
    resolved.source_dir = absolute(&self.source_dir)?;
    resolved.build_dir = self.build_dir.as_deref().map(absolute).transpose()?;
    resolved.stamp_file = self.stamp_file.as_deref().map(absolute).transpose()?;
    Ok(resolved)
  }
}

fn absolute(path: &Path) -> Result<PathBuf, BuildError> {
  std::path::absolute(path).map_err(|source| BuildError::ResolvePath {
    path: path.to_path_buf(),
    source,
  })
}

/// CMake program from [`CMAKE_ENV`], falling back to `cmake` on `PATH`.
pub fn default_cmake() -> PathBuf {
  std::env::var_os(CMAKE_ENV)
    .filter(|v| !v.is_empty())
    .map(PathBuf::from)
    .unwrap_or_else(|| PathBuf::from(DEFAULT_CMAKE))
}
