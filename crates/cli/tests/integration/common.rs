//! Shared test helpers for CLI integration tests.

use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Isolated test environment.
///
/// Each test gets its own temporary directory holding the install, source and
/// build paths plus a fake `cmake` that records its invocations.
pub struct TestEnv {
  pub temp: TempDir,
  /// Canonical form of the temp directory, so paths match what child processes see.
  pub root: PathBuf,
  pub cmake: PathBuf,
}

impl TestEnv {
  /// Environment whose fake cmake succeeds at everything.
  pub fn new() -> Self {
    Self::with_failure(None)
  }

  /// Environment whose fake cmake exits 7 when its arguments contain `pattern`.
  ///
  /// Otherwise the install step creates the install directory and `-E touch`
  /// creates its file, as real CMake would.
  pub fn failing_on(pattern: &str) -> Self {
    Self::with_failure(Some(pattern))
  }

  fn with_failure(pattern: Option<&str>) -> Self {
    let temp = TempDir::new().unwrap();
    let root = dunce::canonicalize(temp.path()).unwrap();
    let cmake = root.join("fake-cmake");
    let log = root.join("cmake.log");

    let fail_check = match pattern {
      Some(p) => format!("case \"$*\" in *'{p}'*) exit 7 ;; esac\n"),
      None => String::new(),
    };
    let script = format!(
      "#!/bin/sh\n\
       echo \"$PWD|$*\" >> '{log}'\n\
       {fail_check}\
       case \"$*\" in *'--target install'*) mkdir -p '{install}' ;; esac\n\
       if [ \"$1\" = \"-E\" ] && [ \"$2\" = \"touch\" ]; then touch \"$3\"; fi\n\
       exit 0\n",
      log = log.display(),
      install = root.join("install").display(),
    );
    std::fs::write(&cmake, script).unwrap();
    std::fs::set_permissions(&cmake, std::fs::Permissions::from_mode(0o755)).unwrap();

    Self { temp, root, cmake }
  }

  pub fn install_dir(&self) -> PathBuf {
    self.root.join("install")
  }

  pub fn source_dir(&self) -> PathBuf {
    self.root.join("llvm-project").join("llvm")
  }

  pub fn build_dir(&self) -> PathBuf {
    self.root.join("build")
  }

  pub fn stamp(&self) -> PathBuf {
    self.install_dir().join("built.stamp")
  }

  /// Sorted names of everything in the install directory.
  pub fn install_entries(&self) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(self.install_dir())
      .unwrap()
      .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
      .collect();
    names.sort();
    names
  }

  /// Lines recorded by the fake cmake, as `<cwd>|<args>`.
  pub fn cmake_log(&self) -> Vec<String> {
    std::fs::read_to_string(self.root.join("cmake.log"))
      .map(|s| s.lines().map(str::to_string).collect())
      .unwrap_or_default()
  }

  /// A `clangstrap` command with the fake cmake selected through the environment.
  pub fn clangstrap_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("clangstrap");
    cmd.env("CLANGSTRAP_CMAKE", &self.cmake);
    cmd.env_remove("RUST_LOG");
    cmd
  }

  /// `clangstrap build <install> <source> <config> <targets> <build_dir>`.
  pub fn build_cmd(&self, config: &str, targets: &str) -> Command {
    let mut cmd = self.clangstrap_cmd();
    cmd
      .arg("build")
      .arg(self.install_dir())
      .arg(self.source_dir())
      .arg(config)
      .arg(targets)
      .arg(self.build_dir());
    cmd
  }
}
