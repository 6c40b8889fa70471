//! The build protocol: skip if stamped, otherwise configure, build, install,
//! stamp and clean up, in that order.

use std::time::Instant;

use tracing::{debug, info};

use crate::cmake::{self, ToolCommand};
use crate::config::BuildConfig;
use crate::execute::runner::ProcessRunner;
use crate::execute::types::{BuildError, Outcome, Step};
use crate::install_lock::InstallLock;
use crate::stamp;
use crate::workspace::BuildWorkspace;

/// Ensure a complete LLVM/Clang install exists at `config.install_dir`.
///
/// If the completion marker exists, returns [`Outcome::AlreadyBuilt`] without
/// spawning anything or touching any directory. Otherwise:
/// - takes the install lock and re-checks the marker
/// - acquires the build directory
/// - runs configure, build and install
/// - writes the marker
/// - removes the build directory
///
/// Any failure aborts immediately. Nothing is cleaned up on failure and the
/// install directory is not rolled back.
pub async fn ensure_built<R: ProcessRunner>(config: &BuildConfig, runner: &R) -> Result<Outcome, BuildError> {
  let config = config.absolutize()?;
  let stamp = config.stamp_path();

  if stamp::is_built(&stamp) {
    info!(config = %config.config_name, stamp = %stamp.display(), "clang already built, skipping");
    return Ok(Outcome::AlreadyBuilt { stamp });
  }

  let _lock = InstallLock::acquire(
    &config.install_dir,
    &format!("build {} {}", config.config_name, config.targets),
  )?;

  // Another build may have finished while this one waited to start.
  if stamp::is_built(&stamp) {
    info!(config = %config.config_name, stamp = %stamp.display(), "clang built by another process, skipping");
    return Ok(Outcome::AlreadyBuilt { stamp });
  }

  let started = Instant::now();
  let build_type = config.build_type();
  let workspace = BuildWorkspace::acquire(config.build_dir.as_deref()).await?;
  let build_dir = workspace.path().to_path_buf();

  info!(
    config = %config.config_name,
    build_type = %build_type,
    targets = %config.targets,
    build_dir = %build_dir.display(),
    "configuring LLVM/Clang"
  );
  run_step(runner, Step::Configure, &cmake::configure(&config, build_type, &build_dir)).await?;

  info!(config = %config.config_name, "building LLVM/Clang");
  run_step(runner, Step::Build, &cmake::build(&config.cmake, &build_dir)).await?;

  info!(config = %config.config_name, install_dir = %config.install_dir.display(), "installing LLVM/Clang");
  run_step(runner, Step::Install, &cmake::install(&config.cmake, &build_dir)).await?;

  info!(stamp = %stamp.display(), "creating stamp file");
  run_step(runner, Step::Stamp, &cmake::touch(&config.cmake, &stamp)).await?;

  info!(build_dir = %build_dir.display(), "cleaning up build directory");
  let build_dir = workspace.remove().await?;

  let elapsed = started.elapsed();
  info!(config = %config.config_name, elapsed_secs = elapsed.as_secs(), "clang build complete");

  Ok(Outcome::Built {
    stamp,
    build_dir,
    elapsed,
  })
}

async fn run_step<R: ProcessRunner>(runner: &R, step: Step, command: &ToolCommand) -> Result<(), BuildError> {
  debug!(step = %step, command = %command, "running");

  let status = runner.run(command).await.map_err(|source| BuildError::Spawn {
    step,
    program: command.program.display().to_string(),
    source,
  })?;

  if !status.success() {
    return Err(BuildError::ToolFailed {
      step,
      command: command.to_string(),
      code: status.code(),
    });
  }

  Ok(())
}
