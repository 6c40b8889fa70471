//! Implementation of the `clangstrap build` command.
//!
//! Builds and installs LLVM/Clang into an install directory unless its
//! completion marker already exists.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use clangstrap_lib::config::{BuildConfig, TargetList};
use clangstrap_lib::execute::{Outcome, SystemRunner, ensure_built};

use crate::output::{self, Mark, OutputFormat};

#[derive(Debug, Args)]
pub struct BuildArgs {
  /// Directory LLVM/Clang is installed into
  pub install_dir: PathBuf,

  /// LLVM source tree (the `llvm` directory of llvm-project)
  pub source_dir: PathBuf,

  /// Build configuration name (Debug, Release, RelWithDebInfo, ...)
  pub config: String,

  /// Target architectures, e.g. `X86` or `X86;AArch64`
  pub targets: String,

  /// Build directory (default: a fresh directory in temp storage)
  pub build_dir: Option<PathBuf>,

  /// Completion marker path (default: <INSTALL_DIR>/built.stamp)
  pub stamp_file: Option<PathBuf>,

  /// CMake program to run (default: $CLANGSTRAP_CMAKE, then `cmake`)
  #[arg(long, value_name = "PATH")]
  pub cmake: Option<PathBuf>,

  /// Output format
  #[arg(short, long, value_enum, default_value_t)]
  pub output: OutputFormat,
}

impl BuildArgs {
  fn into_config(self) -> Result<BuildConfig> {
    let targets = TargetList::parse(&self.targets)?;
    let mut config = BuildConfig::new(self.install_dir, self.source_dir, self.config, targets);

    if let Some(dir) = self.build_dir {
      config = config.with_build_dir(dir);
    }
    if let Some(stamp) = self.stamp_file {
      config = config.with_stamp_file(stamp);
    }
    if let Some(cmake) = self.cmake {
      config = config.with_cmake(cmake);
    }

    Ok(config)
  }
}

/// Execute the build command.
///
/// Runs the orchestrator on a single-threaded runtime; every step blocks
/// until its process exits.
pub fn cmd_build(args: BuildArgs) -> Result<()> {
  let format = args.output;
  let config = args.into_config()?;

  info!(
    install_dir = %config.install_dir.display(),
    config = %config.config_name,
    cmake = %config.cmake.display(),
    "ensuring clang is built"
  );

  let rt = tokio::runtime::Builder::new_current_thread()
    .enable_all()
    .build()
    .context("Failed to create async runtime")?;
  let outcome = rt
    .block_on(ensure_built(&config, &SystemRunner))
    .context("Build failed")?;

  if format.is_json() {
    let json = match &outcome {
      Outcome::AlreadyBuilt { stamp } => serde_json::json!({
        "status": "already_built",
        "config": config.config_name,
        "stamp": stamp,
      }),
      Outcome::Built {
        stamp,
        build_dir,
        elapsed,
      } => serde_json::json!({
        "status": "built",
        "config": config.config_name,
        "build_type": config.build_type(),
        "stamp": stamp,
        "build_dir": build_dir,
        "elapsed_secs": elapsed.as_secs_f64(),
      }),
    };
    return output::json(&json);
  }

  match outcome {
    Outcome::AlreadyBuilt { stamp } => {
      output::headline(
        Mark::Note,
        format_args!("Clang already built for configuration {}. Skipping build.", config.config_name),
      );
      output::detail("Stamp", stamp.display());
    }
    Outcome::Built {
      stamp,
      build_dir,
      elapsed,
    } => {
      output::headline(
        Mark::Done,
        format_args!("Clang build complete for configuration {}", config.config_name),
      );
      output::detail("Build type", config.build_type());
      output::detail("Targets", &config.targets);
      output::detail("Install dir", config.install_dir.display());
      output::detail("Stamp", stamp.display());
      output::detail("Removed", build_dir.display());
      output::detail("Duration", output::elapsed(elapsed));
    }
  }

  Ok(())
}
