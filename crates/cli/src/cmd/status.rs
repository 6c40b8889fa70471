//! Status command implementation.
//!
//! Reports whether an install directory carries its completion marker.

use std::path::Path;
use std::time::{Duration, UNIX_EPOCH};

use anyhow::Result;

use clangstrap_lib::stamp::stamp_status;

use crate::output::{self, Mark, OutputFormat};

pub fn cmd_status(install_dir: &Path, stamp_file: Option<&Path>, format: OutputFormat) -> Result<()> {
  let status = stamp_status(install_dir, stamp_file);

  if format.is_json() {
    return output::json(&status);
  }

  if status.built {
    output::headline(Mark::Done, format_args!("Clang is built in {}", status.install_dir.display()));
  } else {
    output::headline(
      Mark::Note,
      format_args!(
        "Clang is not built in {}. Run 'clangstrap build' to build it.",
        status.install_dir.display()
      ),
    );
  }
  output::detail("Stamp", status.stamp.display());

  if let Some(secs) = status.built_at_unix {
    let built_at = UNIX_EPOCH + Duration::from_secs(secs);
    output::detail("Built at", humantime::format_rfc3339_seconds(built_at));
  }

  Ok(())
}
