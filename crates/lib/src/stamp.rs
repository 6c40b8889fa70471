//! Completion marker ("stamp") handling.
//!
//! The stamp is a zero-byte file whose existence means the install directory
//! holds a finished toolchain. Its contents are never read and the install is
//! never verified beyond that.

use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::consts::STAMP_FILENAME;

/// Resolve the marker path: `explicit` if given, else `<install_dir>/built.stamp`.
pub fn stamp_path(install_dir: &Path, explicit: Option<&Path>) -> PathBuf {
  match explicit {
    Some(path) => path.to_path_buf(),
    None => install_dir.join(STAMP_FILENAME),
  }
}

/// True if the marker exists.
pub fn is_built(stamp: &Path) -> bool {
  stamp.exists()
}

/// Snapshot of an install directory's marker state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StampStatus {
  pub install_dir: PathBuf,
  pub stamp: PathBuf,
  pub built: bool,
  /// Marker modification time in seconds since the Unix epoch.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub built_at_unix: Option<u64>,
}

/// Report whether `install_dir` has been built. Reads metadata only.
pub fn stamp_status(install_dir: &Path, explicit: Option<&Path>) -> StampStatus {
  let stamp = stamp_path(install_dir, explicit);
  let built_at_unix = std::fs::metadata(&stamp)
    .and_then(|m| m.modified())
    .ok()
    .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
    .map(|d| d.as_secs());

  StampStatus {
    install_dir: install_dir.to_path_buf(),
    built: is_built(&stamp),
    stamp,
    built_at_unix,
  }
}
