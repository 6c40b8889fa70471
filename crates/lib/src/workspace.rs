//! Scratch directory for CMake/Ninja intermediate state.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::consts::BUILD_DIR_PREFIX;
use crate::execute::BuildError;

/// A build directory owned by a single orchestrator run.
///
/// Nothing is removed on drop: the directory only goes away through
/// [`BuildWorkspace::remove`], which the orchestrator calls after a
/// successful install. On failure it stays behind for inspection.
#[derive(Debug)]
pub struct BuildWorkspace {
  path: PathBuf,
}

impl BuildWorkspace {
  /// Create `requested` (and its parents) or allocate a fresh directory in temp storage.
  pub async fn acquire(requested: Option<&Path>) -> Result<Self, BuildError> {
    match requested {
      Some(dir) => {
        tokio::fs::create_dir_all(dir)
          .await
          .map_err(|source| BuildError::CreateBuildDir {
            path: dir.to_path_buf(),
            source,
          })?;
        debug!(path = %dir.display(), "using caller build directory");
        Ok(BuildWorkspace { path: dir.to_path_buf() })
      }
      None => {
        let dir = tempfile::Builder::new()
          .prefix(BUILD_DIR_PREFIX)
          .tempdir()
          .map_err(BuildError::CreateTempDir)?;
        let path = dir.keep();
        debug!(path = %path.display(), "allocated temporary build directory");
        Ok(BuildWorkspace { path })
      }
    }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Recursively delete the directory, returning the path it had.
  pub async fn remove(self) -> Result<PathBuf, BuildError> {
    tokio::fs::remove_dir_all(&self.path)
      .await
      .map_err(|source| BuildError::RemoveBuildDir {
        path: self.path.clone(),
        source,
      })?;
    Ok(self.path)
  }
}
