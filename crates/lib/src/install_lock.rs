//! Advisory lock serialising builds into the same install directory.
//!
//! The lock file lives beside the install directory, as
//! `<install_dir>.clangstrap.lock`, so the install prefix itself only ever
//! receives the toolchain and its stamp.

use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::consts::LOCK_SUFFIX;

/// Who holds the lock. Written into the lock file for contention messages.
#[derive(Debug, Serialize, Deserialize)]
struct Holder {
  pid: u32,
  command: String,
}

#[derive(Debug, Error)]
pub enum InstallLockError {
  #[error(
    "{} is being built by PID {pid} ({command}); remove {} if no clangstrap process is running",
    .install_dir.display(),
    .lock_path.display()
  )]
  Contention {
    install_dir: PathBuf,
    pid: u32,
    command: String,
    lock_path: PathBuf,
  },

  #[error(
    "{} is locked by another build; remove {} if no clangstrap process is running",
    .install_dir.display(),
    .lock_path.display()
  )]
  ContentionUnknown { install_dir: PathBuf, lock_path: PathBuf },

  #[error("install directory {} has no parent to hold its lock file", .install_dir.display())]
  NoParent { install_dir: PathBuf },

  #[error("failed to lock {}: {source}", .lock_path.display())]
  Io {
    lock_path: PathBuf,
    #[source]
    source: io::Error,
  },
}

/// Path of the lock guarding `install_dir`, or `None` for a filesystem root.
pub fn lock_path(install_dir: &Path) -> Option<PathBuf> {
  let mut name: OsString = install_dir.file_name()?.to_os_string();
  name.push(LOCK_SUFFIX);
  Some(install_dir.with_file_name(name))
}

/// Exclusive lock on an install directory, released on drop.
#[derive(Debug)]
pub struct InstallLock {
  _file: File,
}

impl InstallLock {
  /// Take the lock without blocking.
  ///
  /// Creates the install directory's parent if needed, never the install
  /// directory itself.
  pub fn acquire(install_dir: &Path, command: &str) -> Result<Self, InstallLockError> {
    let lock_path = lock_path(install_dir).ok_or_else(|| InstallLockError::NoParent {
      install_dir: install_dir.to_path_buf(),
    })?;

    let file = open_lock_file(&lock_path).map_err(|source| InstallLockError::Io {
      lock_path: lock_path.clone(),
      source,
    })?;

    match try_lock_exclusive(&file) {
      Ok(()) => {}
      Err(err) if err.kind() == io::ErrorKind::WouldBlock => {
        return Err(contention(install_dir, lock_path));
      }
      Err(source) => return Err(InstallLockError::Io { lock_path, source }),
    }

    let holder = Holder {
      pid: std::process::id(),
      command: command.to_string(),
    };
    file
      .set_len(0)
      .and_then(|()| serde_json::to_writer(&file, &holder).map_err(io::Error::other))
      .map_err(|source| InstallLockError::Io {
        lock_path: lock_path.clone(),
        source,
      })?;

    debug!(path = %lock_path.display(), "install lock acquired");
    Ok(InstallLock { _file: file })
  }
}

fn open_lock_file(lock_path: &Path) -> io::Result<File> {
  if let Some(parent) = lock_path.parent() {
    std::fs::create_dir_all(parent)?;
  }
  OpenOptions::new()
    .read(true)
    .write(true)
    .create(true)
    .truncate(false)
    .open(lock_path)
}

fn contention(install_dir: &Path, lock_path: PathBuf) -> InstallLockError {
  let holder = std::fs::read_to_string(&lock_path)
    .ok()
    .and_then(|contents| serde_json::from_str::<Holder>(&contents).ok());
  let install_dir = install_dir.to_path_buf();

  match holder {
    Some(Holder { pid, command }) => InstallLockError::Contention {
      install_dir,
      pid,
      command,
      lock_path,
    },
    None => InstallLockError::ContentionUnknown { install_dir, lock_path },
  }
}

#[cfg(unix)]
fn try_lock_exclusive(file: &File) -> io::Result<()> {
  use rustix::fs::{FlockOperation, flock};

  flock(file, FlockOperation::NonBlockingLockExclusive).map_err(io::Error::from)
}

#[cfg(windows)]
fn try_lock_exclusive(file: &File) -> io::Result<()> {
  use std::os::windows::io::AsRawHandle;
  use windows_sys::Win32::Foundation::ERROR_LOCK_VIOLATION;
  use windows_sys::Win32::Storage::FileSystem::{LOCKFILE_EXCLUSIVE_LOCK, LOCKFILE_FAIL_IMMEDIATELY, LockFileEx};
  use windows_sys::Win32::System::IO::OVERLAPPED;

  // SAFETY: the handle is owned by `file` and outlives the call; a zeroed
  // OVERLAPPED selects offset 0.
  let locked = unsafe {
    let mut overlapped: OVERLAPPED = std::mem::zeroed();
    LockFileEx(
      file.as_raw_handle(),
      LOCKFILE_FAIL_IMMEDIATELY | LOCKFILE_EXCLUSIVE_LOCK,
      0,
      1,
      0,
      &mut overlapped,
    )
  };

  if locked != 0 {
    return Ok(());
  }

  let err = io::Error::last_os_error();
  if err.raw_os_error() == Some(ERROR_LOCK_VIOLATION as i32) {
    // Held by another handle; report it the way flock does.
    return Err(io::ErrorKind::WouldBlock.into());
  }
  Err(err)
}
