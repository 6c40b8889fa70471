//! Build orchestration.
//!
//! This module provides the entry point that turns a [`BuildConfig`] into a
//! finished install. It handles:
//! - Skipping when the completion marker exists
//! - Running configure, build, install and stamp as external processes
//! - Removing the build directory once the marker is written
//!
//! [`BuildConfig`]: crate::config::BuildConfig

mod orchestrate;
pub mod runner;
pub mod types;

pub use orchestrate::ensure_built;
pub use runner::{ProcessRunner, RunStatus, SystemRunner};
pub use types::{BuildError, Outcome, Step};
