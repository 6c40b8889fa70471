//! clangstrap-lib: idempotent LLVM/Clang build orchestration.
//!
//! This crate drives CMake/Ninja to configure, build and install LLVM/Clang
//! into an install directory, guarded by a completion marker so repeated
//! runs are no-ops:
//! - `config`: the per-run configuration and build-type mapping
//! - `cmake`: the external invocations
//! - `execute`: the orchestrator and the process runner seam
//! - `stamp`: completion marker lookup and status

pub mod cmake;
pub mod config;
pub mod consts;
pub mod execute;
pub mod install_lock;
pub mod stamp;
pub mod workspace;
