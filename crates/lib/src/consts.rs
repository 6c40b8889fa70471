//! Names and fixed values shared across the crate.

pub const APP_NAME: &str = "clangstrap";

/// Completion marker file name, relative to the install directory.
pub const STAMP_FILENAME: &str = "built.stamp";

/// Appended to the install directory's name to form the sibling lock file.
pub const LOCK_SUFFIX: &str = ".clangstrap.lock";

/// Prefix for build directories generated in temp storage.
pub const BUILD_DIR_PREFIX: &str = "clangstrap-build-";

/// Value passed as `LLVM_PARALLEL_LINK_JOBS`.
pub const PARALLEL_LINK_JOBS: u32 = 6;

/// LLVM subprojects enabled in the configure step.
pub const ENABLED_PROJECTS: &str = "clang";

/// CMake program used when neither `--cmake` nor [`CMAKE_ENV`] is set.
pub const DEFAULT_CMAKE: &str = "cmake";

/// Environment variable overriding the CMake program.
pub const CMAKE_ENV: &str = "CLANGSTRAP_CMAKE";
