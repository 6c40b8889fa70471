mod build;
mod status;

pub use build::{BuildArgs, cmd_build};
pub use status::cmd_status;
