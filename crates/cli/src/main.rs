use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;
mod output;

use cmd::{BuildArgs, cmd_build, cmd_status};
use output::OutputFormat;

/// clangstrap - build and install LLVM/Clang once per install directory
#[derive(Parser)]
#[command(name = "clangstrap")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose (debug) logging
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Configure, build and install LLVM/Clang unless already built
  Build(BuildArgs),

  /// Show whether an install directory has been built
  Status {
    /// Install directory to inspect
    install_dir: PathBuf,

    /// Completion marker path (default: <INSTALL_DIR>/built.stamp)
    stamp_file: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    output: OutputFormat,
  },
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  // Initialize logging. RUST_LOG wins over --verbose.
  let default_level = if cli.verbose { "debug" } else { "info" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .with_target(false)
    .without_time()
    .init();

  let result = match cli.command {
    Commands::Build(args) => cmd_build(args),
    Commands::Status {
      install_dir,
      stamp_file,
      output,
    } => cmd_status(&install_dir, stamp_file.as_deref(), output),
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      output::error(format!("{err:#}"));
      ExitCode::FAILURE
    }
  }
}
