//! How the CLI talks to the terminal.
//!
//! Results go to stdout as marked lines with indented details, or as one JSON
//! document. Errors go to stderr.

use std::fmt::Display;
use std::time::Duration;

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

/// Leading glyph of a result line.
#[derive(Debug, Clone, Copy)]
pub enum Mark {
  /// Something was done or is in place.
  Done,
  /// Nothing changed.
  Note,
}

/// Print a headline result on stdout.
pub fn headline(mark: Mark, message: impl Display) {
  match mark {
    Mark::Done => println!("{} {message}", "✓".if_supports_color(Stream::Stdout, |g| g.green())),
    Mark::Note => println!("{} {message}", "•".if_supports_color(Stream::Stdout, |g| g.cyan())),
  }
}

/// Print an indented `label: value` line under a headline.
pub fn detail(label: &str, value: impl Display) {
  println!("  {}: {value}", label.if_supports_color(Stream::Stdout, |l| l.dimmed()));
}

pub fn error(message: impl Display) {
  let message = message.to_string();
  eprintln!(
    "{} {}",
    "✗".if_supports_color(Stream::Stderr, |g| g.red()),
    message.if_supports_color(Stream::Stderr, |m| m.red())
  );
}

pub fn json<T: Serialize>(value: &T) -> anyhow::Result<()> {
  let rendered = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{rendered}");
  Ok(())
}

/// Wall-clock time to whole seconds, e.g. `1h 2m 5s`.
pub fn elapsed(duration: Duration) -> String {
  humantime::format_duration(Duration::from_secs(duration.as_secs())).to_string()
}
