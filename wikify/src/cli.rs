use std::path::PathBuf;

use clap::Parser;

/// Command line interface for wikify
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about = "wikify: turn generated documentation topics into a Markdown wiki"
)]
pub struct Cli {
  /// Enable verbose debug logging
  #[arg(short, long)]
  pub verbose: bool,

  /// Path to a configuration file (TOML or JSON)
  #[arg(short = 'c', long = "config-file")]
  pub config_file: Option<PathBuf>,

  /// Path to the table-of-contents file listing topics in order with
  /// nesting
  #[arg(short = 't', long)]
  pub toc: Option<PathBuf>,

  /// Working directory containing one markup file per topic; files are
  /// rewritten in place as Markdown
  #[arg(short = 'w', long = "work-dir")]
  pub work_dir: Option<PathBuf>,

  /// Output directory receiving the mirrored wiki tree
  #[arg(short = 'o', long = "output-dir")]
  pub output_dir: Option<PathBuf>,

  /// Append a .md extension to sidebar links
  #[arg(long = "link-extension", action = clap::ArgAction::SetTrue)]
  pub link_extension: bool,

  /// Topic key promoted to Home.md when no topic provides one
  #[arg(short = 'd', long = "default-topic")]
  pub default_topic: Option<String>,
}

impl Cli {
  /// Parse command line arguments into a [`Cli`] struct.
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }
}
