use std::{
  fs,
  path::{Path, PathBuf},
};

use color_eyre::eyre::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

// Functions rather than literals so defaults that need construction (such
// as paths) can be expressed uniformly.
fn default_toc_path() -> PathBuf {
  PathBuf::from("toc.xml")
}

fn default_work_dir() -> PathBuf {
  PathBuf::from(".")
}

fn default_output_dir() -> PathBuf {
  PathBuf::from("wiki")
}

/// Configuration options for wikify
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
  /// Table-of-contents file listing topics in order with nesting
  #[serde(default = "default_toc_path")]
  pub toc_path: PathBuf,

  /// Working directory containing one markup file per topic
  #[serde(default = "default_work_dir")]
  pub work_dir: PathBuf,

  /// Output directory receiving the mirrored wiki tree
  #[serde(default = "default_output_dir")]
  pub output_dir: PathBuf,

  /// Whether sidebar links carry a .md extension
  #[serde(default)]
  pub link_extension: bool,

  /// Topic key promoted to Home.md when no topic provides one
  #[serde(default)]
  pub default_topic: Option<String>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      toc_path:       default_toc_path(),
      work_dir:       default_work_dir(),
      output_dir:     default_output_dir(),
      link_extension: false,
      default_topic:  None,
    }
  }
}

impl Config {
  /// Create configuration from the CLI, loading a config file first when
  /// one was given. CLI flags override file values.
  ///
  /// # Errors
  ///
  /// Returns an error if the configuration file cannot be read or parsed.
  pub fn load(cli: &Cli) -> Result<Self> {
    let mut config = match &cli.config_file {
      Some(path) => Self::from_file(path)?,
      None => Self::default(),
    };
    config.merge_with_cli(cli);
    Ok(config)
  }

  /// Load configuration from a TOML or JSON file, selected by extension.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or parsed.
  pub fn from_file(path: &Path) -> Result<Self> {
    let content = fs::read_to_string(path).wrap_err_with(|| {
      format!("Failed to read configuration file: {}", path.display())
    })?;

    if path.extension().is_some_and(|ext| ext == "json") {
      serde_json::from_str(&content).wrap_err_with(|| {
        format!("Invalid JSON configuration: {}", path.display())
      })
    } else {
      toml::from_str(&content).wrap_err_with(|| {
        format!("Invalid TOML configuration: {}", path.display())
      })
    }
  }

  fn merge_with_cli(&mut self, cli: &Cli) {
    if let Some(toc) = &cli.toc {
      self.toc_path.clone_from(toc);
    }
    if let Some(work_dir) = &cli.work_dir {
      self.work_dir.clone_from(work_dir);
    }
    if let Some(output_dir) = &cli.output_dir {
      self.output_dir.clone_from(output_dir);
    }
    if cli.link_extension {
      self.link_extension = true;
    }
    if let Some(topic) = &cli.default_topic {
      self.default_topic = Some(topic.clone());
    }
  }
}
