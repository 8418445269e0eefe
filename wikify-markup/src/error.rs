//! Error types for topic markup processing.

use std::io;

use thiserror::Error;

/// Errors surfaced while loading or transforming topic markup.
#[derive(Debug, Error)]
pub enum MarkupError {
  /// The topic content is not well-formed markup, even after the synthetic
  /// root-element retry. Callers skip such topics rather than aborting.
  #[error("topic '{key}' is not well-formed markup: {reason}")]
  Malformed { key: String, reason: String },

  /// The table-of-contents source could not be parsed.
  #[error("TOC parse error: {0}")]
  Toc(String),

  #[error("I/O error: {0}")]
  Io(#[from] io::Error),
}
