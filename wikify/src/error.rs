use std::io;

use thiserror::Error;

/// Top-level error type for the wikify crate.
#[derive(Debug, Error)]
pub enum WikifyError {
  #[error("I/O error: {0}")]
  Io(#[from] io::Error),

  #[error("Markup error: {0}")]
  Markup(#[from] wikify_markup::MarkupError),

  #[error("Directory walk error: {0}")]
  Walk(#[from] walkdir::Error),
}
