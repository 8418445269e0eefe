//! Well-formedness gate for raw topic markup.
//!
//! The DOM parser downstream is tolerant by construction, so the
//! parse-or-skip contract is enforced here with a streaming scan: a topic
//! must be a single root element with no stray content outside it. Content
//! that fails the scan is retried once wrapped in a synthetic root element,
//! which is what rescues fragment-only user-authored files; a second failure
//! means the topic is skipped by the caller.

use quick_xml::{Reader, events::Event};
use thiserror::Error;

/// Structural violations detected by the streaming scan.
#[derive(Debug, Error)]
pub enum WellFormedError {
  #[error("markup syntax: {0}")]
  Syntax(#[from] quick_xml::Error),

  #[error("multiple root elements")]
  MultipleRoots,

  #[error("content outside the root element")]
  OutsideRoot,

  #[error("unbalanced element tags")]
  Unbalanced,

  #[error("no root element")]
  Empty,
}

/// Check that `content` is acceptable topic markup, retrying once with a
/// synthetic root element around the raw content.
///
/// # Errors
///
/// Returns the error of the *wrapped* scan when both attempts fail; the
/// caller logs it and skips the topic.
pub fn ensure_well_formed(content: &str) -> Result<(), WellFormedError> {
  if scan(content).is_ok() {
    return Ok(());
  }

  scan(&format!("<topic>{content}</topic>"))
}

fn scan(content: &str) -> Result<(), WellFormedError> {
  let mut reader = Reader::from_str(content);
  let mut depth = 0_usize;
  let mut roots = 0_usize;

  loop {
    match reader.read_event()? {
      Event::Start(_) => {
        if depth == 0 {
          roots += 1;
          if roots > 1 {
            return Err(WellFormedError::MultipleRoots);
          }
        }
        depth += 1;
      },
      Event::Empty(_) => {
        if depth == 0 {
          roots += 1;
          if roots > 1 {
            return Err(WellFormedError::MultipleRoots);
          }
        }
      },
      Event::End(_) => {
        depth = depth.checked_sub(1).ok_or(WellFormedError::Unbalanced)?;
      },
      Event::Text(text) => {
        if depth == 0 && !text.iter().all(u8::is_ascii_whitespace) {
          return Err(WellFormedError::OutsideRoot);
        }
      },
      Event::GeneralRef(_) => {
        if depth == 0 {
          return Err(WellFormedError::OutsideRoot);
        }
      },
      Event::Eof => break,
      _ => {},
    }
  }

  if depth != 0 {
    return Err(WellFormedError::Unbalanced);
  }
  if roots == 0 {
    return Err(WellFormedError::Empty);
  }

  Ok(())
}
