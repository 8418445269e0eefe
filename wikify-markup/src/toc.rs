//! Table-of-contents source reader.
//!
//! The generating pipeline emits a TOC file of nested `<topic>` elements;
//! each element's `file` attribute names the markup file for one topic, and
//! nesting expresses the sidebar hierarchy. This module flattens that tree
//! into an ordered list of [`TocEntry`] values.

use std::{fs, path::Path};

use quick_xml::{Reader, events::Event};

use crate::{error::MarkupError, types::TocEntry};

/// Read and parse a TOC file.
///
/// # Errors
///
/// Returns an error when the file cannot be read or its markup cannot be
/// parsed. A missing TOC source is fatal to the caller; there is nothing to
/// convert without one.
pub fn read_toc(path: &Path) -> Result<Vec<TocEntry>, MarkupError> {
  let content = fs::read_to_string(path)?;
  parse_toc(&content)
}

/// Parse TOC markup into ordered, depth-annotated entries.
///
/// Depth counts enclosing `<topic>` elements only, so a wrapper element
/// around the whole list does not shift the hierarchy. Elements without a
/// `file` attribute contribute nesting but no entry of their own.
///
/// # Errors
///
/// Returns [`MarkupError::Toc`] when the markup cannot be parsed.
pub fn parse_toc(content: &str) -> Result<Vec<TocEntry>, MarkupError> {
  let mut reader = Reader::from_str(content);
  let mut entries = Vec::new();
  let mut depth = 0_usize;

  loop {
    match reader.read_event() {
      Ok(Event::Start(element)) => {
        if element.name().as_ref() == b"topic" {
          depth += 1;
          if let Some(key) = file_attribute(&element) {
            entries.push(TocEntry { key, depth });
          }
        }
      },
      Ok(Event::Empty(element)) => {
        if element.name().as_ref() == b"topic" {
          if let Some(key) = file_attribute(&element) {
            entries.push(TocEntry {
              key,
              depth: depth + 1,
            });
          }
        }
      },
      Ok(Event::End(element)) => {
        if element.name().as_ref() == b"topic" {
          depth = depth.saturating_sub(1);
        }
      },
      Ok(Event::Eof) => break,
      Ok(_) => {},
      Err(e) => return Err(MarkupError::Toc(e.to_string())),
    }
  }

  Ok(entries)
}

fn file_attribute(element: &quick_xml::events::BytesStart<'_>) -> Option<String> {
  for attr in element.attributes().flatten() {
    if attr.key.as_ref() == b"file" {
      let value = String::from_utf8_lossy(&attr.value).into_owned();
      if !value.is_empty() {
        return Some(value);
      }
    }
  }
  None
}
