//! Text fixup pipeline applied to serialized topic text.
//!
//! After the DOM passes, a topic is serialized back to text that still
//! carries block-level tags. A naive Markdown rendering of that text gets a
//! handful of details wrong; the passes below correct them, in a fixed
//! order:
//!
//! 1. insert a blank line wherever literal text abuts a following
//!    block-level element, so the two do not visually merge;
//! 2. trim whitespace runs that precede a closing tag;
//! 3. decode HTML entities to their literal characters, keeping the
//!    non-breaking space in entity form (Markdown renderers treat the
//!    explicit entity specially and must not see a plain space);
//! 4. reposition whitespace around non-breaking-space entities.
//!
//! The pipeline is idempotent: applying it to its own output changes
//! nothing.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::utils::never_matching_regex;

/// The non-breaking space in its named entity form.
const NBSP_ENTITY: &str = "&nbsp;";

/// A word character directly followed by an opening block-level tag.
static BLOCK_AFTER_WORD: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(
    r"(?i)(\w)(<(?:address|blockquote|div|dl|fieldset|form|h[1-6]|iframe|math|noscript|ol|p|pre|script|table|ul)\b)",
  )
  .unwrap_or_else(|e| {
    log::error!("Failed to compile BLOCK_AFTER_WORD regex: {e}");
    never_matching_regex()
  })
});

/// Whitespace immediately preceding a closing tag.
static SPACE_BEFORE_CLOSE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"\s+</").unwrap_or_else(|e| {
    log::error!("Failed to compile SPACE_BEFORE_CLOSE regex: {e}");
    never_matching_regex()
  })
});

/// A non-breaking-space entity with its surrounding whitespace, captured
/// separately so the rewrite can branch on which side carries whitespace.
static NBSP_RUN: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?P<pre>\s*)&nbsp;(?P<post>\s*)").unwrap_or_else(|e| {
    log::error!("Failed to compile NBSP_RUN regex: {e}");
    never_matching_regex()
  })
});

/// Run the full fixup pipeline over serialized topic text.
#[must_use]
pub fn apply(text: &str) -> String {
  let text = separate_blocks(text);
  let text = trim_before_closing_tags(&text);
  let text = decode_entities(&text);
  collapse_nbsp_runs(&text)
}

/// Insert a blank line between literal text and a directly following
/// block-level element.
fn separate_blocks(text: &str) -> String {
  BLOCK_AFTER_WORD.replace_all(text, "$1\n\n$2").into_owned()
}

/// Collapse any whitespace run before a closing tag to nothing.
fn trim_before_closing_tags(text: &str) -> String {
  SPACE_BEFORE_CLOSE.replace_all(text, "</").into_owned()
}

/// Decode HTML entities to literal characters, then re-encode the literal
/// non-breaking space back to its named entity so it survives as an explicit
/// entity rather than collapsing into an ordinary space.
fn decode_entities(text: &str) -> String {
  html_escape::decode_html_entities(text).replace('\u{a0}', NBSP_ENTITY)
}

/// Rewrite whitespace around non-breaking-space entities.
///
/// Leading vs. trailing whitespace around the entity indicates different
/// structural intents in the generated markup, and each must become a
/// newline on the correct side:
///
/// - entity directly followed by a heading marker: a disguised section
///   break, replaced with a blank line;
/// - entity followed by whitespace: newline moves after the entity;
/// - entity preceded by whitespace: newline moves before the entity;
/// - bare entity: left unchanged.
fn collapse_nbsp_runs(text: &str) -> String {
  NBSP_RUN
    .replace_all(text, |caps: &Captures| {
      let Some(run) = caps.get(0) else {
        return String::new();
      };
      let pre = caps.name("pre").map_or("", |m| m.as_str());
      let post = caps.name("post").map_or("", |m| m.as_str());

      if text[run.end()..].starts_with('#') {
        "\n\n".to_string()
      } else if pre.is_empty() && !post.is_empty() {
        format!("{NBSP_ENTITY}\n")
      } else if !pre.is_empty() {
        format!("\n{NBSP_ENTITY}")
      } else {
        run.as_str().to_string()
      }
    })
    .into_owned()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_blank_line_inserted_before_block_element() {
    let fixed = apply("some text<p>paragraph</p>");
    assert_eq!(fixed, "some text\n\n<p>paragraph</p>");
  }

  #[test]
  fn test_block_separation_covers_headings_and_lists() {
    assert_eq!(apply("intro<h2>Title</h2>"), "intro\n\n<h2>Title</h2>");
    assert_eq!(apply("intro<ul><li>a</li></ul>"), "intro\n\n<ul><li>a</li></ul>");
  }

  #[test]
  fn test_inline_elements_are_left_alone() {
    // <b> is not block-level; no blank line is inserted.
    assert_eq!(apply("some<b>bold</b>"), "some<b>bold</b>");
  }

  #[test]
  fn test_longer_tag_names_sharing_a_prefix_do_not_match() {
    // "pre" must not match inside an unrelated longer name.
    assert_eq!(apply("x<preview>"), "x<preview>");
  }

  #[test]
  fn test_whitespace_trimmed_before_closing_tag() {
    assert_eq!(apply("<p>text   </p>"), "<p>text</p>");
    assert_eq!(apply("<p>text\n</p>"), "<p>text</p>");
  }

  #[test]
  fn test_entities_decoded_but_nbsp_preserved() {
    assert_eq!(apply("a &amp; b"), "a & b");
    assert_eq!(apply("x&nbsp;y"), "x&nbsp;y");
    // A literal non-breaking space is re-encoded too.
    assert_eq!(apply("x\u{a0}y"), "x&nbsp;y");
  }

  #[test]
  fn test_nbsp_before_heading_marker_becomes_blank_line() {
    assert_eq!(apply("&nbsp;# Section"), "\n\n# Section");
    // Surrounding whitespace joins the run before the check.
    assert_eq!(apply("text &nbsp; ## Section"), "text\n\n## Section");
  }

  #[test]
  fn test_nbsp_followed_by_whitespace() {
    assert_eq!(apply("a&nbsp; b"), "a&nbsp;\nb");
  }

  #[test]
  fn test_nbsp_preceded_by_whitespace() {
    assert_eq!(apply("a &nbsp;b"), "a\n&nbsp;b");
  }

  #[test]
  fn test_bare_nbsp_unchanged() {
    assert_eq!(apply("a&nbsp;b"), "a&nbsp;b");
  }

  #[test]
  fn test_pipeline_is_idempotent() {
    let inputs = [
      "some text<p>paragraph</p>",
      "a &nbsp; b and a&nbsp; b and a &nbsp;b",
      "&nbsp;# Section",
      "<p>trailing   </p><div>next</div>",
      "plain text with &nbsp; nothing special",
    ];

    for input in inputs {
      let once = apply(input);
      let twice = apply(&once);
      assert_eq!(once, twice, "pipeline not idempotent for {input:?}");
    }
  }
}
