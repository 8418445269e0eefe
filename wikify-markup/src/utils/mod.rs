//! Small text helpers shared by the processor and the fixup pipeline.

use regex::Regex;

/// Slugify a derived section title for use as a Markdown anchor.
/// Lowercases, turns spaces into hyphens and strips the heading marker
/// character itself.
#[must_use]
pub fn slugify(text: &str) -> String {
  text.to_lowercase().replace(' ', "-").replace('#', "")
}

/// Return the title candidate carried by `line`, if it looks like a heading.
///
/// A heading line is longer than two characters after trimming and starts
/// with the `#` marker. The candidate is the text after the marker token,
/// i.e. everything past the first space; a marker-only line is returned
/// whole, mirroring the index arithmetic of the generator that produced the
/// markup.
#[must_use]
pub fn heading_candidate(line: &str) -> Option<&str> {
  let trimmed = line.trim();
  if trimmed.len() > 2 && trimmed.starts_with('#') {
    Some(strip_heading_marker(trimmed))
  } else {
    None
  }
}

/// Scan lines nearest-first (bottom-up) for a heading candidate. Used when
/// resolving anchors, where the relevant title is the closest one above the
/// anchor span.
#[must_use]
pub fn nearest_heading_candidate(text: &str) -> Option<&str> {
  text.lines().rev().find_map(heading_candidate)
}

/// Scan lines in document order for a heading candidate. Used for the
/// fallback page title.
#[must_use]
pub fn first_heading_candidate(text: &str) -> Option<&str> {
  text.lines().find_map(heading_candidate)
}

fn strip_heading_marker(line: &str) -> &str {
  line.find(' ').map_or(line, |idx| &line[idx + 1..])
}

/// Create a regex that never matches anything.
///
/// This is used as a fallback pattern when a regex fails to compile. It will
/// never match any input, which is safer than a trivial pattern like `^$`
/// which would match empty strings.
#[must_use]
pub fn never_matching_regex() -> Regex {
  #[allow(
    clippy::expect_used,
    reason = "This pattern is guaranteed to be valid"
  )]
  Regex::new(r"[^\s\S]").expect("regex pattern [^\\s\\S] should always compile")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_slugify() {
    assert_eq!(slugify("Title One"), "title-one");
    assert_eq!(slugify("Getting Started"), "getting-started");
    assert_eq!(slugify("C# Notes"), "c-notes");
  }

  #[test]
  fn test_heading_candidate() {
    assert_eq!(heading_candidate("## Title One"), Some("Title One"));
    assert_eq!(heading_candidate("  # Intro  "), Some("Intro"));
    assert_eq!(heading_candidate("plain text"), None);
    // Too short after trimming.
    assert_eq!(heading_candidate(" # "), None);
    // Marker-only lines are kept whole.
    assert_eq!(heading_candidate("####"), Some("####"));
  }

  #[test]
  fn test_nearest_heading_candidate_scans_bottom_up() {
    let text = "## First\nsome text\n## Second\n";
    assert_eq!(nearest_heading_candidate(text), Some("Second"));
  }

  #[test]
  fn test_first_heading_candidate_scans_top_down() {
    let text = "other text\n## Title One\n## Title Two\n";
    assert_eq!(first_heading_candidate(text), Some("Title One"));
  }

  #[test]
  fn test_never_matching_regex() {
    let re = never_matching_regex();
    assert!(!re.is_match(""));
    assert!(!re.is_match("anything at all"));
  }
}
