//! Types for the wikify-markup public API and internal use.
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Rewritten links that cannot be resolved degrade to a self-link.
pub const SELF_LINK: &str = "#";

/// Result of transforming one topic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TopicResult {
  /// Derived page title, if any. Callers fall back to the topic key.
  pub title: Option<String>,

  /// The Markdown-ready text, fixups applied.
  pub markdown: String,
}

/// One entry of the table of contents: a topic key and its nesting depth.
///
/// Depth starts at 1 for root topics; each additional level indents the
/// topic's sidebar line by one unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TocEntry {
  /// File key of the topic (the file is `<key>.md`).
  pub key: String,

  /// Nesting depth, >= 1.
  pub depth: usize,
}

/// Where an in-page anchor id points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
  /// A Markdown anchor slug, including the leading `#`.
  Slug(String),

  /// Redirect to this page's own header anchor, once known. Resolution
  /// re-reads the map under the page-header id itself.
  PageHeader,
}

/// Per-topic mapping from anchor id to resolved link target.
///
/// Built once per topic by the anchor resolver and consumed immediately
/// afterwards when links are rewritten; never shared across topics.
#[derive(Debug, Default)]
pub struct LinkTargets {
  targets: HashMap<String, LinkTarget>,
}

impl LinkTargets {
  /// Register an anchor id. Returns the previous target when `id` was
  /// already registered: last write wins, and callers are expected to warn
  /// about the duplicate.
  pub fn register(&mut self, id: &str, target: LinkTarget) -> Option<LinkTarget> {
    self.targets.insert(id.to_string(), target)
  }

  /// Resolve a link fragment to its rewritten form.
  ///
  /// Page-header redirects re-resolve through the target registered under
  /// the page-header id itself. Any miss degrades to [`SELF_LINK`]; this is
  /// designed fallback behavior, not an error.
  #[must_use]
  pub fn resolve(&self, fragment: &str, page_header_id: &str) -> String {
    match self.targets.get(fragment) {
      Some(LinkTarget::Slug(slug)) => slug.clone(),
      Some(LinkTarget::PageHeader) => {
        match self.targets.get(page_header_id) {
          Some(LinkTarget::Slug(slug)) => slug.clone(),
          _ => SELF_LINK.to_string(),
        }
      },
      None => SELF_LINK.to_string(),
    }
  }

  /// Number of registered anchors.
  #[must_use]
  pub fn len(&self) -> usize {
    self.targets.len()
  }

  /// Whether the topic registered any anchors at all.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.targets.is_empty()
  }
}
