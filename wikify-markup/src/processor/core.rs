//! Core implementation of the topic processor.
//!
//! A topic arrives as tagged markup left over from a richer HTML-generation
//! pipeline. Transformation is a sequence of DOM passes over the parsed
//! tree, followed by serialization and the text fixup pipeline. All DOM
//! passes take an immutable snapshot of their matching node set before
//! mutating, since structural edits invalidate live traversal order.

use kuchikikiki::NodeRef;
use log::warn;
use markup5ever::local_name;
use tendril::TendrilSink;

use super::{types::TopicProcessor, validate};
use crate::{
  error::MarkupError,
  fixups,
  types::{LinkTarget, LinkTargets, TopicResult},
  utils,
};

impl TopicProcessor {
  /// Transform one topic's markup into Markdown-ready text, deriving its
  /// title along the way.
  ///
  /// `key` identifies the topic in diagnostics; it never influences the
  /// transformation itself.
  ///
  /// # Errors
  ///
  /// Returns [`MarkupError::Malformed`] when the content is not well-formed
  /// markup even after the synthetic-root retry. Callers skip such topics.
  pub fn process(
    &self,
    key: &str,
    content: &str,
  ) -> Result<TopicResult, MarkupError> {
    validate::ensure_well_formed(content).map_err(|e| {
      MarkupError::Malformed {
        key:    key.to_string(),
        reason: e.to_string(),
      }
    })?;

    let document = kuchikikiki::parse_html().one(content);

    self.normalize_spans(&document);
    let (targets, header_title) = self.resolve_anchors(&document, key);
    self.rewrite_links(&document, &targets);

    // An explicitly tagged page header always wins over incidental heading
    // text, even when the incidental heading occurs earlier in the topic.
    let title = header_title.or_else(|| self.fallback_title(&document));

    let serialized = serialize_topic(&document)?;
    let markdown = fixups::apply(&serialized);

    Ok(TopicResult { title, markdown })
  }

  /// Remove or flatten formatting spans that have no Markdown equivalent.
  ///
  /// Spans wrapping language-conditioned alternatives collapse to the text
  /// of their neutral variant (or vanish entirely when none exists); every
  /// other classed span is unwrapped in place, children spliced at its
  /// former position.
  fn normalize_spans(&self, document: &NodeRef) {
    let Ok(matches) = document.select("span[class]") else {
      return;
    };
    let spans: Vec<_> = matches.collect();

    for span in spans {
      let node = span.as_node();
      // A span detached by an earlier iteration (a language variant whose
      // wrapper was already collapsed) must not be reprocessed.
      let Some(parent) = node.parent() else {
        continue;
      };

      let class = span
        .attributes
        .borrow()
        .get(local_name!("class"))
        .unwrap_or_default()
        .to_string();

      if class == self.options.language_span_class {
        if let Some(neutral) = self.neutral_variant(node) {
          node.insert_after(NodeRef::new_text(neutral.text_contents()));
        }
        node.detach();
      } else if !self.is_language_span(&parent) {
        // Unwrap: splice the children into the parent at the span's former
        // position. Variants inside a language span are skipped; their
        // handling is owned by the wrapper's case above.
        let children: Vec<_> = node.children().collect();
        for child in children {
          node.insert_before(child);
        }
        node.detach();
      }
    }
  }

  /// Find the neutral alternative inside a language-conditioned span.
  fn neutral_variant(&self, span: &NodeRef) -> Option<NodeRef> {
    span.children().find(|child| {
      child.as_element().is_some_and(|el| {
        el.name.local == local_name!("span")
          && el.attributes.borrow().get(local_name!("class"))
            == Some(self.options.neutral_language_class.as_str())
      })
    })
  }

  fn is_language_span(&self, node: &NodeRef) -> bool {
    node.as_element().is_some_and(|el| {
      el.name.local == local_name!("span")
        && el.attributes.borrow().get(local_name!("class"))
          == Some(self.options.language_span_class.as_str())
    })
  }

  /// Build the per-topic link target map from id-carrying spans and remove
  /// the spans themselves; they have no Markdown representation.
  ///
  /// Each span's anchor text is the nearest section title above it: the
  /// closest preceding sibling text node, scanned bottom-up for a heading
  /// line. A span carrying the page-header id also yields the topic title.
  fn resolve_anchors(
    &self,
    document: &NodeRef,
    key: &str,
  ) -> (LinkTargets, Option<String>) {
    let mut targets = LinkTargets::default();
    let mut title = None;

    let Ok(matches) = document.select("span[id]") else {
      return (targets, title);
    };
    let spans: Vec<_> = matches.collect();

    for span in spans {
      let node = span.as_node();
      let id = span
        .attributes
        .borrow()
        .get(local_name!("id"))
        .unwrap_or_default()
        .to_string();

      let preceding = node
        .preceding_siblings()
        .find_map(|sibling| sibling.as_text().map(|text| text.borrow().clone()));
      let candidate = preceding
        .as_deref()
        .and_then(utils::nearest_heading_candidate)
        .map(ToString::to_string);

      if id == self.options.page_header_id {
        if let Some(ref text) = candidate {
          title = Some(text.clone());
        }
      }

      let (anchor_id, target) = if let Some(alias) =
        id.strip_prefix(self.options.page_header_alias_prefix.as_str())
      {
        (alias.to_string(), LinkTarget::PageHeader)
      } else {
        let slug = utils::slugify(candidate.as_deref().unwrap_or_default());
        (id.clone(), LinkTarget::Slug(format!("#{slug}")))
      };

      if targets.register(&anchor_id, target).is_some() {
        warn!("Duplicate anchor id '{anchor_id}' in topic '{key}'");
      }

      node.detach();
    }

    (targets, title)
  }

  /// Rewrite every in-page link to its resolved target. Fragments with no
  /// registered anchor (including cross-page fragments and links to
  /// untitled structural elements) degrade to a self-link.
  fn rewrite_links(&self, document: &NodeRef, targets: &LinkTargets) {
    let Ok(matches) = document.select("a[href^='#']") else {
      return;
    };
    let links: Vec<_> = matches.collect();

    for link in links {
      let href = link
        .attributes
        .borrow()
        .get(local_name!("href"))
        .map(ToString::to_string);

      if let Some(fragment) = href.as_deref().and_then(|h| h.strip_prefix('#'))
      {
        let resolved =
          targets.resolve(fragment.trim(), &self.options.page_header_id);
        link
          .attributes
          .borrow_mut()
          .insert(local_name!("href"), resolved);
      }
    }
  }

  /// Derive a title from the first heading-like line anywhere in the topic,
  /// for topics without a tagged page header.
  fn fallback_title(&self, document: &NodeRef) -> Option<String> {
    document.inclusive_descendants().find_map(|node| {
      node.as_text().and_then(|text| {
        utils::first_heading_candidate(&text.borrow())
          .map(ToString::to_string)
      })
    })
  }
}

/// Serialize the topic with the document element stripped: the markup that
/// remains after transformation is emitted as-is, child by child.
fn serialize_topic(document: &NodeRef) -> Result<String, MarkupError> {
  let mut out = Vec::new();

  if let Ok(body) = document.select_first("body") {
    for child in body.as_node().children() {
      child.serialize(&mut out)?;
    }
  }

  Ok(String::from_utf8(out).unwrap_or_default())
}
