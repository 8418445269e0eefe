//! Type definitions for the topic processor.
//!
//! Contains the configuration options (`TopicOptions`), their builder, and
//! the processor struct itself.
//!
//! # Examples
//!
//! ```
//! use wikify_markup::{TopicOptions, TopicProcessor};
//!
//! let options = TopicOptions::default();
//! let processor = TopicProcessor::new(options);
//! ```

/// Options for configuring the topic processor.
///
/// The defaults match the markup vocabulary of the generating pipeline; the
/// knobs exist so a differently-branded generator can reuse the engine.
#[derive(Debug, Clone)]
pub struct TopicOptions {
  /// Class of spans wrapping language-conditioned text alternatives.
  pub language_span_class: String,

  /// Class marking the neutral alternative inside a language span.
  pub neutral_language_class: String,

  /// Anchor id designating the page header; its derived text becomes the
  /// topic title.
  pub page_header_id: String,

  /// Prefix marking page-header alias anchors, used for introductory
  /// sections that have no title of their own. The unprefixed id redirects
  /// to the page header.
  pub page_header_alias_prefix: String,
}

impl Default for TopicOptions {
  fn default() -> Self {
    Self {
      language_span_class:      "languageSpecificText".to_string(),
      neutral_language_class:   "nu".to_string(),
      page_header_id:           "PageHeader".to_string(),
      page_header_alias_prefix: "@pageHeader_".to_string(),
    }
  }
}

/// Main topic processor.
///
/// Stateless apart from its options: every [`process`](TopicProcessor::process)
/// call builds its own link target map, so one processor can be reused across
/// an entire table of contents.
#[derive(Debug, Clone)]
pub struct TopicProcessor {
  pub(crate) options: TopicOptions,
}

impl TopicProcessor {
  /// Create a new `TopicProcessor` with the given options.
  #[must_use]
  pub const fn new(options: TopicOptions) -> Self {
    Self { options }
  }

  /// Access processor options.
  #[must_use]
  pub const fn options(&self) -> &TopicOptions {
    &self.options
  }
}

/// Builder for constructing `TopicOptions` with method chaining.
#[derive(Debug, Clone, Default)]
pub struct TopicOptionsBuilder {
  options: TopicOptions,
}

impl TopicOptionsBuilder {
  /// Create a new builder with default options.
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Set the class of language-conditioned alternative spans.
  #[must_use]
  pub fn language_span_class<S: Into<String>>(mut self, class: S) -> Self {
    self.options.language_span_class = class.into();
    self
  }

  /// Set the class marking the neutral language alternative.
  #[must_use]
  pub fn neutral_language_class<S: Into<String>>(mut self, class: S) -> Self {
    self.options.neutral_language_class = class.into();
    self
  }

  /// Set the anchor id designating the page header.
  #[must_use]
  pub fn page_header_id<S: Into<String>>(mut self, id: S) -> Self {
    self.options.page_header_id = id.into();
    self
  }

  /// Set the prefix marking page-header alias anchors.
  #[must_use]
  pub fn page_header_alias_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
    self.options.page_header_alias_prefix = prefix.into();
    self
  }

  /// Build the final `TopicOptions`.
  #[must_use]
  pub fn build(self) -> TopicOptions {
    self.options
  }
}
