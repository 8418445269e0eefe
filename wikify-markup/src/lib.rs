//! # wikify-markup - topic markup to Markdown transformation
//!
//! This crate turns a single generated documentation topic, expressed as
//! tagged markup with semantic formatting spans, into Markdown-ready text.
//! It is the engine behind the `wikify` binary.
//!
//! ## Quick Start
//!
//! ```rust
//! use wikify_markup::{TopicOptions, TopicProcessor};
//!
//! let processor = TopicProcessor::new(TopicOptions::default());
//! let result = processor
//!   .process("GettingStarted", "## Getting Started\nSome text.")
//!   .expect("well-formed topic");
//!
//! assert_eq!(result.title.as_deref(), Some("Getting Started"));
//! ```
//!
//! ## What a single `process` call does
//!
//! - **Span normalization**: formatting spans carry no meaning in Markdown;
//!   they are unwrapped in place, and language-conditioned alternative text
//!   is collapsed to its neutral variant.
//! - **Anchor resolution**: spans carrying an `id` become entries in a
//!   per-topic link target map, derived from the nearest preceding section
//!   title; in-page links are rewritten to the derived slugs.
//! - **Title derivation**: an explicit page-header anchor wins; otherwise
//!   the first heading-like line anywhere in the topic is used.
//! - **Text fixups**: a fixed sequence of regex passes over the serialized
//!   text (blank lines before block elements, trailing-space trimming,
//!   entity decoding, non-breaking-space repositioning).
//!
//! Topics that are not well-formed markup are retried once wrapped in a
//! synthetic root element; if that also fails, [`MarkupError::Malformed`] is
//! returned and callers are expected to skip the topic.

pub mod error;
pub mod fixups;
pub mod processor;
pub mod toc;
pub mod types;
pub mod utils;

pub use crate::{
  error::MarkupError,
  processor::{TopicOptions, TopicOptionsBuilder, TopicProcessor},
  toc::{parse_toc, read_toc},
  types::{LinkTarget, LinkTargets, TocEntry, TopicResult},
};
