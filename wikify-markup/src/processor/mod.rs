//! The topic transformation engine.
//!
//! [`TopicProcessor::process`] runs the full pipeline for one topic: the
//! well-formedness gate, the DOM passes (span normalization, anchor
//! resolution, link rewriting, title derivation), serialization and the
//! text fixup pipeline.

mod core;
pub mod types;
mod validate;

pub use types::{TopicOptions, TopicOptionsBuilder, TopicProcessor};
pub use validate::WellFormedError;
