//! Library surface of the wikify binary, exposed for integration tests and
//! embedding. The interesting machinery lives in [`walker`] (the TOC walk)
//! and in the `wikify-markup` crate (the per-topic transformation engine).

pub mod cli;
pub mod config;
pub mod error;
pub mod utils;
pub mod walker;
