//! Word-equivalence oracles.
//!
//! # Available Oracles
//!
//! - [`StrictOracle`] - normalized exact matching, always available
//! - [`CachedOracle`] - bounded verdict cache around any other oracle
//! - `http::HttpOracle` - language-model grading over an OpenAI-compatible
//!   chat-completion API (enable the `http-oracle` feature)

pub mod cache;
#[cfg(feature = "http-oracle")]
pub mod http;
pub mod strict;

pub use cache::CachedOracle;
pub use strict::{strict_verdict, StrictOracle};
