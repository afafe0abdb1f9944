//! # readspell-rs
//!
//! Interaction logic for early-reader exercises: fill-in-the-blank spelling
//! puzzles and guided read-aloud lines tracked against a speech transcript.
//!
//! ## Features
//!
//! - **Spelling puzzles**: prefilled-letter scaffolding, a flat per-letter
//!   input buffer, and one-shot solved / first-mistake notifications
//! - **Reading lines**: a short window of a sentence centered on a target
//!   word, a live word pointer for highlighting, and per-word grading
//! - **Pluggable oracles**: word equivalence is judged by any
//!   [`PronunciationOracle`], with strict matching as the fallback
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! readspell-rs = { version = "2026.10" }
//! ```
//!
//! ```rust
//! use readspell_rs::spelling::{SpellingPuzzle, SpellingQuestion};
//!
//! let question = SpellingQuestion::new("q1", "cat");
//! let mut puzzle = SpellingPuzzle::new(&question);
//! puzzle.set_letter(0, Some('c'));
//! puzzle.set_letter(1, Some('a'));
//! let update = puzzle.set_letter(2, Some('t'));
//! assert!(update.is_complete && update.is_correct);
//! ```
//!
//! ```rust
//! use readspell_rs::config::WindowOptions;
//! use readspell_rs::reading::{build_reading_line_spec, compute_current_word_index};
//!
//! let line = build_reading_line_spec(
//!     "The cat sat on the old red mat today",
//!     "red",
//!     &WindowOptions::default(),
//! );
//! assert_eq!(line.target_line, "the old red mat today");
//! assert_eq!(compute_current_word_index(&line, "the old red"), 3);
//! ```

pub mod config;
pub mod error;
pub mod oracles;
pub mod reading;
pub mod spelling;
pub mod text;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use error::{ConfigError, OracleError};

/// Verdict for a single target word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PronunciationStatus {
    Correct,
    Incorrect,
}

/// The answer of a [`PronunciationOracle`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OracleVerdict {
    pub status: PronunciationStatus,
    /// Letter positions of the target the oracle considers wrong. May be
    /// empty even for an incorrect verdict.
    #[serde(default)]
    pub mismatched_indices: Vec<usize>,
}

impl OracleVerdict {
    pub fn correct() -> Self {
        Self {
            status: PronunciationStatus::Correct,
            mismatched_indices: Vec::new(),
        }
    }

    pub fn incorrect(mismatched_indices: Vec<usize>) -> Self {
        Self {
            status: PronunciationStatus::Incorrect,
            mismatched_indices,
        }
    }

    pub fn is_correct(&self) -> bool {
        self.status == PronunciationStatus::Correct
    }
}

/// Judges whether a spoken or typed attempt matches a target word.
///
/// Implementations should tolerate filler words in `attempt` and minor
/// phonetic or orthographic variation. Calls may be slow and may fail; the
/// evaluation code in [`reading`] bounds them with a timeout and falls back
/// to strict matching on any error.
#[async_trait]
pub trait PronunciationOracle: Send + Sync {
    /// Evaluate `attempt` (an utterance or a typed word) against `target`.
    async fn evaluate(&self, target: &str, attempt: &str) -> Result<OracleVerdict, OracleError>;

    /// Short name used in log lines.
    fn name(&self) -> &str {
        "oracle"
    }
}
