//! Guided read-aloud lines.
//!
//! A sentence is narrowed to a short line around a target word. While the
//! learner reads, each partial transcript moves a forward-only word pointer
//! used for highlighting; once the utterance is final every word is graded
//! by a [`PronunciationOracle`](crate::PronunciationOracle).
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use readspell_rs::config::{EvaluationParams, WindowOptions};
//! use readspell_rs::oracles::StrictOracle;
//! use readspell_rs::reading::LineReadingSession;
//!
//! # tokio::runtime::Builder::new_current_thread().enable_all().build()?.block_on(async {
//! let mut session = LineReadingSession::new();
//! session.begin("The fox jumped over the lazy dog", "over", &WindowOptions::default());
//!
//! assert_eq!(session.observe_partial("fox jumped"), 2);
//!
//! let result = session
//!     .evaluate_final("fox jumped over the lazy", Arc::new(StrictOracle), &EvaluationParams::default())
//!     .await
//!     .expect("question unchanged");
//! assert_eq!(result.correct_count, 5);
//! # });
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod evaluate;
pub mod line;
pub mod pointer;
pub mod session;

pub use evaluate::{evaluate_line_reading, LineReadingResult, WordAlignment, WordStatus};
pub use line::{build_reading_line_spec, ReadingLineSpec};
pub use pointer::compute_current_word_index;
pub use session::{GenerationTicket, LineReadingSession, QuestionGeneration};
