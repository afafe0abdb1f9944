//! Fill-in-the-blank spelling puzzles.
//!
//! A target word is split into fixed (prefilled) and blank runs. The learner's
//! letters live in one flat buffer covering only the blank positions; after
//! every edit the puzzle derives completeness, whole-word correctness and
//! per-letter correctness as three separate predicates.
//!
//! # Examples
//!
//! ```rust
//! use readspell_rs::spelling::{PuzzleEvent, SpellingPuzzle, SpellingQuestion};
//!
//! let question = SpellingQuestion::new("q-7", "black").with_prefilled([0, 1]);
//! let mut puzzle = SpellingPuzzle::new(&question);
//! assert_eq!(puzzle.expected_input_len(), 3);
//!
//! puzzle.set_letter(0, Some('A'));
//! puzzle.set_letter(1, Some('C'));
//! let update = puzzle.set_letter(2, Some('K'));
//! assert_eq!(update.event, Some(PuzzleEvent::Solved { word: "BLACK".into() }));
//! ```

pub mod buffer;
pub mod puzzle;
pub mod segment;
pub mod sentence;

pub use puzzle::{LetterFeedback, PuzzleEvent, PuzzleUpdate, SpellingPuzzle, SpellingQuestion};
pub use segment::{parse_word, WordSegment};
pub use sentence::{ensure_spelling_sentence, split_around_word, CarrierSplit};
