use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::buffer::{
    self, empty_buffer, is_user_input_complete, is_word_correct, next_empty_index,
    reconstruct_complete_word, update_user_input_at, user_input_at,
};
use super::segment::{expected_user_input_length, parse_word, WordSegment};
use super::sentence::ensure_spelling_sentence;

/// A spelling question as supplied by the content source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellingQuestion {
    /// Stable identifier. The puzzle only resets when this changes.
    pub id: String,
    pub target_word: String,
    #[serde(default)]
    pub sentence: Option<String>,
    #[serde(default)]
    pub question_text: Option<String>,
    /// 0-based positions of the uppercased word that are given to the learner.
    #[serde(default)]
    pub prefilled_indexes: BTreeSet<usize>,
}

impl SpellingQuestion {
    pub fn new(id: impl Into<String>, target_word: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            target_word: target_word.into(),
            sentence: None,
            question_text: None,
            prefilled_indexes: BTreeSet::new(),
        }
    }

    pub fn with_sentence(mut self, sentence: impl Into<String>) -> Self {
        self.sentence = Some(sentence.into());
        self
    }

    pub fn with_question_text(mut self, question_text: impl Into<String>) -> Self {
        self.question_text = Some(question_text.into());
        self
    }

    pub fn with_prefilled(mut self, indexes: impl IntoIterator<Item = usize>) -> Self {
        self.prefilled_indexes = indexes.into_iter().collect();
        self
    }
}

/// One-shot notifications produced by an edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PuzzleEvent {
    /// The word was completed correctly. Fires once per question.
    Solved { word: String },
    /// The first complete-but-wrong answer for this question, unless the
    /// question was already solved.
    FirstIncorrect { candidate: String },
}

/// Derived state after an edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleUpdate {
    pub is_complete: bool,
    pub is_correct: bool,
    pub attempt_count: u32,
    pub event: Option<PuzzleEvent>,
}

/// Per-letter feedback, independent of whole-word completeness and correctness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LetterFeedback {
    Empty,
    Correct,
    Incorrect,
}

/// Fill-in-the-blank state for one question.
#[derive(Debug, Clone)]
pub struct SpellingPuzzle {
    question_id: String,
    target_upper: String,
    prefilled: BTreeSet<usize>,
    /// Uppercased target characters at each editable position, in buffer order.
    blank_targets: Vec<char>,
    segments: Vec<WordSegment>,
    carrier_sentence: String,
    user_input: String,
    is_complete: bool,
    is_correct: bool,
    attempt_count: u32,
    solved_notified: bool,
}

impl SpellingPuzzle {
    pub fn new(question: &SpellingQuestion) -> Self {
        let target_upper = question.target_word.trim().to_uppercase();
        let word_len = target_upper.chars().count();
        let prefilled: BTreeSet<usize> = question
            .prefilled_indexes
            .iter()
            .copied()
            .filter(|&idx| idx < word_len)
            .collect();

        let segments = parse_word(&target_upper, &prefilled);
        let blank_targets: Vec<char> = target_upper
            .chars()
            .enumerate()
            .filter(|(idx, _)| !prefilled.contains(idx))
            .map(|(_, ch)| ch)
            .collect();
        let expected_len = expected_user_input_length(&segments);
        let carrier_sentence = ensure_spelling_sentence(
            question.target_word.trim(),
            question.sentence.as_deref(),
            question.question_text.as_deref(),
        );

        let mut puzzle = Self {
            question_id: question.id.clone(),
            target_upper,
            prefilled,
            blank_targets,
            segments,
            carrier_sentence,
            user_input: empty_buffer(expected_len),
            is_complete: false,
            is_correct: false,
            attempt_count: 0,
            solved_notified: false,
        };

        // Every letter given away: nothing to type, already solved.
        if expected_len == 0 && word_len > 0 {
            puzzle.is_complete = true;
            puzzle.is_correct = true;
            puzzle.solved_notified = true;
        }

        log::debug!(
            "New spelling puzzle {} ({} blanks, {} segments)",
            puzzle.question_id,
            expected_len,
            puzzle.segments.len()
        );
        puzzle
    }

    /// Switch to `question` if its id differs from the current one.
    ///
    /// Returns `true` when the puzzle was rebuilt. Repeated calls with the
    /// same id keep the current answer, attempts and notification flags.
    pub fn reset_for_question(&mut self, question: &SpellingQuestion) -> bool {
        if question.id == self.question_id {
            return false;
        }
        *self = Self::new(question);
        true
    }

    /// Set (or clear with `None`) the letter at a global blank index and
    /// re-evaluate the answer.
    pub fn set_letter(&mut self, global_index: usize, letter: Option<char>) -> PuzzleUpdate {
        let expected_len = self.expected_input_len();
        if global_index >= expected_len {
            log::warn!(
                "Ignoring edit at blank {global_index} of puzzle {} ({expected_len} blanks)",
                self.question_id
            );
            return self.snapshot(None);
        }

        let letter = letter.filter(|ch| !ch.is_whitespace());
        let updated = update_user_input_at(&self.user_input, global_index, letter, expected_len);
        if updated == self.user_input {
            return self.snapshot(None);
        }
        self.user_input = updated;

        let event = self.evaluate();
        self.snapshot(event)
    }

    fn evaluate(&mut self) -> Option<PuzzleEvent> {
        if !is_user_input_complete(&self.user_input, self.expected_input_len()) {
            self.is_complete = false;
            self.is_correct = false;
            return None;
        }

        let candidate = self.reconstructed_word();
        self.is_complete = true;
        self.is_correct = is_word_correct(&candidate, &self.target_upper);

        if self.is_correct {
            if self.solved_notified {
                return None;
            }
            self.solved_notified = true;
            log::debug!("Puzzle {} solved", self.question_id);
            return Some(PuzzleEvent::Solved { word: candidate });
        }

        // breaking a solved word still counts as an attempt, silently
        self.attempt_count += 1;
        if self.attempt_count == 1 && !self.solved_notified {
            log::debug!(
                "First incorrect attempt on puzzle {}: {candidate:?}",
                self.question_id
            );
            return Some(PuzzleEvent::FirstIncorrect { candidate });
        }
        None
    }

    fn snapshot(&self, event: Option<PuzzleEvent>) -> PuzzleUpdate {
        PuzzleUpdate {
            is_complete: self.is_complete,
            is_correct: self.is_correct,
            attempt_count: self.attempt_count,
            event,
        }
    }

    pub fn question_id(&self) -> &str {
        &self.question_id
    }

    /// The uppercased target word.
    pub fn target_word(&self) -> &str {
        &self.target_upper
    }

    pub fn segments(&self) -> &[WordSegment] {
        &self.segments
    }

    pub fn carrier_sentence(&self) -> &str {
        &self.carrier_sentence
    }

    /// The flat answer buffer; a space marks an empty position.
    pub fn user_input(&self) -> &str {
        &self.user_input
    }

    pub fn expected_input_len(&self) -> usize {
        self.blank_targets.len()
    }

    pub fn user_input_at(&self, global_index: usize) -> Option<char> {
        user_input_at(&self.user_input, global_index)
    }

    /// Global buffer offset of the first letter of segment `part_index`.
    pub fn blank_base_index_for_part(&self, part_index: usize) -> usize {
        buffer::blank_base_index_for_part(&self.segments, part_index)
    }

    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    pub fn is_correct(&self) -> bool {
        self.is_correct
    }

    pub fn attempt_count(&self) -> u32 {
        self.attempt_count
    }

    /// Candidate word built from the buffer and the prefilled letters.
    pub fn reconstructed_word(&self) -> String {
        reconstruct_complete_word(&self.target_upper, &self.prefilled, &self.user_input)
    }

    /// Whether the letter typed at `global_index` matches the target there.
    pub fn is_letter_correct(&self, global_index: usize) -> bool {
        match (
            self.user_input_at(global_index),
            self.blank_targets.get(global_index),
        ) {
            (Some(typed), Some(&expected)) => typed.to_uppercase().eq(expected.to_uppercase()),
            _ => false,
        }
    }

    pub fn letter_feedback(&self) -> Vec<LetterFeedback> {
        (0..self.expected_input_len())
            .map(|idx| match self.user_input_at(idx) {
                None => LetterFeedback::Empty,
                Some(_) if self.is_letter_correct(idx) => LetterFeedback::Correct,
                Some(_) => LetterFeedback::Incorrect,
            })
            .collect()
    }

    /// The position a host should focus next: the first empty one.
    pub fn next_focus_index(&self) -> Option<usize> {
        next_empty_index(&self.user_input, self.expected_input_len())
    }
}
