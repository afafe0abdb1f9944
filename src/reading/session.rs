use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::evaluate::{evaluate_line_reading, LineReadingResult};
use super::line::{build_reading_line_spec, ReadingLineSpec};
use super::pointer::compute_current_word_index;
use crate::config::{EvaluationParams, WindowOptions};
use crate::PronunciationOracle;

/// Counter bumped every time a new question is shown.
///
/// Clones share the same counter, so a ticket taken before an `await` can be
/// checked against whatever question is current afterwards.
#[derive(Debug, Clone, Default)]
pub struct QuestionGeneration {
    current: Arc<AtomicU64>,
}

impl QuestionGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to a new question, invalidating every outstanding ticket.
    pub fn advance(&self) -> u64 {
        self.current.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn current(&self) -> u64 {
        self.current.load(Ordering::SeqCst)
    }

    pub fn ticket(&self) -> GenerationTicket {
        GenerationTicket {
            generation: self.current(),
            source: Arc::clone(&self.current),
        }
    }
}

/// A snapshot of [`QuestionGeneration`] taken when async work starts.
#[derive(Debug, Clone)]
pub struct GenerationTicket {
    generation: u64,
    source: Arc<AtomicU64>,
}

impl GenerationTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// False once the question this ticket was issued for has been replaced.
    pub fn is_current(&self) -> bool {
        self.source.load(Ordering::SeqCst) == self.generation
    }
}

/// Read-aloud state for the question currently on screen.
#[derive(Debug, Default)]
pub struct LineReadingSession {
    generation: QuestionGeneration,
    line: Option<ReadingLineSpec>,
    highest_index: usize,
}

impl LineReadingSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Share a generation counter with the rest of the host, e.g. the
    /// spelling side of the same question flow.
    pub fn with_generation(generation: QuestionGeneration) -> Self {
        Self {
            generation,
            line: None,
            highest_index: 0,
        }
    }

    pub fn generation(&self) -> &QuestionGeneration {
        &self.generation
    }

    /// Show a new question. Evaluations still running for the previous one
    /// will be discarded.
    pub fn begin(
        &mut self,
        sentence: &str,
        target_word: &str,
        options: &WindowOptions,
    ) -> &ReadingLineSpec {
        let generation = self.generation.advance();
        self.highest_index = 0;
        let line = build_reading_line_spec(sentence, target_word, options);
        log::debug!(
            "Reading line {:?} for {target_word:?} (generation {generation})",
            line.target_line
        );
        self.line.insert(line)
    }

    pub fn line(&self) -> Option<&ReadingLineSpec> {
        self.line.as_ref()
    }

    /// Live pointer for a partial transcript.
    ///
    /// Recognizers sometimes revise earlier words; the highlight never moves
    /// back within one question.
    pub fn observe_partial(&mut self, partial_transcript: &str) -> usize {
        let Some(line) = &self.line else {
            return 0;
        };
        let index = compute_current_word_index(line, partial_transcript);
        self.highest_index = self.highest_index.max(index);
        self.highest_index
    }

    /// Grade a finished transcript.
    ///
    /// The line and a generation ticket are captured now; the returned future
    /// owns everything it needs, so the session stays free for
    /// [`begin`](Self::begin) while grading runs. The future resolves to
    /// `None` when there is no active line or when the question changed
    /// before grading finished.
    pub fn evaluate_final<O>(
        &self,
        student_transcript: &str,
        oracle: Arc<O>,
        params: &EvaluationParams,
    ) -> impl Future<Output = Option<LineReadingResult>> + 'static
    where
        O: PronunciationOracle + ?Sized + 'static,
    {
        let line = self.line.clone();
        let generation = self.generation.clone();
        let ticket = generation.ticket();
        let transcript = student_transcript.to_string();
        let params = params.clone();

        async move {
            let line = line?;
            let result = evaluate_line_reading(&line, &transcript, &*oracle, &params).await;
            if !ticket.is_current() {
                log::warn!(
                    "Discarding evaluation of {:?}: question changed (generation {} -> {})",
                    line.target_line,
                    ticket.generation(),
                    generation.current()
                );
                return None;
            }
            Some(result)
        }
    }
}
