use futures::future::join_all;
use serde::{Deserialize, Serialize};

use super::line::ReadingLineSpec;
use crate::config::EvaluationParams;
use crate::error::OracleError;
use crate::oracles::strict::strict_verdict;
use crate::{OracleVerdict, PronunciationOracle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordStatus {
    Correct,
    Missed,
}

/// Outcome for one target word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordAlignment {
    pub target: String,
    pub status: WordStatus,
}

/// Graded result of one finished read-aloud attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineReadingResult {
    pub target_line: String,
    /// One entry per target word, in line order.
    pub alignments: Vec<WordAlignment>,
    pub correct_count: usize,
    pub total_target_words: usize,
    /// `correct_count / total_target_words`, or 0 for an empty line.
    pub accuracy: f64,
}

impl LineReadingResult {
    fn from_alignments(target_line: &str, alignments: Vec<WordAlignment>) -> Self {
        let correct_count = alignments
            .iter()
            .filter(|alignment| alignment.status == WordStatus::Correct)
            .count();
        let total_target_words = alignments.len();
        let accuracy = if total_target_words == 0 {
            0.0
        } else {
            correct_count as f64 / total_target_words as f64
        };

        Self {
            target_line: target_line.to_string(),
            alignments,
            correct_count,
            total_target_words,
            accuracy,
        }
    }
}

/// Grade a finished transcript word by word.
///
/// Every target word is judged on its own against the whole transcript by
/// `oracle`. Calls run one after another unless `params.concurrent` is set;
/// the alignment order follows the line either way. A call that fails or
/// exceeds `params.oracle_timeout()` is replaced by the strict judgment
/// (the normalized word appears in the normalized transcript), so this never
/// fails.
pub async fn evaluate_line_reading<O>(
    line: &ReadingLineSpec,
    student_transcript: &str,
    oracle: &O,
    params: &EvaluationParams,
) -> LineReadingResult
where
    O: PronunciationOracle + ?Sized,
{
    let verdicts: Vec<OracleVerdict> = if params.concurrent {
        join_all(
            line.tokens
                .iter()
                .map(|token| judge_word(token, student_transcript, oracle, params)),
        )
        .await
    } else {
        let mut verdicts = Vec::with_capacity(line.tokens.len());
        for token in &line.tokens {
            verdicts.push(judge_word(token, student_transcript, oracle, params).await);
        }
        verdicts
    };

    let alignments = line
        .tokens
        .iter()
        .zip(verdicts)
        .map(|(token, verdict)| WordAlignment {
            target: token.clone(),
            status: if verdict.is_correct() {
                WordStatus::Correct
            } else {
                WordStatus::Missed
            },
        })
        .collect();

    let result = LineReadingResult::from_alignments(&line.target_line, alignments);
    log::debug!(
        "Evaluated {:?}: {}/{} correct",
        result.target_line,
        result.correct_count,
        result.total_target_words
    );
    result
}

async fn judge_word<O>(
    target: &str,
    transcript: &str,
    oracle: &O,
    params: &EvaluationParams,
) -> OracleVerdict
where
    O: PronunciationOracle + ?Sized,
{
    let timeout = params.oracle_timeout();
    let outcome = match tokio::time::timeout(timeout, oracle.evaluate(target, transcript)).await {
        Ok(outcome) => outcome,
        Err(_) => Err(OracleError::Timeout(timeout)),
    };

    match outcome {
        Ok(verdict) => verdict,
        Err(e) => {
            log::warn!(
                "{} failed for {target:?} ({e}), using strict matching",
                oracle.name()
            );
            strict_verdict(target, transcript)
        }
    }
}
