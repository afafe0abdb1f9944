use async_trait::async_trait;

use crate::error::OracleError;
use crate::text::{normalize_token, normalize_words};
use crate::{OracleVerdict, PronunciationOracle};

/// Exact matching after stripping punctuation and case.
///
/// Correct when the normalized target is one of the normalized words of the
/// attempt, so extra words around it are tolerated. For a single-word attempt
/// an incorrect verdict lists the target letter positions that differ.
pub fn strict_verdict(target: &str, attempt: &str) -> OracleVerdict {
    let target = normalize_token(target);
    let words = normalize_words(attempt);

    if words.iter().any(|word| *word == target) || (target.is_empty() && words.is_empty()) {
        return OracleVerdict::correct();
    }

    let mismatched = match words.as_slice() {
        [single] => mismatched_positions(&target, single),
        _ => Vec::new(),
    };
    OracleVerdict::incorrect(mismatched)
}

fn mismatched_positions(target: &str, attempt: &str) -> Vec<usize> {
    let mut attempt_chars = attempt.chars();
    target
        .chars()
        .enumerate()
        .filter(|(_, expected)| attempt_chars.next() != Some(*expected))
        .map(|(idx, _)| idx)
        .collect()
}

/// Oracle that applies [`strict_verdict`] and never fails.
///
/// This is also the behavior every evaluation falls back to when another
/// oracle errors or times out.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictOracle;

#[async_trait]
impl PronunciationOracle for StrictOracle {
    async fn evaluate(&self, target: &str, attempt: &str) -> Result<OracleVerdict, OracleError> {
        Ok(strict_verdict(target, attempt))
    }

    fn name(&self) -> &str {
        "strict"
    }
}
