use serde::{Deserialize, Serialize};

use crate::config::WindowOptions;
use crate::text::{normalize_token, strip_punctuation};

/// A short phrase selected from a sentence for read-aloud practice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingLineSpec {
    /// The full source sentence.
    pub target_sentence: String,
    /// The selected window in its original form, punctuation included.
    pub target_line: String,
    /// Window words with punctuation and apostrophes removed.
    pub tokens: Vec<String>,
    /// `tokens`, lowercased.
    pub normalized_tokens: Vec<String>,
}

impl ReadingLineSpec {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

struct SurfaceToken {
    /// Index of the whitespace-separated piece this word came from.
    position: usize,
    stripped: String,
}

/// Select a window of `sentence` centered on `target_word`.
///
/// The `occurrence_index`-th match of the word (compared without punctuation
/// and case) anchors a window of `preferred_length` words with
/// `(preferred_length - 1) / 2` words before it, shifted to stay inside the
/// sentence, then grown or cut at its end to fit `[min_length, max_length]`.
/// When the word is absent the leading words of the sentence are used.
///
/// Words consisting only of punctuation (a lone dash) are not counted as
/// words, but stay in `target_line` when they fall inside the window.
///
/// # Panics
///
/// Panics if `options` breaks its contract (`preferred_length == 0`,
/// `max_length == 0` or `min_length > max_length`). Options built through
/// [`WindowOptionsBuilder`](crate::config::WindowOptionsBuilder) or loaded
/// with [`ReaderConfig`](crate::config::ReaderConfig) are already checked.
pub fn build_reading_line_spec(
    sentence: &str,
    target_word: &str,
    options: &WindowOptions,
) -> ReadingLineSpec {
    if let Err(violation) = options.check() {
        panic!("invalid window options: {violation}");
    }

    let surfaces: Vec<&str> = sentence.split_whitespace().collect();
    let words: Vec<SurfaceToken> = surfaces
        .iter()
        .enumerate()
        .map(|(position, surface)| SurfaceToken {
            position,
            stripped: strip_punctuation(surface),
        })
        .filter(|token| !token.stripped.is_empty())
        .collect();

    let (start, end) = match find_occurrence(&words, target_word, options.occurrence_index) {
        Some(position) => centered_window(position, words.len(), options),
        None => {
            log::debug!("{target_word:?} not found in sentence, using leading window");
            (0, leading_window_len(words.len(), options).min(words.len()))
        }
    };

    let window = &words[start..end];
    let target_line = match (window.first(), window.last()) {
        (Some(first), Some(last)) => surfaces[first.position..=last.position].join(" "),
        _ => String::new(),
    };
    ReadingLineSpec {
        target_sentence: sentence.to_string(),
        target_line,
        tokens: window.iter().map(|token| token.stripped.clone()).collect(),
        normalized_tokens: window
            .iter()
            .map(|token| token.stripped.to_lowercase())
            .collect(),
    }
}

fn find_occurrence(words: &[SurfaceToken], target_word: &str, occurrence: usize) -> Option<usize> {
    let target = normalize_token(target_word);
    if target.is_empty() {
        return None;
    }
    words
        .iter()
        .enumerate()
        .filter(|(_, token)| token.stripped.to_lowercase() == target)
        .map(|(idx, _)| idx)
        .nth(occurrence)
}

fn centered_window(position: usize, count: usize, options: &WindowOptions) -> (usize, usize) {
    let half = (options.preferred_length - 1) / 2;
    let mut start = position.saturating_sub(half);
    let mut end = start.saturating_add(options.preferred_length);
    if end > count {
        end = count;
        start = end.saturating_sub(options.preferred_length);
    }

    if end - start < options.min_length {
        end = start.saturating_add(options.min_length).min(count);
    }
    if end - start > options.max_length {
        end = start.saturating_add(options.max_length);
    }
    (start, end)
}

fn leading_window_len(count: usize, options: &WindowOptions) -> usize {
    options
        .min_length
        .max(options.preferred_length.min(count))
        .min(options.max_length)
}
