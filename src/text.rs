//! Text normalization shared by the spelling and reading components.

/// Remove every character that is not alphanumeric (punctuation, apostrophes, symbols).
pub fn strip_punctuation(token: &str) -> String {
    token.chars().filter(|c| c.is_alphanumeric()).collect()
}

/// Strip punctuation and lowercase a single token.
pub fn normalize_token(token: &str) -> String {
    strip_punctuation(token).to_lowercase()
}

/// Split `text` on whitespace and normalize each token.
///
/// Tokens that are pure punctuation (a lone dash, an ellipsis) normalize to
/// nothing and are dropped.
pub fn normalize_words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(normalize_token)
        .filter(|token| !token.is_empty())
        .collect()
}

/// Lowercased words of `text` where any non-alphanumeric character is a boundary.
///
/// Apostrophes are removed rather than treated as boundaries so contractions
/// stay a single word (`"don't"` -> `"dont"`). Dash-joined compounds split,
/// so `"nervously—minus"` yields `["nervously", "minus"]`.
pub fn boundary_words(text: &str) -> Vec<String> {
    boundary_word_spans(text)
        .into_iter()
        .map(|span| span.word)
        .collect()
}

/// A word found by [`boundary_word_spans`] and its byte range in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordSpan {
    pub word: String,
    pub start: usize,
    pub end: usize,
}

/// Like [`boundary_words`], keeping the byte range each word covers.
pub fn boundary_word_spans(text: &str) -> Vec<WordSpan> {
    let mut spans = Vec::new();
    let mut current: Option<WordSpan> = None;

    for (idx, ch) in text.char_indices() {
        if is_apostrophe(ch) {
            continue;
        }
        if ch.is_alphanumeric() {
            let end = idx + ch.len_utf8();
            let span = current.get_or_insert_with(|| WordSpan {
                word: String::new(),
                start: idx,
                end,
            });
            span.word.extend(ch.to_lowercase());
            span.end = end;
        } else if let Some(span) = current.take() {
            spans.push(span);
        }
    }

    if let Some(span) = current {
        spans.push(span);
    }
    spans
}

/// True when the boundary words of `word` occur as a consecutive run in `text`.
pub fn contains_whole_word(text: &str, word: &str) -> bool {
    let needle = boundary_words(word);
    if needle.is_empty() {
        return false;
    }
    let haystack = boundary_words(text);
    haystack
        .windows(needle.len())
        .any(|window| window == needle.as_slice())
}

/// Case-insensitive substring test.
pub fn contains_ignore_case(text: &str, word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    text.to_lowercase().contains(&word.to_lowercase())
}

/// Case-insensitive exact equality.
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Split a passage into sentences on `.`, `!` and `?`.
///
/// Terminators stay attached to their sentence; pieces are trimmed and empty
/// pieces are dropped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0usize;

    for (idx, ch) in text.char_indices() {
        if matches!(ch, '.' | '!' | '?') {
            let end = idx + ch.len_utf8();
            push_trimmed(&mut sentences, &text[start..end]);
            start = end;
        }
    }
    push_trimmed(&mut sentences, &text[start..]);

    sentences
}

fn push_trimmed<'a>(sentences: &mut Vec<&'a str>, piece: &'a str) {
    let trimmed = piece.trim();
    if !trimmed.is_empty() && trimmed.chars().any(|c| c.is_alphanumeric()) {
        sentences.push(trimmed);
    }
}

fn is_apostrophe(ch: char) -> bool {
    matches!(ch, '\'' | '\u{2019}' | '\u{2018}' | '`')
}
