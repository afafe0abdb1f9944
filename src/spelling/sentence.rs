//! Carrier-sentence selection for fill-in-the-blank prompts.

use crate::text::{
    boundary_word_spans, boundary_words, contains_ignore_case, contains_whole_word,
    split_sentences,
};

/// Sentences longer than this (in characters) are treated as passages.
pub const PASSAGE_THRESHOLD_CHARS: usize = 100;

/// Used when neither a sentence nor a word is available.
pub const STATIC_FALLBACK_SENTENCE: &str = "Let's practice spelling together!";

/// Pick a sentence that contains `target_word` so a blank can be anchored in it.
///
/// Candidates are tried in order:
/// 1. `question_text`, when it contains the word as a whole word;
/// 2. a long `sentence` (a passage): whole-word match, then exact substring
///    match, then the first sentence of the passage that contains the word
///    ignoring case;
/// 3. a short `sentence`, only on a whole-word match;
/// 4. a synthesized `"Let's spell this word together: {word}"`.
pub fn ensure_spelling_sentence(
    target_word: &str,
    sentence: Option<&str>,
    question_text: Option<&str>,
) -> String {
    let word = target_word.trim();

    if let Some(question) = question_text.filter(|q| contains_whole_word(q, word)) {
        return question.to_string();
    }

    if let Some(sentence) = sentence {
        if sentence.chars().count() > PASSAGE_THRESHOLD_CHARS {
            if let Some(found) = select_from_passage(sentence, word) {
                return found.to_string();
            }
        } else if contains_whole_word(sentence, word) {
            return sentence.to_string();
        }
    }

    if word.is_empty() {
        log::warn!("No target word for spelling prompt, using static sentence");
        return STATIC_FALLBACK_SENTENCE.to_string();
    }

    log::warn!("No carrier sentence contains {word:?}, synthesizing one");
    format!("Let's spell this word together: {word}")
}

fn select_from_passage<'a>(passage: &'a str, word: &str) -> Option<&'a str> {
    if word.is_empty() {
        return None;
    }
    if contains_whole_word(passage, word) || passage.contains(word) {
        return Some(passage);
    }
    split_sentences(passage)
        .into_iter()
        .find(|candidate| contains_ignore_case(candidate, word))
}

/// Where a word sits inside its carrier sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarrierSplit<'a> {
    pub before: &'a str,
    /// The word as written in the sentence (original case and inner punctuation).
    pub matched: &'a str,
    pub after: &'a str,
}

/// Locate the first whole-word occurrence of `word` in `sentence`.
///
/// Lets a host render `before`, then the blank boxes, then `after`.
pub fn split_around_word<'a>(sentence: &'a str, word: &str) -> Option<CarrierSplit<'a>> {
    let needle = boundary_words(word);
    if needle.is_empty() {
        return None;
    }

    let spans = boundary_word_spans(sentence);
    let first = spans
        .windows(needle.len())
        .position(|window| window.iter().map(|span| &span.word).eq(needle.iter()))?;
    let start = spans[first].start;
    let end = spans[first + needle.len() - 1].end;

    Some(CarrierSplit {
        before: &sentence[..start],
        matched: &sentence[start..end],
        after: &sentence[end..],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PASSAGE: &str = "The little dragon flew over the hills at dawn. \
        It looked down at the sleepy village below! Everyone was still dreaming. \
        Then a Lantern flickered in a window.";

    #[test]
    fn synthesizes_fallback_without_any_sentence() {
        assert_eq!(
            ensure_spelling_sentence("zephyr", None, None),
            "Let's spell this word together: zephyr"
        );
    }

    #[test]
    fn static_fallback_for_empty_word() {
        assert_eq!(
            ensure_spelling_sentence("", Some("A cat sat."), None),
            STATIC_FALLBACK_SENTENCE
        );
    }

    #[test]
    fn prefers_question_text_with_whole_word() {
        assert_eq!(
            ensure_spelling_sentence("cat", Some("A cat sat."), Some("Can you spell CAT?")),
            "Can you spell CAT?"
        );
    }

    #[test]
    fn skips_question_text_with_only_a_substring() {
        assert_eq!(
            ensure_spelling_sentence("cat", Some("The cat naps."), Some("Spell catalog")),
            "The cat naps."
        );
    }

    #[test]
    fn short_sentence_requires_whole_word() {
        assert_eq!(
            ensure_spelling_sentence("cat", Some("What a catalog."), None),
            "Let's spell this word together: cat"
        );
        assert_eq!(
            ensure_spelling_sentence("minus", Some("He stood nervously—minus his hat."), None),
            "He stood nervously—minus his hat."
        );
    }

    #[test]
    fn passage_with_word_is_kept_whole() {
        assert!(PASSAGE.chars().count() > PASSAGE_THRESHOLD_CHARS);
        assert_eq!(ensure_spelling_sentence("village", Some(PASSAGE), None), PASSAGE);
        // substring only ("dream" inside "dreaming")
        assert_eq!(ensure_spelling_sentence("dream", Some(PASSAGE), None), PASSAGE);
    }

    #[test]
    fn passage_falls_back_to_case_insensitive_sentence() {
        assert_eq!(
            ensure_spelling_sentence("LANTERNS", Some(PASSAGE), None),
            "Let's spell this word together: LANTERNS"
        );
        assert_eq!(
            ensure_spelling_sentence("LANTER", Some(PASSAGE), None),
            "Then a Lantern flickered in a window."
        );
    }

    #[test]
    fn splits_sentence_around_word() {
        let split = split_around_word("Look at the red-hot coal!", "hot").expect("word present");
        assert_eq!(split.before, "Look at the red-");
        assert_eq!(split.matched, "hot");
        assert_eq!(split.after, " coal!");

        let split = split_around_word("Don't touch it", "dont").expect("word present");
        assert_eq!(split.matched, "Don't");
        assert_eq!(split.after, " touch it");
    }

    #[test]
    fn split_around_missing_word_is_none() {
        assert_eq!(split_around_word("A catalog", "cat"), None);
        assert_eq!(split_around_word("A cat", ""), None);
    }
}
