use super::line::ReadingLineSpec;
use crate::text::normalize_words;

/// How many target words have been read so far, for live highlighting.
///
/// Target words are matched in order, each by scanning forward through the
/// spoken words that follow the previous match, so filler words are skipped.
/// The first target word that cannot be found stops the scan: later target
/// words never count until every earlier one has been heard.
///
/// The result is in `0..=line.len()`.
pub fn compute_current_word_index(line: &ReadingLineSpec, partial_transcript: &str) -> usize {
    let spoken = normalize_words(partial_transcript);
    let mut idx_in_spoken = 0usize;
    let mut current_target_index = 0usize;

    for target in &line.normalized_tokens {
        match spoken[idx_in_spoken..]
            .iter()
            .position(|word| word == target)
        {
            Some(offset) => {
                idx_in_spoken += offset + 1;
                current_target_index += 1;
            }
            None => break,
        }
    }

    current_target_index
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn line(words: &[&str]) -> ReadingLineSpec {
        ReadingLineSpec {
            target_sentence: words.join(" "),
            target_line: words.join(" "),
            tokens: words.iter().map(|w| w.to_string()).collect(),
            normalized_tokens: words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    #[test]
    fn pointer_never_decreases_as_transcript_grows() {
        let spec = line(&["the", "big", "red", "ball"]);
        let transcript = "uh the big red ball";
        let words: Vec<&str> = transcript.split(' ').collect();

        let indices: Vec<usize> = (1..=words.len())
            .map(|n| compute_current_word_index(&spec, &words[..n].join(" ")))
            .collect();

        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
        assert!(indices.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn stops_at_first_missing_word() {
        let spec = line(&["one", "two", "three"]);
        assert_eq!(compute_current_word_index(&spec, "one three"), 1);
    }

    #[test]
    fn does_not_reuse_spoken_words() {
        let spec = line(&["go", "go", "go"]);
        assert_eq!(compute_current_word_index(&spec, "go go"), 2);
    }

    #[test]
    fn ignores_case_and_punctuation_in_transcript() {
        let spec = line(&["jumped", "over", "the"]);
        assert_eq!(compute_current_word_index(&spec, "Jumped, OVER... the!"), 3);
    }

    #[test]
    fn empty_inputs_yield_zero() {
        assert_eq!(compute_current_word_index(&line(&["cat"]), ""), 0);
        assert_eq!(compute_current_word_index(&line(&[]), "cat"), 0);
    }
}
