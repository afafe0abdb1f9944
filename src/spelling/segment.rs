use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One run of a segmented target word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum WordSegment {
    /// Prefilled characters shown as-is; never editable.
    FixedText { characters: String },
    /// Positions the learner fills in. `expected_characters` is uppercase.
    Blank { expected_characters: String },
}

impl WordSegment {
    /// The characters this segment stands for in the target word.
    pub fn text(&self) -> &str {
        match self {
            WordSegment::FixedText { characters } => characters,
            WordSegment::Blank {
                expected_characters,
            } => expected_characters,
        }
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.text().chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text().is_empty()
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, WordSegment::Blank { .. })
    }
}

/// Split `target_word` into fixed and blank runs.
///
/// Positions index into the uppercased word. Indexes past the end of the
/// word are ignored. Without any (in-range) prefilled index the whole word is
/// a single blank run.
pub fn parse_word(target_word: &str, prefilled_indexes: &BTreeSet<usize>) -> Vec<WordSegment> {
    let upper: Vec<char> = target_word.to_uppercase().chars().collect();
    if upper.is_empty() {
        return Vec::new();
    }

    if !prefilled_indexes.iter().any(|&idx| idx < upper.len()) {
        return vec![WordSegment::Blank {
            expected_characters: upper.into_iter().collect(),
        }];
    }

    let mut segments = Vec::new();
    let mut run = String::new();
    let mut run_is_fixed = prefilled_indexes.contains(&0);

    for (idx, ch) in upper.into_iter().enumerate() {
        let is_fixed = prefilled_indexes.contains(&idx);
        if is_fixed != run_is_fixed {
            flush_run(&mut segments, &mut run, run_is_fixed);
            run_is_fixed = is_fixed;
        }
        run.push(ch);
    }
    flush_run(&mut segments, &mut run, run_is_fixed);

    segments
}

fn flush_run(segments: &mut Vec<WordSegment>, run: &mut String, fixed: bool) {
    if run.is_empty() {
        return;
    }
    let characters = std::mem::take(run);
    segments.push(if fixed {
        WordSegment::FixedText { characters }
    } else {
        WordSegment::Blank {
            expected_characters: characters,
        }
    });
}

/// Total number of editable positions across all blank runs.
pub fn expected_user_input_length(segments: &[WordSegment]) -> usize {
    segments
        .iter()
        .filter(|segment| segment.is_blank())
        .map(WordSegment::len)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn indexes(items: &[usize]) -> BTreeSet<usize> {
        items.iter().copied().collect()
    }

    fn fixed(s: &str) -> WordSegment {
        WordSegment::FixedText {
            characters: s.to_string(),
        }
    }

    fn blank(s: &str) -> WordSegment {
        WordSegment::Blank {
            expected_characters: s.to_string(),
        }
    }

    fn concat(segments: &[WordSegment]) -> String {
        segments.iter().map(WordSegment::text).collect()
    }

    #[test]
    fn whole_word_is_one_blank_without_prefill() {
        assert_eq!(parse_word("cat", &BTreeSet::new()), vec![blank("CAT")]);
    }

    #[test]
    fn leading_prefill_splits_runs() {
        assert_eq!(
            parse_word("BLACK", &indexes(&[0, 1])),
            vec![fixed("BL"), blank("ACK")]
        );
    }

    #[test]
    fn interleaved_prefill_keeps_position_order() {
        assert_eq!(
            parse_word("rabbit", &indexes(&[1, 4, 5])),
            vec![blank("R"), fixed("A"), blank("BB"), fixed("IT")]
        );
    }

    #[test]
    fn out_of_range_indexes_are_ignored() {
        assert_eq!(parse_word("dog", &indexes(&[7, 12])), vec![blank("DOG")]);
        assert_eq!(
            parse_word("dog", &indexes(&[2, 9])),
            vec![blank("DO"), fixed("G")]
        );
    }

    #[test]
    fn fully_prefilled_word_has_no_blanks() {
        let segments = parse_word("sun", &indexes(&[0, 1, 2]));
        assert_eq!(segments, vec![fixed("SUN")]);
        assert_eq!(expected_user_input_length(&segments), 0);
    }

    #[test]
    fn empty_word_has_no_segments() {
        assert!(parse_word("", &indexes(&[0])).is_empty());
    }

    #[test]
    fn segments_concatenate_to_uppercased_word() {
        let words = ["cat", "Elephant", "jump", "a"];
        for word in words {
            let len = word.chars().count();
            // every subset of positions
            for mask in 0u32..(1 << len) {
                let prefilled: BTreeSet<usize> =
                    (0..len).filter(|bit| mask & (1 << bit) != 0).collect();
                let segments = parse_word(word, &prefilled);
                assert_eq!(concat(&segments), word.to_uppercase());
                assert_eq!(
                    expected_user_input_length(&segments),
                    len - prefilled.len()
                );
            }
        }
    }
}
