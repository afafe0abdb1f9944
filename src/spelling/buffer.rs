//! Flat input buffer addressing.
//!
//! The learner's answer is kept as one string covering only the editable
//! positions of the word, in order, across all blank runs. A stored space
//! marks an empty position, so the buffer never needs a separate "filled"
//! bitmap. Prefilled characters are not part of the buffer.

use std::collections::BTreeSet;

use super::segment::WordSegment;

/// Marker for an empty position.
pub const EMPTY_SLOT: char = ' ';

/// A buffer of `len` empty positions.
pub fn empty_buffer(len: usize) -> String {
    std::iter::repeat(EMPTY_SLOT).take(len).collect()
}

/// Sum of blank run lengths for every segment before `part_index`.
///
/// Translates a run-local letter position into a global buffer offset.
pub fn blank_base_index_for_part(segments: &[WordSegment], part_index: usize) -> usize {
    segments
        .iter()
        .take(part_index)
        .filter(|segment| segment.is_blank())
        .map(WordSegment::len)
        .sum()
}

/// The character at `global_index`, or `None` when that position is empty
/// or past the end of the buffer.
pub fn user_input_at(buffer: &str, global_index: usize) -> Option<char> {
    buffer
        .chars()
        .nth(global_index)
        .filter(|&ch| ch != EMPTY_SLOT)
}

/// Return a new buffer of exactly `expected_len` positions with
/// `global_index` set to `new_char` (`None` clears it).
///
/// Positions the old buffer did not cover become empty; characters past
/// `expected_len` are dropped. An out-of-range `global_index` leaves every
/// position unchanged.
pub fn update_user_input_at(
    buffer: &str,
    global_index: usize,
    new_char: Option<char>,
    expected_len: usize,
) -> String {
    let mut slots: Vec<char> = buffer
        .chars()
        .chain(std::iter::repeat(EMPTY_SLOT))
        .take(expected_len)
        .collect();

    if let Some(slot) = slots.get_mut(global_index) {
        *slot = new_char.unwrap_or(EMPTY_SLOT);
    }

    slots.into_iter().collect()
}

/// True when the buffer covers every editable position and none is empty.
pub fn is_user_input_complete(buffer: &str, expected_len: usize) -> bool {
    buffer.chars().count() == expected_len && !buffer.contains(EMPTY_SLOT)
}

/// First empty position scanning left to right, if any.
pub fn next_empty_index(buffer: &str, expected_len: usize) -> Option<usize> {
    (0..expected_len).find(|&idx| user_input_at(buffer, idx).is_none())
}

/// Rebuild the full candidate word from the buffer and the prefilled letters.
///
/// Prefilled positions take the target's own character; every other position
/// consumes the next buffer slot. An empty slot consumes its position but
/// emits nothing. With nothing prefilled this returns the buffer unchanged.
pub fn reconstruct_complete_word(
    target_upper: &str,
    prefilled_indexes: &BTreeSet<usize>,
    buffer: &str,
) -> String {
    if prefilled_indexes.is_empty() {
        return buffer.to_string();
    }

    let mut slots = buffer.chars();
    let mut word = String::with_capacity(target_upper.len());

    for (idx, target_char) in target_upper.chars().enumerate() {
        if prefilled_indexes.contains(&idx) {
            word.push(target_char);
        } else if let Some(ch) = slots.next() {
            if ch != EMPTY_SLOT {
                word.push(ch);
            }
        }
    }

    word
}

/// Case-insensitive whole-word comparison.
pub fn is_word_correct(candidate: &str, target: &str) -> bool {
    crate::text::eq_ignore_case(candidate, target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spelling::segment::parse_word;
    use pretty_assertions::assert_eq;

    #[test]
    fn base_index_skips_fixed_runs() {
        let prefilled: BTreeSet<usize> = [1, 4, 5].into_iter().collect();
        // R | A | BB | IT
        let segments = parse_word("rabbit", &prefilled);
        assert_eq!(blank_base_index_for_part(&segments, 0), 0);
        assert_eq!(blank_base_index_for_part(&segments, 1), 1);
        assert_eq!(blank_base_index_for_part(&segments, 2), 1);
        assert_eq!(blank_base_index_for_part(&segments, 3), 3);
        assert_eq!(blank_base_index_for_part(&segments, 10), 3);
    }

    #[test]
    fn reads_space_as_empty() {
        assert_eq!(user_input_at("C T", 0), Some('C'));
        assert_eq!(user_input_at("C T", 1), None);
        assert_eq!(user_input_at("C T", 9), None);
    }

    #[test]
    fn update_materializes_missing_positions() {
        assert_eq!(update_user_input_at("", 2, Some('T'), 3), "  T");
        assert_eq!(update_user_input_at("CAT", 1, None, 3), "C T");
        assert_eq!(update_user_input_at("CATS", 0, Some('B'), 3), "BAT");
    }

    #[test]
    fn update_ignores_out_of_range_index() {
        assert_eq!(update_user_input_at("CA", 7, Some('X'), 3), "CA ");
    }

    #[test]
    fn update_does_not_touch_the_input() {
        let before = String::from("C  ");
        let after = update_user_input_at(&before, 1, Some('A'), 3);
        assert_eq!(before, "C  ");
        assert_eq!(after, "CA ");
    }

    #[test]
    fn buffer_length_stays_fixed_across_edits() {
        let expected_len = 4;
        let mut buffer = String::new();
        let edits = [
            (3, Some('D')),
            (0, Some('W')),
            (9, Some('Z')),
            (3, None),
            (1, Some('I')),
            (2, Some('N')),
            (0, None),
        ];
        for (idx, ch) in edits {
            buffer = update_user_input_at(&buffer, idx, ch, expected_len);
            assert_eq!(buffer.chars().count(), expected_len);
        }
    }

    #[test]
    fn completion_requires_full_length_without_gaps() {
        assert!(is_user_input_complete("CAT", 3));
        assert!(!is_user_input_complete("C T", 3));
        assert!(!is_user_input_complete("CA", 3));
        assert!(is_user_input_complete("", 0));
    }

    #[test]
    fn next_empty_index_scans_left_to_right() {
        assert_eq!(next_empty_index("C T", 3), Some(1));
        assert_eq!(next_empty_index("CA", 3), Some(2));
        assert_eq!(next_empty_index("CAT", 3), None);
    }

    #[test]
    fn reconstruction_is_identity_without_prefill() {
        for buffer in ["CAT", "c t", "", "ZZZZ"] {
            assert_eq!(reconstruct_complete_word("CAT", &BTreeSet::new(), buffer), buffer);
        }
    }

    #[test]
    fn reconstruction_merges_prefilled_letters() {
        let prefilled: BTreeSet<usize> = [0, 1].into_iter().collect();
        assert_eq!(reconstruct_complete_word("BLACK", &prefilled, "ACK"), "BLACK");
        assert_eq!(reconstruct_complete_word("BLACK", &prefilled, "A K"), "BLAK");

        let middle: BTreeSet<usize> = [2].into_iter().collect();
        assert_eq!(reconstruct_complete_word("FROG", &middle, "FRG"), "FROG");
    }

    #[test]
    fn word_correctness_ignores_case() {
        assert!(is_word_correct("black", "BLACK"));
        assert!(!is_word_correct("BLAK", "BLACK"));
    }
}
