//! Line segmentation and wrapping
//!
//! Splits a line of text into groups (words or single characters) per the
//! wrap mode, then walks the groups accumulating advance widths to decide
//! where line breaks go. A word wider than the limit is broken again at
//! character granularity, so oversized words become several forced rows.
//!
//! All offsets here count characters (code points), not bytes; rows are
//! cut out of the original line by character index so that concatenating
//! the produced rows reconstitutes the line exactly.

use crate::atlas::AtlasMapping;
use crate::measure::{char_width, text_width};
use serde::{Deserialize, Serialize};

/// Line breaking policy, mirroring the CSS `word-break` values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WordBreak {
    /// Break between words; words wider than the limit fall back to
    /// per-character breaking
    BreakWord,
    /// Break between any two characters
    BreakAll,
}

/// A contiguous run of characters treated as one unit by the line breaker
#[derive(Debug, Clone, PartialEq)]
pub struct TextGroup {
    /// The group's text; a single space stands in for an empty word
    /// between consecutive delimiters
    pub text: String,
    /// Character offset of the group within the original line
    pub start: usize,
    /// Measured advance width of the group in pixels
    pub width: f32,
}

/// Result of [`auto_wrap`]: finished rows plus the trailing row's state
///
/// The last entry of `rows` is the trailing row, still open for further
/// accumulation when this result is spliced into an outer wrap.
#[derive(Debug, Clone, PartialEq)]
pub struct WrappedText {
    /// Row strings in order; concatenating them yields the input text
    pub rows: Vec<String>,
    /// Character offset of the trailing row within the input text
    pub trailing_start: usize,
    /// Accumulated advance width of the trailing row in pixels
    pub trailing_width: f32,
}

/// Split a line into ordered groups covering it with no gaps
///
/// `BreakWord` splits on single spaces; an empty word (consecutive,
/// leading, or trailing spaces) becomes a single-space placeholder group
/// so width accounting stays consistent, while its `start` keeps the exact
/// offset of the gap. `BreakAll` makes every character its own group.
pub fn text_groups(
    line: &[char],
    word_break: WordBreak,
    mapping: &AtlasMapping,
    missing: &mut dyn FnMut(char),
) -> Vec<TextGroup> {
    match word_break {
        WordBreak::BreakWord => {
            let mut groups = Vec::new();
            let mut word_start = 0;
            for boundary in 0..=line.len() {
                if boundary < line.len() && line[boundary] != ' ' {
                    continue;
                }
                let word = &line[word_start..boundary];
                let text: String = if word.is_empty() {
                    String::from(" ")
                } else {
                    word.iter().collect()
                };
                let width = text_width(&text, mapping, missing);
                groups.push(TextGroup {
                    text,
                    start: word_start,
                    width,
                });
                word_start = boundary + 1;
            }
            groups
        }
        WordBreak::BreakAll => line
            .iter()
            .enumerate()
            .map(|(start, &character)| TextGroup {
                text: character.to_string(),
                start,
                width: char_width(character, mapping, missing),
            })
            .collect(),
    }
}

/// Break `text` into rows no wider than `max_width`
///
/// Rows are cut at group boundaries; when a single group is wider than
/// `max_width` on its own, it is re-wrapped at character granularity and
/// all but the last of its sub-rows are spliced into the output, the last
/// staying open for further accumulation. The trailing text always becomes
/// the final row, even when empty. Delimiter spaces stay at the end of the
/// row preceding a break but do not count toward the accumulated width.
///
/// Unmapped characters measure as the fallback width and are reported to
/// `missing`; wrapping never fails, degrading to one character per row
/// when `max_width` is smaller than any single character.
pub fn auto_wrap(
    text: &str,
    word_break: WordBreak,
    max_width: f32,
    mapping: &AtlasMapping,
    missing: &mut dyn FnMut(char),
) -> WrappedText {
    let characters: Vec<char> = text.chars().collect();
    wrap_characters(&characters, word_break, max_width, mapping, missing)
}

fn wrap_characters(
    characters: &[char],
    word_break: WordBreak,
    max_width: f32,
    mapping: &AtlasMapping,
    missing: &mut dyn FnMut(char),
) -> WrappedText {
    if characters.is_empty() {
        return WrappedText {
            rows: vec![String::new()],
            trailing_start: 0,
            trailing_width: 0.0,
        };
    }

    let groups = text_groups(characters, word_break, mapping, missing);

    let mut rows: Vec<String> = Vec::new();
    let mut start = 0;
    let mut offset_left = 0.0;

    for group in &groups {
        let mut group_width = group.width;

        if offset_left + group_width > max_width {
            rows.push(characters[start..group.start].iter().collect());
            start = group.start;
            offset_left = 0.0;

            // A group that does not fit on a row of its own is re-broken
            // at character granularity. Single characters cannot be split
            // further; they overflow into their own row instead.
            if group_width > max_width && group.text.chars().count() > 1 {
                let sub_characters: Vec<char> = group.text.chars().collect();
                let sub = wrap_characters(
                    &sub_characters,
                    WordBreak::BreakAll,
                    max_width,
                    mapping,
                    missing,
                );

                let (finished, _trailing) = sub.rows.split_at(sub.rows.len() - 1);
                rows.extend_from_slice(finished);
                start += sub.trailing_start;
                group_width = sub.trailing_width;
            }
        }

        offset_left += group_width;
    }

    rows.push(characters[start..].iter().collect());

    WrappedText {
        rows,
        trailing_start: start,
        trailing_width: offset_left,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::CharacterFrame;
    use approx::assert_relative_eq;

    /// Mapping where every printable ASCII character is 10 pixels wide
    fn uniform_mapping() -> AtlasMapping {
        let mut mapping = AtlasMapping::new();
        for code in 32..127u32 {
            mapping.insert(
                char::from_u32(code).unwrap(),
                CharacterFrame {
                    x: 0.0,
                    y: 0.0,
                    width: 10.0,
                    height: 10.0,
                    mask: true,
                },
            );
        }
        mapping
    }

    #[test]
    fn test_break_word_groups() {
        let mapping = uniform_mapping();
        let line: Vec<char> = "ab cd".chars().collect();
        let groups = text_groups(&line, WordBreak::BreakWord, &mapping, &mut |_| {});

        assert_eq!(groups.len(), 2);
        assert_eq!((groups[0].text.as_str(), groups[0].start), ("ab", 0));
        assert_eq!((groups[1].text.as_str(), groups[1].start), ("cd", 3));
        assert_relative_eq!(groups[0].width, 20.0);
    }

    #[test]
    fn test_break_word_placeholder_groups_keep_exact_offsets() {
        let mapping = uniform_mapping();
        let line: Vec<char> = "a  b ".chars().collect();
        let groups = text_groups(&line, WordBreak::BreakWord, &mapping, &mut |_| {});

        let summary: Vec<(&str, usize)> = groups
            .iter()
            .map(|group| (group.text.as_str(), group.start))
            .collect();
        // the gap between the two spaces and the trailing gap both become
        // single-space placeholders at their exact positions
        assert_eq!(summary, vec![("a", 0), (" ", 2), ("b", 3), (" ", 5)]);
    }

    #[test]
    fn test_break_all_groups() {
        let mapping = uniform_mapping();
        let line: Vec<char> = "ab c".chars().collect();
        let groups = text_groups(&line, WordBreak::BreakAll, &mapping, &mut |_| {});

        assert_eq!(groups.len(), 4);
        for (index, group) in groups.iter().enumerate() {
            assert_eq!(group.start, index);
            assert_eq!(group.text.chars().count(), 1);
            assert_relative_eq!(group.width, 10.0);
        }
    }

    #[test]
    fn test_break_all_wraps_at_character_boundaries() {
        let mapping = uniform_mapping();
        let wrapped = auto_wrap("abcdefgh", WordBreak::BreakAll, 30.0, &mapping, &mut |_| {});

        assert_eq!(wrapped.rows, vec!["abc", "def", "gh"]);
        assert_eq!(wrapped.trailing_start, 6);
        assert_relative_eq!(wrapped.trailing_width, 20.0);
    }

    #[test]
    fn test_break_word_keeps_words_intact() {
        let mapping = uniform_mapping();
        let wrapped = auto_wrap("ab cd ef", WordBreak::BreakWord, 50.0, &mapping, &mut |_| {});

        // "ab cd" measures 40 (delimiter spaces are free); adding "ef"
        // would reach 60, so the break lands before it
        assert_eq!(wrapped.rows, vec!["ab cd ", "ef"]);
    }

    #[test]
    fn test_oversized_word_forces_character_breaking() {
        let mapping = uniform_mapping();
        let wrapped = auto_wrap(
            "hello world",
            WordBreak::BreakWord,
            40.0,
            &mapping,
            &mut |_| {},
        );

        // both words overflow a 40px row on their own, so each is broken
        // at character granularity; the leading empty row marks the break
        // before the first oversized word
        assert_eq!(wrapped.rows, vec!["", "hell", "o ", "worl", "d"]);
        assert_eq!(wrapped.rows.concat(), "hello world");
        assert_eq!(wrapped.trailing_start, 10);
        assert_relative_eq!(wrapped.trailing_width, 10.0);
    }

    #[test]
    fn test_rows_reconstitute_input_exactly() {
        let mapping = uniform_mapping();
        for text in ["hello world", "a  b ", " lead", "one twothreefour x", ""] {
            for mode in [WordBreak::BreakWord, WordBreak::BreakAll] {
                let wrapped = auto_wrap(text, mode, 35.0, &mapping, &mut |_| {});
                assert_eq!(wrapped.rows.concat(), text, "{mode:?} {text:?}");
            }
        }
    }

    #[test]
    fn test_rewrapping_a_produced_row_is_identity() {
        let mapping = uniform_mapping();
        let wrapped = auto_wrap(
            "hello world",
            WordBreak::BreakWord,
            40.0,
            &mapping,
            &mut |_| {},
        );

        for row in &wrapped.rows {
            let again = auto_wrap(row, WordBreak::BreakWord, 40.0, &mapping, &mut |_| {});
            assert_eq!(again.rows, vec![row.clone()], "row {row:?} re-wrapped");
        }
    }

    #[test]
    fn test_empty_text_yields_single_empty_row() {
        let mapping = uniform_mapping();
        let wrapped = auto_wrap("", WordBreak::BreakWord, 100.0, &mapping, &mut |_| {});

        assert_eq!(wrapped.rows, vec![String::new()]);
        assert_eq!(wrapped.trailing_start, 0);
        assert_relative_eq!(wrapped.trailing_width, 0.0);
    }

    #[test]
    fn test_zero_max_width_degrades_to_single_character_rows() {
        let mapping = uniform_mapping();
        let wrapped = auto_wrap("abc", WordBreak::BreakAll, 0.0, &mapping, &mut |_| {});

        // every character overflows, so each lands on its own row after
        // the initial empty row
        assert_eq!(wrapped.rows, vec!["", "a", "b", "c"]);
        assert_eq!(wrapped.rows.concat(), "abc");
    }

    #[test]
    fn test_unmapped_characters_use_fallback_width() {
        let mapping = AtlasMapping::new();
        let mut reported = Vec::new();
        let wrapped = auto_wrap(
            "xy",
            WordBreak::BreakAll,
            64.0,
            &mapping,
            &mut |character| reported.push(character),
        );

        assert_eq!(wrapped.rows, vec!["xy"]);
        // fallback width 32 per character
        assert_relative_eq!(wrapped.trailing_width, 64.0);
        assert_eq!(reported, vec!['x', 'y']);
    }

    #[test]
    fn test_word_break_serde_uses_css_names() {
        assert_eq!(
            serde_json::to_string(&WordBreak::BreakWord).unwrap(),
            "\"break-word\""
        );
        assert_eq!(
            serde_json::from_str::<WordBreak>("\"break-all\"").unwrap(),
            WordBreak::BreakAll
        );
    }
}
