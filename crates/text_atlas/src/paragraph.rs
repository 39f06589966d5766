//! Paragraph-to-character layout transform
//!
//! Turns a paragraph into an ordered sequence of per-character layout
//! records carrying pixel offsets plus the final row and paragraph sizes.
//! Layout runs in two passes: the first wraps lines into rows and measures
//! them, the second stamps the finished sizes onto every record, so a
//! record is safe to read the moment the transform callback sees it.

use crate::atlas::AtlasMapping;
use crate::measure::MISSING_CHAR_WIDTH;
use crate::wrap::{auto_wrap, WordBreak};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Per-character layout record handed to the transform callback
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterDatum {
    /// The laid-out character
    pub character: char,
    /// Y offset of the character's row within the paragraph, in pixels
    pub offset_top: f32,
    /// X offset of the character within its row, in pixels
    pub offset_left: f32,
    /// Final size of the whole paragraph, `[width, height]`
    pub size: Vector2<f32>,
    /// Final size of the containing row, `[width, height]`
    pub row_size: Vector2<f32>,
}

/// Layout of one row produced by [`transform_row`]
#[derive(Debug, Clone, PartialEq)]
pub struct RowLayout {
    /// `(character, offset_left)` pairs in row order
    pub characters: Vec<(char, f32)>,
    /// Total advance width of the row in pixels
    pub row_width: f32,
    /// Row height in pixels; 0 when no character in the row is mapped
    pub row_height: f32,
}

/// Styling inputs for [`transform_paragraph`]
///
/// Wrapping runs only when `word_break` and `max_width` are both set;
/// otherwise every newline-delimited line becomes exactly one row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParagraphStyle {
    /// Multiplier applied to the glyph box height to get the row height
    pub line_height: f32,
    /// Line breaking policy
    pub word_break: Option<WordBreak>,
    /// Maximum row width in pixels
    pub max_width: Option<f32>,
}

impl Default for ParagraphStyle {
    fn default() -> Self {
        Self {
            line_height: 1.0,
            word_break: None,
            max_width: None,
        }
    }
}

/// Lay out one row of characters
///
/// Accumulates `offset_left` from 0 in character order. The row height is
/// derived once from the first mapped character's frame height times
/// `line_height`; frame heights are constant within one atlas generation.
/// Unmapped characters advance by the fallback width, are reported to
/// `missing`, and never set the row height.
pub fn transform_row(
    row: &str,
    mapping: &AtlasMapping,
    line_height: f32,
    missing: &mut dyn FnMut(char),
) -> RowLayout {
    let mut characters = Vec::new();
    let mut offset_left = 0.0;
    let mut row_height = 0.0;

    for character in row.chars() {
        characters.push((character, offset_left));

        match mapping.get(character) {
            Some(frame) => {
                if row_height == 0.0 {
                    row_height = frame.height * line_height;
                }
                offset_left += frame.width;
            }
            None => {
                missing(character);
                offset_left += MISSING_CHAR_WIDTH;
            }
        }
    }

    RowLayout {
        characters,
        row_width: offset_left,
        row_height,
    }
}

/// Lay out a whole paragraph and emit one record per character
///
/// The paragraph is split on `'\n'` into lines; each line is wrapped into
/// rows via [`auto_wrap`] when the style enables wrapping, or kept as a
/// single row otherwise. Every character of every row, in document order,
/// is passed to `transform` as a [`CharacterDatum`] already stamped with
/// the final row and paragraph sizes, and the result is appended to `out`.
///
/// Paragraph width is the maximum row width, or the style's `max_width`
/// when wrapping is enabled; paragraph height is the sum of row heights.
/// An empty paragraph produces no output.
pub fn transform_paragraph<T, F>(
    paragraph: &str,
    mapping: &AtlasMapping,
    style: &ParagraphStyle,
    mut transform: F,
    out: &mut Vec<T>,
    missing: &mut dyn FnMut(char),
) where
    F: FnMut(CharacterDatum) -> T,
{
    if paragraph.is_empty() {
        return;
    }

    let wrapping = match (style.word_break, style.max_width) {
        (Some(word_break), Some(max_width)) => Some((word_break, max_width)),
        _ => None,
    };

    // First pass: wrap every line into rows and measure them.
    let mut rows: Vec<(RowLayout, f32)> = Vec::new();
    let mut row_offset_top = 0.0;
    let mut paragraph_width = 0.0f32;

    for line in paragraph.split('\n') {
        let line_rows = match wrapping {
            Some((word_break, max_width)) => {
                auto_wrap(line, word_break, max_width, mapping, missing).rows
            }
            None => vec![line.to_string()],
        };

        for row in &line_rows {
            let layout = transform_row(row, mapping, style.line_height, missing);
            paragraph_width = match wrapping {
                Some((_, max_width)) => max_width,
                None => paragraph_width.max(layout.row_width),
            };
            let top = row_offset_top;
            row_offset_top += layout.row_height;
            rows.push((layout, top));
        }
    }

    let size = Vector2::new(paragraph_width, row_offset_top);

    // Second pass: stamp the finished sizes and hand records to the caller.
    for (layout, offset_top) in rows {
        let row_size = Vector2::new(layout.row_width, layout.row_height);
        for (character, offset_left) in layout.characters {
            out.push(transform(CharacterDatum {
                character,
                offset_top,
                offset_left,
                size,
                row_size,
            }));
        }
    }
}
