//! Font atlas slot allocation
//!
//! Packs character glyph boxes into rows of a fixed-width texture atlas and
//! keeps the character-to-frame table up to date as the character set grows.
//! The table is append-only: frames assigned by earlier builds are never
//! moved or resized, so texture regions already uploaded for them stay
//! valid and new characters can be written as sub-region updates.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Result type for strict atlas lookups
pub type AtlasResult<T> = Result<T, AtlasError>;

/// Errors that can occur during strict atlas queries
#[derive(Debug, thiserror::Error)]
pub enum AtlasError {
    /// Requested character was not found in the atlas mapping
    #[error("Character '{0}' not found in atlas")]
    GlyphNotFound(char),
}

/// A single character's slot within the atlas texture
///
/// Positions and sizes are in pixels. `height` is constant across one
/// atlas generation. Immutable once assigned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CharacterFrame {
    /// X position of the glyph box's top-left corner
    pub x: f32,
    /// Y position of the glyph box's top-left corner
    pub y: f32,
    /// Glyph advance width
    pub width: f32,
    /// Glyph box height
    pub height: f32,
    /// Whether the slot is a coverage mask; always true for font atlases,
    /// reserved for future SDF/icon unification
    pub mask: bool,
}

/// Character-to-frame table backing one atlas texture
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AtlasMapping {
    frames: HashMap<char, CharacterFrame>,
}

impl AtlasMapping {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a character's frame, substitution left to the caller
    pub fn get(&self, character: char) -> Option<&CharacterFrame> {
        self.frames.get(&character)
    }

    /// Look up a character's frame, failing loudly when absent
    ///
    /// Intended for renderer-side consumers that must not silently
    /// substitute a fallback. The layout pipeline itself never calls this.
    pub fn frame(&self, character: char) -> AtlasResult<&CharacterFrame> {
        self.frames
            .get(&character)
            .ok_or(AtlasError::GlyphNotFound(character))
    }

    /// Whether the mapping already holds a frame for `character`
    pub fn contains(&self, character: char) -> bool {
        self.frames.contains_key(&character)
    }

    /// Assign a frame to a character
    ///
    /// Reassigning a character that already has a frame invalidates the
    /// texture region uploaded for the old frame; [`build_mapping`] never
    /// does this.
    pub fn insert(&mut self, character: char, frame: CharacterFrame) {
        self.frames.insert(character, frame);
    }

    /// Number of characters with an assigned frame
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the mapping holds no frames
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Packing parameters for one atlas generation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AtlasConfig {
    /// Glyph box height in pixels, constant for every frame
    pub font_height: f32,
    /// Padding in pixels around each glyph
    pub buffer: f32,
    /// Maximum width of the atlas texture in pixels
    pub max_canvas_width: f32,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            font_height: 64.0,
            buffer: 2.0,
            max_canvas_width: 1024.0,
        }
    }
}

/// Packing cursor threaded between incremental [`build_mapping`] calls
///
/// Persist the returned state alongside the mapping and pass it back on
/// the next call to append new characters without disturbing old frames.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BuilderState {
    /// X position where the next frame will be placed
    pub x_offset: f32,
    /// Y position of the current packing row
    pub y_offset: f32,
    /// Smallest power-of-two height that contains every packed row
    pub canvas_height: f32,
}

/// Smallest power of two that is at least `value`, never below 1
pub fn next_pow_of_two(value: f32) -> f32 {
    2f32.powi(value.max(1.0).log2().ceil() as i32)
}

/// Extend `mapping` with frames for every character not already present
///
/// Characters are packed left to right into rows of `max_canvas_width`,
/// continuing from the cursor in `state`. `measure_width` is invoked only
/// for newly added characters, with the character's position in the input
/// iteration as the second argument. Already-mapped characters are skipped
/// and do not move the cursor.
///
/// Returns the cursor state for the next incremental build. The returned
/// `canvas_height` covers every row packed so far, including rows from
/// earlier builds.
///
/// A character wider than `max_canvas_width` still gets a frame, starting
/// its own row; the atlas is simply overflowed rather than rejecting the
/// character.
pub fn build_mapping<I, F>(
    characters: I,
    config: &AtlasConfig,
    mut measure_width: F,
    mapping: &mut AtlasMapping,
    state: BuilderState,
) -> BuilderState
where
    I: IntoIterator<Item = char>,
    F: FnMut(char, usize) -> f32,
{
    let row_height = config.font_height + config.buffer * 2.0;

    // Continue from the x position of the last character packed by the
    // previous build.
    let mut x = state.x_offset;
    let mut row = 0u32;

    for (index, character) in characters.into_iter().enumerate() {
        if mapping.contains(character) {
            continue;
        }

        let width = measure_width(character, index);

        if x + width + config.buffer * 2.0 > config.max_canvas_width {
            x = 0.0;
            row += 1;
        }

        mapping.insert(
            character,
            CharacterFrame {
                x: x + config.buffer,
                y: state.y_offset + row as f32 * row_height + config.buffer,
                width,
                height: config.font_height,
                mask: true,
            },
        );

        x += width + config.buffer * 2.0;
    }

    let rows = row as f32;
    BuilderState {
        x_offset: x,
        y_offset: state.y_offset + rows * row_height,
        canvas_height: next_pow_of_two(state.y_offset + (rows + 1.0) * row_height),
    }
}
