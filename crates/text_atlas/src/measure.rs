//! Text width measurement against an atlas mapping
//!
//! Measurement is total: characters without a frame contribute
//! [`MISSING_CHAR_WIDTH`] and are reported to an injected diagnostic sink
//! instead of failing the layout pass.

use crate::atlas::AtlasMapping;

/// Advance width in pixels substituted for characters missing from the
/// mapping
pub const MISSING_CHAR_WIDTH: f32 = 32.0;

/// Stock diagnostic sink that reports a missing character through [`log`]
pub fn log_missing(character: char) {
    log::warn!("Missing character: {character}");
}

/// Advance width of a single character
///
/// Reports `character` to `missing` when it has no frame and substitutes
/// [`MISSING_CHAR_WIDTH`].
pub fn char_width(
    character: char,
    mapping: &AtlasMapping,
    missing: &mut dyn FnMut(char),
) -> f32 {
    match mapping.get(character) {
        Some(frame) => frame.width,
        None => {
            missing(character);
            MISSING_CHAR_WIDTH
        }
    }
}

/// Total advance width of `text`
///
/// Sums per-character frame widths; every occurrence of an unmapped
/// character is reported to `missing` and contributes
/// [`MISSING_CHAR_WIDTH`]. Never fails.
pub fn text_width(text: &str, mapping: &AtlasMapping, missing: &mut dyn FnMut(char)) -> f32 {
    text.chars()
        .map(|character| char_width(character, mapping, missing))
        .sum()
}
