//! # Text Atlas
//!
//! Glyph-atlas packing and paragraph layout for rasterized text rendering.
//!
//! The crate answers two questions for GPU-rendered text drawn from a
//! shared texture atlas:
//!
//! - where does each distinct character live inside a fixed-width atlas
//!   image, and
//! - for a given paragraph, font metrics, and wrap policy, what is the
//!   exact per-character pixel position.
//!
//! ## Features
//!
//! - **Incremental packing**: new characters are appended to an existing
//!   mapping without moving old frames, so atlas textures can be grown
//!   with sub-region uploads
//! - **Two wrap modes**: CSS-style `break-word` and `break-all`, with
//!   oversized words forced down to character-level breaking
//! - **Total layout**: characters missing from the atlas fall back to a
//!   fixed width and a diagnostic; layout never fails
//! - **Capability injection**: width measurement, diagnostics, and record
//!   projection are caller-supplied closures, keeping the crate free of
//!   any font or rendering subsystem
//!
//! ## Quick Start
//!
//! ```rust
//! use text_atlas::{
//!     build_mapping, transform_paragraph, AtlasConfig, AtlasMapping, BuilderState,
//!     ParagraphStyle,
//! };
//!
//! // Pack the character set into the atlas, measuring widths with the
//! // caller's font machinery (a constant here).
//! let config = AtlasConfig {
//!     font_height: 10.0,
//!     buffer: 1.0,
//!     max_canvas_width: 256.0,
//! };
//! let mut mapping = AtlasMapping::new();
//! let state = build_mapping(
//!     "hi".chars(),
//!     &config,
//!     |_character, _index| 6.0,
//!     &mut mapping,
//!     BuilderState::default(),
//! );
//! assert!(state.canvas_height >= config.font_height);
//!
//! // Lay out a paragraph against the mapping.
//! let mut records = Vec::new();
//! transform_paragraph(
//!     "hi",
//!     &mapping,
//!     &ParagraphStyle::default(),
//!     |datum| datum,
//!     &mut records,
//!     &mut |_character| {},
//! );
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[1].offset_left, 6.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod atlas;
pub mod measure;
pub mod paragraph;
pub mod wrap;

pub use atlas::*;
pub use measure::*;
pub use paragraph::*;
pub use wrap::*;
