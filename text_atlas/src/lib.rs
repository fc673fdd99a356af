// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text Atlas turns positioned strings into lists of textured glyph quads.
//!
//! Every character is rasterized once per visual style, packed into a shared
//! texture page and then reused for as long as the atlas lives:
//! - [`StyleFingerprint`] gives a canonical identity to everything that
//!   affects a glyph's pixels (font, size, colors, stroke, device scale).
//! - [`GlyphRasterizer`] draws one character onto a scratch [`RasterSurface`].
//! - [`AtlasPacker`] places rectangles on growable, append-only pages using
//!   shelf packing.
//! - [`GlyphCache`] ties the three together and uploads each new glyph to its
//!   page texture through an [`AtlasTextureDevice`].
//! - [`LabelAssembler`] consumes [`DrawCommand`]s and produces one pooled
//!   [`DrawLabel`] per command, ready for a batched quad renderer.
//!
//! ## Features
//!
//! - `std` (enabled by default): Get floating point functions from the standard library
//!   (likely using your target's libc).
//! - `libm`: Use floating point implementations from [libm].
//!
//! At least one of `std` and `libm` is required; `std` overrides `libm`.
//!
//! [libm]: https://crates.io/crates/libm

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("text_atlas requires either the `std` or `libm` feature to be enabled");

// Suppress the unused_crate_dependencies lint when both std and libm are specified.
#[cfg(all(feature = "std", feature = "libm"))]
use core_maths as _;

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub use peniko::{color, kurbo};

pub mod atlas;
mod error;
pub mod label;
mod math;
pub mod raster;
pub mod renderers;
mod style;
mod texture;

#[cfg(test)]
mod testing;

pub use atlas::{
    AtlasAllocation, AtlasConfig, AtlasPacker, AtlasPage, GlyphCache, GlyphCacheStats, GlyphKey,
    GlyphPlacement, RasterMetrics,
};
pub use error::{Error, ErrorKind};
pub use label::{
    DrawCommand, DrawDatum, DrawLabel, LabelAssembler, LabelId, LabelPool, TextOwner,
    parse_draw_data,
};
pub use raster::{FixedAdvanceCache, GlyphRasterizer, RasterSurface, TextPaint};
pub use style::{Color, StyleAttributes, StyleFingerprint, TextStyle};
pub use texture::AtlasTextureDevice;
