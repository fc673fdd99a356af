// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rasterizing single characters onto a scratch surface.

use alloc::sync::Arc;

use hashbrown::HashMap;

use crate::atlas::RasterMetrics;
use crate::math::ceil_px;
use crate::style::{Color, StyleFingerprint};

/// Font and transform shared by the stroke and fill passes of one glyph.
#[derive(Clone, Copy, Debug)]
pub struct TextPaint<'a> {
    /// CSS-style font shorthand.
    pub font: &'a str,
    /// Horizontal scale applied to drawing.
    pub scale_x: f32,
    /// Vertical scale applied to drawing.
    pub scale_y: f32,
}

/// A 2D drawing surface able to measure and draw text.
///
/// Text is always drawn left aligned with a top baseline at the origin, so a
/// glyph occupies the surface starting at `(0, 0)`.
pub trait RasterSurface {
    /// Advance width of `text` in `font`, or `None` if the surface cannot tell.
    fn measure_text(&mut self, text: &str, font: &str) -> Option<f32>;

    /// Resizes the surface. Contents are unspecified afterwards.
    fn resize(&mut self, width: u32, height: u32);

    /// Clears the whole surface to transparent.
    fn clear(&mut self);

    /// Strokes the outline of `text` with round joins.
    fn stroke_text(&mut self, text: &str, paint: &TextPaint<'_>, color: Color, line_width: f32);

    /// Fills `text`.
    fn fill_text(&mut self, text: &str, paint: &TextPaint<'_>, color: Color);

    /// Current width in pixels.
    fn width(&self) -> u32;

    /// Current height in pixels.
    fn height(&self) -> u32;

    /// Surface contents as tightly packed RGBA8 rows with straight alpha.
    fn pixels(&self) -> &[u8];
}

/// Lowest code point of the fixed-advance class.
const FIXED_ADVANCE_FIRST: char = '\u{4E00}';
/// Highest code point of the fixed-advance class.
const FIXED_ADVANCE_LAST: char = '\u{9FA5}';

/// Remembers one advance per font for characters that share it.
///
/// CJK ideographs almost always have the same advance within a font, so the
/// first one measured stands in for the rest. This is a heuristic: a font
/// with varying ideograph advances will get slightly wrong metrics.
#[derive(Clone, Debug, Default)]
pub struct FixedAdvanceCache {
    advances: HashMap<Arc<str>, f32>,
}

impl FixedAdvanceCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `character` belongs to the fixed-advance class.
    ///
    /// Only single code points in the CJK Unified Ideographs block qualify.
    pub fn is_fixed_advance(character: &str) -> bool {
        let mut chars = character.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => (FIXED_ADVANCE_FIRST..=FIXED_ADVANCE_LAST).contains(&c),
            _ => false,
        }
    }

    /// Remembered advance for `font`.
    pub fn get(&self, font: &str) -> Option<f32> {
        self.advances.get(font).copied()
    }

    fn insert(&mut self, font: &Arc<str>, advance: f32) {
        self.advances.insert(Arc::clone(font), advance);
    }

    /// Number of fonts with a remembered advance.
    pub fn len(&self) -> usize {
        self.advances.len()
    }

    /// Whether nothing has been remembered yet.
    pub fn is_empty(&self) -> bool {
        self.advances.is_empty()
    }

    /// Forgets every advance.
    pub fn clear(&mut self) {
        self.advances.clear();
    }
}

/// Measures and draws one character at a time onto a reusable surface.
#[derive(Debug)]
pub struct GlyphRasterizer<S> {
    surface: S,
    fixed_advances: FixedAdvanceCache,
}

impl<S: RasterSurface> GlyphRasterizer<S> {
    /// Creates a rasterizer drawing onto `surface`.
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            fixed_advances: FixedAdvanceCache::new(),
        }
    }

    /// Measures `character`, resizes the surface to its render-space size and draws it.
    ///
    /// The height is always the nominal point size so that every glyph of a
    /// style shares line metrics. If the surface cannot measure, the point
    /// size is used for both dimensions.
    pub fn rasterize(&mut self, character: &str, style: &StyleFingerprint) -> RasterMetrics {
        let size = style.size();
        let (measured_width, measured_height) = match self.measure(character, style) {
            Some(width) => (width, size),
            None => {
                log::error!("no metrics for {character:?} in {:?}", style.font());
                (size, size)
            }
        };

        let width = ceil_px(measured_width * style.scale_x());
        let height = ceil_px(measured_height * style.scale_y());

        self.surface.resize(width, height);
        self.surface.clear();

        let resolved = style.style();
        let paint = TextPaint {
            font: style.font(),
            scale_x: style.scale_x(),
            scale_y: style.scale_y(),
        };
        if style.stroke() != 0.0 {
            self.surface.stroke_text(
                character,
                &paint,
                resolved.stroke_color,
                style.stroke() * 2.0,
            );
        }
        self.surface.fill_text(character, &paint, resolved.text_color);

        RasterMetrics {
            width,
            height,
            measured_width,
            measured_height,
        }
    }

    fn measure(&mut self, character: &str, style: &StyleFingerprint) -> Option<f32> {
        let fixed = FixedAdvanceCache::is_fixed_advance(character);
        if fixed {
            if let Some(advance) = self.fixed_advances.get(style.font()) {
                return Some(advance);
            }
        }
        let advance = self.surface.measure_text(character, style.font())?;
        if fixed {
            self.fixed_advances.insert(style.font_arc(), advance);
        }
        Some(advance)
    }

    /// The scratch surface, holding the most recently rasterized glyph.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the scratch surface.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// The memoized fixed-advance metrics.
    pub fn fixed_advances(&self) -> &FixedAdvanceCache {
        &self.fixed_advances
    }

    /// Forgets memoized metrics.
    pub fn clear(&mut self) {
        self.fixed_advances.clear();
    }

    /// Consumes the rasterizer, returning its surface.
    pub fn into_surface(self) -> S {
        self.surface
    }
}
