// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph placement and rasterization data structures.

use alloc::boxed::Box;

use crate::kurbo::Rect;

use super::packer::AtlasAllocation;

/// Location and metrics of a cached glyph within an atlas page.
///
/// Immutable once created. The glyph cache and every [`DrawLabel`] that uses
/// the glyph share one instance behind an `Arc`.
///
/// [`DrawLabel`]: crate::DrawLabel
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphPlacement {
    /// Which atlas page contains this glyph.
    pub page_index: u32,

    /// X position of the glyph pixels in the page, border excluded.
    pub x: u32,

    /// Y position of the glyph pixels in the page, border excluded.
    pub y: u32,

    /// Width of the glyph bitmap in render-space pixels.
    pub width: u32,

    /// Height of the glyph bitmap in render-space pixels.
    pub height: u32,

    /// Logical advance width, before device scaling.
    pub measured_width: f32,

    /// Logical height, before device scaling.
    pub measured_height: f32,

    /// The character this glyph was rasterized from.
    pub character: Box<str>,
}

impl GlyphPlacement {
    pub(crate) fn new(
        allocation: AtlasAllocation,
        metrics: RasterMetrics,
        character: &str,
    ) -> Self {
        Self {
            page_index: allocation.page_index,
            x: allocation.x,
            y: allocation.y,
            width: allocation.width,
            height: allocation.height,
            measured_width: metrics.measured_width,
            measured_height: metrics.measured_height,
            character: Box::from(character),
        }
    }

    /// The glyph's pixel rectangle within its page.
    pub fn pixel_rect(&self) -> Rect {
        Rect::new(
            f64::from(self.x),
            f64::from(self.y),
            f64::from(self.x + self.width),
            f64::from(self.y + self.height),
        )
    }

    /// The glyph's rectangle in normalized texture coordinates of a page with the given size.
    pub fn uv_rect(&self, page_width: u32, page_height: u32) -> Rect {
        let sx = 1.0 / f64::from(page_width.max(1));
        let sy = 1.0 / f64::from(page_height.max(1));
        let px = self.pixel_rect();
        Rect::new(px.x0 * sx, px.y0 * sy, px.x1 * sx, px.y1 * sy)
    }
}

/// Metadata for a rasterized glyph (no pixel data).
///
/// The pixels stay on the rasterizer's scratch surface until they are uploaded,
/// so rasterizing a glyph performs no per-glyph heap allocation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RasterMetrics {
    /// Width of the rasterized glyph in render-space pixels.
    pub width: u32,
    /// Height of the rasterized glyph in render-space pixels.
    pub height: u32,
    /// Logical advance width.
    pub measured_width: f32,
    /// Logical height.
    pub measured_height: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uv_rect_is_normalized() {
        let placement = GlyphPlacement {
            page_index: 0,
            x: 64,
            y: 128,
            width: 32,
            height: 64,
            measured_width: 16.0,
            measured_height: 32.0,
            character: "A".into(),
        };
        let uv = placement.uv_rect(256, 512);
        assert_eq!(uv, Rect::new(0.25, 0.25, 0.375, 0.375));
        assert_eq!(placement.pixel_rect(), Rect::new(64.0, 128.0, 96.0, 192.0));
    }
}
