// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Turning draw commands into lines of atlas glyphs.

mod draw_data;
mod pool;

use alloc::sync::Arc;
use alloc::vec::Vec;

use icu_segmenter::GraphemeClusterSegmenter;

pub use draw_data::{DrawCommand, DrawDatum, parse_draw_data};
pub use pool::{DrawLabel, LabelId, LabelPool};

use crate::Error;
use crate::atlas::{AtlasConfig, GlyphCache, GlyphPlacement};
use crate::raster::{GlyphRasterizer, RasterSurface};
use crate::style::{StyleFingerprint, TextStyle};
use crate::texture::AtlasTextureDevice;

/// A piece of text that owns a set of lines, such as one text field.
///
/// Lines are stored as pool handles; read them back with
/// [`LabelAssembler::lines`].
///
/// Cloning copies the style only; the clone starts without lines, so two
/// owners never hold the same pooled line.
#[derive(Debug, Default)]
pub struct TextOwner {
    /// Style every command inherits from.
    pub style: TextStyle,
    labels: Vec<LabelId>,
}

impl TextOwner {
    /// Creates an owner with no lines.
    pub fn new(style: TextStyle) -> Self {
        Self {
            style,
            labels: Vec::new(),
        }
    }

    /// Handles of the lines produced by the last analysis.
    pub fn labels(&self) -> &[LabelId] {
        &self.labels
    }
}

impl Clone for TextOwner {
    fn clone(&self) -> Self {
        Self::new(self.style.clone())
    }
}

/// Everything needed to render text through the atlas: glyph cache,
/// rasterizer, texture device and line pool.
///
/// One instance per GPU context. It is not meant to be shared across threads.
#[derive(Debug)]
pub struct LabelAssembler<S, D: AtlasTextureDevice> {
    cache: GlyphCache<D::Texture>,
    rasterizer: GlyphRasterizer<S>,
    device: D,
    pool: LabelPool,
    /// Glyphs of the line being assembled, reused between commands.
    scratch: Vec<Arc<GlyphPlacement>>,
}

impl<S, D> LabelAssembler<S, D>
where
    S: RasterSurface,
    D: AtlasTextureDevice,
{
    /// Creates an assembler with an empty atlas.
    pub fn new(config: AtlasConfig, surface: S, device: D) -> Result<Self, Error> {
        Ok(Self {
            cache: GlyphCache::new(config)?,
            rasterizer: GlyphRasterizer::new(surface),
            device,
            pool: LabelPool::new(),
            scratch: Vec::new(),
        })
    }

    /// Rebuilds the lines of `owner` from `commands`.
    ///
    /// The owner's previous lines go back to the pool first. Each command
    /// becomes one line, in command order, whose glyphs follow the text's
    /// grapheme order. Glyphs that cannot be stored in the atlas are left out.
    pub fn analyze(&mut self, owner: &mut TextOwner, commands: &[DrawCommand]) {
        for id in owner.labels.drain(..) {
            self.pool.release(id, false);
        }

        let segmenter = GraphemeClusterSegmenter::new();
        for command in commands {
            let style = StyleFingerprint::build(&owner.style, &command.style);
            self.scratch.clear();

            let text = command.text.as_str();
            let mut start = 0;
            for end in segmenter.segment_str(text) {
                if end <= start {
                    continue;
                }
                let character = &text[start..end];
                start = end;
                if let Some(placement) = self.cache.resolve(
                    character,
                    &style,
                    &mut self.rasterizer,
                    &mut self.device,
                ) {
                    self.scratch.push(placement);
                }
            }

            let id = self.pool.acquire();
            if let Some(label) = self.pool.get_mut(id) {
                label.anchor_x = command.anchor_x;
                label.anchor_y = command.anchor_y;
                label.glyphs.extend(self.scratch.drain(..));
            }
            owner.labels.push(id);
        }
    }

    /// Returns all lines of `owner` to the pool, e.g. when it is destroyed.
    pub fn release(&mut self, owner: &mut TextOwner) {
        for id in owner.labels.drain(..) {
            self.pool.release(id, true);
        }
    }

    /// The lines of `owner`, in command order.
    pub fn lines<'a>(
        &'a self,
        owner: &'a TextOwner,
    ) -> impl Iterator<Item = &'a DrawLabel> + 'a {
        owner.labels.iter().filter_map(|id| self.pool.get(*id))
    }

    /// The glyph cache.
    pub fn cache(&self) -> &GlyphCache<D::Texture> {
        &self.cache
    }

    /// The rasterizer and its scratch surface.
    pub fn rasterizer(&self) -> &GlyphRasterizer<S> {
        &self.rasterizer
    }

    /// The texture device.
    pub fn device(&self) -> &D {
        &self.device
    }

    /// Mutable access to the texture device.
    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// The line pool.
    pub fn pool(&self) -> &LabelPool {
        &self.pool
    }

    /// Releases every page texture and returns the surface and device.
    ///
    /// Lines still held by owners must not be used afterwards.
    pub fn teardown(mut self) -> (S, D) {
        self.cache.clear(&mut self.device);
        (self.rasterizer.into_surface(), self.device)
    }
}
