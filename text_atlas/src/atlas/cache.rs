// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph cache with append-only atlas storage.

use alloc::sync::Arc;
use core::fmt::{Debug, Formatter};

use hashbrown::HashMap;
use smallvec::SmallVec;

use super::key::{GlyphKey, GlyphLookupKey};
use super::packer::{AtlasConfig, AtlasPacker};
use super::region::GlyphPlacement;
use crate::Error;
use crate::raster::{GlyphRasterizer, RasterSurface};
use crate::style::StyleFingerprint;
use crate::texture::AtlasTextureDevice;

/// Maps (character, style) pairs to their place in the atlas.
///
/// A miss rasterizes the character, reserves space for it, uploads the pixels
/// into the page texture and records the placement. Entries are never
/// evicted, so each pair is rasterized and uploaded at most once for the
/// lifetime of the cache.
///
/// `T` is the texture handle type of the [`AtlasTextureDevice`] in use. Page
/// textures are created lazily, on the first glyph placed on a page.
pub struct GlyphCache<T> {
    packer: AtlasPacker,
    entries: HashMap<GlyphKey, Arc<GlyphPlacement>>,
    /// One slot per atlas page, `None` until the page receives its first glyph.
    textures: SmallVec<[Option<T>; 1]>,
    cache_hits: u64,
    cache_misses: u64,
    uploads: u64,
    dropped: u64,
}

/// Counters describing a [`GlyphCache`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GlyphCacheStats {
    /// Number of cached glyphs.
    pub entries: usize,
    /// Number of atlas pages.
    pub pages: usize,
    /// Number of page textures created.
    pub textures: usize,
    /// Lookups answered from the cache since the last `clear_stats()`.
    pub cache_hits: u64,
    /// Lookups that needed rasterization since the last `clear_stats()`.
    pub cache_misses: u64,
    /// Sub-image uploads performed since the last `clear_stats()`.
    pub uploads: u64,
    /// Glyphs left out since the last `clear_stats()` because they could not be stored.
    pub dropped: u64,
}

impl<T> GlyphCache<T> {
    /// Creates an empty cache whose pages follow `config`.
    pub fn new(config: AtlasConfig) -> Result<Self, Error> {
        Ok(Self {
            packer: AtlasPacker::new(config)?,
            entries: HashMap::new(),
            textures: SmallVec::new(),
            cache_hits: 0,
            cache_misses: 0,
            uploads: 0,
            dropped: 0,
        })
    }

    /// Looks up a glyph without rasterizing on a miss.
    pub fn get(&self, character: &str, style: &StyleFingerprint) -> Option<&Arc<GlyphPlacement>> {
        self.entries.get(&GlyphLookupKey {
            character,
            description: style.description(),
        })
    }

    /// Returns the placement of `character` in `style`, creating it on a miss.
    ///
    /// Returns `None` when the glyph cannot be stored (its rectangle is larger
    /// than a page, or the page texture could not be created). Nothing is
    /// cached in that case and the caller should leave the glyph out.
    pub fn resolve<S, D>(
        &mut self,
        character: &str,
        style: &StyleFingerprint,
        rasterizer: &mut GlyphRasterizer<S>,
        device: &mut D,
    ) -> Option<Arc<GlyphPlacement>>
    where
        S: RasterSurface,
        D: AtlasTextureDevice<Texture = T>,
    {
        let lookup = GlyphLookupKey {
            character,
            description: style.description(),
        };
        if let Some(placement) = self.entries.get(&lookup) {
            self.cache_hits += 1;
            return Some(Arc::clone(placement));
        }
        self.cache_misses += 1;
        log::trace!("glyph cache miss for {character:?} in {}", style.description());

        let metrics = rasterizer.rasterize(character, style);
        let Some(allocation) = self.packer.allocate(metrics.width, metrics.height) else {
            log::warn!(
                "{character:?} needs {}x{} pixels, more than an atlas page holds; dropping it",
                metrics.width,
                metrics.height
            );
            self.dropped += 1;
            return None;
        };

        let placement = GlyphPlacement::new(allocation, metrics, character);
        let Some(texture) = self.page_texture(placement.page_index, device) else {
            self.dropped += 1;
            return None;
        };

        if placement.width > 0 && placement.height > 0 {
            device.set_premultiply_alpha(true);
            device.upload_sub_image(
                texture,
                placement.x,
                placement.y,
                placement.width,
                placement.height,
                rasterizer.surface().pixels(),
            );
            device.set_premultiply_alpha(false);
            self.uploads += 1;
        }

        let placement = Arc::new(placement);
        self.entries.insert(
            GlyphKey::new(character, style.description_arc()),
            Arc::clone(&placement),
        );
        Some(placement)
    }

    /// The texture of page `page_index`, created on first use.
    fn page_texture<D>(&mut self, page_index: u32, device: &mut D) -> Option<&mut T>
    where
        D: AtlasTextureDevice<Texture = T>,
    {
        let idx = page_index as usize;
        if self.textures.len() <= idx {
            self.textures.resize_with(idx + 1, || None);
        }
        let slot = &mut self.textures[idx];
        if slot.is_none() {
            let config = self.packer.config();
            let Some(texture) = device.create_texture(config.page_width, config.page_height)
            else {
                log::warn!("could not create texture for atlas page {page_index}");
                return None;
            };
            log::debug!(
                "created {}x{} texture for atlas page {page_index}",
                config.page_width,
                config.page_height
            );
            *slot = Some(texture);
        }
        slot.as_mut()
    }

    /// The texture of page `page_index`, if it has been created.
    pub fn texture(&self, page_index: u32) -> Option<&T> {
        self.textures.get(page_index as usize)?.as_ref()
    }

    /// The underlying rectangle allocator.
    pub fn packer(&self) -> &AtlasPacker {
        &self.packer
    }

    /// Releases every page texture and forgets every glyph.
    ///
    /// Call this before the GPU context owning `device` goes away.
    pub fn clear<D>(&mut self, device: &mut D)
    where
        D: AtlasTextureDevice<Texture = T>,
    {
        for texture in self.textures.drain(..).flatten() {
            device.destroy_texture(texture);
        }
        self.entries.clear();
        self.packer.clear();
        self.clear_stats();
    }

    /// Get the number of cached glyphs.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the number of cache hits since last `clear_stats()`.
    #[inline]
    pub fn cache_hits(&self) -> u64 {
        self.cache_hits
    }

    /// Get the number of cache misses since last `clear_stats()`.
    #[inline]
    pub fn cache_misses(&self) -> u64 {
        self.cache_misses
    }

    /// Clear statistics without clearing the cache itself.
    pub fn clear_stats(&mut self) {
        self.cache_hits = 0;
        self.cache_misses = 0;
        self.uploads = 0;
        self.dropped = 0;
    }

    /// Current counters.
    pub fn stats(&self) -> GlyphCacheStats {
        GlyphCacheStats {
            entries: self.entries.len(),
            pages: self.packer.page_count(),
            textures: self.textures.iter().flatten().count(),
            cache_hits: self.cache_hits,
            cache_misses: self.cache_misses,
            uploads: self.uploads,
            dropped: self.dropped,
        }
    }

    /// Log cache statistics at info level.
    pub fn log_stats(&self) {
        let stats = self.stats();
        let total = stats.cache_hits + stats.cache_misses;
        let hit_rate = if total > 0 {
            (stats.cache_hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        log::info!(
            "glyph atlas: {} glyphs on {} pages, {} hits, {} misses ({hit_rate:.2}% hit rate), {} uploads, {} dropped",
            stats.entries,
            stats.pages,
            stats.cache_hits,
            stats.cache_misses,
            stats.uploads,
            stats.dropped,
        );
    }
}

impl<T> Debug for GlyphCache<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GlyphCache")
            .field("entries", &self.entries.len())
            .field("pages", &self.packer.page_count())
            .field("cache_hits", &self.cache_hits)
            .field("cache_misses", &self.cache_misses)
            .finish_non_exhaustive()
    }
}
