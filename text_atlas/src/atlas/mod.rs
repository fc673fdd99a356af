// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph bitmap atlas cache.
//!
//! This module provides a glyph atlas that:
//! - Rasterizes each (character, style) pair once and reuses the placement afterwards
//! - Packs glyph bitmaps into fixed-size pages with shelf packing
//! - Keys entries by the full character and style description, so lookups never collide
//! - Appends pages on demand and creates their textures lazily
//! - Never evicts: pages and placements live as long as the cache

mod cache;
mod key;
mod packer;
mod region;

pub use cache::{GlyphCache, GlyphCacheStats};
pub use key::GlyphKey;
pub use packer::{
    AtlasAllocation, AtlasConfig, AtlasPacker, AtlasPage, DEFAULT_BORDER,
    DEFAULT_MAX_TEXTURE_SIZE, DEFAULT_PAGE_SIZE,
};
pub use region::{GlyphPlacement, RasterMetrics};
