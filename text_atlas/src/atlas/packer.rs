// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Multi-page shelf packing.
//!
//! Each page is cut into horizontal shelves. A rectangle goes into the shelf
//! that wastes the least height, left to right; when no shelf has room a new
//! one is opened below the last, and when the page is out of vertical space
//! the next page is tried. Pages are only ever appended and rectangles are
//! never freed, so there is nothing to defragment.

use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::Error;

/// Default page edge length in pixels.
pub const DEFAULT_PAGE_SIZE: u32 = 512;

/// Default padding in pixels kept around each glyph to prevent texture bleeding.
pub const DEFAULT_BORDER: u32 = 1;

/// Largest texture dimension assumed when the device limit is unknown.
pub const DEFAULT_MAX_TEXTURE_SIZE: u32 = 4096;

/// Page geometry for an [`AtlasPacker`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AtlasConfig {
    /// Width of every page in pixels.
    pub page_width: u32,
    /// Height of every page in pixels.
    pub page_height: u32,
    /// Padding added on each side of every allocation.
    pub border: u32,
    /// Maximum texture dimension supported by the GPU.
    pub max_texture_size: u32,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            page_width: DEFAULT_PAGE_SIZE,
            page_height: DEFAULT_PAGE_SIZE,
            border: DEFAULT_BORDER,
            max_texture_size: DEFAULT_MAX_TEXTURE_SIZE,
        }
    }
}

impl AtlasConfig {
    /// Square pages as large as the GPU allows.
    pub fn for_max_texture_size(max_texture_size: u32, border: u32) -> Self {
        Self {
            page_width: max_texture_size,
            page_height: max_texture_size,
            border,
            max_texture_size,
        }
    }

    /// Checks that pages are non-empty, fit the GPU limit and can hold at least one pixel.
    pub fn validate(&self) -> Result<(), Error> {
        if self.page_width == 0 || self.page_height == 0 {
            return Err(Error::invalid_config("page dimensions must be non-zero"));
        }
        if self.page_width > self.max_texture_size || self.page_height > self.max_texture_size {
            return Err(Error::invalid_config(
                "page dimensions exceed the maximum texture size",
            ));
        }
        let padding = self.border.saturating_mul(2);
        if padding >= self.page_width || padding >= self.page_height {
            return Err(Error::invalid_config("border leaves no room for glyphs"));
        }
        Ok(())
    }
}

/// A rectangle handed out by [`AtlasPacker::allocate`].
///
/// `x`/`y` point at the usable area, inside the border.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AtlasAllocation {
    /// Page the rectangle lives on.
    pub page_index: u32,
    /// Left edge of the usable area.
    pub x: u32,
    /// Top edge of the usable area.
    pub y: u32,
    /// Requested width.
    pub width: u32,
    /// Requested height.
    pub height: u32,
}

#[derive(Clone, Copy, Debug)]
struct Shelf {
    y: u32,
    height: u32,
    cursor_x: u32,
}

impl Shelf {
    fn remaining(&self, page_width: u32) -> u32 {
        page_width - self.cursor_x
    }
}

/// One fixed-size page of the atlas and its free-space tracker.
#[derive(Clone, Debug)]
pub struct AtlasPage {
    index: u32,
    width: u32,
    height: u32,
    shelves: Vec<Shelf>,
    allocations: usize,
}

impl AtlasPage {
    fn new(index: u32, width: u32, height: u32) -> Self {
        Self {
            index,
            width,
            height,
            shelves: Vec::new(),
            allocations: 0,
        }
    }

    /// Position of this page in the atlas.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of rectangles placed on this page.
    pub fn allocation_count(&self) -> usize {
        self.allocations
    }

    /// Height consumed by shelves so far.
    pub fn used_height(&self) -> u32 {
        self.shelves.last().map_or(0, |s| s.y + s.height)
    }

    /// Places a padded `width` x `height` rectangle, returning its top-left corner.
    fn allocate(&mut self, width: u32, height: u32) -> Option<(u32, u32)> {
        let page_width = self.width;

        // Best fit: the shelf wasting the least height.
        let best = self
            .shelves
            .iter()
            .enumerate()
            .filter(|(_, s)| s.height >= height && s.remaining(page_width) >= width)
            .min_by_key(|(_, s)| s.height - height)
            .map(|(i, _)| i);

        let next_y = self.used_height();
        let index = match best {
            Some(index) => index,
            None => match self.shelves.last_mut() {
                // The bottom shelf may grow downwards while the page has room.
                Some(last)
                    if last.remaining(page_width) >= width
                        && last.y + height <= self.height =>
                {
                    last.height = last.height.max(height);
                    self.shelves.len() - 1
                }
                _ => {
                    if next_y + height > self.height {
                        return None;
                    }
                    self.shelves.push(Shelf {
                        y: next_y,
                        height,
                        cursor_x: 0,
                    });
                    self.shelves.len() - 1
                }
            },
        };

        let shelf = &mut self.shelves[index];
        let origin = (shelf.cursor_x, shelf.y);
        shelf.cursor_x += width;
        self.allocations += 1;
        Some(origin)
    }
}

/// Rectangle allocator over append-only atlas pages.
#[derive(Clone, Debug)]
pub struct AtlasPacker {
    config: AtlasConfig,
    /// Most applications fit on a single page; the common case avoids heap allocation.
    pages: SmallVec<[AtlasPage; 1]>,
}

impl AtlasPacker {
    /// Creates a packer with no pages, after validating `config`.
    pub fn new(config: AtlasConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self {
            config,
            pages: SmallVec::new(),
        })
    }

    /// The page geometry in use.
    pub fn config(&self) -> &AtlasConfig {
        &self.config
    }

    /// Pages created so far.
    pub fn pages(&self) -> &[AtlasPage] {
        &self.pages
    }

    /// Number of pages created so far.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Reserves a `width` x `height` rectangle plus border.
    ///
    /// Existing pages are tried in order before a new page is appended. Returns
    /// `None` without touching any state when the padded rectangle is larger
    /// than a page, as such a request can never succeed.
    pub fn allocate(&mut self, width: u32, height: u32) -> Option<AtlasAllocation> {
        let border = self.config.border;
        let padded_w = width.checked_add(border.checked_mul(2)?)?;
        let padded_h = height.checked_add(border.checked_mul(2)?)?;
        if padded_w > self.config.page_width || padded_h > self.config.page_height {
            return None;
        }

        let placed = self.pages.iter_mut().find_map(|page| {
            let index = page.index;
            page.allocate(padded_w, padded_h).map(|(x, y)| (index, x, y))
        });
        let (page_index, x, y) = match placed {
            Some(placed) => placed,
            None => {
                let index = u32::try_from(self.pages.len()).ok()?;
                let mut page =
                    AtlasPage::new(index, self.config.page_width, self.config.page_height);
                let (x, y) = page.allocate(padded_w, padded_h)?;
                log::debug!(
                    "appending atlas page {index} ({}x{})",
                    page.width,
                    page.height
                );
                self.pages.push(page);
                (index, x, y)
            }
        };

        Some(AtlasAllocation {
            page_index,
            x: x + border,
            y: y + border,
            width,
            height,
        })
    }

    /// Drops every page.
    pub fn clear(&mut self) {
        self.pages.clear();
    }
}
