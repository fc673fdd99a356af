// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recycled line records.

use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::atlas::GlyphPlacement;

/// One line of glyphs anchored at a point, ready for a quad renderer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawLabel {
    /// Anchor x coordinate.
    pub anchor_x: f32,
    /// Anchor y coordinate.
    pub anchor_y: f32,
    /// Glyphs in text order. Shared with the glyph cache.
    pub glyphs: Vec<Arc<GlyphPlacement>>,
}

impl DrawLabel {
    fn reset(&mut self) {
        self.anchor_x = 0.0;
        self.anchor_y = 0.0;
        // Placements are owned by the cache; this only drops references.
        self.glyphs.clear();
    }
}

/// Handle to a [`DrawLabel`] inside a [`LabelPool`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct LabelId(usize);

#[derive(Debug)]
struct Slot {
    label: DrawLabel,
    released: bool,
}

/// Arena of [`DrawLabel`]s recycled across analysis calls.
///
/// Released labels keep their allocations, so steady-state frames do not
/// allocate new line storage.
#[derive(Debug, Default)]
pub struct LabelPool {
    slots: Vec<Slot>,
    free: Vec<LabelId>,
}

impl LabelPool {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out an empty label, reusing a released one when possible.
    pub fn acquire(&mut self) -> LabelId {
        if let Some(id) = self.free.pop() {
            self.slots[id.0].released = false;
            return id;
        }
        let id = LabelId(self.slots.len());
        self.slots.push(Slot {
            label: DrawLabel::default(),
            released: false,
        });
        id
    }

    /// Resets `id` and returns it to the pool.
    ///
    /// Releasing a label twice never corrupts the pool: the second release is
    /// rejected. With `check_repeat` set it is also reported as an error.
    pub fn release(&mut self, id: LabelId, check_repeat: bool) {
        let Some(slot) = self.slots.get_mut(id.0) else {
            log::error!("{id:?} does not belong to this pool");
            return;
        };
        if slot.released {
            if check_repeat {
                log::error!("{id:?} released twice");
            }
            return;
        }
        slot.label.reset();
        slot.released = true;
        self.free.push(id);
    }

    /// The label behind `id`, unless it is released.
    pub fn get(&self, id: LabelId) -> Option<&DrawLabel> {
        self.slots
            .get(id.0)
            .filter(|slot| !slot.released)
            .map(|slot| &slot.label)
    }

    /// Mutable access to the label behind `id`, unless it is released.
    pub fn get_mut(&mut self, id: LabelId) -> Option<&mut DrawLabel> {
        self.slots
            .get_mut(id.0)
            .filter(|slot| !slot.released)
            .map(|slot| &mut slot.label)
    }

    /// Number of labels ever created.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of labels waiting to be reused.
    pub fn free_count(&self) -> usize {
        self.free.len()
    }
}
