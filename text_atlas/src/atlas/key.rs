// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph cache key.

use alloc::boxed::Box;
use alloc::sync::Arc;
use core::hash::{Hash, Hasher};

/// Unique identifier for a cached glyph bitmap.
///
/// Made of the character itself and the canonical description of its style.
/// The full key material is stored and compared, so two different glyphs can
/// never share an entry even if their hashes collide.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphKey {
    /// The user-perceived character (one grapheme cluster).
    pub character: Box<str>,
    /// [`StyleFingerprint::description`](crate::StyleFingerprint::description)
    /// of the style it was rasterized with.
    pub description: Arc<str>,
}

impl GlyphKey {
    /// Creates a key, sharing the style description.
    pub fn new(character: &str, description: &Arc<str>) -> Self {
        Self {
            character: Box::from(character),
            description: Arc::clone(description),
        }
    }

    pub(crate) fn lookup(&self) -> GlyphLookupKey<'_> {
        GlyphLookupKey {
            character: &self.character,
            description: &self.description,
        }
    }
}

// Hashing goes through the borrowed form so owned and lookup keys agree.
impl Hash for GlyphKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.lookup().hash(state);
    }
}

/// Borrowed form of [`GlyphKey`], used to probe the cache without allocating.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub(crate) struct GlyphLookupKey<'a> {
    pub(crate) character: &'a str,
    pub(crate) description: &'a str,
}

impl hashbrown::Equivalent<GlyphKey> for GlyphLookupKey<'_> {
    fn equivalent(&self, other: &GlyphKey) -> bool {
        *self == other.lookup()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashbrown::HashMap;

    #[test]
    fn lookup_finds_owned_key() {
        let description: Arc<str> = Arc::from("30px Arial-#000000ff-#000000ff-1-1");
        let mut map = HashMap::new();
        map.insert(GlyphKey::new("A", &description), 1);
        map.insert(GlyphKey::new("B", &description), 2);

        let probe = GlyphLookupKey {
            character: "A",
            description: "30px Arial-#000000ff-#000000ff-1-1",
        };
        assert_eq!(map.get(&probe), Some(&1));

        let other_style = GlyphLookupKey {
            character: "A",
            description: "30px Arial-#ff0000ff-#000000ff-1-1",
        };
        assert_eq!(map.get(&other_style), None);
    }

    #[test]
    fn key_equality_uses_full_material() {
        let a: Arc<str> = Arc::from("x");
        let b: Arc<str> = Arc::from("x");
        assert_eq!(GlyphKey::new("é", &a), GlyphKey::new("é", &b));
        assert_ne!(GlyphKey::new("e", &a), GlyphKey::new("é", &a));
    }
}
