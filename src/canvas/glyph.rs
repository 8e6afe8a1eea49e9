//! Glyph identifiers and the configured glyph set

use crate::io::error::{Result, TilepaintError};
use rand::Rng;
use std::fmt;

/// Identifier of one module tileset
///
/// Glyphs are single printable characters so they double as the asset
/// filename prefix and the keyboard shortcut of the reference catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GlyphId(char);

impl GlyphId {
    /// Wrap a character as a glyph id
    ///
    /// Letters are upper-cased so `e` and `E` name the same tileset.
    ///
    /// # Errors
    ///
    /// Returns an error if the character is whitespace, a control character,
    /// or `0` (reserved for empty cells in the reference data).
    pub fn new(key: char) -> Result<Self> {
        if key.is_whitespace() || key.is_control() || key == '0' {
            return Err(TilepaintError::UnknownGlyph { glyph: key });
        }
        Ok(Self(key.to_ascii_uppercase()))
    }

    /// The underlying character
    pub const fn key(self) -> char {
        self.0
    }
}

impl fmt::Display for GlyphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered, duplicate-free set of glyphs available for painting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphSet {
    glyphs: Vec<GlyphId>,
}

impl GlyphSet {
    /// Build a set from a string of glyph keys, keeping first occurrences
    ///
    /// # Errors
    ///
    /// Returns an error if any key is not a valid glyph id or the set is empty.
    pub fn parse(keys: &str) -> Result<Self> {
        let mut glyphs = Vec::new();
        for key in keys.chars() {
            let glyph = GlyphId::new(key)?;
            if !glyphs.contains(&glyph) {
                glyphs.push(glyph);
            }
        }

        if glyphs.is_empty() {
            return Err(TilepaintError::UnknownGlyph { glyph: ' ' });
        }

        Ok(Self { glyphs })
    }

    /// Resolve a key against the set
    ///
    /// # Errors
    ///
    /// Returns an error if the key does not name a member of the set.
    pub fn get(&self, key: char) -> Result<GlyphId> {
        GlyphId::new(key)
            .ok()
            .filter(|glyph| self.glyphs.contains(glyph))
            .ok_or(TilepaintError::UnknownGlyph { glyph: key })
    }

    /// Check membership
    pub fn contains(&self, glyph: GlyphId) -> bool {
        self.glyphs.contains(&glyph)
    }

    /// First glyph in selection order
    pub fn first(&self) -> GlyphId {
        // Construction guarantees a non-empty set
        self.glyphs.first().copied().unwrap_or(GlyphId('1'))
    }

    /// Pick a uniformly random member
    pub fn choose<R: Rng>(&self, rng: &mut R) -> GlyphId {
        let index = rng.random_range(0..self.glyphs.len());
        self.glyphs.get(index).copied().unwrap_or_else(|| self.first())
    }

    /// Iterate glyphs in selection order
    pub fn iter(&self) -> impl Iterator<Item = GlyphId> + '_ {
        self.glyphs.iter().copied()
    }

    /// Number of glyphs in the set
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Always false for a constructed set
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}
