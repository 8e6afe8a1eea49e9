//! Tests for glyph ids and the configured glyph set

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tilepaint::TilepaintError;
    use tilepaint::canvas::glyph::{GlyphId, GlyphSet};
    use tilepaint::io::configuration::DEFAULT_GLYPHS;

    // Tests glyph keys are case-insensitive
    // Verified by removing upper-casing
    #[test]
    fn test_glyph_case_folding() {
        assert_eq!(GlyphId::new('e').unwrap(), GlyphId::new('E').unwrap());
        assert_eq!(GlyphId::new('e').unwrap().key(), 'E');
    }

    // Tests reserved and unprintable keys are rejected
    // Verified by allowing '0'
    #[test]
    fn test_invalid_glyph_keys() {
        for key in ['0', ' ', '\n', '\t'] {
            assert!(matches!(
                GlyphId::new(key),
                Err(TilepaintError::UnknownGlyph { .. })
            ));
        }
    }

    // Tests the default set holds fifteen glyphs in key order
    // Verified by sorting the set on construction
    #[test]
    fn test_default_set() {
        let set = GlyphSet::parse(DEFAULT_GLYPHS).unwrap();
        assert_eq!(set.len(), 15);
        assert_eq!(set.first().key(), '1');
        assert_eq!(set.iter().last().unwrap().key(), 'U');
    }

    // Tests duplicates are dropped and empty sets rejected
    // Verified by pushing every key
    #[test]
    fn test_parse_dedupes() {
        let set = GlyphSet::parse("EeQE").unwrap();
        assert_eq!(set.len(), 2);
        assert!(GlyphSet::parse("").is_err());
    }

    // Tests lookup only succeeds for members
    // Verified by skipping the membership filter
    #[test]
    fn test_get_membership() {
        let set = GlyphSet::parse("EQ").unwrap();
        assert_eq!(set.get('q').unwrap().key(), 'Q');
        assert!(matches!(
            set.get('T'),
            Err(TilepaintError::UnknownGlyph { glyph: 'T' })
        ));
        assert!(!set.contains(GlyphId::new('T').unwrap()));
    }

    // Tests random choice always yields a member and eventually all members
    // Verified by choosing from a fixed range
    #[test]
    fn test_choose_stays_in_set() {
        let set = GlyphSet::parse("1EQ").unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();

        for _ in 0..200 {
            let glyph = set.choose(&mut rng);
            assert!(set.contains(glyph));
            seen.insert(glyph);
        }
        assert_eq!(seen.len(), 3);
    }
}
