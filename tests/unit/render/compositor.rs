//! Tests for composition passes through a recording backend

#[cfg(test)]
mod tests {
    use tilepaint::Result;
    use tilepaint::canvas::color::Rgb;
    use tilepaint::canvas::glyph::GlyphId;
    use tilepaint::canvas::grid::Grid;
    use tilepaint::render::cache::{RenderCache, RenderedVariant};
    use tilepaint::render::compositor::{
        CellRect, ComposeOptions, ComposeStats, Compositor, DebugLabel, DrawTarget,
    };

    use crate::fixtures::catalog;

    #[derive(Default)]
    struct Recorder {
        variants: Vec<(char, u8, CellRect)>,
        grid_cells: usize,
        labels: Vec<String>,
    }

    impl DrawTarget for Recorder {
        fn draw_variant(&mut self, image: &RenderedVariant, rect: CellRect) -> Result<()> {
            let key = image.key();
            self.variants
                .push((key.glyph.key(), key.variant.value(), rect));
            Ok(())
        }

        fn draw_grid_cell(&mut self, _rect: CellRect) {
            self.grid_cells += 1;
        }

        fn draw_label(&mut self, label: &DebugLabel, _rect: CellRect) {
            self.labels.push(label.to_string());
        }
    }

    fn glyph(key: char) -> GlyphId {
        GlyphId::new(key).unwrap()
    }

    // Tests each occupied cell is drawn once with its resolved variant
    // Verified by resolving variants before all placements land
    #[test]
    fn test_compose_draws_resolved_variants() {
        let catalog = catalog("EQ");
        let mut grid = Grid::new(5, 5).unwrap();
        let black = Rgb::new(0, 0, 0);
        grid.place(2, 2, glyph('E'), black);
        grid.place(3, 2, glyph('Q'), black);

        let mut cache = RenderCache::new();
        let mut target = Recorder::default();
        let stats = Compositor::new(50).compose(
            &grid,
            &catalog,
            &mut cache,
            &mut target,
            ComposeOptions::default(),
        );

        assert_eq!(stats, ComposeStats { drawn: 2, skipped: 0 });
        assert_eq!(target.variants.len(), 2);
        let (key, variant, rect) = target.variants[0];
        assert_eq!((key, variant), ('E', 1));
        assert_eq!(rect, CellRect { x: 50.0, y: 50.0, size: 50.0 });
        assert_eq!((target.variants[1].0, target.variants[1].1), ('Q', 4));
        assert_eq!(target.grid_cells, 0);
    }

    // Tests the grid overlay outlines the full array including the border
    // Verified by outlining only the interior
    #[test]
    fn test_grid_overlay() {
        let catalog = catalog("E");
        let grid = Grid::new(3, 2).unwrap();
        let mut target = Recorder::default();
        let options = ComposeOptions {
            grid_lines: true,
            debug: false,
        };

        Compositor::new(50).compose(&grid, &catalog, &mut RenderCache::new(), &mut target, options);
        assert_eq!(target.grid_cells, 5 * 4);
    }

    // Tests debug labels carry glyph, variant and pattern
    // Verified by labelling with the pattern only
    #[test]
    fn test_debug_labels() {
        let catalog = catalog("E");
        let mut grid = Grid::new(3, 3).unwrap();
        grid.place(2, 1, glyph('E'), Rgb::new(0, 0, 0));
        grid.place(2, 2, glyph('E'), Rgb::new(0, 0, 0));
        let mut target = Recorder::default();
        let options = ComposeOptions {
            grid_lines: false,
            debug: true,
        };

        Compositor::new(50).compose(&grid, &catalog, &mut RenderCache::new(), &mut target, options);
        assert_eq!(target.labels, vec!["E\n2\n0010", "E\n8\n1000"]);
    }

    // Tests a cell that cannot be rendered is skipped without aborting
    // Verified by returning early on the first failure
    #[test]
    fn test_failed_cell_skipped() {
        let catalog = catalog("E");
        let mut grid = Grid::new(4, 1).unwrap();
        grid.place(1, 1, glyph('T'), Rgb::new(0, 0, 0));
        grid.place(4, 1, glyph('E'), Rgb::new(0, 0, 0));
        let mut target = Recorder::default();

        let stats = Compositor::new(50).compose(
            &grid,
            &catalog,
            &mut RenderCache::new(),
            &mut target,
            ComposeOptions::default(),
        );
        assert_eq!(stats, ComposeStats { drawn: 1, skipped: 1 });
        assert_eq!(target.variants.len(), 1);
    }

    // Tests repeated passes reuse cached renderings
    // Verified by clearing the cache between passes
    #[test]
    fn test_passes_share_cache() {
        let catalog = catalog("E");
        let mut grid = Grid::new(3, 3).unwrap();
        grid.place(1, 1, glyph('E'), Rgb::new(0, 0, 0));
        grid.place(3, 3, glyph('E'), Rgb::new(0, 0, 0));
        let mut cache = RenderCache::new();
        let compositor = Compositor::new(50);

        for _ in 0..3 {
            compositor.compose(
                &grid,
                &catalog,
                &mut cache,
                &mut Recorder::default(),
                ComposeOptions::default(),
            );
        }
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats.misses, 1);
        assert_eq!(cache.stats.hits, 5);
    }

    // Tests cell rectangles follow the pitch and label centres sit mid-cell
    // Verified by omitting the border offset
    #[test]
    fn test_cell_rect() {
        let rect = Compositor::new(40).cell_rect(3, 1);
        assert_eq!(rect, CellRect { x: 80.0, y: 0.0, size: 40.0 });
        assert_eq!(rect.center(), (100.0, 20.0));
    }
}
