//! Tests for the bordered grid store and pixel mapping

#[cfg(test)]
mod tests {
    use tilepaint::TilepaintError;
    use tilepaint::canvas::color::Rgb;
    use tilepaint::canvas::glyph::GlyphId;
    use tilepaint::canvas::grid::{
        Cell, Grid, cell_at_pixel, cell_origin, viewport_cells,
    };

    const BLACK: Rgb = Rgb::new(0, 0, 0);

    fn glyph(key: char) -> GlyphId {
        GlyphId::new(key).unwrap()
    }

    // Tests a new grid carries a one-cell border around the interior
    // Verified by allocating without the border
    #[test]
    fn test_new_grid_dimensions() {
        let grid = Grid::new(4, 3).unwrap();
        assert_eq!(grid.dimensions(), (6, 5));
        assert_eq!(grid.interior_size(), (4, 3));
        assert_eq!(grid.interior_x(), 1..=4);
        assert_eq!(grid.interior_y(), 1..=3);
        assert_eq!(grid.occupied_count(), 0);
    }

    // Tests zero-sized grids are rejected
    // Verified by removing the dimension guard
    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            Grid::new(0, 3),
            Err(TilepaintError::InvalidDimensions { width: 0, height: 3 })
        ));
    }

    // Tests placement outside the interior clamps to the nearest interior cell
    // Verified by clamping to the full array instead
    #[test]
    fn test_place_clamps_to_interior() {
        let mut grid = Grid::new(5, 5).unwrap();

        assert_eq!(grid.place(0, 0, glyph('E'), BLACK), (1, 1));
        assert_eq!(grid.place(6, 3, glyph('E'), BLACK), (5, 3));
        assert_eq!(grid.place(-40, 99, glyph('E'), BLACK), (1, 5));

        for x in 0..7 {
            assert!(!grid.is_occupied(x, 0));
            assert!(!grid.is_occupied(x, 6));
        }
        for y in 0..7 {
            assert!(!grid.is_occupied(0, y));
            assert!(!grid.is_occupied(6, y));
        }
    }

    // Tests erasing restores an empty cell with no leftover colour
    // Verified by clearing only the glyph on erase
    #[test]
    fn test_place_then_erase() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.place(2, 2, glyph('Q'), Rgb::new(0x84, 0xDA, 0xDE));
        assert_eq!(
            grid.cell(2, 2),
            Cell::Occupied {
                glyph: glyph('Q'),
                color: Rgb::new(0x84, 0xDA, 0xDE)
            }
        );

        assert_eq!(grid.erase(2, 2), (2, 2));
        assert_eq!(grid.cell(2, 2), Cell::Empty);
        assert_eq!(grid, Grid::new(3, 3).unwrap());
    }

    // Tests resize keeps overlapping cells and leaves new area empty
    // Verified by rebuilding an empty grid on resize
    #[test]
    fn test_resize_preserves_overlap() {
        let mut grid = Grid::new(4, 4).unwrap();
        grid.place(1, 1, glyph('E'), BLACK);
        grid.place(3, 2, glyph('T'), BLACK);

        grid.resize(8, 6).unwrap();
        assert_eq!(grid.interior_size(), (8, 6));
        assert!(grid.is_occupied(1, 1));
        assert_eq!(
            grid.cell(3, 2),
            Cell::Occupied {
                glyph: glyph('T'),
                color: BLACK
            }
        );
        assert_eq!(grid.occupied_count(), 2);
        assert!(!grid.is_occupied(7, 5));
    }

    // Tests shrinking drops cells that would land on the new border
    // Verified by copying every in-bounds old cell
    #[test]
    fn test_resize_shrink_keeps_border_empty() {
        let mut grid = Grid::new(5, 5).unwrap();
        grid.place(2, 2, glyph('E'), BLACK);
        grid.place(3, 3, glyph('E'), BLACK);
        grid.place(5, 5, glyph('E'), BLACK);

        grid.resize(2, 2).unwrap();
        assert_eq!(grid.dimensions(), (4, 4));
        assert!(grid.is_occupied(2, 2));
        assert!(!grid.is_occupied(3, 3));
        assert_eq!(grid.occupied_count(), 1);
    }

    // Tests a rejected resize leaves the grid untouched
    // Verified by reallocating before validating
    #[test]
    fn test_degenerate_resize_rejected() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.place(2, 2, glyph('E'), BLACK);
        let before = grid.clone();

        assert!(grid.resize(0, 4).is_err());
        assert!(grid.resize_viewport(-10, 100, 50).is_err());
        assert_eq!(grid, before);
    }

    // Tests grids beyond the allocation limit are rejected and leave the grid as is
    // Verified by allocating the requested shape unchecked
    #[test]
    fn test_oversized_dimensions_rejected() {
        assert!(matches!(
            Grid::new(usize::MAX, 1),
            Err(TilepaintError::InvalidDimensions { .. })
        ));
        assert!(Grid::new(1 << 13, 1 << 13).is_err());

        let mut grid = Grid::new(3, 3).unwrap();
        grid.place(2, 2, glyph('E'), BLACK);
        assert!(matches!(
            grid.resize(4_294_967_295, 4_294_967_295),
            Err(TilepaintError::InvalidDimensions { .. })
        ));
        assert!(grid.resize_viewport(i64::MAX, i64::MAX, 1).is_err());
        assert_eq!(grid.interior_size(), (3, 3));
        assert!(grid.is_occupied(2, 2));
    }

    // Tests clear empties every cell without changing size
    // Verified by reallocating to a default size on clear
    #[test]
    fn test_clear() {
        let mut grid = Grid::new(3, 2).unwrap();
        grid.place(1, 1, glyph('E'), BLACK);
        grid.place(3, 2, glyph('E'), BLACK);
        grid.clear();
        assert_eq!(grid.occupied_count(), 0);
        assert_eq!(grid.interior_size(), (3, 2));
    }

    // Tests occupied cells are yielded in row-major order
    // Verified by iterating columns first
    #[test]
    fn test_occupied_cells_row_major() {
        let mut grid = Grid::new(4, 4).unwrap();
        grid.place(4, 1, glyph('E'), BLACK);
        grid.place(1, 2, glyph('Q'), BLACK);
        grid.place(2, 1, glyph('T'), BLACK);

        let order: Vec<(usize, usize)> = grid.occupied_cells().map(|c| (c.x, c.y)).collect();
        assert_eq!(order, vec![(2, 1), (4, 1), (1, 2)]);
    }

    // Tests viewport sizing rounds to the nearest cell with a floor of one
    // Verified by truncating instead of rounding
    #[test]
    fn test_viewport_cells() {
        assert_eq!(viewport_cells(1280, 720, 50).unwrap(), (26, 14));
        assert_eq!(viewport_cells(74, 76, 50).unwrap(), (1, 2));
        assert_eq!(viewport_cells(10, 10, 50).unwrap(), (1, 1));
        assert!(viewport_cells(0, 10, 50).is_err());
        assert!(viewport_cells(10, 10, 0).is_err());

        let grid = Grid::for_viewport(500, 250, 50).unwrap();
        assert_eq!(grid.interior_size(), (10, 5));
    }

    // Tests pointer mapping puts pixel 0 in the first interior cell
    // Verified by dropping the +1 border offset
    #[test]
    fn test_cell_at_pixel() {
        assert_eq!(cell_at_pixel(0.0, 0.0, 50), (1, 1));
        assert_eq!(cell_at_pixel(49.9, 50.0, 50), (1, 2));
        assert_eq!(cell_at_pixel(-1.0, 125.0, 50), (0, 3));
    }

    // Tests pointer positions far outside any grid saturate instead of overflowing
    // Verified by adding the border offset without saturation
    #[test]
    fn test_cell_at_pixel_extremes() {
        assert_eq!(cell_at_pixel(1e300, 10.0, 50), (i64::MAX, 1));
        assert_eq!(cell_at_pixel(f64::NEG_INFINITY, 0.0, 50), (i64::MIN + 1, 1));
        assert_eq!(cell_at_pixel(f64::INFINITY, f64::NAN, 50), (i64::MAX, 1));

        let mut grid = Grid::new(4, 4).unwrap();
        let (x, y) = cell_at_pixel(1e300, -1e300, 50);
        assert_eq!(grid.place(x, y, glyph('E'), BLACK), (4, 1));
    }

    // Tests cell origins align with the pointer mapping
    // Verified by offsetting the origin by the border
    #[test]
    fn test_cell_origin_matches_pointer() {
        let (x, y) = cell_origin(3, 2, 50);
        assert!((x - 100.0).abs() < f32::EPSILON);
        assert!((y - 50.0).abs() < f32::EPSILON);
        assert_eq!(cell_at_pixel(f64::from(x), f64::from(y), 50), (3, 2));
    }

    // Tests neighbour lookups on the border are rejected
    // Verified by removing the interior guard
    #[test]
    fn test_neighbor_occupancy_interior_only() {
        let grid = Grid::new(2, 2).unwrap();
        assert!(grid.neighbor_occupancy(1, 1).is_ok());
        assert!(grid.neighbor_occupancy(3, 1).is_err());
        assert!(grid.neighbor_occupancy(1, 0).is_err());
    }
}
