pub mod autotile;
pub mod glyph;
pub mod grid;
