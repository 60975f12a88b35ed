//! Glyph atlas grid layout.
//!
//! Rasterization happens on the host; this only decides where each glyph goes
//! and how a vertex finds its cell.

use glam::Vec2;

use crate::error::AtlasError;
use crate::math::glsl_mod;
use crate::uniforms::{UniformSink, UniformSlot};

pub const DEFAULT_GLYPHS: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ!@#$%^&*()_+-=[]{}|:;?<>,.";
pub const DEFAULT_FONT_FAMILY: &str = "Cabin Sketch";
pub const DEFAULT_GRID_COLS: u32 = 16;
pub const DEFAULT_CELL_SIZE: u32 = 128;

/// Font size and baseline, as fractions of the cell size.
const FONT_SCALE: f32 = 0.8;

#[derive(Debug, Clone, PartialEq)]
pub struct AtlasLayout {
    glyphs: Vec<char>,
    grid_cols: u32,
    grid_rows: u32,
    cell_size: u32,
}

impl AtlasLayout {
    pub fn new(glyphs: &str, grid_cols: u32, cell_size: u32) -> Result<Self, AtlasError> {
        if grid_cols == 0 {
            return Err(AtlasError::ZeroColumns);
        }
        if cell_size == 0 {
            return Err(AtlasError::ZeroCellSize);
        }
        let glyphs: Vec<char> = glyphs.chars().collect();
        if glyphs.is_empty() {
            return Err(AtlasError::EmptyGlyphSet);
        }
        for (again, c) in glyphs.iter().enumerate() {
            if let Some(first) = glyphs[..again].iter().position(|g| g == c) {
                return Err(AtlasError::DuplicateGlyph { glyph: *c, first, again });
            }
        }
        let grid_rows = (glyphs.len() as u32).div_ceil(grid_cols);
        Ok(Self {
            glyphs,
            grid_cols,
            grid_rows,
            cell_size,
        })
    }

    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    pub fn grid_cols(&self) -> u32 {
        self.grid_cols
    }

    pub fn grid_rows(&self) -> u32 {
        self.grid_rows
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Canvas size in pixels: `(cols * cell, rows * cell)`.
    pub fn canvas_size(&self) -> (u32, u32) {
        (self.grid_cols * self.cell_size, self.grid_rows * self.cell_size)
    }

    pub fn font_px(&self) -> f32 {
        self.cell_size as f32 * FONT_SCALE
    }

    /// CSS font shorthand for drawing, e.g. `normal 102.4px Cabin Sketch`.
    pub fn font_spec(&self, family: &str) -> String {
        format!("normal {}px {}", self.font_px(), family)
    }

    /// `(col, row)` of glyph `i`, filled left to right, top to bottom.
    pub fn cell_of(&self, i: usize) -> Option<(u32, u32)> {
        if i >= self.glyphs.len() {
            return None;
        }
        let i = i as u32;
        Some((i % self.grid_cols, i / self.grid_cols))
    }

    /// Draw anchor for glyph `i`: horizontally centred, baseline at 80% of the cell.
    pub fn glyph_anchor(&self, i: usize) -> Option<(f32, f32)> {
        let (col, row) = self.cell_of(i)?;
        let cell = self.cell_size as f32;
        Some((col as f32 * cell + cell / 2.0, row as f32 * cell + cell * FONT_SCALE))
    }

    /// Normalized atlas uv for a vertex: the cell picked by `ring_index`
    /// (wrapping over the glyph set), offset by the vertex corner `uv`.
    pub fn cell_uv(&self, ring_index: f32, uv: Vec2) -> Vec2 {
        let len = self.glyphs.len() as f32;
        let cols = self.grid_cols as f32;
        let cell = glsl_mod(ring_index.floor(), len);
        let col = glsl_mod(cell, cols);
        let row = (cell / cols).floor();
        Vec2::new((col + uv.x) / cols, (row + uv.y) / self.grid_rows as f32)
    }

    /// Publish the grid dimensions the vertex program needs for its lookup.
    pub fn publish<S: UniformSink + ?Sized>(&self, sink: &mut S) {
        sink.set_uniform(UniformSlot::NumTextureGridCols, self.grid_cols as f32);
        sink.set_uniform(UniformSlot::NumTextureGridRows, self.grid_rows as f32);
        sink.set_uniform(UniformSlot::TextureTxtLength, self.glyphs.len() as f32);
    }
}

impl Default for AtlasLayout {
    fn default() -> Self {
        let glyphs = DEFAULT_GLYPHS.chars().collect::<Vec<_>>();
        let grid_rows = (glyphs.len() as u32).div_ceil(DEFAULT_GRID_COLS);
        Self {
            glyphs,
            grid_cols: DEFAULT_GRID_COLS,
            grid_rows,
            cell_size: DEFAULT_CELL_SIZE,
        }
    }
}
