//! Breakout brick layouts
//!
//! The default level is a static 8x5 grid with one color per row. An
//! alternate source reads brick placement from an 8x5 image: an opaque
//! pixel places a brick of that pixel's color, anything else leaves a gap.

use std::path::Path;

use crate::consts::*;
use crate::error::ArcadeError;
use crate::palette;
use crate::{Color, Result};

/// Row colors of the static level, top to bottom
pub const ROW_COLORS: [Color; BRICK_ROWS] = [
    palette::RED,
    palette::ORANGE,
    palette::YELLOW,
    palette::GREEN,
    palette::BLUE,
];

/// Which grid cells hold a brick, and in which color
#[derive(Debug, Clone, PartialEq)]
pub struct BrickLayout {
    /// Row-major, `BRICK_COUNT` cells
    pub cells: [Option<Color>; BRICK_COUNT],
}

impl Default for BrickLayout {
    fn default() -> Self {
        Self::classic()
    }
}

impl BrickLayout {
    /// Full grid, colored by row
    pub fn classic() -> Self {
        let mut cells = [None; BRICK_COUNT];
        for (i, cell) in cells.iter_mut().enumerate() {
            *cell = Some(ROW_COLORS[i / BRICK_COLUMNS]);
        }
        Self { cells }
    }

    /// Build a layout from raw RGBA8 pixels of a `BRICK_COLUMNS x BRICK_ROWS` image
    pub fn from_alpha_mask(width: usize, height: usize, rgba: &[u8]) -> Result<Self> {
        if width != BRICK_COLUMNS || height != BRICK_ROWS || rgba.len() != width * height * 4 {
            return Err(ArcadeError::LayoutSize {
                expected_w: BRICK_COLUMNS,
                expected_h: BRICK_ROWS,
                actual_w: width,
                actual_h: height,
            });
        }

        let mut cells = [None; BRICK_COUNT];
        for (cell, px) in cells.iter_mut().zip(rgba.chunks_exact(4)) {
            if px[3] == 255 {
                *cell = Some([px[0], px[1], px[2], px[3]]);
            }
        }
        Ok(Self { cells })
    }

    /// Decode a PNG mask from disk
    pub fn load_png(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let img = image::open(path)?.to_rgba8();
        let layout = Self::from_alpha_mask(img.width() as usize, img.height() as usize, img.as_raw())?;
        log::info!(
            "Loaded brick layout from {} ({} bricks)",
            path.display(),
            layout.brick_count()
        );
        Ok(layout)
    }

    pub fn brick_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

/// Top-left corner of the brick at grid cell `index`.
/// Gaps still advance the column offset, so positions never shift.
pub fn brick_origin(index: usize) -> (f32, f32) {
    let col = (index % BRICK_COLUMNS) as f32;
    let row = (index / BRICK_COLUMNS) as f32;
    (
        BRICK_MARGIN + col * (BRICK_WIDTH + BRICK_MARGIN),
        BRICK_MARGIN + row * (BRICK_HEIGHT + BRICK_MARGIN),
    )
}
