use crate::draw::{Color, Surface, tile_origin, TILE_SIZE};
use crate::error::Result;
use crate::Cell;

const LIGHT_GREEN: Color = Color::rgb(0, 255, 0);
const DARK_GREEN: Color = Color::rgb(0, 224, 0);

/// Food never spawns closer than this to any edge of the board.
pub const INTERIOR_MARGIN: i32 = 2;

/// The playable area. Fixed once the game starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
}

impl Grid {
    /// Panics on non-positive sizes; user input goes through `prompt` first.
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be positive");
        Grid { width, height }
    }

    pub fn dimensions(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn contains(&self, (x, y): Cell) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Cells at least `INTERIOR_MARGIN` away from every edge, row by row.
    pub fn interior_cells(&self) -> impl Iterator<Item = Cell> {
        let (w, h) = (self.width, self.height);
        (INTERIOR_MARGIN..h - INTERIOR_MARGIN)
            .flat_map(move |y| (INTERIOR_MARGIN..w - INTERIOR_MARGIN).map(move |x| (x, y)))
    }

    /// Size of the board in pixels at `TILE_SIZE` per cell.
    pub fn pixel_size(&self) -> (u64, u64) {
        let tile = u64::from(TILE_SIZE);
        (self.width as u64 * tile, self.height as u64 * tile)
    }

    /// Paints the checkerboard background, wiping the previous frame.
    pub fn draw_board(&self, surface: &mut dyn Surface) -> Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let color = if (x + y) % 2 == 0 { LIGHT_GREEN } else { DARK_GREEN };
                surface.fill_rect(tile_origin((x, y)), TILE_SIZE, color)?;
            }
        }

        Ok(())
    }
}
