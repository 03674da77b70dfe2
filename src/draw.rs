use crate::error::Result;
use crate::Cell;

/// Side of one grid cell, in pixel units.
pub const TILE_SIZE: u32 = 25;

pub type Pixel = (i32, i32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }
}

/// Something that can paint solid squares and then show them all at once.
pub trait Surface {
    fn fill_rect(&mut self, origin: Pixel, size: u32, color: Color) -> Result<()>;

    /// Pushes everything filled since the last call to the screen.
    fn present(&mut self) -> Result<()>;
}

pub fn tile_origin((x, y): Cell) -> Pixel {
    (x * TILE_SIZE as i32, y * TILE_SIZE as i32)
}

/// A set of cells with a color for each of them.
pub trait Drawable {
    fn cells(&self) -> &[Cell];

    fn color_at(&self, index: usize) -> Color;

    /// Queues one tile per cell. Nothing is shown until `Surface::present`.
    fn draw(&self, surface: &mut dyn Surface) -> Result<()> {
        for (i, cell) in self.cells().iter().enumerate() {
            surface.fill_rect(tile_origin(*cell), TILE_SIZE, self.color_at(i))?;
        }

        Ok(())
    }
}
