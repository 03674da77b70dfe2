use rand::seq::SliceRandom;
use rand::Rng;

use crate::draw::{Color, Drawable};
use crate::error::{GameError, Result};
use crate::grid::Grid;
use crate::snake::Snake;
use crate::Cell;

pub struct Food {
    cell: [Cell; 1],
    color: Color,
}

impl Food {
    pub fn new(cell: Cell, color: Color) -> Self {
        Food { cell: [cell], color }
    }

    pub fn cell(&self) -> Cell {
        self.cell[0]
    }

    pub fn reposition(&mut self, cell: Cell) {
        self.cell[0] = cell;
    }
}

impl Drawable for Food {
    fn cells(&self) -> &[Cell] {
        &self.cell
    }

    fn color_at(&self, _index: usize) -> Color {
        self.color
    }
}

/// Picks a random interior cell the snake isn't on.
///
/// Interior cells keep a two-cell margin from every edge, so growing past
/// the food in any direction never lands outside the board.
pub fn place_food<R: Rng + ?Sized>(grid: &Grid, snake: &Snake, rng: &mut R) -> Result<Cell> {
    let choices: Vec<Cell> = grid.interior_cells().filter(|cell| !snake.collides_with(*cell)).collect();

    choices.choose(rng).copied().ok_or(GameError::OutOfSpace {
        width: grid.width(),
        height: grid.height(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::INTERIOR_MARGIN;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const RED: Color = Color::rgb(255, 0, 0);

    fn snake(cells: &[Cell]) -> Snake {
        Snake::new(cells.to_vec(), Color::rgb(0, 0, 255), Color::rgb(255, 255, 0))
    }

    #[test]
    fn test_reposition() {
        let mut food = Food::new((7, 5), RED);
        food.reposition((2, 9));
        assert_eq!(food.cell(), (2, 9));
        assert_eq!(food.cells(), &[(2, 9)]);
    }

    #[test]
    fn test_placement_stays_inside_margin_and_off_snake() {
        let grid = Grid::new(10, 8);
        let s = snake(&[(2, 2), (3, 2), (4, 2), (5, 2), (6, 2), (7, 2)]);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            let (x, y) = place_food(&grid, &s, &mut rng).unwrap();
            assert!(x >= INTERIOR_MARGIN && x < grid.width() - INTERIOR_MARGIN);
            assert!(y >= INTERIOR_MARGIN && y < grid.height() - INTERIOR_MARGIN);
            assert!(!s.collides_with((x, y)));
        }
    }

    #[test]
    fn test_placement_finds_last_free_cell() {
        // 5x6 board: interior is (2,2) and (2,3)
        let grid = Grid::new(5, 6);
        let s = snake(&[(1, 2), (2, 2)]);
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..20 {
            assert_eq!(place_food(&grid, &s, &mut rng).unwrap(), (2, 3));
        }
    }

    #[test]
    fn test_placement_out_of_space() {
        let grid = Grid::new(5, 5);
        let s = snake(&[(2, 1), (2, 2)]);
        let mut rng = StdRng::seed_from_u64(3);

        let err = place_food(&grid, &s, &mut rng).unwrap_err();
        assert!(matches!(err, GameError::OutOfSpace { width: 5, height: 5 }));
    }

    #[test]
    fn test_placement_without_interior() {
        let grid = Grid::new(4, 4);
        let s = snake(&[(0, 0), (1, 0)]);
        let mut rng = StdRng::seed_from_u64(3);

        assert!(place_food(&grid, &s, &mut rng).is_err());
    }
}
