use std::collections::HashSet;

use crate::draw::{Color, Drawable};
use crate::grid::Grid;
use crate::Cell;
use Direction::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn unit(&self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn step_from(&self, (x, y): Cell) -> Cell {
        let (dx, dy) = self.unit();
        (x + dx, y + dy)
    }
}

/// Cells run from the tail (index 0) to the head (last).
pub struct Snake {
    body: Vec<Cell>,
    colors: Vec<Color>,
    body_color: Color,
    head_color: Color,
}

impl Snake {
    /// Panics if `body` has fewer than two cells.
    pub fn new(body: Vec<Cell>, body_color: Color, head_color: Color) -> Self {
        assert!(body.len() >= 2, "a snake starts with at least two cells");

        let mut colors = vec![body_color; body.len()];
        if let Some(last) = colors.last_mut() {
            *last = head_color;
        }

        Snake { body, colors, body_color, head_color }
    }

    pub fn body(&self) -> &[Cell] {
        &self.body
    }

    pub fn head(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    /// Drops the tail and pushes a new head one step in `direction`.
    pub fn move_step(&mut self, direction: Direction) {
        let new_head = direction.step_from(self.head());
        self.body.remove(0);
        self.body.push(new_head);
    }

    /// Adds a head one step past `food` in `direction`. Existing cells stay put.
    pub fn grow(&mut self, food: Cell, direction: Direction) {
        self.body.push(direction.step_from(food));

        if let Some(old_head) = self.colors.last_mut() {
            *old_head = self.body_color;
        }
        self.colors.push(self.head_color);
    }

    pub fn collides_with(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Dead when any two segments share a cell or any segment left the grid.
    pub fn is_dead(&self, grid: &Grid) -> bool {
        let mut seen = HashSet::with_capacity(self.body.len());

        self.body.iter().any(|&cell| !grid.contains(cell) || !seen.insert(cell))
    }
}

impl Drawable for Snake {
    fn cells(&self) -> &[Cell] {
        &self.body
    }

    fn color_at(&self, index: usize) -> Color {
        self.colors[index]
    }
}
