use std::thread::sleep;

use log::{debug, info};
use rand::rngs::ThreadRng;
use rand::Rng;

use crate::config::Settings;
use crate::draw::{Color, Drawable, Surface};
use crate::error::{GameError, Result};
use crate::food::{place_food, Food};
use crate::grid::Grid;
use crate::snake::{Snake, Direction::{*, self}};
use crate::Cell;

const SNAKE_BODY_COLOR: Color = Color::rgb(0, 0, 255);
const SNAKE_HEAD_COLOR: Color = Color::rgb(255, 255, 0);
const FOOD_COLOR: Color = Color::rgb(255, 0, 0);

const START_BODY: [Cell; 2] = [(3, 5), (4, 5)];
const START_FOOD: Cell = (7, 5);
const START_DIRECTION: Direction = Right;

/// Which direction keys were down when the input was last polled.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct KeySnapshot {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub quit: bool,
}

impl KeySnapshot {
    pub fn is_held(&self, direction: Direction) -> bool {
        match direction {
            Up => self.up,
            Down => self.down,
            Left => self.left,
            Right => self.right,
        }
    }

    pub fn hold(&mut self, direction: Direction) {
        match direction {
            Up => self.up = true,
            Down => self.down = true,
            Left => self.left = true,
            Right => self.right = true,
        }
    }

    /// First held key in the order up, down, left, right; `current` if none is.
    pub fn direction_or(&self, current: Direction) -> Direction {
        [Up, Down, Left, Right]
            .iter()
            .copied()
            .find(|dir| self.is_held(*dir))
            .unwrap_or(current)
    }
}

pub trait Input {
    /// Reads the key state once. Called at the start of every tick.
    fn poll(&mut self) -> Result<KeySnapshot>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Running,
    /// The snake is dead. Every later tick is a no-op.
    Terminated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    SnakeDied,
    Interrupted,
}

pub struct GameState<R: Rng = ThreadRng> {
    grid: Grid,
    snake: Snake,
    food: Food,
    direction: Direction,
    dead: bool,
    ticks: u64,
    score: u64,
    rng: R,
}

impl GameState {
    pub fn new(grid: Grid) -> Result<Self> {
        Self::with_rng(grid, rand::thread_rng())
    }
}

impl<R: Rng> GameState<R> {
    pub fn with_rng(grid: Grid, mut rng: R) -> Result<Self> {
        let snake = Snake::new(START_BODY.to_vec(), SNAKE_BODY_COLOR, SNAKE_HEAD_COLOR);
        if snake.is_dead(&grid) {
            let (width, height) = grid.dimensions();
            return Err(GameError::BoardTooSmall { width, height });
        }

        let start_food_fits = grid.interior_cells().any(|cell| cell == START_FOOD);
        let food_cell = if start_food_fits && !snake.collides_with(START_FOOD) {
            START_FOOD
        } else {
            place_food(&grid, &snake, &mut rng)?
        };

        Ok(GameState {
            grid,
            snake,
            food: Food::new(food_cell, FOOD_COLOR),
            direction: START_DIRECTION,
            dead: false,
            ticks: 0,
            score: 0,
            rng,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[cfg(test)]
    fn food(&self) -> &Food {
        &self.food
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[cfg(test)]
    fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Food eaten so far.
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Paints the board, then the food, then the snake, and shows the frame.
    pub fn render(&self, surface: &mut dyn Surface) -> Result<()> {
        self.grid.draw_board(surface)?;
        self.food.draw(surface)?;
        self.snake.draw(surface)?;
        surface.present()
    }

    /// Advances the game by one step.
    ///
    /// When the head sits on the food the snake grows one cell past it and
    /// does not move this tick, so its body stays contiguous.
    pub fn tick(&mut self, keys: &KeySnapshot) -> Result<TickOutcome> {
        if self.dead {
            return Ok(TickOutcome::Terminated);
        }

        self.direction = keys.direction_or(self.direction);

        let food = self.food.cell();
        if self.snake.head() == food {
            self.snake.grow(food, self.direction);
            self.score += 1;

            let next = place_food(&self.grid, &self.snake, &mut self.rng)?;
            self.food.reposition(next);
            debug!("Ate food at {:?}, length {}, next food at {:?}", food, self.snake.body().len(), next);
        } else {
            self.snake.move_step(self.direction);
        }

        self.ticks += 1;

        if self.snake.is_dead(&self.grid) {
            self.dead = true;
            info!(
                "Snake died after {} ticks heading {:?}, length {}",
                self.ticks,
                self.direction,
                self.snake.body().len()
            );
            return Ok(TickOutcome::Terminated);
        }

        Ok(TickOutcome::Running)
    }

    #[cfg(test)]
    fn place_food_at(&mut self, cell: Cell) {
        self.food.reposition(cell);
    }
}

/// Plays until the snake dies or the player quits.
///
/// Each round renders the current state, polls the keys once, applies one
/// tick and then sleeps for `settings.tick_interval`. A dead snake is drawn
/// one last time and left on screen for `settings.death_pause`.
pub fn run<R, S, I>(state: &mut GameState<R>, surface: &mut S, input: &mut I, settings: &Settings) -> Result<RunOutcome>
where
    R: Rng,
    S: Surface,
    I: Input,
{
    let (px_width, px_height) = state.grid().pixel_size();
    info!(
        "Starting on a {}x{} board ({}x{} px)",
        state.grid().width(),
        state.grid().height(),
        px_width,
        px_height
    );

    loop {
        state.render(surface)?;

        let keys = input.poll()?;
        if keys.quit {
            info!("Quit after {} ticks, score {}", state.ticks(), state.score());
            return Ok(RunOutcome::Interrupted);
        }

        if state.tick(&keys)? == TickOutcome::Terminated {
            state.render(surface)?;
            sleep(settings.death_pause);
            return Ok(RunOutcome::SnakeDied);
        }

        sleep(settings.tick_interval);
    }
}
