mod config;
mod draw;
mod error;
mod food;
mod game;
mod grid;
mod prompt;
mod snake;
mod term;

use std::fs::File;
use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use simplelog::{Config, WriteLogger};

use crate::config::Cli;
use crate::game::{GameState, RunOutcome};
use crate::grid::Grid;
use crate::term::{KeyReader, TermManager};

pub type TermInt = u16;
pub type Coords = (u16, u16);

/// Grid position, `(x, y)` from the top-left corner.
pub type Cell = (i32, i32);

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        let file = File::create(path).with_context(|| format!("Failed to create log file {}", path.display()))?;
        WriteLogger::init(cli.log_level.into(), Config::default(), file).context("Failed to initialize logger")?;
    }

    let (width, height) = match cli.dimensions() {
        Some(dims) => dims,
        None => {
            let stdin = io::stdin();
            prompt::read_dimensions(&mut stdin.lock(), &mut io::stdout())?
        }
    };

    let grid = Grid::new(width, height);
    let mut state = GameState::new(grid)?;
    let mut term = TermManager::new(&grid)?;
    let settings = cli.settings();

    let outcome = term::with_session(&mut term, |term| {
        let outcome = game::run(&mut state, &mut *term, &mut KeyReader, &settings)?;
        if outcome == RunOutcome::SnakeDied {
            let score = format!("Score: {}", state.score());
            term.show_message(&["Game over!", &score])?;
            std::thread::sleep(settings.death_pause);
        }
        Ok(outcome)
    })?;

    info!(
        "Game ended: {:?}, score {}, length {}, heading {:?}",
        outcome,
        state.score(),
        state.snake().body().len(),
        state.direction()
    );
    Ok(())
}
