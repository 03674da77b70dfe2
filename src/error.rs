use thiserror::Error;

use crate::TermInt;

pub type Result<T> = std::result::Result<T, GameError>;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("invalid dimensions {0:?}, expected two positive integers as width,height")]
    InvalidDimensions(String),

    #[error("input closed before board dimensions were entered")]
    InputClosed,

    /// No interior cell is left for the food.
    #[error("no free interior cell left to place food on a {width}x{height} board")]
    OutOfSpace { width: i32, height: i32 },

    #[error("a {width}x{height} board cannot hold the starting snake")]
    BoardTooSmall { width: i32, height: i32 },

    #[error("terminal is {actual:?} but the board needs at least {needed:?} (columns, rows)")]
    TerminalTooSmall { needed: (i64, i64), actual: (TermInt, TermInt) },

    #[error("terminal error: {0}")]
    Terminal(#[from] crossterm::ErrorKind),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
