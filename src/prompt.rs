use std::io::{BufRead, Write};

use log::warn;

use crate::error::{GameError, Result};

const QUESTION: &str = "What size do you want the game to be? Width,height";
const RETRY: &str = "Invalid dimensions, please enter again";

/// Parses `width,height`. Both must be positive integers.
pub fn parse_dimensions(line: &str) -> Result<(i32, i32)> {
    let invalid = || GameError::InvalidDimensions(line.trim().to_string());

    let mut parts = line.trim().split(',').map(|part| part.trim().parse::<i32>());
    match (parts.next(), parts.next(), parts.next()) {
        (Some(Ok(w)), Some(Ok(h)), None) if w > 0 && h > 0 => Ok((w, h)),
        _ => Err(invalid()),
    }
}

/// Asks until a valid answer comes in. Fails only when the input runs dry.
pub fn read_dimensions<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<(i32, i32)> {
    writeln!(output, "{}", QUESTION)?;

    loop {
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(GameError::InputClosed);
        }

        match parse_dimensions(&line) {
            Ok(dims) => return Ok(dims),
            Err(e) => {
                warn!("Rejected board size: {}", e);
                writeln!(output, "{}", RETRY)?;
            }
        }
    }
}
