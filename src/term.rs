use crate::draw::{Color, Pixel, Surface, TILE_SIZE};
use crate::error::{GameError, Result};
use crate::game::{Input, KeySnapshot};
use crate::grid::Grid;
use crate::snake::Direction;
use crate::{Coords, TermInt};
use log::error;
use std::{convert::TryFrom, io::{Stdout, Write, stdout}, time::Duration};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, read, poll};

/// Terminal columns used to draw one grid cell, since characters are about
/// twice as tall as they are wide.
const COLUMNS_PER_CELL: TermInt = 2;
const TILE_STR: &str = "██";

/// Something that takes over the screen and must hand it back afterwards.
pub trait Session {
    fn setup(&mut self) -> Result<()>;

    fn restore(&mut self) -> Result<()>;
}

/// Runs `play` inside `session`. The session is restored even when setup
/// fails halfway, and an error from `play` wins over one from `restore`.
pub fn with_session<S, T, F>(session: &mut S, play: F) -> Result<T>
where
    S: Session,
    F: FnOnce(&mut S) -> Result<T>,
{
    let result = session.setup().and_then(|()| play(session));
    let restored = session.restore();

    if let (Err(_), Err(e)) = (&result, &restored) {
        error!("Failed to restore terminal: {}", e);
    }

    let value = result?;
    restored?;
    Ok(value)
}

/// Draws the board in the terminal, two columns per cell inside a border.
pub struct TermManager {
    width: TermInt,
    height: TermInt,
    board: Coords,
    frame: Coords,
    stdout: Stdout,
}

impl TermManager {
    /// Fails if the terminal can't fit `grid` plus its border.
    pub fn new(grid: &Grid) -> Result<Self> {
        let (width, height) = terminal::size()?;
        let (board, frame) = fit_board(grid, (width, height))?;

        Ok(TermManager { width, height, board, frame, stdout: stdout() })
    }

    pub fn show_message(&mut self, lines: &[&str]) -> Result<()> {
        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 2) as TermInt;
        let center = (self.width / 2, self.height / 2);
        let top_left = (center.0.saturating_sub(msg_width / 2), center.1.saturating_sub(msg_height / 2));

        queue!(self.stdout, style::ResetColor)?;

        for y_diff in 0..msg_height {
            let text = match y_diff.checked_sub(1).and_then(|i| lines.get(i as usize)) {
                Some(line) => format!("{line: ^width$}", line = line, width = msg_width as usize),
                None => " ".repeat(msg_width as usize),
            };
            queue!(self.stdout, cursor::MoveTo(top_left.0, top_left.1 + y_diff), style::Print(text))?;
        }

        self.flush()
    }

    pub fn flush(&mut self) -> Result<()> {
        self.stdout.flush()?;
        Ok(())
    }

    ///////////////////////////////////////////////////////////////////////////

    fn draw_borders(&mut self) -> Result<()> {
        let (width, height) = self.frame;
        let end_x = width - 1;
        let end_y = height - 1;

        queue!(self.stdout, style::ResetColor)?;

        for x in 0..width {
            let ch = if x == 0 || x == end_x {'+'} else {'-'};
            self.print_at((x, 0), ch)?;
            self.print_at((x, end_y), ch)?;
        }

        for y in 1..end_y {
            self.print_at((0, y), '|')?;
            self.print_at((end_x, y), '|')?;
        }

        self.flush()
    }

    fn print_at(&mut self, pos: Coords, ch: char) -> Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))?;
        Ok(())
    }
}

impl Session for TermManager {
    fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking, terminal::Clear(ClearType::All))?;
        self.draw_borders()
    }

    /// Undoes every step of `setup`, even when one of them fails.
    fn restore(&mut self) -> Result<()> {
        let raw = terminal::disable_raw_mode();
        execute!(self.stdout, style::ResetColor, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)?;
        raw?;
        Ok(())
    }
}

/// Columns and rows needed to show `grid` with a border, or `None` when
/// that doesn't even fit in a `TermInt`.
fn needed_size(grid: &Grid) -> Option<Coords> {
    let columns = TermInt::try_from(grid.width()).ok()?
        .checked_mul(COLUMNS_PER_CELL)?
        .checked_add(2)?;
    let rows = TermInt::try_from(grid.height()).ok()?.checked_add(2)?;

    Some((columns, rows))
}

/// Board size in cells and frame size in characters for `grid` on a
/// terminal of `terminal` columns and rows.
fn fit_board(grid: &Grid, terminal: Coords) -> Result<(Coords, Coords)> {
    let too_small = || GameError::TerminalTooSmall {
        needed: (
            i64::from(grid.width()) * i64::from(COLUMNS_PER_CELL) + 2,
            i64::from(grid.height()) + 2,
        ),
        actual: terminal,
    };

    let frame = needed_size(grid).ok_or_else(too_small)?;
    if terminal.0 < frame.0 || terminal.1 < frame.1 {
        return Err(too_small());
    }

    // Both fit since the frame did
    let board = ((frame.0 - 2) / COLUMNS_PER_CELL, frame.1 - 2);

    Ok((board, frame))
}

/// Terminal position of the tile whose top-left pixel is `origin`, or
/// `None` when it falls outside the board.
fn tile_position(origin: Pixel, board: Coords) -> Option<Coords> {
    let tile = TILE_SIZE as i32;
    let (x, y) = (origin.0.div_euclid(tile), origin.1.div_euclid(tile));

    if x < 0 || y < 0 || x >= board.0 as i32 || y >= board.1 as i32 {
        return None;
    }

    Some((x as TermInt * COLUMNS_PER_CELL + 1, y as TermInt + 1))
}

fn to_term_color(color: Color) -> style::Color {
    style::Color::Rgb { r: color.r, g: color.g, b: color.b }
}

impl Surface for TermManager {
    fn fill_rect(&mut self, origin: Pixel, _size: u32, color: Color) -> Result<()> {
        if let Some((col, row)) = tile_position(origin, self.board) {
            queue!(
                self.stdout,
                cursor::MoveTo(col, row),
                style::SetForegroundColor(to_term_color(color)),
                style::Print(TILE_STR)
            )?;
        }

        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.flush()
    }
}

/// Reads keys from the terminal. Needs the raw mode set up by `TermManager`.
pub struct KeyReader;

impl KeyReader {
    pub fn read_key_events_queue(&self) -> Result<Vec<KeyEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(0))? {
            if let Event::Key(ev) = read()? {
                events.push(ev);
            }
        }

        Ok(events)
    }
}

impl Input for KeyReader {
    /// Terminals only report presses, so any direction key pressed since
    /// the last poll counts as held.
    fn poll(&mut self) -> Result<KeySnapshot> {
        let mut keys = KeySnapshot::default();

        for key_ev in self.read_key_events_queue()? {
            apply_key(&mut keys, &key_ev);
        }

        Ok(keys)
    }
}

fn apply_key(keys: &mut KeySnapshot, ev: &KeyEvent) {
    match ev {
        ev if is_ctrl_c(ev) => keys.quit = true,
        KeyEvent { code, modifiers: _ } => match code {
            KeyCode::Char('w') | KeyCode::Up => keys.hold(Direction::Up),
            KeyCode::Char('a') | KeyCode::Left => keys.hold(Direction::Left),
            KeyCode::Char('s') | KeyCode::Down => keys.hold(Direction::Down),
            KeyCode::Char('d') | KeyCode::Right => keys.hold(Direction::Right),
            KeyCode::Char('q') | KeyCode::Esc => keys.quit = true,
            _ => {}
        }
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[derive(Default)]
    struct FakeSession {
        fail_setup: bool,
        fail_restore: bool,
        restored: bool,
    }

    impl Session for FakeSession {
        fn setup(&mut self) -> Result<()> {
            if self.fail_setup {
                return Err(GameError::Io(io::Error::new(io::ErrorKind::Other, "setup")));
            }
            Ok(())
        }

        fn restore(&mut self) -> Result<()> {
            self.restored = true;
            if self.fail_restore {
                return Err(GameError::Io(io::Error::new(io::ErrorKind::Other, "restore")));
            }
            Ok(())
        }
    }

    #[test]
    fn test_needed_size() {
        assert_eq!(needed_size(&Grid::new(10, 10)), Some((22, 12)));
        assert_eq!(needed_size(&Grid::new(40, 20)), Some((82, 22)));
    }

    #[test]
    fn test_needed_size_of_huge_board() {
        assert_eq!(needed_size(&Grid::new(40000, 10)), None);
        assert_eq!(needed_size(&Grid::new(65536, 10)), None);
        assert_eq!(needed_size(&Grid::new(10, 65534)), None);
        assert_eq!(needed_size(&Grid::new(32766, 10)), Some((65534, 12)));
    }

    #[test]
    fn test_fit_board() {
        let (board, frame) = fit_board(&Grid::new(10, 10), (80, 24)).unwrap();
        assert_eq!(board, (10, 10));
        assert_eq!(frame, (22, 12));
    }

    #[test]
    fn test_fit_board_rejects_small_terminal() {
        let err = fit_board(&Grid::new(40, 20), (80, 24)).unwrap_err();
        assert!(matches!(err, GameError::TerminalTooSmall { needed: (82, 22), actual: (80, 24) }));
    }

    #[test]
    fn test_fit_board_rejects_huge_board() {
        let err = fit_board(&Grid::new(65536, 10), (TermInt::MAX, TermInt::MAX)).unwrap_err();
        assert!(matches!(err, GameError::TerminalTooSmall { needed: (131074, 12), .. }));

        assert!(fit_board(&Grid::new(40000, 10), (TermInt::MAX, TermInt::MAX)).is_err());
    }

    #[test]
    fn test_session_restored_after_play() {
        let mut session = FakeSession::default();
        let value = with_session(&mut session, |_| Ok(7)).unwrap();
        assert_eq!(value, 7);
        assert!(session.restored);
    }

    #[test]
    fn test_session_restored_when_setup_fails() {
        let mut session = FakeSession { fail_setup: true, ..Default::default() };
        let mut played = false;

        let res = with_session(&mut session, |_| {
            played = true;
            Ok(())
        });

        assert!(res.is_err());
        assert!(!played);
        assert!(session.restored);
    }

    #[test]
    fn test_session_keeps_play_error_over_restore_error() {
        let mut session = FakeSession { fail_restore: true, ..Default::default() };

        let res: Result<()> = with_session(&mut session, |_| Err(GameError::InputClosed));
        assert!(matches!(res, Err(GameError::InputClosed)));
        assert!(session.restored);
    }

    #[test]
    fn test_session_reports_restore_error() {
        let mut session = FakeSession { fail_restore: true, ..Default::default() };

        let res = with_session(&mut session, |_| Ok(()));
        assert!(matches!(res, Err(GameError::Io(_))));
    }

    #[test]
    fn test_tile_position() {
        assert_eq!(tile_position((0, 0), (10, 10)), Some((1, 1)));
        assert_eq!(tile_position((75, 125), (10, 10)), Some((7, 6)));
        assert_eq!(tile_position((225, 225), (10, 10)), Some((19, 10)));
    }

    #[test]
    fn test_tile_position_off_board() {
        assert_eq!(tile_position((-25, 0), (10, 10)), None);
        assert_eq!(tile_position((250, 0), (10, 10)), None);
        assert_eq!(tile_position((0, 250), (10, 10)), None);
    }

    #[test]
    fn test_keys_map_to_directions() {
        let mut keys = KeySnapshot::default();
        apply_key(&mut keys, &key(KeyCode::Left));
        apply_key(&mut keys, &key(KeyCode::Char('w')));

        assert!(keys.left && keys.up);
        assert!(!keys.down && !keys.right && !keys.quit);
        assert_eq!(keys.direction_or(Direction::Right), Direction::Up);
    }

    #[test]
    fn test_quit_keys() {
        for ev in &[
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            key(KeyCode::Esc),
            key(KeyCode::Char('q')),
        ] {
            let mut keys = KeySnapshot::default();
            apply_key(&mut keys, ev);
            assert!(keys.quit);
        }
    }

    #[test]
    fn test_plain_c_is_ignored() {
        let mut keys = KeySnapshot::default();
        apply_key(&mut keys, &key(KeyCode::Char('c')));
        assert_eq!(keys, KeySnapshot::default());
    }
}
