use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Pause between two ticks when nothing else is asked for.
pub const DEFAULT_TICK_MS: u64 = 110;

#[derive(Debug, Parser)]
#[command(name = "grid-snake")]
#[command(version, about = "Single-player snake on a fixed-size grid")]
pub struct Cli {
    /// Board width in cells (asked for interactively when omitted)
    #[arg(long, requires = "height", value_parser = clap::value_parser!(i32).range(1..))]
    pub width: Option<i32>,

    /// Board height in cells (asked for interactively when omitted)
    #[arg(long, requires = "width", value_parser = clap::value_parser!(i32).range(1..))]
    pub height: Option<i32>,

    /// Milliseconds between two game ticks
    #[arg(long, default_value_t = DEFAULT_TICK_MS)]
    pub tick_ms: u64,

    /// Write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Verbosity of the log file
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Knobs the game loop reads while running.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub tick_interval: Duration,
    /// How long the dead snake stays on screen before the game ends.
    pub death_pause: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            tick_interval: Duration::from_millis(DEFAULT_TICK_MS),
            death_pause: Duration::from_secs(1),
        }
    }
}

impl Cli {
    pub fn dimensions(&self) -> Option<(i32, i32)> {
        self.width.zip(self.height)
    }

    pub fn settings(&self) -> Settings {
        Settings {
            tick_interval: Duration::from_millis(self.tick_ms),
            ..Default::default()
        }
    }
}
