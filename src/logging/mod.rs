//! Asynchronous line logger: a simple leveled logger with basic options.
//! There is no pattern support, no rotation and no fail-safe mechanism; one
//! background consumer drains a rendezvous channel of formatted lines and
//! writes them to the configured sink.

mod formatters;
mod logger;
mod sinks;

pub use logger::{debug, error, fatal, info, init, log, shutdown, warn, Builder, Logger};

use std::fmt;

/// Logging level; ordered, DEBUG lowest and FATAL highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl Level {
    pub fn name(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Fatal => "FATAL",
        }
    }
}

impl From<Level> for i32 {
    fn from(level: Level) -> i32 {
        match level {
            Level::Debug => 0,
            Level::Info => 1,
            Level::Warn => 2,
            Level::Error => 3,
            Level::Fatal => 4,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Destination for rendered log lines. Owned by the single consumer thread,
/// so writes take `&mut self`; the logger discards write errors.
pub trait LogSink: Send {
    fn write_line(&mut self, line: &str) -> eyre::Result<()>;
    fn flush(&mut self);
}
