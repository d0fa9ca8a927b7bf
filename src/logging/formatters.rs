use std::borrow::Cow;

use chrono::Local;

const RESET: &str = "\x1b[0m";

/// Renders one log line: `[HH:MM:SS] [LEVEL] src: msg`, wrapped in an ANSI
/// color pair when writing straight to stdout.
pub struct LineFormatter {
    use_ansi: bool,
}

impl LineFormatter {
    pub fn new(use_ansi: bool) -> Self {
        Self { use_ansi }
    }

    pub fn format(&self, level: i32, src: &str, msg: &str) -> String {
        let stamp = Local::now().format("%H:%M:%S");
        if self.use_ansi {
            format!(
                "{}[{}] [{}] {}: {}{}",
                color_for(level),
                stamp,
                level_label(level),
                src,
                msg,
                RESET,
            )
        } else {
            format!("[{}] [{}] {}: {}", stamp, level_label(level), src, msg)
        }
    }
}

fn color_for(level: i32) -> &'static str {
    match level {
        0 => "\x1b[36m",   // DEBUG, cyan
        1 => "\x1b[97m",   // INFO, bright white
        2 => "\x1b[33m",   // WARN, yellow
        3 => "\x1b[31m",   // ERROR, red
        4 => "\x1b[1;31m", // FATAL, bold red
        _ => RESET,
    }
}

fn level_label(level: i32) -> Cow<'static, str> {
    match level {
        0 => Cow::Borrowed("DEBUG"),
        1 => Cow::Borrowed("INFO"),
        2 => Cow::Borrowed("WARN"),
        3 => Cow::Borrowed("ERROR"),
        4 => Cow::Borrowed("FATAL"),
        n => Cow::Owned(format!("LEVEL:{n}")),
    }
}
