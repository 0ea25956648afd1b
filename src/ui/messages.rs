//! Status lines for the CLI.
//!
//! Everything except [`header`] is written to stderr: `print` and `events`
//! emit the feed on stdout and must stay pipeable. Colors are dropped when
//! the target stream is not a terminal or `NO_COLOR` is set.

use crate::utils::colors::{BLUE, BOLD, GREEN, RED, RESET, YELLOW};
use std::fmt;
use std::io::{self, IsTerminal};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Info,
    Success,
    Warning,
    Error,
}

impl Level {
    fn style(self) -> (&'static str, &'static str) {
        match self {
            Level::Info => (BLUE, "ℹ️"),
            Level::Success => (GREEN, "✅"),
            Level::Warning => (YELLOW, "⚠️"),
            Level::Error => (RED, "❌"),
        }
    }
}

fn use_color(is_terminal: bool) -> bool {
    is_terminal && std::env::var_os("NO_COLOR").is_none()
}

fn status_line(level: Level, msg: &dyn fmt::Display, color: bool) -> String {
    let (fg, icon) = level.style();
    if color {
        format!("{fg}{BOLD}{icon} {RESET}{msg}")
    } else {
        format!("{icon} {msg}")
    }
}

fn status(level: Level, msg: &dyn fmt::Display) {
    let color = use_color(io::stderr().is_terminal());
    eprintln!("{}", status_line(level, msg, color));
}

pub fn info<T: fmt::Display>(msg: T) {
    status(Level::Info, &msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    status(Level::Success, &msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    status(Level::Warning, &msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    status(Level::Error, &msg);
}

/// Section header above stdout reports (`inspect`).
pub fn header<T: fmt::Display>(msg: T) {
    if use_color(io::stdout().is_terminal()) {
        println!("{BLUE}{BOLD}====================== {msg}{RESET}\n");
    } else {
        println!("====================== {msg}\n");
    }
}
