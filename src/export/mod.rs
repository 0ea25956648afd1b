// src/export/mod.rs

mod fs_utils;
pub mod ics;
pub mod json;
pub mod preview;

pub use fs_utils::{ensure_writable, write_output};
pub use ics::render_calendar;
pub use json::EventView;

use crate::ui::messages::success;
use std::path::Path;

/// Shared completion line for files written by the CLI.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} written: {}", path.display()));
}
