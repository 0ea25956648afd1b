// src/export/fs_utils.rs

use crate::errors::{AppError, AppResult};
use crate::export::notify_export_success;
use crate::ui::messages::{info, warning};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Whether `path` may be created or overwritten.
///
/// - missing file → Ok
/// - existing file with `force` → Ok
/// - existing file without `force` → ask on stdin
pub fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }

    warning(format!("The file '{}' already exists.", path.display()));

    print!("Overwrite? [y/N]: ");
    io::stdout().flush().ok();

    let mut answer = String::new();
    io::stdin().read_line(&mut answer).map_err(AppError::from)?;
    let ans = answer.trim().to_ascii_lowercase();

    if ans == "y" || ans == "yes" {
        info("Existing file will be overwritten.");
        Ok(())
    } else {
        Err(AppError::Output(format!(
            "'{}' exists and was not overwritten (use --force)",
            path.display()
        )))
    }
}

/// Write `content` to `path`, creating parent directories as needed.
pub fn write_output(path: &Path, content: &str, label: &str, force: bool) -> AppResult<()> {
    ensure_writable(path, force)?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;

    notify_export_success(label, path);
    Ok(())
}
