// src/file.rs

use std::path::Path;
use std::{fs, io};

/// Create the parent directory of `path` if it names one.
pub fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Write `text` to `path`, creating directories as needed.
pub fn write_text(path: &Path, text: &str) -> io::Result<()> {
    ensure_parent_dir(path)?;
    fs::write(path, text)
}
