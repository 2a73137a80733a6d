// src/file.rs

use std::{
    error::Error,
    fs,
    path::{Path, PathBuf},
};

/// Create `dir` (and parents) unless it already exists as a directory.
pub fn ensure_directory(dir: &Path) -> Result<(), Box<dyn Error>> {
    if dir.exists() && !dir.is_dir() {
        return Err(format!("Path exists but is not a directory: {}", dir.display()).into());
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

/// Make sure the directory an output file goes into exists.
pub fn ensure_parent(path: &Path) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    Ok(())
}

pub fn looks_like_dir_hint(p: &Path) -> bool {
    let s = p.to_string_lossy();
    s.ends_with('/') || s.ends_with('\\')
}

pub fn normalize_separators(p: &str) -> String {
    let sep = std::path::MAIN_SEPARATOR;
    p.chars().map(|c| if c == '/' || c == '\\' { sep } else { c }).collect()
}

/// `-o` handling: empty → default file name; a directory (existing or
/// ending in a separator) → default file name inside it; anything else is
/// taken as the file path.
pub fn resolve_out_path(user_o: &str, default_filename: &str) -> Result<PathBuf, Box<dyn Error>> {
    if user_o.is_empty() { return Ok(PathBuf::from(default_filename)); }
    let p = PathBuf::from(normalize_separators(user_o));
    if looks_like_dir_hint(&p) || p.is_dir() {
        ensure_directory(&p)?;
        Ok(p.join(default_filename))
    } else {
        Ok(p)
    }
}

/// Inputs that are prepared by hand (in a spreadsheet) get a message that
/// says so instead of a bare "not found".
pub fn require_curated(path: &Path) -> Result<(), Box<dyn Error>> {
    if path.is_file() { return Ok(()); }
    Err(format!(
        "Prepare the file '{}' in a spreadsheet first (start from the merged table, remove unwanted rows), then rerun.",
        path.display()
    ).into())
}

/// Plain existence check with the path in the message.
pub fn require_input(path: &Path, what: &str) -> Result<(), Box<dyn Error>> {
    if path.is_file() { return Ok(()); }
    Err(format!("{what} not found: {}", path.display()).into())
}
