// Bearer token lookup. An explicit token always wins; otherwise the test
// case folder and each of its ancestors are probed for a token file.

use anyhow::{Context, Result};
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// Token file names probed in each directory, in order.
pub const TOKEN_FILE_NAMES: [&str; 2] = [".bearer", "bearer.txt"];

/// Resolve the bearer token for a run.
///
/// `explicit` is returned unchanged when present and the filesystem is not
/// touched. Otherwise see [`find_token`].
pub fn resolve(explicit: Option<&str>, start_dir: &Path) -> Option<String> {
    match explicit {
        Some(token) => Some(token.to_string()),
        None => find_token(start_dir),
    }
}

/// Walk from `start_dir` up to the filesystem root and return the trimmed
/// content of the first token file found.
///
/// In each directory the first existing name of [`TOKEN_FILE_NAMES`]
/// decides that level. A token file that cannot be read, or that holds
/// only whitespace, is skipped and the walk continues with the parent.
pub fn find_token(start_dir: &Path) -> Option<String> {
    let start = absolute(start_dir);
    for dir in start.ancestors() {
        let Some(path) = TOKEN_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
        else {
            continue;
        };

        debug!("probing token file {}", path.display());
        match load_token(&path) {
            Ok(token) if !token.is_empty() => return Some(token),
            Ok(_) => warn!("token file {} is empty, continuing upwards", path.display()),
            Err(e) => warn!("{:#}, continuing upwards", e),
        }
    }
    None
}

/// Load a token from a file, stripping surrounding whitespace.
fn load_token(path: &Path) -> Result<String> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read token file {}", path.display()))?;
    Ok(data.trim().to_string())
}

fn absolute(dir: &Path) -> PathBuf {
    if dir.is_absolute() {
        return dir.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(dir),
        Err(_) => dir.to_path_buf(),
    }
}
