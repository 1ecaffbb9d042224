//! Locating executables on a colon-separated search path.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tracing::trace;

/// Finds the file `name` refers to.
///
/// Names containing `/` are checked literally and never searched for.
/// Otherwise each `:`-separated entry of `search_path` is tried in order,
/// an empty entry meaning the current directory. An absent or empty search
/// path finds nothing.
pub fn find_in_path(search_path: Option<&str>, name: &str) -> Option<PathBuf> {
    if name.is_empty() {
        return None;
    }

    if has_separator(name) {
        let literal = Path::new(name);
        return is_executable(literal).then(|| literal.to_path_buf());
    }

    let search_path = search_path.filter(|p| !p.is_empty())?;
    for dir in search_path.split(':') {
        let candidate = if dir.is_empty() {
            PathBuf::from(name)
        } else {
            Path::new(dir).join(name)
        };
        trace!(candidate = %candidate.display(), "checking");
        if is_executable(&candidate) {
            return Some(candidate);
        }
    }
    None
}

pub fn has_separator(name: &str) -> bool {
    name.contains('/')
}

/// A regular file with at least one execute bit set.
pub fn is_executable(path: &Path) -> bool {
    match fs::metadata(path) {
        Ok(meta) => meta.is_file() && meta.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}

/// A regular file, whatever its permissions.
///
/// Used for names the user addressed directly; whether the image can
/// actually be replaced is left to `execve`, which reports `EACCES`.
pub fn is_launchable(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}
