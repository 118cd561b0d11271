//! Executable resolution against the search path.

use crate::error::{ShellError, ShellResult};
use std::path::Path;

/// Join a directory and a file name with exactly one separator, whether or
/// not the directory already carries a trailing one.
pub(crate) fn join(dir: &str, name: &str) -> String {
    if dir.ends_with('/') {
        format!("{dir}{name}")
    } else {
        format!("{dir}/{name}")
    }
}

/// Scan the directories of `path_variable` left to right and return the
/// first one that contains `name`. `None` when the variable is empty or no
/// directory has a hit.
pub fn search(name: &str, path_variable: &str) -> Option<String> {
    for dir in path_variable.split(':').filter(|d| !d.is_empty()) {
        let candidate = join(dir, name);
        if Path::new(&candidate).exists() {
            return Some(candidate);
        }
    }
    None
}

/// Resolve a command name into a launchable path.
///
/// A leading `/` means absolute, checked for execute permission. A `/`
/// anywhere else means relative to `current_dir`, checked for existence only
/// (the execute bit is left for exec itself to refuse). A bare name goes
/// through [`search`].
pub fn resolve(
    name: &str,
    current_dir: &str,
    path_variable: Option<&str>,
) -> ShellResult<String> {
    if name.starts_with('/') {
        if is_executable(name) {
            return Ok(name.to_string());
        }
        return Err(ShellError::CommandNotFound);
    }
    if name.contains('/') {
        let candidate = join(current_dir, name);
        if Path::new(&candidate).exists() {
            return Ok(candidate);
        }
        return Err(ShellError::CommandNotFound);
    }
    match path_variable.and_then(|pv| search(name, pv)) {
        Some(path) => {
            tracing::debug!(name, %path, "resolved via search path");
            Ok(path)
        }
        None => Err(ShellError::CommandNotFound),
    }
}

fn is_executable(path: &str) -> bool {
    nix::unistd::access(path, nix::unistd::AccessFlags::X_OK).is_ok()
}
