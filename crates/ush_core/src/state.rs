//! Process-wide shell state.
//!
//! Exactly one `ShellState` exists per running shell. It is created at
//! startup, threaded as `&mut` through every built-in, and destroyed only at
//! shell exit; the borrow checker enforces the single-mutator invariant.

use crate::error::ShellResult;
use std::collections::HashMap;

#[derive(Debug)]
pub struct ShellState {
    /// The shell's own notion of the working directory, kept in sync with the
    /// OS one. Mutated only through [`ShellState::set_current_dir`].
    current_dir: String,
    home_dir: String,
    hostname: String,
    env: HashMap<String, String>,
}

impl ShellState {
    /// Snapshot the process environment, hostname, home and working
    /// directory at shell startup.
    pub fn new() -> ShellResult<Self> {
        let current_dir = std::env::current_dir()?
            .to_string_lossy()
            .into_owned();
        Ok(Self {
            current_dir,
            home_dir: ush_hal::platform::home_dir(),
            hostname: ush_hal::platform::hostname(),
            env: std::env::vars().collect(),
        })
    }

    pub fn current_dir(&self) -> &str {
        &self.current_dir
    }

    pub fn home_dir(&self) -> &str {
        &self.home_dir
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub(crate) fn set_current_dir(&mut self, dir: String) {
        self.current_dir = dir;
    }

    pub fn getenv(&self, name: &str) -> Option<&str> {
        self.env.get(name).map(String::as_str)
    }

    pub fn set_env<K, V>(&mut self, name: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.env.insert(name.into(), value.into());
    }

    /// Removing an absent entry is a silent no-op.
    pub fn unset_env(&mut self, name: &str) {
        self.env.remove(name);
    }

    /// Every environment entry, in the table's iteration order.
    pub fn env_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.env.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The environment as `name=value` strings, the shape `execve` wants.
    pub fn export_env(&self) -> Vec<String> {
        self.env.iter().map(|(k, v)| format!("{k}={v}")).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_set_get_unset_round_trip() {
        let mut state = ShellState::new().unwrap();
        state.set_env("USH_TEST_VAR", "1");
        assert_eq!(state.getenv("USH_TEST_VAR"), Some("1"));
        state.set_env("USH_TEST_VAR", "2");
        assert_eq!(state.getenv("USH_TEST_VAR"), Some("2"));
        state.unset_env("USH_TEST_VAR");
        assert_eq!(state.getenv("USH_TEST_VAR"), None);
        // Absent entry again: silent no-op.
        state.unset_env("USH_TEST_VAR");
    }

    #[test]
    fn export_env_contains_set_entries() {
        let mut state = ShellState::new().unwrap();
        state.set_env("USH_EXPORT_PROBE", "val");
        assert!(state
            .export_env()
            .iter()
            .any(|e| e == "USH_EXPORT_PROBE=val"));
    }

    #[test]
    fn startup_snapshot_is_populated() {
        let state = ShellState::new().unwrap();
        assert!(state.current_dir().starts_with('/'));
        assert!(!state.hostname().is_empty());
        assert!(state.home_dir().starts_with('/'));
    }
}
