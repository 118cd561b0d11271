//! Built-in commands.
//!
//! Each built-in runs inside the shell process against whatever descriptors
//! are currently bound; the dispatcher decides whether that process is the
//! shell itself or a pipeline-relay child.

pub mod cd;
pub mod echo;
pub mod env;
pub mod logout;
pub mod nice;
pub mod pwd;
pub mod where_cmd;

/// The fixed set of names recognized as built-in, exact match only.
pub const NAMES: &[&str] = &[
    "echo", "cd", "pwd", "logout", "setenv", "unsetenv", "where", "nice",
];

pub fn is_builtin(name: &str) -> bool {
    NAMES.contains(&name)
}
