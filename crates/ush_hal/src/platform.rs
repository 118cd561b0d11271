//! Host identity: hostname and the invoking user's home directory.
//!
//! Both are read once at shell startup and are immutable afterwards, so the
//! lookups here fall back to sensible defaults instead of failing.

/// The machine's hostname, or `localhost` when the lookup fails.
pub fn hostname() -> String {
    nix::unistd::gethostname()
        .map(|h| h.to_string_lossy().into_owned())
        .unwrap_or_else(|_| "localhost".to_string())
}

/// The invoking user's home directory from the password database, with the
/// `HOME` variable as fallback.
pub fn home_dir() -> String {
    if let Ok(Some(user)) = nix::unistd::User::from_uid(nix::unistd::getuid()) {
        return user.dir.to_string_lossy().into_owned();
    }
    std::env::var("HOME").unwrap_or_else(|_| "/".to_string())
}
