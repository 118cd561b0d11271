//! Startup-script adapter.
//!
//! A degenerate, prompt-suppressed caller of the same read-eval loop: if the
//! per-user rc file exists, standard input is temporarily rebound to it, the
//! loop runs until sentinel or end-of-file, and standard input is restored.
//! A missing or unreadable file is not an error.

use std::fs::File;
use std::io::BufReader;
use std::os::fd::AsRawFd;
use std::path::Path;

use ush_core::ShellState;
use ush_hal::fd::{self, StdinGuard};

use crate::repl;

pub const RC_FILE_NAME: &str = ".ushrc";

pub fn run_startup_script(state: &mut ShellState, path: &Path) -> anyhow::Result<()> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(_) => return Ok(()),
    };
    tracing::debug!(path = %path.display(), "running startup script");

    let _guard = StdinGuard::save()?;
    fd::bind_stdin(file.as_raw_fd())?;
    // Commands in the script that read standard input consume the rebound
    // descriptor; the loop itself reads through the same open file.
    let mut reader = BufReader::new(file);
    repl::run_loop(&mut reader, state, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn script_lines_run_silently_until_sentinel() {
        let _guard = crate::test_lock::lock();
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let rc = dir.path().join(RC_FILE_NAME);
        fs::write(
            &rc,
            format!("setenv RC_RAN yes\necho hello from rc > {}\nend\n", out.display()),
        )
        .unwrap();

        let mut state = ShellState::new().unwrap();
        let before = nix_identity(0);
        run_startup_script(&mut state, &rc).unwrap();

        assert_eq!(state.getenv("RC_RAN"), Some("yes"));
        assert_eq!(fs::read_to_string(&out).unwrap(), "hello from rc\n");
        // Standard input is back on its original descriptor.
        assert_eq!(before, nix_identity(0));
    }

    #[test]
    fn missing_script_is_a_silent_no_op() {
        let _guard = crate::test_lock::lock();
        let dir = tempfile::tempdir().unwrap();
        let mut state = ShellState::new().unwrap();
        run_startup_script(&mut state, &dir.path().join(RC_FILE_NAME)).unwrap();
    }

    fn nix_identity(fd: i32) -> (u64, u64) {
        let st = nix::sys::stat::fstat(fd).unwrap();
        (st.st_dev, st.st_ino)
    }
}
