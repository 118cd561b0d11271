//! Anonymous pipe creation.

use crate::error::{HalError, HalResult};
use std::os::fd::OwnedFd;

/// Create an anonymous pipe, returning `(read_end, write_end)`.
///
/// Both ends are owned values; dropping an end closes it, which is how the
/// orchestrator relinquishes its copies after each fork.
pub fn create() -> HalResult<(OwnedFd, OwnedFd)> {
    nix::unistd::pipe().map_err(|e| {
        HalError::io_error("pipe", None, std::io::Error::from_raw_os_error(e as i32))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::{Read, Write};

    #[test]
    fn pipe_relays_bytes_and_signals_eof() {
        let (read_end, write_end) = create().unwrap();
        let mut writer = File::from(write_end);
        writer.write_all(b"one line\n").unwrap();
        drop(writer); // closes the write end, reader sees EOF

        let mut reader = File::from(read_end);
        let mut buf = String::new();
        reader.read_to_string(&mut buf).unwrap();
        assert_eq!(buf, "one line\n");
    }
}
