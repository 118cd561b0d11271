//! `logout` — terminate the shell with success status. The only built-in
//! with no return path.

pub fn invoke() -> ! {
    std::process::exit(0)
}
