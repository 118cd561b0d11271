//! End-to-end engine tests: parsed line in, observable side effects out.
//!
//! Everything here rebinds the process-wide standard descriptors or forks,
//! so every test serializes on one lock.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use ush_core::{pipeline, ShellState};
use ush_parser::parse_line;

static FD_LOCK: Mutex<()> = Mutex::new(());

fn lock() -> MutexGuard<'static, ()> {
    FD_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn run(line: &str, state: &mut ShellState) {
    let pipeline = parse_line(line)
        .expect("line parses")
        .expect("line is not blank");
    pipeline::run(&pipeline, state).expect("engine run succeeds");
}

fn std_fd_identities() -> Vec<(u64, u64)> {
    (0..3)
        .map(|fd| {
            let st = nix::sys::stat::fstat(fd).unwrap();
            (st.st_dev, st.st_ino)
        })
        .collect()
}

#[test]
fn echo_joins_arguments_without_trailing_space() {
    let _guard = lock();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let mut state = ShellState::new().unwrap();

    run(&format!("echo a b > {}", out.display()), &mut state);
    assert_eq!(fs::read_to_string(&out).unwrap(), "a b\n");

    run(&format!("echo > {}", out.display()), &mut state);
    assert_eq!(fs::read_to_string(&out).unwrap(), "\n");
}

#[test]
fn standard_descriptors_survive_every_redirection_kind() {
    let _guard = lock();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let input = dir.path().join("in");
    fs::write(&input, "line\n").unwrap();
    let mut state = ShellState::new().unwrap();

    let before = std_fd_identities();
    run(&format!("echo x > {}", out.display()), &mut state);
    run(&format!("echo x >> {}", out.display()), &mut state);
    run(&format!("echo x >& {}", out.display()), &mut state);
    run(&format!("wc -l < {} > {}", input.display(), out.display()), &mut state);
    run("cd /definitely/not/here", &mut state);
    assert_eq!(before, std_fd_identities());
}

#[test]
fn append_keeps_earlier_content() {
    let _guard = lock();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("log");
    let mut state = ShellState::new().unwrap();

    run(&format!("echo one > {}", out.display()), &mut state);
    run(&format!("echo two >> {}", out.display()), &mut state);
    assert_eq!(fs::read_to_string(&out).unwrap(), "one\ntwo\n");
}

#[test]
fn cd_to_missing_path_reports_and_keeps_state() {
    let _guard = lock();
    let dir = tempfile::tempdir().unwrap();
    let err = dir.path().join("err");
    let mut state = ShellState::new().unwrap();
    let original = state.current_dir().to_string();

    run(&format!("cd /does/not/exist >& {}", err.display()), &mut state);
    let diagnostic = fs::read_to_string(&err).unwrap();
    assert!(diagnostic.contains("/does/not/exist"));
    assert!(diagnostic.contains("No such file or directory"));
    assert_eq!(state.current_dir(), original);

    let out = dir.path().join("out");
    run(&format!("pwd > {}", out.display()), &mut state);
    assert_eq!(fs::read_to_string(&out).unwrap().trim_end(), original);
}

#[test]
fn cd_to_plain_file_reports_not_a_directory() {
    let _guard = lock();
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("plain");
    fs::write(&file, "data").unwrap();
    let err = dir.path().join("err");
    let mut state = ShellState::new().unwrap();
    let original = state.current_dir().to_string();

    run(&format!("cd {} >& {}", file.display(), err.display()), &mut state);
    assert!(fs::read_to_string(&err).unwrap().contains("Not a directory"));
    assert_eq!(state.current_dir(), original);
}

#[test]
fn cd_success_moves_state_pwd_and_os_directory_together() {
    let _guard = lock();
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().canonicalize().unwrap();
    let mut state = ShellState::new().unwrap();
    let original = state.current_dir().to_string();

    run(&format!("cd {}", target.display()), &mut state);
    assert_eq!(state.current_dir(), target.to_str().unwrap());
    assert_eq!(state.getenv("PWD"), target.to_str());
    assert_eq!(std::env::current_dir().unwrap(), target);

    // Put the process back for the other tests.
    run(&format!("cd {original}"), &mut state);
    assert_eq!(state.current_dir(), original);
}

#[test]
fn builtin_feeds_a_pipe_through_a_relay_child() {
    let _guard = lock();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let mut state = ShellState::new().unwrap();

    run(&format!("echo one | wc -l > {}", out.display()), &mut state);
    assert_eq!(fs::read_to_string(&out).unwrap().trim(), "1");
}

#[test]
fn external_stages_relay_exactly_the_written_lines() {
    let _guard = lock();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let mut state = ShellState::new().unwrap();

    run(
        &format!(r#"printf 'a\nb\n' | wc -l > {}"#, out.display()),
        &mut state,
    );
    assert_eq!(fs::read_to_string(&out).unwrap().trim(), "2");
}

#[test]
fn first_stage_input_file_feeds_the_pipeline() {
    let _guard = lock();
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in");
    let out = dir.path().join("out");
    fs::write(&input, "x\ny\n").unwrap();
    let mut state = ShellState::new().unwrap();

    run(
        &format!("cat < {} | wc -l > {}", input.display(), out.display()),
        &mut state,
    );
    assert_eq!(fs::read_to_string(&out).unwrap().trim(), "2");
}

#[test]
fn where_lists_every_search_directory_in_order() {
    let _guard = lock();
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    for dir in [&first, &second] {
        let exe = dir.path().join("frob");
        fs::write(&exe, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&exe, fs::Permissions::from_mode(0o755)).unwrap();
    }
    let scratch = tempfile::tempdir().unwrap();
    let out = scratch.path().join("out");

    let mut state = ShellState::new().unwrap();
    state.set_env(
        "PATH",
        format!("{}:{}", first.path().display(), second.path().display()),
    );
    run(&format!("where frob > {}", out.display()), &mut state);

    let listing = fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = listing.lines().collect();
    assert_eq!(
        lines,
        vec![
            format!("{}/frob", first.path().display()),
            format!("{}/frob", second.path().display()),
        ]
    );
}

#[test]
fn where_tags_builtins_before_path_hits() {
    let _guard = lock();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let mut state = ShellState::new().unwrap();

    run(&format!("where cd > {}", out.display()), &mut state);
    let listing = fs::read_to_string(&out).unwrap();
    assert_eq!(listing.lines().next(), Some("[built-in] cd"));
}

#[test]
fn setenv_enumerates_each_variable_exactly_once() {
    let _guard = lock();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let mut state = ShellState::new().unwrap();
    state.set_env("USH_PROBE", "probe-value");

    run(&format!("setenv > {}", out.display()), &mut state);
    let listing = fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = listing.lines().collect();
    assert_eq!(lines.len(), state.env_pairs().count());
    assert_eq!(
        lines.iter().filter(|l| **l == "USH_PROBE=probe-value").count(),
        1
    );
}

#[test]
fn setenv_then_listing_includes_the_new_entry() {
    let _guard = lock();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let mut state = ShellState::new().unwrap();

    run("setenv FOO bar ignored", &mut state);
    assert_eq!(state.getenv("FOO"), Some("bar"));
    run(&format!("setenv > {}", out.display()), &mut state);
    assert!(fs::read_to_string(&out)
        .unwrap()
        .lines()
        .any(|l| l == "FOO=bar"));

    run("unsetenv FOO", &mut state);
    assert_eq!(state.getenv("FOO"), None);
}

#[test]
fn unresolvable_stage_aborts_the_whole_pipeline() {
    let _guard = lock();
    let empty = tempfile::tempdir().unwrap();
    let scratch = tempfile::tempdir().unwrap();
    let out = scratch.path().join("out");

    let mut state = ShellState::new().unwrap();
    state.set_env("PATH", empty.path().display().to_string());

    let before = std_fd_identities();
    run(&format!("nosuchtool | alsomissing > {}", out.display()), &mut state);
    // Aborted before the last stage was forked: its output file never opens.
    assert!(!out.exists());
    assert_eq!(before, std_fd_identities());
}

#[test]
fn unopenable_redirection_target_skips_only_that_command() {
    let _guard = lock();
    let mut state = ShellState::new().unwrap();
    let before = std_fd_identities();
    run("echo hi > /no-such-directory/out", &mut state);
    assert_eq!(before, std_fd_identities());
}

#[test]
fn resolution_uses_current_dir_for_relative_names() {
    let _guard = lock();
    let dir = tempfile::tempdir().unwrap();
    let sub = dir.path().join("bin");
    fs::create_dir(&sub).unwrap();
    let exe = sub.join("hello");
    fs::write(&exe, "#!/bin/sh\necho from-relative\n").unwrap();
    fs::set_permissions(&exe, fs::Permissions::from_mode(0o755)).unwrap();
    let out = dir.path().join("out");

    let mut state = ShellState::new().unwrap();
    let original = state.current_dir().to_string();
    run(&format!("cd {}", dir.path().canonicalize().unwrap().display()), &mut state);
    run(&format!("bin/hello > {}", out.display()), &mut state);
    assert_eq!(fs::read_to_string(&out).unwrap().trim(), "from-relative");
    run(&format!("cd {original}"), &mut state);
}

#[test]
fn merge_stderr_pipe_carries_both_streams() {
    let _guard = lock();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let mut state = ShellState::new().unwrap();

    // sh writes one line to stdout and one to stderr; |& routes both.
    run(
        &format!(
            r#"sh -c "echo out; echo err 1>&2" |& wc -l > {}"#,
            out.display()
        ),
        &mut state,
    );
    assert_eq!(fs::read_to_string(&out).unwrap().trim(), "2");
}
