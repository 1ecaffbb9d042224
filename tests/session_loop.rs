//! End-to-end runs of the read/dispatch/launch loop against real processes.

use std::cell::RefCell;
use std::fs;
use std::io::{self, Cursor, Write};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use hsh::core::config::Config;
use hsh::core::env::Environment;
use hsh::input::ReaderInput;
use hsh::process::ForkExec;
use hsh::shell::{LoopSignal, Session, Shell};
use tempfile::TempDir;

#[derive(Clone, Default)]
struct SharedBuf(Rc<RefCell<Vec<u8>>>);

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SharedBuf {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

struct Harness {
    shell: Shell<ReaderInput<Cursor<String>>, ForkExec>,
    err: SharedBuf,
}

fn harness(script: &str, env: Environment) -> Harness {
    let err = SharedBuf::default();
    let session = Session::new("./hsh", false, env)
        .with_output(Box::new(SharedBuf::default()), Box::new(err.clone()));
    let input = ReaderInput::new(Cursor::new(script.to_string()));
    Harness {
        shell: Shell::new(session, input, ForkExec::new()),
        err,
    }
}

fn write_program(dir: &Path, name: &str, body: &str, mode: u32) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).expect("write fixture");
    fs::set_permissions(&path, fs::Permissions::from_mode(mode)).expect("chmod");
    path
}

fn path_env(dir: &Path) -> Environment {
    [("PATH", format!("{}:/bin:/usr/bin", dir.display()))]
        .into_iter()
        .collect()
}

#[test]
fn path_lookup_runs_program_and_keeps_its_status() {
    let dir = TempDir::new().expect("tempdir");
    let program = write_program(dir.path(), "five", "exit 5", 0o755);
    let mut h = harness("five\n", path_env(dir.path()));

    assert_eq!(h.shell.step(), LoopSignal::Continue);
    assert_eq!(h.shell.session().command_path.as_deref(), Some(program.as_path()));
    assert_eq!(h.shell.session().argv, vec!["five"]);
    assert_eq!(h.shell.session().status, 5);

    assert_eq!(h.shell.run(), 5);
    assert_eq!(h.err.contents(), "");
}

#[test]
fn missing_command_sets_127_and_continues() {
    let dir = TempDir::new().expect("tempdir");
    write_program(dir.path(), "ok", "exit 0", 0o755);
    let mut h = harness("doesnotexist\nok\n", path_env(dir.path()));

    assert_eq!(h.shell.step(), LoopSignal::Continue);
    assert_eq!(h.shell.session().status, 127);
    assert_eq!(h.err.contents(), "./hsh: 1: doesnotexist: not found\n");

    assert_eq!(h.shell.step(), LoopSignal::Continue);
    assert_eq!(h.shell.session().status, 0);
    assert_eq!(h.shell.run(), 0);
}

#[test]
fn exit_code_overrides_last_status() {
    let dir = TempDir::new().expect("tempdir");
    write_program(dir.path(), "fail", "exit 3", 0o755);
    let mut h = harness("fail\nexit 42\nfail\n", path_env(dir.path()));
    assert_eq!(h.shell.run(), 42);
    assert_eq!(h.shell.session().status, 3);
}

#[test]
fn empty_input_exits_cleanly() {
    let mut h = harness("", Environment::new());
    assert_eq!(h.shell.run(), 0);
    assert_eq!(h.err.contents(), "");
}

#[test]
fn end_of_input_propagates_failing_status() {
    let dir = TempDir::new().expect("tempdir");
    write_program(dir.path(), "fail", "exit 3", 0o755);
    let mut h = harness("fail\n", path_env(dir.path()));
    assert_eq!(h.shell.run(), 3);
}

#[test]
fn non_executable_file_reports_permission_denied() {
    let dir = TempDir::new().expect("tempdir");
    let data = write_program(dir.path(), "data", "exit 0", 0o644);
    let line = data.display().to_string();
    let mut h = harness(&format!("{}\n", line), Environment::new());

    assert_eq!(h.shell.run(), 126);
    assert_eq!(
        h.err.contents(),
        format!("./hsh: 1: {}: Permission denied\n", line)
    );
}

#[test]
fn environment_changes_reach_children() {
    let dir = TempDir::new().expect("tempdir");
    write_program(dir.path(), "probe", "exit $PROBE", 0o755);
    let mut h = harness("setenv PROBE 9\nprobe\n", path_env(dir.path()));
    assert_eq!(h.shell.run(), 9);
}

#[test]
fn script_file_entry_point() {
    let dir = TempDir::new().expect("tempdir");
    let script = dir.path().join("commands");
    fs::write(&script, "# comment\n\nexit 7\n").expect("write script");

    let config = Config {
        script: Some(script),
        ..Config::new("hsh")
    };
    assert_eq!(hsh::run(config), 7);
}

#[test]
fn unreadable_script_exits_127() {
    let config = Config {
        script: Some(PathBuf::from("/nonexistent/commands")),
        ..Config::new("hsh")
    };
    assert_eq!(hsh::run(config), 127);
}
