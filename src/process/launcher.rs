use std::ffi::{CStr, CString};
use std::io;
use std::os::raw::c_char;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use std::ptr;

use tracing::debug;

use super::{ExitOutcome, LaunchError, Launcher};

/// Exit code of a child whose image could not be replaced for lack of permission.
pub const EXIT_PERMISSION_DENIED: i32 = 126;
/// Exit code of a child whose image could not be replaced for any other reason.
pub const EXIT_EXEC_FAILED: i32 = 1;

/// `fork` + `execve` + `waitpid`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForkExec;

impl ForkExec {
    pub fn new() -> Self {
        Self
    }
}

impl Launcher for ForkExec {
    fn launch(
        &mut self,
        path: &Path,
        argv: &[String],
        env: &[CString],
    ) -> Result<ExitOutcome, LaunchError> {
        // Everything the child touches is allocated before the fork.
        let program = CString::new(path.as_os_str().as_bytes())
            .map_err(|_| LaunchError::NulByte(path.display().to_string()))?;
        let args = argv
            .iter()
            .map(|arg| CString::new(arg.as_bytes()).map_err(|_| LaunchError::NulByte(arg.clone())))
            .collect::<Result<Vec<_>, _>>()?;
        let arg_ptrs = null_terminated(&args);
        let env_ptrs = null_terminated(env);

        // SAFETY: the child only calls execve and _exit before leaving this
        // address space.
        let pid = unsafe { libc::fork() };
        match pid {
            -1 => Err(LaunchError::Fork(io::Error::last_os_error())),
            0 => replace_image(&program, &arg_ptrs, &env_ptrs),
            child => {
                debug!(pid = child, program = %path.display(), "spawned");
                wait_for(child)
            }
        }
    }
}

fn null_terminated(strings: &[CString]) -> Vec<*const c_char> {
    strings
        .iter()
        .map(|s| s.as_ptr())
        .chain(std::iter::once(ptr::null()))
        .collect()
}

/// Runs in the child only. Never returns to the session loop.
fn replace_image(program: &CStr, argv: &[*const c_char], envp: &[*const c_char]) -> ! {
    // SAFETY: all three arrays are NUL-terminated and outlive the call.
    unsafe {
        libc::execve(program.as_ptr(), argv.as_ptr(), envp.as_ptr());
    }
    let code = match io::Error::last_os_error().raw_os_error() {
        Some(libc::EACCES) => EXIT_PERMISSION_DENIED,
        _ => EXIT_EXEC_FAILED,
    };
    // SAFETY: _exit skips atexit handlers and stdio flushing that belong to the parent.
    unsafe { libc::_exit(code) }
}

fn wait_for(pid: libc::pid_t) -> Result<ExitOutcome, LaunchError> {
    let mut status: libc::c_int = 0;
    loop {
        // SAFETY: status points to a live c_int.
        let rc = unsafe { libc::waitpid(pid, &mut status, 0) };
        if rc == pid {
            break;
        }
        let err = io::Error::last_os_error();
        if err.kind() != io::ErrorKind::Interrupted {
            return Err(LaunchError::Wait(err));
        }
    }

    let outcome = if libc::WIFEXITED(status) {
        ExitOutcome::Exited(libc::WEXITSTATUS(status))
    } else if libc::WIFSIGNALED(status) {
        ExitOutcome::Signaled(libc::WTERMSIG(status))
    } else {
        ExitOutcome::Exited(status)
    };
    debug!(pid, ?outcome, "reaped");
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn argv(words: &[&str]) -> Vec<String> {
        words.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_exit_code_is_collected() -> Result<(), LaunchError> {
        let mut launcher = ForkExec::new();
        let outcome = launcher.launch(
            Path::new("/bin/sh"),
            &argv(&["sh", "-c", "exit 3"]),
            &[],
        )?;
        assert_eq!(outcome, ExitOutcome::Exited(3));
        Ok(())
    }

    #[test]
    fn test_environment_is_passed() -> Result<(), LaunchError> {
        let mut launcher = ForkExec::new();
        let env = vec![CString::new("HSH_PROBE=7").expect("no NUL")];
        let outcome = launcher.launch(
            Path::new("/bin/sh"),
            &argv(&["sh", "-c", "exit $HSH_PROBE"]),
            &env,
        )?;
        assert_eq!(outcome.status(), 7);
        Ok(())
    }

    #[test]
    fn test_signal_termination() -> Result<(), LaunchError> {
        let mut launcher = ForkExec::new();
        let outcome = launcher.launch(
            Path::new("/bin/sh"),
            &argv(&["sh", "-c", "kill -9 $$"]),
            &[],
        )?;
        assert_eq!(outcome, ExitOutcome::Signaled(9));
        assert_eq!(outcome.status(), 137);
        Ok(())
    }

    #[test]
    fn test_missing_image_exits_one() -> Result<(), LaunchError> {
        let mut launcher = ForkExec::new();
        let outcome = launcher.launch(
            Path::new("/nonexistent/program"),
            &argv(&["program"]),
            &[],
        )?;
        assert_eq!(outcome, ExitOutcome::Exited(EXIT_EXEC_FAILED));
        Ok(())
    }

    #[test]
    fn test_permission_denied_exits_126() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let script = dir.path().join("noexec");
        fs::write(&script, "#!/bin/sh\nexit 0\n")?;
        fs::set_permissions(&script, fs::Permissions::from_mode(0o644))?;

        let mut launcher = ForkExec::new();
        let outcome = launcher.launch(&script, &argv(&["noexec"]), &[])?;
        assert_eq!(outcome, ExitOutcome::Exited(EXIT_PERMISSION_DENIED));
        Ok(())
    }

    #[test]
    fn test_nul_byte_in_argument() {
        let mut launcher = ForkExec::new();
        let result = launcher.launch(Path::new("/bin/sh"), &argv(&["sh", "a\0b"]), &[]);
        assert!(matches!(result, Err(LaunchError::NulByte(_))));
    }
}
