use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::Session;
use crate::input::tokenizer::{count_words, strip_comment};
use crate::process::launcher::EXIT_PERMISSION_DENIED;
use crate::process::resolver::{find_in_path, is_launchable};
use crate::process::{ExitOutcome, Launcher};

pub const STATUS_NOT_FOUND: i32 = 127;

/// Runs a line no builtin claimed as an external program.
pub(crate) fn route<L: Launcher>(session: &mut Session, launcher: &mut L) {
    session.line_count += 1;

    if count_words(strip_comment(&session.raw_line)) == 0 {
        return;
    }
    let Some(name) = session.argv.first().cloned() else {
        return;
    };

    let search_path = session.env.get("PATH").map(str::to_owned);
    if let Some(path) = find_in_path(search_path.as_deref(), &name) {
        debug!(command = %name, path = %path.display(), "resolved");
        session.command_path = Some(path);
        launch(session, launcher);
    } else if (session.is_interactive() || search_path.is_some() || name.starts_with('/'))
        && is_launchable(Path::new(&name))
    {
        debug!(command = %name, "running directly");
        session.command_path = Some(PathBuf::from(&name));
        launch(session, launcher);
    } else {
        debug!(command = %name, "not found");
        session.status = STATUS_NOT_FOUND;
        session.report("not found");
    }
}

/// Runs `session.command_path` with the current words and environment.
fn launch<L: Launcher>(session: &mut Session, launcher: &mut L) {
    let Some(path) = session.command_path.clone() else {
        return;
    };
    let env = session.env.snapshot();
    session.flush();

    match launcher.launch(&path, &session.argv, &env) {
        Ok(outcome) => {
            session.status = outcome.status();
            if outcome == ExitOutcome::Exited(EXIT_PERMISSION_DENIED) {
                session.report("Permission denied");
            }
        }
        Err(e) => {
            // The shell itself is fine; move on to the next line.
            warn!(program = %path.display(), "launch failed: {}", e);
            if let Err(write_err) = writeln!(session.err(), "Error: {}", e) {
                warn!("Couldn't write diagnostic: {}", write_err);
            }
        }
    }
}
