use super::{Command, CommandError, Flow};
use crate::path::PathExpander;
use crate::shell::Session;
use std::env;
use std::io::Write;
use std::path::PathBuf;

#[derive(Clone, Default)]
pub struct CdCommand;

impl CdCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for CdCommand {
    fn execute(&self, session: &mut Session, args: &[String]) -> Result<Flow, CommandError> {
        let previous = env::current_dir()
            .ok()
            .map(|p| p.to_string_lossy().into_owned())
            .or_else(|| session.env.get("PWD").map(str::to_owned));

        let (target, shown) = match args.first().map(String::as_str) {
            None => {
                let dir = session
                    .env
                    .get("HOME")
                    .or_else(|| session.env.get("PWD"))
                    .unwrap_or("/")
                    .to_owned();
                (PathBuf::from(&dir), dir)
            }
            Some("-") => match session.env.get("OLDPWD") {
                Some(old) => (PathBuf::from(old), old.to_owned()),
                None => {
                    writeln!(session.out(), "{}", previous.unwrap_or_default())?;
                    return Ok(Flow::Continue);
                }
            },
            Some(dir) => (
                PathExpander::new(session.env.get("HOME")).expand(dir),
                dir.to_owned(),
            ),
        };

        env::set_current_dir(&target).map_err(|_| CommandError::CantCd(shown))?;

        if let Some(previous) = previous {
            session.env.set("OLDPWD", &previous)?;
        }
        let now = env::current_dir()?.to_string_lossy().into_owned();
        if args.first().map(String::as_str) == Some("-") {
            writeln!(session.out(), "{}", now)?;
        }
        session.env.set("PWD", &now)?;
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::tests::run;
    use crate::core::commands::Dispatch;
    use crate::core::env::Environment;
    use crate::shell::session::test_support::{captured_session, CurrentDirGuard};
    use tempfile::TempDir;

    // Every step moves the process-wide working directory; the guard puts it
    // back even when an assertion fails.
    #[test]
    fn test_cd_sequence() -> Result<(), Box<dyn std::error::Error>> {
        let home = TempDir::new()?;
        let other = TempDir::new()?;
        let home_path = home.path().canonicalize()?;
        let other_path = other.path().canonicalize()?;
        let _cwd = CurrentDirGuard::enter(&other_path)?;

        let (mut session, captured) =
            captured_session([("HOME", home_path.to_string_lossy())].into_iter().collect());

        assert_eq!(run(&mut session, "cd"), Dispatch::Continue);
        assert_eq!(env::current_dir()?, home_path);
        assert_eq!(session.env.get("PWD"), Some(&*home_path.to_string_lossy()));

        let cmd = format!("cd {}", other_path.display());
        assert_eq!(run(&mut session, &cmd), Dispatch::Continue);
        assert_eq!(env::current_dir()?, other_path);
        assert_eq!(session.env.get("OLDPWD"), Some(&*home_path.to_string_lossy()));

        assert_eq!(run(&mut session, "cd -"), Dispatch::Continue);
        assert_eq!(env::current_dir()?, home_path);
        assert_eq!(captured.out(), format!("{}\n", home_path.display()));

        assert_eq!(run(&mut session, "cd /path/that/does/not/exist"), Dispatch::Failed);
        assert_eq!(session.status, 2);
        assert_eq!(
            captured.err(),
            "hsh: 4: cd: can't cd to /path/that/does/not/exist\n"
        );
        assert_eq!(env::current_dir()?, home_path);
        Ok(())
    }

    #[test]
    fn test_cd_dash_without_oldpwd() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let dir_path = dir.path().canonicalize()?;
        let _cwd = CurrentDirGuard::enter(&dir_path)?;

        let (mut session, captured) = captured_session(Environment::new());
        assert_eq!(run(&mut session, "cd -"), Dispatch::Continue);
        assert_eq!(captured.out(), format!("{}\n", dir_path.display()));
        assert_eq!(session.env.get("OLDPWD"), None);
        Ok(())
    }
}
