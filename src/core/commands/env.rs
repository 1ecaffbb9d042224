use super::{Command, CommandError, Flow};
use crate::shell::Session;

#[derive(Clone, Copy, Default)]
pub struct EnvCommand;

impl Command for EnvCommand {
    fn execute(&self, session: &mut Session, _args: &[String]) -> Result<Flow, CommandError> {
        let lines: Vec<String> = session
            .env
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect();
        let out = session.out();
        for line in lines {
            writeln!(out, "{}", line)?;
        }
        Ok(Flow::Continue)
    }
}

/// `setenv NAME VALUE`
#[derive(Clone, Copy, Default)]
pub struct SetenvCommand;

impl Command for SetenvCommand {
    fn execute(&self, session: &mut Session, args: &[String]) -> Result<Flow, CommandError> {
        let [name, value] = args else {
            return Err(CommandError::InvalidArguments(
                "Incorrect number of arguments".into(),
            ));
        };
        session.env.set(name, value)?;
        Ok(Flow::Continue)
    }
}

/// `unsetenv NAME...`
#[derive(Clone, Copy, Default)]
pub struct UnsetenvCommand;

impl Command for UnsetenvCommand {
    fn execute(&self, session: &mut Session, args: &[String]) -> Result<Flow, CommandError> {
        if args.is_empty() {
            return Err(CommandError::InvalidArguments("Too few arguments.".into()));
        }
        for name in args {
            session.env.unset(name);
        }
        Ok(Flow::Continue)
    }
}
