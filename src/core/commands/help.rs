use super::{Command, CommandError, Flow};
use crate::shell::Session;

const TOPICS: &[(&str, &str, &str)] = &[
    ("alias", "alias [name[=value] ...]", "Define or display aliases."),
    ("cd", "cd [dir|-]", "Change the current directory. Defaults to $HOME; - returns to $OLDPWD."),
    ("env", "env", "Print the environment."),
    ("exit", "exit [n]", "Exit the shell with status n, or with the last command's status."),
    ("help", "help [builtin]", "Display information about builtin commands."),
    ("history", "history", "List the commands entered so far."),
    ("setenv", "setenv NAME VALUE", "Set or change an environment variable."),
    ("unsetenv", "unsetenv NAME...", "Remove environment variables."),
];

#[derive(Clone, Copy, Default)]
pub struct HelpCommand;

impl Command for HelpCommand {
    fn execute(&self, session: &mut Session, args: &[String]) -> Result<Flow, CommandError> {
        let out = session.out();
        if args.is_empty() {
            writeln!(out, "These shell commands are defined internally:")?;
            for (_, usage, _) in TOPICS {
                writeln!(out, "  {}", usage)?;
            }
            return Ok(Flow::Continue);
        }

        for arg in args {
            let (_, usage, description) = TOPICS
                .iter()
                .find(|(name, _, _)| *name == arg.as_str())
                .ok_or_else(|| {
                    CommandError::InvalidArguments(format!("no help topics match '{}'", arg))
                })?;
            writeln!(out, "{}: {}\n    {}", arg, usage, description)?;
        }
        Ok(Flow::Continue)
    }
}
