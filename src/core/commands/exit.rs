use super::{Command, CommandError, Flow};
use crate::shell::Session;

#[derive(Clone, Copy, Default)]
pub struct ExitCommand;

impl Command for ExitCommand {
    fn execute(&self, _session: &mut Session, args: &[String]) -> Result<Flow, CommandError> {
        match args.first() {
            None => Ok(Flow::Terminate(None)),
            Some(arg) => parse_status(arg)
                .map(|code| Flow::Terminate(Some(code)))
                .ok_or_else(|| CommandError::IllegalNumber(arg.clone())),
        }
    }
}

/// Unsigned decimal with an optional leading `+`, no larger than `i32::MAX`.
fn parse_status(arg: &str) -> Option<i32> {
    let digits = arg.strip_prefix('+').unwrap_or(arg);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<i32>().ok()
}
