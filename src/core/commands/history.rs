use super::{Command, CommandError, Flow};
use crate::shell::Session;

/// Lists the lines entered so far, oldest first, numbered from 0.
#[derive(Clone, Copy, Default)]
pub struct HistoryCommand;

impl Command for HistoryCommand {
    fn execute(&self, session: &mut Session, _args: &[String]) -> Result<Flow, CommandError> {
        let lines: Vec<String> = session
            .history
            .entries()
            .enumerate()
            .map(|(i, entry)| format_entry(i, entry))
            .collect();
        let out = session.out();
        for line in lines {
            writeln!(out, "{}", line)?;
        }
        Ok(Flow::Continue)
    }
}

fn format_entry(index: usize, entry: &str) -> String {
    format!("{:4}  {}", index, entry)
}
