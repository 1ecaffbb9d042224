use super::{Command, CommandError, Flow};
use crate::shell::Session;
use std::io::Write;

/// `alias [name[=value] ...]`
#[derive(Clone, Copy, Default)]
pub struct AliasCommand;

impl Command for AliasCommand {
    fn execute(&self, session: &mut Session, args: &[String]) -> Result<Flow, CommandError> {
        if args.is_empty() {
            let lines: Vec<String> = session
                .aliases
                .iter()
                .map(|(name, value)| format_alias(name, value))
                .collect();
            let out = session.out();
            for line in lines {
                writeln!(out, "{}", line)?;
            }
            return Ok(Flow::Continue);
        }

        let mut missing = None;
        for arg in &definitions(&args.join(" ")) {
            match arg.split_once('=') {
                Some((name, value)) if !name.is_empty() => {
                    session.aliases.add(name, strip_quotes(value));
                }
                Some(_) => {
                    return Err(CommandError::InvalidArguments(
                        "Usage: alias name='command'".into(),
                    ))
                }
                None => match session.aliases.get(arg) {
                    Some(value) => {
                        let line = format_alias(arg, value);
                        writeln!(session.out(), "{}", line)?;
                    }
                    None => {
                        missing.get_or_insert_with(|| arg.clone());
                    }
                },
            }
        }

        match missing {
            Some(name) => Err(CommandError::AliasNotFound(name)),
            None => Ok(Flow::Continue),
        }
    }
}

/// Re-splits the arguments so that quoted values keep their spaces.
fn definitions(joined: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut quote = None;
    for c in joined.chars() {
        match (c, quote) {
            ('\'' | '"', None) => {
                quote = Some(c);
                current.push(c);
            }
            (c, Some(q)) if c == q => {
                quote = None;
                current.push(c);
            }
            (c, None) if c.is_whitespace() => {
                if !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
            }
            (c, _) => current.push(c),
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn format_alias(name: &str, value: &str) -> String {
    format!("{}='{}'", name, value)
}

fn strip_quotes(value: &str) -> &str {
    value.trim_matches(|c| c == '\'' || c == '"')
}
