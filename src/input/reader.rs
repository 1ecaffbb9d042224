use std::io::BufRead;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::{trace, warn};

use crate::error::ShellError;

/// Where command lines come from.
pub trait LineSource {
    /// Next line without its trailing newline, or `Ok(None)` at end of input.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ShellError>;

    /// Whether `read_line` draws `prompt` itself.
    fn shows_prompt(&self) -> bool {
        false
    }
}

impl<T: LineSource + ?Sized> LineSource for Box<T> {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ShellError> {
        (**self).read_line(prompt)
    }

    fn shows_prompt(&self) -> bool {
        (**self).shows_prompt()
    }
}

/// Line editing on a live terminal.
pub struct EditorInput {
    editor: DefaultEditor,
}

impl EditorInput {
    pub fn new() -> Result<Self, ShellError> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }

    /// Makes earlier sessions reachable with the arrow keys.
    pub fn with_history<'a>(mut self, entries: impl Iterator<Item = &'a str>) -> Self {
        for entry in entries {
            if let Err(e) = self.editor.add_history_entry(entry) {
                warn!("Couldn't add to history: {}", e);
                break;
            }
        }
        self
    }
}

impl LineSource for EditorInput {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ShellError> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if let Err(e) = self.editor.add_history_entry(line.as_str()) {
                    warn!("Couldn't add to history: {}", e);
                }
                Ok(Some(line))
            }
            // Ctrl-C abandons the current line only.
            Err(ReadlineError::Interrupted) => Ok(Some(String::new())),
            Err(ReadlineError::Eof) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn shows_prompt(&self) -> bool {
        true
    }
}

/// Redirected standard input or a script file.
pub struct ReaderInput<R> {
    reader: R,
}

impl<R: BufRead> ReaderInput<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for ReaderInput<R> {
    fn read_line(&mut self, _prompt: &str) -> Result<Option<String>, ShellError> {
        let mut buf = Vec::new();
        if self.reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
        }
        let line = String::from_utf8_lossy(&buf).into_owned();
        trace!(%line, "read");
        Ok(Some(line))
    }
}
