mod file_ops;

use std::{collections::VecDeque, path::PathBuf};

use thiserror::Error;
use tracing::debug;

use self::file_ops::FileOps;

pub const DEFAULT_MAX_ENTRIES: usize = 4096;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Command lines typed during the session.
///
/// Read once when the shell starts and written back once when it terminates.
pub struct History {
    entries: VecDeque<String>,
    file_ops: Option<FileOps>,
    max_entries: usize,
}

impl History {
    pub fn new(history_file: PathBuf, max_entries: usize) -> Result<Self, HistoryError> {
        let file_ops = FileOps::new(history_file);
        let mut history = Self {
            entries: VecDeque::new(),
            file_ops: None,
            max_entries,
        };
        for entry in file_ops.load_entries()? {
            history.push(entry);
        }
        debug!(
            file = %file_ops.path().display(),
            entries = history.entries.len(),
            "history loaded"
        );
        history.file_ops = Some(file_ops);
        Ok(history)
    }

    /// In-memory only; `persist` is a no-op.
    pub fn detached(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            file_ops: None,
            max_entries,
        }
    }

    pub fn add(&mut self, line: &str) {
        let line = line.trim_end_matches('\n');
        if line.trim().is_empty() {
            return;
        }
        self.push(line.to_owned());
    }

    fn push(&mut self, entry: String) {
        self.entries.push_back(entry);
        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn persist(&self) -> Result<(), HistoryError> {
        match &self.file_ops {
            Some(file_ops) => {
                file_ops.write_entries(self.entries())?;
                debug!(file = %file_ops.path().display(), entries = self.len(), "history saved");
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl Default for History {
    fn default() -> Self {
        Self::detached(DEFAULT_MAX_ENTRIES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_blank_lines_are_skipped() {
        let mut history = History::default();
        history.add("ls -l\n");
        history.add("   \n");
        history.add("");
        assert_eq!(history.entries().collect::<Vec<_>>(), vec!["ls -l"]);
    }

    #[test]
    fn test_oldest_entries_are_dropped() {
        let mut history = History::detached(2);
        history.add("one");
        history.add("two");
        history.add("three");
        assert_eq!(history.entries().collect::<Vec<_>>(), vec!["two", "three"]);
    }

    #[test]
    fn test_persist_and_reload() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let file = dir.path().join(".simple_shell_history");
        fs::write(&file, "old\n\nolder\n")?;

        let mut history = History::new(file.clone(), 10)?;
        assert_eq!(history.len(), 2);
        history.add("new");
        history.persist()?;

        assert_eq!(fs::read_to_string(&file)?, "old\nolder\nnew\n");
        let reloaded = History::new(file, 2)?;
        assert_eq!(reloaded.entries().collect::<Vec<_>>(), vec!["older", "new"]);
        Ok(())
    }

    #[test]
    fn test_missing_file_is_empty() -> Result<(), HistoryError> {
        let dir = TempDir::new().expect("tempdir");
        let history = History::new(dir.path().join("none"), 10)?;
        assert!(history.is_empty());
        Ok(())
    }

    #[test]
    fn test_persist_reports_unwritable_path() -> Result<(), HistoryError> {
        let dir = TempDir::new().expect("tempdir");
        let history = History::new(dir.path().join("missing").join("hist"), 10)?;
        assert!(matches!(history.persist(), Err(HistoryError::Io { .. })));
        Ok(())
    }
}
