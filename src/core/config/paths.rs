use std::path::{Path, PathBuf};

pub const HISTORY_FILE_NAME: &str = ".simple_shell_history";

#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub history_path: PathBuf,
}

impl ConfigPaths {
    /// `None` when there is no home directory to put the history in.
    pub fn from_home() -> Option<Self> {
        dirs::home_dir().map(|home| Self::under(&home))
    }

    pub fn under(home: &Path) -> Self {
        ConfigPaths {
            history_path: home.join(HISTORY_FILE_NAME),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_under_home() {
        let paths = ConfigPaths::under(Path::new("/home/testuser"));
        assert_eq!(
            paths.history_path,
            PathBuf::from("/home/testuser/.simple_shell_history")
        );
    }
}
