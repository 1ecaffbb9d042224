use std::path::{Path, PathBuf};

/// Expands a leading `~` against a home directory.
///
/// The session's `HOME` takes priority over the account's home directory.
#[derive(Clone, Debug, Default)]
pub struct PathExpander {
    home: Option<PathBuf>,
}

impl PathExpander {
    pub fn new(home: Option<&str>) -> Self {
        Self {
            home: home.map(PathBuf::from).or_else(dirs::home_dir),
        }
    }

    pub fn expand(&self, path: &str) -> PathBuf {
        match (path, &self.home) {
            ("~", Some(home)) => home.clone(),
            (p, Some(home)) if p.starts_with("~/") => {
                let mut home_path = home.clone();
                for part in p[2..].split('/').filter(|part| !part.is_empty()) {
                    home_path.push(part);
                }
                home_path
            }
            // "~user" forms and a missing home stay literal.
            _ => Path::new(path).to_path_buf(),
        }
    }
}
