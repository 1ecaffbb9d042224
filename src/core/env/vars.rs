use super::EnvError;
use std::collections::BTreeMap;
use std::env;
use std::ffi::CString;

/// Variables handed to every child process.
///
/// Owned by the session; changes here never touch the shell's own process
/// environment, so several sessions can live side by side.
#[derive(Clone, Debug, Default)]
pub struct Environment {
    vars: BTreeMap<String, String>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store from the process environment. Non-UTF-8 entries are skipped.
    pub fn from_process() -> Self {
        let vars = env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .filter(|(k, v)| validate(k, v).is_ok())
            .collect();
        Self { vars }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn set(&mut self, name: &str, value: &str) -> Result<(), EnvError> {
        validate(name, value)?;
        self.vars.insert(name.to_owned(), value.to_owned());
        Ok(())
    }

    /// Returns whether the variable existed.
    pub fn unset(&mut self, name: &str) -> bool {
        self.vars.remove(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `NAME=value` strings in the layout `execve` expects.
    pub fn snapshot(&self) -> Vec<CString> {
        self.vars
            .iter()
            .filter_map(|(k, v)| CString::new(format!("{}={}", k, v)).ok())
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn validate(name: &str, value: &str) -> Result<(), EnvError> {
    if name.is_empty() || name.contains('=') || name.contains('\0') {
        return Err(EnvError::InvalidName(name.to_owned()));
    }
    if value.contains('\0') {
        return Err(EnvError::InvalidValue(name.to_owned()));
    }
    Ok(())
}
