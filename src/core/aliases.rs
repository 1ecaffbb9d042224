use std::collections::BTreeMap;

use crate::input::tokenizer::split_words;

/// Rounds of first-word substitution before giving up on a chain.
const MAX_EXPANSIONS: usize = 10;

#[derive(Debug, Clone, Default)]
pub struct AliasManager {
    aliases: BTreeMap<String, String>,
}

impl AliasManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: &str, command: &str) {
        self.aliases.insert(name.to_owned(), command.to_owned());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(String::as_str)
    }

    /// Replaces the first word by its alias until no alias applies.
    pub fn expand(&self, mut words: Vec<String>) -> Vec<String> {
        for _ in 0..MAX_EXPANSIONS {
            let Some(first) = words.first() else {
                break;
            };
            let Some(value) = self.get(first) else {
                break;
            };
            let mut expanded = split_words(value);
            if expanded.first() == Some(first) {
                expanded.extend(words.drain(1..));
                words = expanded;
                break;
            }
            expanded.extend(words.drain(1..));
            words = expanded;
        }
        words
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
