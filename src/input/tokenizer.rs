//! Splitting a raw line into words.

pub const DELIMITERS: &[char] = &[' ', '\t', '\n'];

pub fn is_delimiter(c: char) -> bool {
    DELIMITERS.contains(&c)
}

/// Drops everything from a `#` that starts a word to the end of the line.
pub fn strip_comment(line: &str) -> &str {
    let mut previous = None;
    for (i, c) in line.char_indices() {
        if c == '#' && previous.map_or(true, is_delimiter) {
            return &line[..i];
        }
        previous = Some(c);
    }
    line
}

pub fn split_words(line: &str) -> Vec<String> {
    line.split(is_delimiter)
        .filter(|w| !w.is_empty())
        .map(str::to_owned)
        .collect()
}

pub fn count_words(line: &str) -> usize {
    line.split(is_delimiter).filter(|w| !w.is_empty()).count()
}

/// Words of `line` after comment removal.
pub fn tokenize(line: &str) -> Vec<String> {
    split_words(strip_comment(line))
}
