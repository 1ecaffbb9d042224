use super::Session;

/// Substitutes whole words starting with `$`.
///
/// `$?` is the last status, `$$` the shell's pid and `$NAME` the variable's
/// value, or an empty word when it is unset. A lone `$` is kept.
pub(crate) fn expand_vars(words: Vec<String>, session: &Session) -> Vec<String> {
    words
        .into_iter()
        .map(|word| match word.as_str() {
            "$" => word,
            "$?" => session.status.to_string(),
            "$$" => std::process::id().to_string(),
            w => match w.strip_prefix('$') {
                Some(name) => session.env.get(name).unwrap_or_default().to_owned(),
                None => word,
            },
        })
        .collect()
}
