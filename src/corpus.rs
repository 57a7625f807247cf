use crate::error::{KeyGraphError, KgResult};
use std::fs;
use std::path::Path;

/// Reduces raw text to the symbol stream the model is built from.
///
/// Lowercases everything, keeps only characters listed in `allowed` and
/// drops whitespace entirely, so words run together (`"Hi, you"` -> `"hi,you"`).
pub fn clean_text(content: &str, allowed: &str) -> Vec<char> {
    content
        .chars()
        .flat_map(char::to_lowercase)
        .filter(|c| !c.is_whitespace() && allowed.contains(*c))
        .collect()
}

pub fn load_symbols<P: AsRef<Path>>(path: P, allowed: &str) -> KgResult<Vec<char>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        KeyGraphError::Validation(format!("cannot read text '{}': {}", path.display(), e))
    })?;
    Ok(clean_text(&content, allowed))
}
