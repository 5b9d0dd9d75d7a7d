//! Spoken ordinal parsing.
//!
//! Whole-token matching only: "12" parses as twelve, never as option two,
//! and "second" matches as a word, not as a substring of another word.

/// Parse a spoken choice like "first", "option 2" or "3" into a 1-based
/// ordinal. Returns the first token that parses; `None` when no token does.
pub fn parse_ordinal(text: &str) -> Option<usize> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .find_map(parse_token)
}

fn parse_token(token: &str) -> Option<usize> {
    match token.to_lowercase().as_str() {
        "first" => Some(1),
        "second" => Some(2),
        "third" => Some(3),
        "fourth" => Some(4),
        "fifth" => Some(5),
        t => t.parse::<usize>().ok(),
    }
}

#[cfg(test)]
#[path = "ordinal_tests.rs"]
mod tests;
