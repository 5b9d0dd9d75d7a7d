//! Read-back rendering for confirmation prompts.

/// How a captured value is read back to the user before confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadbackMode {
    /// Read the value as spoken.
    Verbatim,
    /// Spell the value letter by letter ("Ann" -> "A n n").
    Letters,
    /// Spell the value character by character, non-digits preserved
    /// ("12A-3" -> "1 2 A - 3").
    Digits,
}

impl ReadbackMode {
    /// Render a value for speech output.
    pub fn render(&self, text: &str) -> String {
        match self {
            ReadbackMode::Verbatim => text.to_string(),
            ReadbackMode::Letters | ReadbackMode::Digits => spell_out(text),
        }
    }
}

/// Every character spoken as an individual space-joined token.
fn spell_out(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    for (i, ch) in text.chars().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
