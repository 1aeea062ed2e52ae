/// Sequential text source that hands out whitespace-delimited tokens.
///
/// Mirrors stream extraction: leading whitespace is skipped and a token runs
/// until the next whitespace character or the end of input.
#[derive(Debug, Clone)]
pub struct TextSource<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> TextSource<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    pub fn next_token(&mut self) -> Option<&'a str> {
        let rest = &self.input[self.pos..];
        let trimmed = rest.trim_start();
        if trimmed.is_empty() {
            self.pos = self.input.len();
            return None;
        }
        let start = self.pos + (rest.len() - trimmed.len());
        let len = trimmed
            .find(char::is_whitespace)
            .unwrap_or(trimmed.len());
        self.pos = start + len;
        Some(&self.input[start..start + len])
    }

    /// Unconsumed input, including any leading whitespace.
    pub fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining().trim_start().is_empty()
    }
}
