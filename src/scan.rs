use std::sync::LazyLock;

use regex::Regex;

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{2,3})\s+(.+)$").unwrap());
static TRAILING_HASHES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s#+\s*$").unwrap());

/// Split a document into lines, accepting both `\n` and `\r\n` endings.
pub fn lines(document: &str) -> Vec<&str> {
    document
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// Tracks whether the scanner is inside a triple-backtick code fence.
#[derive(Debug, Default)]
pub struct FenceTracker {
    open: bool,
}

impl FenceTracker {
    /// Feed one trimmed line. Returns true when the line is structural,
    /// i.e. neither a fence delimiter nor inside a fence.
    pub fn is_structural(&mut self, trimmed: &str) -> bool {
        if trimmed.starts_with("```") {
            self.open = !self.open;
            return false;
        }
        !self.open
    }
}

/// Match a level-2 or level-3 heading line, returning the level and the
/// cleaned heading text.
pub fn heading_line(trimmed: &str) -> Option<(u8, String)> {
    let caps = HEADING_RE.captures(trimmed)?;
    let level = caps[1].len() as u8;
    Some((level, strip_trailing_hashes(&caps[2])))
}

/// Remove a closing `#` sequence (`"Bar ##"` becomes `"Bar"`).
///
/// The run has to be separated from the text by whitespace, so `"C#"`
/// keeps its hash.
pub fn strip_trailing_hashes(text: &str) -> String {
    TRAILING_HASHES_RE.replace(text, "").trim().to_string()
}
