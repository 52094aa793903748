//! Pushback-capable stack of input lines.
//!
//! The engine never looks ahead into a separate buffer: it pulls a line, decides, and pushes
//! the line back when it belongs to the next operation. Whole pages are pushed so that they are
//! pulled in their original top-to-bottom order, ahead of anything already on the stack.
//!
//! Exhaustion is not sticky. An empty cursor that is refilled (the next module's page) yields
//! lines again, which is what lets one engine instance generate many modules in turn.

use crate::error::{Exhausted, Result};
use crate::fetch::Fetch;

/// Returned by [`LineCursor::peek`] when nothing is left.
pub const NO_MORE_LINES: &str = "No more lines!";

#[derive(Debug, Default, Clone)]
pub struct LineCursor {
    /// Top of the stack (next line to pull) is the last element.
    lines: Vec<String>,
}

impl LineCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pop the next line.
    pub fn pull(&mut self) -> Result<String, Exhausted> {
        self.lines.pop().ok_or(Exhausted)
    }

    /// Same as [`pull`](Self::pull); the name reads better in fix-up code.
    pub fn pop_line(&mut self) -> Result<String, Exhausted> {
        self.pull()
    }

    /// Pop `num_lines` lines, in pull order. Nothing is removed when fewer are available.
    pub fn pop_lines(&mut self, num_lines: usize) -> Result<Vec<String>, Exhausted> {
        if num_lines > self.lines.len() {
            return Err(Exhausted);
        }
        let split = self.lines.len() - num_lines;
        let mut popped = self.lines.split_off(split);
        popped.reverse();
        Ok(popped)
    }

    pub fn push_line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Push `lines` back so that `lines[0]` is pulled first.
    pub fn push_lines<S: AsRef<str>>(&mut self, lines: &[S]) {
        self.lines
            .extend(lines.iter().rev().map(|l| l.as_ref().to_string()));
    }

    /// Push every line of `text`, to be pulled top to bottom.
    pub fn push_text(&mut self, text: &str) {
        let lines: Vec<&str> = text.lines().collect();
        self.push_lines(&lines);
    }

    /// Fetch `url` and push its body; returns the number of lines loaded.
    pub fn push_url(&mut self, fetcher: &dyn Fetch, url: &str) -> Result<usize> {
        let body = fetcher.fetch(url)?;
        let before = self.lines.len();
        self.push_text(&body);
        let loaded = self.lines.len() - before;
        tracing::debug!(url, lines = loaded, "loaded document");
        Ok(loaded)
    }

    /// The next line without removing it, or [`NO_MORE_LINES`].
    pub fn peek(&self) -> &str {
        self.lines.last().map(String::as_str).unwrap_or(NO_MORE_LINES)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Up to `limit` upcoming lines, in pull order. Used for diagnostics.
    pub fn upcoming(&self, limit: usize) -> Vec<String> {
        self.lines.iter().rev().take(limit).cloned().collect()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::MemoryFetcher;

    #[test]
    fn pushed_back_line_is_pulled_again() {
        let mut cursor = LineCursor::new();
        cursor.push_text("first\nsecond");
        let line = cursor.pull().unwrap();
        assert_eq!(line, "first");
        cursor.push_line(line.clone());
        assert_eq!(cursor.pull().unwrap(), line);
        assert_eq!(cursor.pull().unwrap(), "second");
    }

    #[test]
    fn push_lines_preserves_order() {
        let mut cursor = LineCursor::new();
        cursor.push_line("below");
        cursor.push_lines(&["a", "b", "c"]);
        assert_eq!(cursor.pull().unwrap(), "a");
        assert_eq!(cursor.pull().unwrap(), "b");
        assert_eq!(cursor.pull().unwrap(), "c");
        assert_eq!(cursor.pull().unwrap(), "below");
    }

    #[test]
    fn pull_on_empty_is_exhausted() {
        let mut cursor = LineCursor::new();
        assert_eq!(cursor.pull(), Err(Exhausted));
        assert_eq!(cursor.peek(), NO_MORE_LINES);
    }

    #[test]
    fn exhaustion_is_not_sticky() {
        let mut cursor = LineCursor::new();
        assert!(cursor.pull().is_err());
        cursor.push_line("refilled");
        assert_eq!(cursor.pull().unwrap(), "refilled");
        assert!(cursor.pull().is_err());
    }

    #[test]
    fn push_url_loads_page_ahead_of_existing_lines() {
        let fetcher = MemoryFetcher::new().with_page("mem://page.rst", "top\nmiddle\nbottom\n");
        let mut cursor = LineCursor::new();
        cursor.push_line("older");
        assert_eq!(cursor.push_url(&fetcher, "mem://page.rst").unwrap(), 3);
        assert_eq!(cursor.peek(), "top");
        let pulled: Vec<String> = std::iter::from_fn(|| cursor.pull().ok()).collect();
        assert_eq!(pulled, vec!["top", "middle", "bottom", "older"]);
    }

    #[test]
    fn push_url_propagates_fetch_failure() {
        let mut cursor = LineCursor::new();
        assert!(cursor.push_url(&MemoryFetcher::new(), "mem://nope.rst").is_err());
        assert!(cursor.is_empty());
    }

    #[test]
    fn pop_lines_returns_batch_in_pull_order() {
        let mut cursor = LineCursor::new();
        cursor.push_text("1\n2\n3");
        assert_eq!(cursor.pop_lines(2).unwrap(), vec!["1", "2"]);
        assert_eq!(cursor.len(), 1);
        assert_eq!(cursor.pop_lines(2), Err(Exhausted));
        assert_eq!(cursor.len(), 1);
    }

    #[test]
    fn crlf_pages_split_cleanly() {
        let mut cursor = LineCursor::new();
        cursor.push_text("one\r\ntwo\r\n");
        assert_eq!(cursor.upcoming(5), vec!["one", "two"]);
    }
}
