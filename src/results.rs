//! Accumulated solution lines and their plain-text file form

#![allow(dead_code)]

use crate::search::ResultSink;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// Solutions found so far, newest first.
///
/// Each distinct line is kept once, so the same equation found in several
/// rounds or runs does not pile up.
#[derive(Debug, Default)]
pub struct ResultLog {
    lines: Vec<String>,
    known: HashSet<String>,
    dirty: bool,
}

impl ResultLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add previously known lines, keeping their order; blank lines are skipped.
    pub fn seed<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            let line = line.as_ref().trim();
            if !line.is_empty() && self.known.insert(line.to_string()) {
                self.lines.push(line.to_string());
            }
        }
    }

    /// Replace the log with the contents of a text file.
    pub fn load(&mut self, path: &Path) -> io::Result<()> {
        let text = fs::read_to_string(path)?;
        self.lines.clear();
        self.known.clear();
        self.seed(text.lines());
        self.dirty = false;
        debug!(path = %path.display(), lines = self.lines.len(), "loaded result log");
        Ok(())
    }

    /// Write the log as text, one line per solution.
    pub fn save(&mut self, path: &Path) -> io::Result<()> {
        fs::write(path, self.to_text())?;
        self.dirty = false;
        debug!(path = %path.display(), lines = self.lines.len(), "saved result log");
        Ok(())
    }

    /// Record a solution line. Returns false when it was already known.
    pub fn record(&mut self, text: &str) -> bool {
        if !self.known.insert(text.to_string()) {
            return false;
        }
        self.lines.insert(0, text.to_string());
        self.dirty = true;
        true
    }

    /// True when solutions were added since the last load or save
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn to_text(&self) -> String {
        let mut text = self.lines.join("\n");
        if !text.is_empty() {
            text.push('\n');
        }
        text
    }
}

impl ResultSink for ResultLog {
    fn on_solution(&mut self, text: &str) {
        self.record(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_first_and_unique() {
        let mut log = ResultLog::new();
        assert!(log.record("9 + 9 + 9 = 27"));
        assert!(log.record("3 * 9 = 27"));
        assert!(!log.record("9 + 9 + 9 = 27"));

        assert_eq!(log.lines(), &["3 * 9 = 27", "9 + 9 + 9 = 27"]);
        assert!(log.is_dirty());
    }

    #[test]
    fn test_seed_skips_blank_and_duplicate_lines() {
        let mut log = ResultLog::new();
        log.seed(["a = 1", "", "  ", "b = 2", "a = 1"]);

        assert_eq!(log.len(), 2);
        assert!(!log.is_dirty());
        assert!(!log.record("b = 2"));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.txt");

        let mut log = ResultLog::new();
        log.record("1 + 1 = 2");
        log.record("4 / 2 = 2");
        log.save(&path).unwrap();
        assert!(!log.is_dirty());
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "4 / 2 = 2\n1 + 1 = 2\n"
        );

        let mut loaded = ResultLog::new();
        loaded.record("stale = 0");
        loaded.load(&path).unwrap();
        assert_eq!(loaded.lines(), log.lines());
        assert!(!loaded.is_dirty());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut log = ResultLog::new();
        assert!(log.load(&dir.path().join("missing.txt")).is_err());
    }

    #[test]
    fn test_empty_log_text() {
        assert_eq!(ResultLog::new().to_text(), "");
        assert!(ResultLog::new().is_empty());
    }

    #[test]
    fn test_sink_records_solutions() {
        let mut log = ResultLog::new();
        log.on_solution("2 + 2 = 4");
        log.on_round_expired(0, 0);
        assert_eq!(log.lines(), &["2 + 2 = 4"]);
    }
}
