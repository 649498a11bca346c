// Transcript - bounded history of output lines
//
// Lines are appended at the back and evicted from the front once the
// configured bound is exceeded. The transcript never exceeds its bound
// between observable states: eviction happens inside the same call as the
// append that caused it.
//
// Scroll state is not owned here. Mutations report how many lines were
// evicted so the owner (App) can shift the scroll offset by the same amount.

use std::collections::VecDeque;

/// Default bound on the number of transcript lines kept in memory
pub const DEFAULT_MAX_LINES: usize = 1000;

/// Bounded queue of immutable transcript lines
#[derive(Debug, Clone)]
pub struct Transcript {
    lines: VecDeque<String>,
    /// Maximum number of lines kept (0 = unbounded)
    max_lines: usize,
}

impl Transcript {
    /// Create an empty transcript with the given bound (0 = unbounded)
    pub fn new(max_lines: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            max_lines,
        }
    }

    /// Append a line, evicting from the front if the bound is exceeded.
    ///
    /// Returns the number of lines evicted by this append.
    pub fn push(&mut self, line: impl Into<String>) -> usize {
        self.lines.push_back(line.into());
        self.trim_to_bound()
    }

    /// Remove every line
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Change the bound. A non-zero bound trims immediately.
    ///
    /// Returns the number of lines evicted.
    pub fn set_max_lines(&mut self, max_lines: usize) -> usize {
        self.max_lines = max_lines;
        self.trim_to_bound()
    }

    pub fn max_lines(&self) -> usize {
        self.max_lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line at `index` (0 = oldest retained line)
    #[cfg(test)]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Newest line, if any
    #[cfg(test)]
    pub fn last(&self) -> Option<&str> {
        self.lines.back().map(String::as_str)
    }

    /// Iterate over `len` lines starting at `start`, clamped to what exists
    pub fn range(&self, start: usize, len: usize) -> impl Iterator<Item = &str> {
        self.lines.iter().skip(start).take(len).map(String::as_str)
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    fn trim_to_bound(&mut self) -> usize {
        if self.max_lines == 0 || self.lines.len() <= self.max_lines {
            return 0;
        }
        let excess = self.lines.len() - self.max_lines;
        self.lines.drain(..excess);
        excess
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LINES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_within_bound_keeps_everything() {
        let mut transcript = Transcript::new(5);
        for i in 0..5 {
            assert_eq!(transcript.push(format!("line {}", i)), 0);
        }
        assert_eq!(transcript.len(), 5);
        assert_eq!(transcript.get(0), Some("line 0"));
    }

    #[test]
    fn test_bound_holds_after_every_push() {
        let mut transcript = Transcript::new(10);
        for i in 0..57 {
            transcript.push(format!("line {}", i));
            assert!(transcript.len() <= 10);
        }
        assert_eq!(transcript.get(0), Some("line 47"));
        assert_eq!(transcript.last(), Some("line 56"));
    }

    #[test]
    fn test_push_over_bound_reports_eviction() {
        let mut transcript = Transcript::new(2);
        transcript.push("a");
        transcript.push("b");
        assert_eq!(transcript.push("c"), 1);
        assert_eq!(transcript.iter().collect::<Vec<_>>(), vec!["b", "c"]);
    }

    #[test]
    fn test_zero_bound_is_unbounded() {
        let mut transcript = Transcript::new(0);
        for i in 0..2500 {
            assert_eq!(transcript.push(format!("line {}", i)), 0);
        }
        assert_eq!(transcript.len(), 2500);
    }

    #[test]
    fn test_lowering_bound_trims_oldest() {
        let mut transcript = Transcript::new(0);
        for i in 0..20 {
            transcript.push(format!("line {}", i));
        }

        assert_eq!(transcript.set_max_lines(8), 12);
        assert_eq!(transcript.len(), 8);
        assert_eq!(transcript.get(0), Some("line 12"));

        // Raising or disabling the bound never evicts
        assert_eq!(transcript.set_max_lines(100), 0);
        assert_eq!(transcript.set_max_lines(0), 0);
        assert_eq!(transcript.len(), 8);
    }

    #[test]
    fn test_range_clamps_to_available_lines() {
        let mut transcript = Transcript::new(0);
        for i in 0..3 {
            transcript.push(format!("line {}", i));
        }
        assert_eq!(transcript.range(1, 10).collect::<Vec<_>>(), vec!["line 1", "line 2"]);
        assert_eq!(transcript.range(5, 10).count(), 0);
    }

    #[test]
    fn test_clear() {
        let mut transcript = Transcript::default();
        transcript.push("x");
        transcript.clear();
        assert!(transcript.is_empty());
        assert_eq!(transcript.max_lines(), DEFAULT_MAX_LINES);
    }
}
