// TUI application state
//
// `App` is the single owner of every piece of mutable state: the transcript,
// the input line, the scroll position, the viewport and the status bar. All
// mutations go through it so cross-component bookkeeping (eviction shifting
// the scroll offset, auto-scroll after new output) happens in one place.

use super::editor::{LineEditor, PROMPT};
use super::scroll::{ScrollState, DEFAULT_RESERVED_ROWS};
use super::status_bar::StatusBar;
use super::transcript::{Transcript, DEFAULT_MAX_LINES};

/// Rows at the bottom of the terminal taken by the status bar
pub const STATUS_BAR_ROWS: u16 = 1;

/// Line appended after the transcript is cleared
pub const CLEARED_MESSAGE: &str = "Screen cleared.";

/// Terminal size as last reported by a resize event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 80,
            height: 24 + STATUS_BAR_ROWS,
        }
    }
}

/// Main application state for the TUI
pub struct App {
    transcript: Transcript,
    editor: LineEditor,
    scroll: ScrollState,
    viewport: Viewport,

    /// Status row (process status, active task, key hints)
    pub status_bar: StatusBar,

    /// Set once the first resize arrives; until then nothing is laid out
    ready: bool,

    /// Lines dropped from the front since the last clear
    evicted: usize,

    /// Whether the app should quit
    pub should_quit: bool,
}

impl App {
    pub fn new(max_lines: usize, reserved_rows: usize) -> Self {
        Self {
            transcript: Transcript::new(max_lines),
            editor: LineEditor::new(),
            scroll: ScrollState::new(reserved_rows),
            viewport: Viewport::default(),
            status_bar: StatusBar::new(),
            ready: false,
            evicted: 0,
            should_quit: false,
        }
    }

    /// Usage lines shown when the session starts
    pub fn greet(&mut self) {
        self.push_lines([
            "ccforge - terminal front-end for Claude Code",
            "Ready.",
            "",
            "Usage:",
            "  - Type text and press Enter to send it",
            "  - Up/Down and PageUp/PageDown scroll the transcript",
            "  - /help lists commands, F1 toggles key hints",
            "  - Ctrl+L clears the screen, Ctrl+C quits",
        ]);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Transcript mutations
    // ─────────────────────────────────────────────────────────────────────

    /// Append one line, evict past the bound, then scroll to the bottom
    pub fn push_line(&mut self, line: impl Into<String>) {
        let evicted = self.transcript.push(line);
        self.after_eviction(evicted);
        self.scroll.scroll_to_bottom();
    }

    pub fn push_lines<I>(&mut self, lines: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        for line in lines {
            self.push_line(line);
        }
    }

    /// Empty the transcript and the input line, scroll back to the top
    pub fn clear(&mut self) {
        self.transcript.clear();
        self.editor.clear();
        self.scroll.set_total(0);
        self.scroll.reset();
        self.evicted = 0;
    }

    /// Change the transcript bound (0 = unbounded), trimming immediately
    pub fn set_max_lines(&mut self, max_lines: usize) {
        let evicted = self.transcript.set_max_lines(max_lines);
        self.after_eviction(evicted);
    }

    /// Current transcript bound (0 = unbounded)
    pub fn max_lines(&self) -> usize {
        self.transcript.max_lines()
    }

    fn after_eviction(&mut self, evicted: usize) {
        if evicted > 0 {
            self.evicted += evicted;
            self.scroll.on_evicted(evicted);
        }
        self.scroll.set_total(self.transcript.len());
    }

    // ─────────────────────────────────────────────────────────────────────
    // Input line
    // ─────────────────────────────────────────────────────────────────────

    /// Submit the input line: echo it as "> text" and return the text.
    ///
    /// Returns `None` without touching the transcript when the line is empty.
    pub fn submit_input(&mut self) -> Option<String> {
        let text = self.editor.submit()?;
        self.push_line(format!("{}{}", PROMPT, text));
        Some(text)
    }

    #[cfg(test)]
    pub fn editor(&self) -> &LineEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut LineEditor {
        &mut self.editor
    }

    // ─────────────────────────────────────────────────────────────────────
    // Viewport and scrolling
    // ─────────────────────────────────────────────────────────────────────

    /// Apply a terminal resize. The offset moves only if it fell out of range.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport = Viewport { width, height };
        self.ready = true;
        self.scroll
            .set_height(height.saturating_sub(STATUS_BAR_ROWS) as usize);
    }

    #[cfg(test)]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    pub fn scroll_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }

    // ─────────────────────────────────────────────────────────────────────
    // Errors and status
    // ─────────────────────────────────────────────────────────────────────

    /// Record an upstream error in the transcript and the status bar
    pub fn report_error(&mut self, context: &str, message: &str) {
        self.push_line(format!("Error ({}): {}", context, message));
        self.status_bar.set_status(format!("Error: {}", context));
    }

    // ─────────────────────────────────────────────────────────────────────
    // Read-only views for the renderer
    // ─────────────────────────────────────────────────────────────────────

    /// Transcript lines currently in the pane
    pub fn visible_lines(&self) -> Vec<&str> {
        let (start, end) = self.scroll.visible_range();
        self.transcript.range(start, end - start).collect()
    }

    /// Input line with prompt and cursor marker
    pub fn input_line(&self) -> String {
        self.editor.render()
    }

    /// `[offset+1/total]`, present only when the transcript overflows the pane
    pub fn scroll_indicator(&self) -> Option<String> {
        self.scroll.indicator()
    }

    /// Status row: task, status text, line count and key hints, cut to the
    /// viewport width
    pub fn status_line(&self) -> String {
        self.status_bar.render_text(
            self.viewport.width as usize,
            self.line_count(),
            self.is_truncated(),
        )
    }

    pub fn line_count(&self) -> usize {
        self.transcript.len()
    }

    /// Whether lines have been evicted since the last clear
    pub fn is_truncated(&self) -> bool {
        self.evicted > 0
    }

    #[cfg(test)]
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LINES, DEFAULT_RESERVED_ROWS)
    }
}
