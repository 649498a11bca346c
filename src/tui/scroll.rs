// Scroll state for the transcript pane
//
// Owns the scroll offset together with the sizes it is measured against:
// the number of transcript lines and the pane height. Every operation is
// self-correcting: an offset left stale by eviction, a resize, or an external
// caller is snapped back into range before (or instead of) moving.
//
// Arithmetic:
//   visible = pane_height - reserved_rows          (saturating)
//   max     = total - visible                      (saturating)
//   max     = total                                when visible == 0

use super::traits::{Handled, Interactive};
use crossterm::event::{KeyCode, KeyEvent};

/// Rows of the pane not available to transcript lines (input line, border, indicator)
pub const DEFAULT_RESERVED_ROWS: usize = 3;

/// Page motion moves by the pane height minus this margin
pub const PAGE_MARGIN: usize = 5;

/// Pane height used until the first resize arrives
pub const DEFAULT_PANE_HEIGHT: usize = 24;

/// Scroll offset plus the dimensions it is clamped against
#[derive(Debug, Clone)]
pub struct ScrollState {
    /// Index of the transcript line at the top of the pane
    offset: usize,

    /// Number of lines in the transcript
    total: usize,

    /// Height of the transcript pane in rows
    height: usize,

    /// Rows subtracted from `height` to get the visible line count
    reserved_rows: usize,
}

impl ScrollState {
    pub fn new(reserved_rows: usize) -> Self {
        Self {
            offset: 0,
            total: 0,
            height: DEFAULT_PANE_HEIGHT,
            reserved_rows,
        }
    }

    /// Record the current transcript length. Does not move the offset.
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
    }

    /// Change the pane height, clamping the offset only if it fell out of range
    pub fn set_height(&mut self, height: usize) {
        self.height = height;
        let max = self.max_offset();
        if self.offset > max {
            self.offset = max;
        }
    }

    /// Set the raw offset without validation.
    ///
    /// Used when restoring externally held state; later operations correct it.
    #[allow(dead_code)] // Reserved for restoring a saved scroll position
    pub fn force_offset(&mut self, offset: usize) {
        self.offset = offset;
    }

    /// Shift the view up by `evicted` lines after eviction from the front
    pub fn on_evicted(&mut self, evicted: usize) {
        self.offset = self.offset.saturating_sub(evicted);
    }

    /// Scroll up one line.
    ///
    /// An offset above `max_offset` (stale after eviction, resize or
    /// `force_offset`) snaps to `max_offset` rather than to 0: that is the
    /// nearest valid position, and it keeps the newest lines on screen.
    /// No further step is taken on that call.
    pub fn scroll_up(&mut self) {
        let max = self.max_offset();
        if self.offset > max {
            self.offset = max;
            return;
        }
        self.offset = self.offset.saturating_sub(1);
    }

    /// Scroll down one line. An out-of-range offset snaps to the bound instead.
    pub fn scroll_down(&mut self) {
        let max = self.max_offset();
        if self.offset >= max {
            self.offset = max;
            return;
        }
        self.offset += 1;
    }

    pub fn page_up(&mut self) {
        let max = self.max_offset();
        self.offset = self.offset.saturating_sub(self.page_step()).min(max);
    }

    pub fn page_down(&mut self) {
        let max = self.max_offset();
        self.offset = self.offset.saturating_add(self.page_step()).min(max);
    }

    /// Jump to the bottom so the newest line is visible
    pub fn scroll_to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    /// Back to the top (used when the transcript is cleared)
    pub fn reset(&mut self) {
        self.offset = 0;
    }

    /// Current scroll offset
    #[cfg(test)]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[cfg(test)]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Rows of the pane not available to transcript lines
    pub fn reserved_rows(&self) -> usize {
        self.reserved_rows
    }

    /// Number of transcript lines that fit in the pane
    pub fn visible_height(&self) -> usize {
        self.height.saturating_sub(self.reserved_rows)
    }

    /// Maximum valid offset
    pub fn max_offset(&self) -> usize {
        let visible = self.visible_height();
        if visible == 0 {
            return self.total;
        }
        self.total.saturating_sub(visible)
    }

    /// Get visible range (start_index, end_index)
    ///
    /// The start is clamped to the last line. If nothing fits (zero visible
    /// rows) the last reachable line is still shown rather than a blank pane.
    pub fn visible_range(&self) -> (usize, usize) {
        if self.total == 0 {
            return (0, 0);
        }
        let start = self.offset.min(self.total - 1);
        let end = (start + self.visible_height()).min(self.total);
        if start >= end {
            return (start, start + 1);
        }
        (start, end)
    }

    /// Check if content overflows the pane
    pub fn needs_indicator(&self) -> bool {
        self.total > self.visible_height()
    }

    /// Position marker like `[12/340]`, present only when content overflows.
    ///
    /// Reports the clamped start line, so it always agrees with `visible_range`.
    pub fn indicator(&self) -> Option<String> {
        let (start, _) = self.visible_range();
        self.needs_indicator()
            .then(|| format!("[{}/{}]", start + 1, self.total))
    }

    fn page_step(&self) -> usize {
        self.height.saturating_sub(PAGE_MARGIN).max(1)
    }
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new(DEFAULT_RESERVED_ROWS)
    }
}

impl Interactive for ScrollState {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Up => self.scroll_up(),
            KeyCode::Down => self.scroll_down(),
            KeyCode::PageUp => self.page_up(),
            KeyCode::PageDown => self.page_down(),
            _ => return Handled::No,
        }
        Handled::Yes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn scroll_with(total: usize, height: usize, offset: usize) -> ScrollState {
        let mut scroll = ScrollState::default();
        scroll.set_height(height);
        scroll.set_total(total);
        scroll.force_offset(offset);
        scroll
    }

    #[test]
    fn test_single_line_moves() {
        let mut scroll = scroll_with(50, 24, 10);
        scroll.scroll_up();
        assert_eq!(scroll.offset(), 9);

        let mut scroll = scroll_with(30, 24, 5);
        scroll.scroll_down();
        assert_eq!(scroll.offset(), 6);
    }

    #[test]
    fn test_page_moves() {
        let mut scroll = scroll_with(50, 10, 20);
        scroll.page_up();
        assert_eq!(scroll.offset(), 15);

        let mut scroll = scroll_with(50, 10, 10);
        scroll.page_down();
        assert_eq!(scroll.offset(), 15);
    }

    #[test]
    fn test_page_moves_clamp_to_bounds() {
        let mut scroll = scroll_with(20, 10, 3);
        scroll.page_up();
        assert_eq!(scroll.offset(), 0);

        // max = 20 - (10 - 3) = 13
        let mut scroll = scroll_with(20, 10, 15);
        scroll.page_down();
        assert_eq!(scroll.offset(), 13);
    }

    #[test]
    fn test_tiny_pane_still_pages_by_one() {
        let mut scroll = scroll_with(20, 4, 10);
        scroll.page_up();
        assert_eq!(scroll.offset(), 9);
    }

    #[test]
    fn test_out_of_range_offset_snaps_without_extra_step() {
        // max = 10 - (5 - 3) = 8
        let mut scroll = scroll_with(10, 5, 100);
        scroll.scroll_down();
        assert_eq!(scroll.offset(), 8);

        let mut scroll = scroll_with(10, 5, 100);
        scroll.scroll_up();
        assert_eq!(scroll.offset(), 8);
    }

    #[test]
    fn test_repeated_scrolling_converges_at_bounds() {
        let mut scroll = scroll_with(40, 12, 0);
        let max = scroll.max_offset();
        for _ in 0..100 {
            scroll.scroll_down();
        }
        assert_eq!(scroll.offset(), max);
        scroll.scroll_down();
        assert_eq!(scroll.offset(), max);

        for _ in 0..100 {
            scroll.scroll_up();
        }
        assert_eq!(scroll.offset(), 0);
        scroll.scroll_up();
        assert_eq!(scroll.offset(), 0);
    }

    #[test]
    fn test_empty_and_short_content_do_not_scroll() {
        let mut scroll = scroll_with(0, 10, 0);
        scroll.scroll_up();
        scroll.scroll_down();
        assert_eq!(scroll.offset(), 0);

        let mut scroll = scroll_with(1, 10, 0);
        scroll.scroll_down();
        assert_eq!(scroll.offset(), 0);
    }

    #[test]
    fn test_max_offset_edge_cases() {
        assert_eq!(scroll_with(0, 10, 0).max_offset(), 0);
        assert_eq!(scroll_with(7, 10, 0).max_offset(), 0);
        assert_eq!(scroll_with(5, 10, 0).max_offset(), 0);
        assert_eq!(scroll_with(10, 4, 0).max_offset(), 9);
        // No visible rows: every line is a scroll position
        assert_eq!(scroll_with(10, 3, 0).max_offset(), 10);
        assert_eq!(scroll_with(10, 0, 0).max_offset(), 10);
    }

    #[test]
    fn test_visible_range() {
        assert_eq!(scroll_with(0, 10, 0).visible_range(), (0, 0));
        assert_eq!(scroll_with(100, 13, 90).visible_range(), (90, 100));
        assert_eq!(scroll_with(100, 13, 0).visible_range(), (0, 10));
    }

    #[test]
    fn test_visible_range_clamps_stale_offset_to_last_line() {
        assert_eq!(scroll_with(3, 10, 10).visible_range(), (2, 3));
        assert_eq!(scroll_with(5, 4, 2).visible_range(), (2, 3));
        // Zero visible rows still shows one line
        assert_eq!(scroll_with(5, 2, 1).visible_range(), (1, 2));
    }

    #[test]
    fn test_resize_only_clamps_when_out_of_range() {
        let mut scroll = scroll_with(50, 20, 10);
        scroll.set_height(30);
        assert_eq!(scroll.offset(), 10);

        // max = 50 - (60 - 3) => 0
        scroll.set_height(60);
        assert_eq!(scroll.offset(), 0);
    }

    #[test]
    fn test_eviction_shift_floors_at_zero() {
        let mut scroll = scroll_with(50, 20, 10);
        scroll.on_evicted(4);
        assert_eq!(scroll.offset(), 6);
        scroll.on_evicted(100);
        assert_eq!(scroll.offset(), 0);
    }

    #[test]
    fn test_indicator() {
        let scroll = scroll_with(5, 24, 0);
        assert!(!scroll.needs_indicator());
        assert_eq!(scroll.indicator(), None);

        let mut scroll = scroll_with(40, 24, 0);
        scroll.scroll_to_bottom();
        assert!(scroll.needs_indicator());
        assert_eq!(scroll.indicator().as_deref(), Some("[20/40]"));
    }

    #[test]
    fn test_indicator_agrees_with_pane_for_stale_offset() {
        // max = 10 - (10 - 3) = 3, last line is index 9
        let mut scroll = scroll_with(10, 10, 100);
        assert_eq!(scroll.visible_range(), (9, 10));
        assert_eq!(scroll.indicator().as_deref(), Some("[10/10]"));

        scroll.force_offset(usize::MAX);
        assert_eq!(scroll.indicator().as_deref(), Some("[10/10]"));
        scroll.scroll_up();
        assert_eq!(scroll.offset(), 3);
        assert_eq!(scroll.indicator().as_deref(), Some("[4/10]"));
    }

    #[test]
    fn test_handle_key_routes_navigation() {
        let mut scroll = scroll_with(50, 10, 20);
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);

        assert_eq!(scroll.handle_key(key(KeyCode::Up)), Handled::Yes);
        assert_eq!(scroll.offset(), 19);
        assert_eq!(scroll.handle_key(key(KeyCode::PageDown)), Handled::Yes);
        assert_eq!(scroll.offset(), 24);
        assert_eq!(scroll.handle_key(key(KeyCode::Left)), Handled::No);
        assert_eq!(scroll.offset(), 24);
    }
}
