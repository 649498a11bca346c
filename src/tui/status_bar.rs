// Status bar state
//
// One row at the bottom of the screen: active task, process/error status,
// transcript size and key hints. Rendered as plain text, truncated to the
// terminal width in display columns so CJK and emoji never overflow the row.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const HELP_HINT: &str = "F1: help | Ctrl+C: quit";
const SEPARATOR: &str = " │ ";

#[derive(Debug, Clone)]
pub struct StatusBar {
    /// Latest status reported by process or error events
    status: Option<String>,

    /// Task selected with the `task` command
    active_task: Option<String>,

    /// Whether key hints are shown
    show_help: bool,
}

impl StatusBar {
    pub fn new() -> Self {
        Self {
            status: None,
            active_task: None,
            show_help: true,
        }
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
    }

    #[cfg(test)]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn set_active_task(&mut self, task: impl Into<String>) {
        self.active_task = Some(task.into());
    }

    pub fn active_task(&self) -> Option<&str> {
        self.active_task.as_deref()
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    #[cfg(test)]
    pub fn is_help_visible(&self) -> bool {
        self.show_help
    }

    /// Plain-text status row, at most `width` columns wide.
    ///
    /// `line_count` and `truncated` describe the transcript; a truncated
    /// transcript has dropped lines from the front since the last clear.
    pub fn render_text(&self, width: usize, line_count: usize, truncated: bool) -> String {
        let mut sections = vec![format!(
            "task: {}",
            self.active_task.as_deref().unwrap_or("none")
        )];
        sections.push(self.status.clone().unwrap_or_else(|| "Idle".to_string()));
        sections.push(match (line_count, truncated) {
            (1, false) => "1 line".to_string(),
            (n, false) => format!("{} lines", n),
            (n, true) => format!("{} lines (truncated)", n),
        });
        if self.show_help {
            sections.push(HELP_HINT.to_string());
        }

        truncate_to_width(&sections.join(SEPARATOR), width)
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

/// Cut `text` to at most `width` display columns, ending in "…" when cut
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let budget = width - 1;
    let mut used = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let bar = StatusBar::new();
        assert!(bar.is_help_visible());
        assert_eq!(bar.status(), None);
        assert_eq!(bar.active_task(), None);
        assert_eq!(
            bar.render_text(80, 0, false),
            "task: none │ Idle │ 0 lines │ F1: help | Ctrl+C: quit"
        );
    }

    #[test]
    fn test_toggle_help_hides_hints() {
        let mut bar = StatusBar::new();
        bar.toggle_help();
        assert!(!bar.is_help_visible());
        bar.set_active_task("refactor");
        bar.set_status("Running (PID: 9)");
        assert_eq!(
            bar.render_text(80, 1, false),
            "task: refactor │ Running (PID: 9) │ 1 line"
        );
    }

    #[test]
    fn test_render_respects_width() {
        let mut bar = StatusBar::new();
        bar.set_active_task("とても長いタスク名前です");
        let text = bar.render_text(20, 3, false);
        assert!(text.width() <= 20);
        assert!(text.ends_with('…'));
    }

    #[test]
    fn test_line_count_and_truncation() {
        let mut bar = StatusBar::new();
        bar.toggle_help();
        assert_eq!(bar.render_text(80, 42, false), "task: none │ Idle │ 42 lines");
        assert_eq!(
            bar.render_text(80, 1000, true),
            "task: none │ Idle │ 1000 lines (truncated)"
        );
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("hello", 10), "hello");
        assert_eq!(truncate_to_width("hello", 4), "hel…");
        assert_eq!(truncate_to_width("日本語", 4), "日…");
        assert_eq!(truncate_to_width("hello", 0), "");
    }
}
