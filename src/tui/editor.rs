// Line editor - the in-progress input line
//
// All positions and lengths are measured in code points (`char`s), never in
// bytes. The cursor sits on a code-point boundary by construction, so slicing
// the text at the cursor can never split a multi-byte character.

use super::traits::{Handled, Interactive};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Marker inserted at the cursor position when rendering the input line
pub const CURSOR_MARKER: char = '█';

/// Prompt shown before the input line and before echoed submissions
pub const PROMPT: &str = "> ";

/// Single-line text editor with a code-point cursor
///
/// Invariant: `0 <= cursor <= text.chars().count()`
#[derive(Debug, Clone, Default)]
pub struct LineEditor {
    text: String,
    /// Cursor position in code points
    cursor: usize,
}

impl LineEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text
    #[cfg(test)]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in code points
    #[cfg(test)]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Length in code points
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Splice `text` in at the cursor and advance past it
    pub fn insert(&mut self, text: &str) {
        let at = self.byte_offset(self.cursor);
        self.text.insert_str(at, text);
        self.cursor += text.chars().count();
    }

    /// Remove the code point before the cursor
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let at = self.byte_offset(self.cursor - 1);
        self.text.remove(at);
        self.cursor -= 1;
    }

    /// Remove the code point under the cursor
    pub fn delete_forward(&mut self) {
        if self.cursor >= self.len() {
            return;
        }
        let at = self.byte_offset(self.cursor);
        self.text.remove(at);
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.len());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.len();
    }

    /// Take the current text, leaving the editor empty.
    ///
    /// Returns `None` (and changes nothing) when there is nothing to submit.
    pub fn submit(&mut self) -> Option<String> {
        if self.text.is_empty() {
            return None;
        }
        self.cursor = 0;
        Some(std::mem::take(&mut self.text))
    }

    /// Reset to empty with the cursor at 0
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Input line with the prompt and a cursor marker at the code-point cursor
    pub fn render(&self) -> String {
        let (before, after) = self.text.split_at(self.byte_offset(self.cursor));
        let mut line = String::with_capacity(PROMPT.len() + self.text.len() + 4);
        line.push_str(PROMPT);
        line.push_str(before);
        line.push(CURSOR_MARKER);
        line.push_str(after);
        line
    }

    /// Byte offset of the code point at `index`; the text length past the end
    fn byte_offset(&self, index: usize) -> usize {
        self.text
            .char_indices()
            .nth(index)
            .map(|(offset, _)| offset)
            .unwrap_or(self.text.len())
    }
}

impl Interactive for LineEditor {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Char(c) if !is_shortcut_chord(key.modifiers) => {
                let mut buf = [0u8; 4];
                self.insert(c.encode_utf8(&mut buf));
            }
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete_forward(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.move_home(),
            KeyCode::End => self.move_end(),
            _ => return Handled::No,
        }
        Handled::Yes
    }
}

/// Ctrl or Alt alone marks a shortcut. Both together is how AltGr arrives
/// on some platforms, and those keys produce ordinary characters.
fn is_shortcut_chord(modifiers: KeyModifiers) -> bool {
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);
    let alt = modifiers.contains(KeyModifiers::ALT);
    ctrl != alt
}
