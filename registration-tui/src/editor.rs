//! Single-line text editing.

use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyModifiers;

/// Outcome of feeding a key to a [`TextInput`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditResult {
    /// The text changed.
    Changed,
    /// The cursor moved; text is unchanged.
    Handled,
    /// Not an editing key.
    Ignored,
}

/// Text buffer with a cursor. The cursor counts characters, not bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    text: String,
    cursor: usize,
}

impl TextInput {
    /// Creates an input with the cursor at the end.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text left of the cursor.
    pub fn before_cursor(&self) -> &str {
        &self.text[..char_to_byte_index(&self.text, self.cursor)]
    }

    /// Replaces the content, placing the cursor at the end.
    pub fn set(&mut self, text: impl Into<String>) {
        *self = Self::new(text);
    }

    /// Applies an editing key.
    pub fn handle_key(&mut self, key: KeyEvent) -> EditResult {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                self.insert_char(c);
                EditResult::Changed
            }
            KeyCode::Backspace => changed(self.delete_back()),
            KeyCode::Delete => changed(self.delete_forward()),
            KeyCode::Left => {
                self.move_cursor(-1);
                EditResult::Handled
            }
            KeyCode::Right => {
                self.move_cursor(1);
                EditResult::Handled
            }
            KeyCode::Home => {
                self.cursor = 0;
                EditResult::Handled
            }
            KeyCode::End => {
                self.cursor = self.text.chars().count();
                EditResult::Handled
            }
            KeyCode::Char('u') if ctrl => changed(self.clear()),
            _ => EditResult::Ignored,
        }
    }

    fn insert_char(&mut self, c: char) {
        let byte_pos = char_to_byte_index(&self.text, self.cursor);
        self.text.insert(byte_pos, c);
        self.cursor += 1;
    }

    fn delete_back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let start = char_to_byte_index(&self.text, self.cursor - 1);
        let end = char_to_byte_index(&self.text, self.cursor);
        self.text.replace_range(start..end, "");
        self.cursor -= 1;
        true
    }

    fn delete_forward(&mut self) -> bool {
        if self.cursor >= self.text.chars().count() {
            return false;
        }
        let start = char_to_byte_index(&self.text, self.cursor);
        let end = char_to_byte_index(&self.text, self.cursor + 1);
        self.text.replace_range(start..end, "");
        true
    }

    fn clear(&mut self) -> bool {
        if self.text.is_empty() {
            return false;
        }
        self.set(String::new());
        true
    }

    fn move_cursor(&mut self, delta: i32) {
        let char_count = self.text.chars().count() as i32;
        self.cursor = (self.cursor as i32 + delta).clamp(0, char_count) as usize;
    }
}

fn changed(did_change: bool) -> EditResult {
    if did_change {
        EditResult::Changed
    } else {
        EditResult::Handled
    }
}

fn char_to_byte_index(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}
