//! Terminal-agnostic keyboard input and line editing.

/// Keyboard input abstraction.
///
/// Decouples application logic from crossterm so the [`crate::App`] can be
/// driven by plain values in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Printable character.
    Char(char),
    /// Character typed with Ctrl held, lowercased.
    Ctrl(char),
    /// Enter/Return key.
    Enter,
    /// Backspace key (delete character before cursor).
    Backspace,
    /// Delete key (delete character at cursor).
    Delete,
    /// Tab key (switch join form field).
    Tab,
    /// Escape key (quit).
    Esc,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
    /// Up arrow key.
    Up,
    /// Down arrow key.
    Down,
    /// Home key (cursor to start).
    Home,
    /// End key (cursor to end).
    End,
}

/// Single-line text buffer with a cursor.
///
/// The cursor counts characters, not bytes, so multi-byte input edits
/// correctly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineEditor {
    buffer: String,
    cursor: usize,
}

impl LineEditor {
    /// Create an empty editor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an editor holding `text`, cursor at the end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let buffer = text.into();
        let cursor = buffer.chars().count();
        Self { buffer, cursor }
    }

    /// Current text.
    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Take the text out, leaving the editor empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.buffer)
    }

    /// Apply an editing key. Returns false for keys that are not edits.
    pub fn edit(&mut self, key: KeyInput) -> bool {
        match key {
            KeyInput::Char(c) => {
                let at = self.byte_offset(self.cursor);
                self.buffer.insert(at, c);
                self.cursor += 1;
            },
            KeyInput::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_offset(self.cursor);
                    self.buffer.remove(at);
                }
            },
            KeyInput::Delete => {
                if self.cursor < self.len() {
                    let at = self.byte_offset(self.cursor);
                    self.buffer.remove(at);
                }
            },
            KeyInput::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyInput::Right => self.cursor = (self.cursor + 1).min(self.len()),
            KeyInput::Home => self.cursor = 0,
            KeyInput::End => self.cursor = self.len(),
            KeyInput::Ctrl(_)
            | KeyInput::Enter
            | KeyInput::Tab
            | KeyInput::Esc
            | KeyInput::Up
            | KeyInput::Down => return false,
        }
        true
    }

    fn len(&self) -> usize {
        self.buffer.chars().count()
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.buffer.char_indices().nth(chars).map_or(self.buffer.len(), |(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> LineEditor {
        let mut editor = LineEditor::new();
        for c in text.chars() {
            editor.edit(KeyInput::Char(c));
        }
        editor
    }

    #[test]
    fn typing_appends() {
        let editor = typed("hello");
        assert_eq!(editor.text(), "hello");
        assert_eq!(editor.cursor(), 5);
    }

    #[test]
    fn insert_in_middle() {
        let mut editor = typed("hllo");
        editor.edit(KeyInput::Home);
        editor.edit(KeyInput::Right);
        editor.edit(KeyInput::Char('e'));
        assert_eq!(editor.text(), "hello");
        assert_eq!(editor.cursor(), 2);
    }

    #[test]
    fn backspace_and_delete() {
        let mut editor = typed("abc");
        editor.edit(KeyInput::Backspace);
        assert_eq!(editor.text(), "ab");

        editor.edit(KeyInput::Home);
        editor.edit(KeyInput::Delete);
        assert_eq!(editor.text(), "b");

        // Nothing to delete past the end
        editor.edit(KeyInput::End);
        editor.edit(KeyInput::Delete);
        assert_eq!(editor.text(), "b");
    }

    #[test]
    fn multibyte_characters() {
        let mut editor = typed("héllo");
        editor.edit(KeyInput::Left);
        editor.edit(KeyInput::Left);
        editor.edit(KeyInput::Left);
        editor.edit(KeyInput::Backspace);
        assert_eq!(editor.text(), "hllo");
        assert_eq!(editor.cursor(), 1);
    }

    #[test]
    fn cursor_clamped() {
        let mut editor = typed("ab");
        editor.edit(KeyInput::Right);
        assert_eq!(editor.cursor(), 2);

        editor.edit(KeyInput::Home);
        editor.edit(KeyInput::Left);
        assert_eq!(editor.cursor(), 0);
    }

    #[test]
    fn take_clears() {
        let mut editor = LineEditor::with_text("hi");
        assert_eq!(editor.cursor(), 2);
        assert_eq!(editor.take(), "hi");
        assert_eq!(editor.text(), "");
        assert_eq!(editor.cursor(), 0);
    }

    #[test]
    fn non_edit_keys_reported() {
        let mut editor = LineEditor::new();
        assert!(!editor.edit(KeyInput::Enter));
        assert!(!editor.edit(KeyInput::Ctrl('l')));
        assert!(editor.edit(KeyInput::Home));
    }
}
