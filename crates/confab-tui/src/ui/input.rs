//! Message input bar.
//!
//! A small multi-line input with cursor editing and submit history.
//! Enter submits; Shift+Enter inserts a literal newline.

use crate::ui::theme::Styles;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// State for the input bar: content, cursor, and submit history.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// The text content.
    content: String,
    /// Cursor position (byte index, always on a char boundary).
    cursor: usize,
    /// Previously submitted messages for Up/Down recall.
    history: Vec<String>,
    /// Current history position when recalling (`None` = live input).
    history_index: Option<usize>,
}

impl InputState {
    /// Create a new empty input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Check if the content is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Clear the content.
    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
        self.history_index = None;
    }

    /// Insert a character at the cursor position.
    pub fn insert(&mut self, ch: char) {
        self.content.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    /// Insert a string at the cursor position.
    pub fn insert_str(&mut self, s: &str) {
        self.content.insert_str(self.cursor, s);
        self.cursor += s.len();
    }

    /// Delete the character before the cursor (backspace).
    pub fn backspace(&mut self) {
        if let Some((idx, _)) = self.content[..self.cursor].char_indices().next_back() {
            self.content.remove(idx);
            self.cursor = idx;
        }
    }

    /// Delete the character at the cursor (delete).
    pub fn delete(&mut self) {
        if self.cursor < self.content.len() {
            self.content.remove(self.cursor);
        }
    }

    /// Move cursor left one character.
    pub fn move_left(&mut self) {
        if let Some((idx, _)) = self.content[..self.cursor].char_indices().next_back() {
            self.cursor = idx;
        }
    }

    /// Move cursor right one character.
    pub fn move_right(&mut self) {
        if let Some(ch) = self.content[self.cursor..].chars().next() {
            self.cursor += ch.len_utf8();
        }
    }

    /// Move cursor to start.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Move cursor to end.
    pub fn move_end(&mut self) {
        self.cursor = self.content.len();
    }

    /// Take the content as a submission, recording it in history.
    pub fn submit(&mut self) -> String {
        let content = std::mem::take(&mut self.content);
        self.cursor = 0;
        self.history_index = None;
        if !content.trim().is_empty() {
            self.history.push(content.clone());
        }
        content
    }

    /// Recall the previous history entry (Up with empty input).
    pub fn history_prev(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let next = match self.history_index {
            None => self.history.len() - 1,
            Some(0) => 0,
            Some(i) => i - 1,
        };
        self.history_index = Some(next);
        self.content = self.history[next].clone();
        self.cursor = self.content.len();
    }

    /// Recall the next history entry, or return to empty live input.
    pub fn history_next(&mut self) {
        match self.history_index {
            None => {}
            Some(i) if i + 1 < self.history.len() => {
                self.history_index = Some(i + 1);
                self.content = self.history[i + 1].clone();
                self.cursor = self.content.len();
            }
            Some(_) => {
                self.history_index = None;
                self.content.clear();
                self.cursor = 0;
            }
        }
    }

    /// Create a render widget from this state.
    pub fn widget(&self) -> InputBar<'_> {
        InputBar {
            state: self,
            placeholder: "Type a message...",
        }
    }
}

/// Render widget for [`InputState`].
pub struct InputBar<'a> {
    state: &'a InputState,
    placeholder: &'a str,
}

impl Widget for InputBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 || area.width < 1 {
            return;
        }

        let prompt = "> ";

        // Empty input: prompt, cursor, placeholder hint
        if self.state.is_empty() {
            let line = Line::from(vec![
                Span::styled(prompt, Styles::active()),
                Span::styled("_", Styles::default()),
                Span::styled(self.placeholder, Styles::dim()),
            ]);
            Paragraph::new(vec![line]).render(area, buf);
            return;
        }

        // Content with an inline cursor marker; continuation lines are
        // indented to align under the prompt.
        let mut lines: Vec<Line<'_>> = Vec::new();
        let mut spans: Vec<Span<'_>> = vec![Span::styled(prompt, Styles::active())];
        let mut cursor_drawn = false;

        for (idx, ch) in self.state.content.char_indices() {
            if idx == self.state.cursor && !cursor_drawn {
                spans.push(Span::styled("|", Styles::active()));
                cursor_drawn = true;
            }
            if ch == '\n' {
                lines.push(Line::from(std::mem::take(&mut spans)));
                spans.push(Span::raw(" ".repeat(prompt.len())));
            } else {
                spans.push(Span::styled(ch.to_string(), Styles::default()));
            }
        }

        if !cursor_drawn {
            spans.push(Span::styled("_", Styles::active()));
        }
        lines.push(Line::from(spans));

        // Keep the cursor line visible when content exceeds the area
        let height = area.height as usize;
        if lines.len() > height {
            lines.drain(..lines.len() - height);
        }

        Paragraph::new(lines).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_backspace() {
        let mut state = InputState::new();
        assert!(state.is_empty());

        state.insert('H');
        state.insert('i');
        assert_eq!(state.content(), "Hi");

        state.backspace();
        assert_eq!(state.content(), "H");

        state.clear();
        assert!(state.is_empty());
    }

    #[test]
    fn test_cursor_movement_and_mid_insert() {
        let mut state = InputState::new();
        state.insert_str("Hello");

        state.move_left();
        state.move_left();
        state.insert('X');
        assert_eq!(state.content(), "HelXlo");

        state.move_home();
        state.insert('>');
        assert_eq!(state.content(), ">HelXlo");

        state.move_end();
        state.insert('!');
        assert_eq!(state.content(), ">HelXlo!");
    }

    #[test]
    fn test_multibyte_editing() {
        let mut state = InputState::new();
        state.insert_str("café");
        state.backspace();
        assert_eq!(state.content(), "caf");

        state.insert('é');
        state.move_left();
        state.delete();
        assert_eq!(state.content(), "caf");
    }

    #[test]
    fn test_newline_insert() {
        let mut state = InputState::new();
        state.insert_str("line one");
        state.insert('\n');
        state.insert_str("line two");
        assert_eq!(state.content(), "line one\nline two");
    }

    #[test]
    fn test_submit_records_history() {
        let mut state = InputState::new();

        state.insert_str("first");
        assert_eq!(state.submit(), "first");
        assert!(state.is_empty());

        state.insert_str("second");
        state.submit();

        state.history_prev();
        assert_eq!(state.content(), "second");
        state.history_prev();
        assert_eq!(state.content(), "first");

        state.history_next();
        assert_eq!(state.content(), "second");
        state.history_next();
        assert!(state.is_empty());
    }

    #[test]
    fn test_blank_submit_not_recorded() {
        let mut state = InputState::new();
        state.insert_str("   ");
        state.submit();

        state.history_prev();
        assert!(state.is_empty());
    }
}
