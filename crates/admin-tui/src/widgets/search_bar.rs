//! Search bar — free-text input at the bottom of the screen.
//!
//! - `Char(c)` inserts at the cursor, `Backspace` deletes before it.
//! - `Nav(Left)` / `Nav(Right)` move the cursor.
//!
//! The right-hand side shows the active sort so it stays visible while the
//! filter panel is scrolled away.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone)]
pub struct SearchBarState {
    pub query: String,
    /// Byte offset of the cursor within `query`.
    pub cursor: usize,
}

impl SearchBarState {
    pub fn handle(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Char(c) => {
                self.query.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                tracing::debug!(query = %self.query, "search: char inserted");
            }
            AppEvent::Backspace => {
                if let Some(prev) = prev_boundary(&self.query, self.cursor) {
                    self.query.remove(prev);
                    self.cursor = prev;
                    tracing::debug!(query = %self.query, "search: backspace");
                }
            }
            AppEvent::Nav(Direction::Left) => {
                if let Some(prev) = prev_boundary(&self.query, self.cursor) {
                    self.cursor = prev;
                }
            }
            AppEvent::Nav(Direction::Right) => {
                if self.cursor < self.query.len() {
                    self.cursor = self.query[self.cursor..]
                        .char_indices()
                        .nth(1)
                        .map(|(i, _)| self.cursor + i)
                        .unwrap_or(self.query.len());
                }
            }
            _ => {}
        }
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.cursor = 0;
    }

    /// Replace the text and put the cursor at its end.
    pub fn set(&mut self, text: &str) {
        self.query = text.to_string();
        self.cursor = self.query.len();
    }
}

fn prev_boundary(s: &str, cursor: usize) -> Option<usize> {
    if cursor == 0 {
        return None;
    }
    s[..cursor].char_indices().last().map(|(i, _)| i)
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct SearchBar<'a> {
    state: &'a SearchBarState,
    focused: bool,
    placeholder: &'a str,
    sort_label: &'a str,
    theme: &'a Theme,
}

impl<'a> SearchBar<'a> {
    pub fn new(state: &'a SearchBarState, focused: bool, theme: &'a Theme) -> Self {
        Self {
            state,
            focused,
            placeholder: "press / to search",
            sort_label: "",
            theme,
        }
    }

    pub fn placeholder(mut self, text: &'a str) -> Self {
        self.placeholder = text;
        self
    }

    pub fn sort_label(mut self, label: &'a str) -> Self {
        self.sort_label = label;
        self
    }

    /// Absolute terminal position of the text cursor within `area`.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        let col = self.state.query[..self.state.cursor].chars().count() as u16;
        let x = (area.x + 1 + col).min(area.right().saturating_sub(1));
        (x, area.y + 1)
    }
}

impl Widget for SearchBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let block = Block::bordered().title("Search").border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let sort_text = format!("sort: {} ", self.sort_label);
        let chunks = Layout::default()
            .direction(LayoutDir::Horizontal)
            .constraints([
                Constraint::Fill(1),
                Constraint::Length(sort_text.chars().count() as u16),
            ])
            .split(inner);

        let line = if self.state.query.is_empty() && !self.focused {
            Line::from(Span::styled(self.placeholder, self.theme.muted))
        } else {
            Line::from(self.state.query.as_str())
        };
        Paragraph::new(line).render(chunks[0], buf);
        Paragraph::new(Span::styled(sort_text, self.theme.muted)).render(chunks[1], buf);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> SearchBarState {
        let mut s = SearchBarState::default();
        text.chars().for_each(|c| s.handle(&AppEvent::Char(c)));
        s
    }

    #[test]
    fn typing_and_backspace() {
        let mut s = typed("rohit");
        assert_eq!(s.query, "rohit");
        s.handle(&AppEvent::Backspace);
        assert_eq!(s.query, "rohi");
        assert_eq!(s.cursor, 4);
    }

    #[test]
    fn insert_mid_string() {
        let mut s = typed("ac");
        s.handle(&AppEvent::Nav(Direction::Left));
        s.handle(&AppEvent::Char('b'));
        assert_eq!(s.query, "abc");
    }

    #[test]
    fn multibyte_cursor_moves_by_char() {
        let mut s = typed("né");
        s.handle(&AppEvent::Nav(Direction::Left));
        assert_eq!(s.cursor, 1);
        s.handle(&AppEvent::Nav(Direction::Right));
        assert_eq!(s.cursor, 3);
        s.handle(&AppEvent::Backspace);
        assert_eq!(s.query, "n");
    }

    #[test]
    fn backspace_at_start_is_noop() {
        let mut s = SearchBarState::default();
        s.handle(&AppEvent::Backspace);
        assert_eq!(s.query, "");
    }
}
