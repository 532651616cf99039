//! Filter bar widget

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Filter input state
pub struct SearchBar {
    pub query: String,
    pub active: bool,
    /// Cursor position in chars, not bytes; the query may hold
    /// multibyte characters.
    cursor_pos: usize,
}

impl SearchBar {
    pub fn new() -> Self {
        Self {
            query: String::new(),
            active: false,
            cursor_pos: 0,
        }
    }

    pub fn activate(&mut self) {
        self.active = true;
        self.cursor_pos = self.char_count();
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.cursor_pos = 0;
    }

    fn char_count(&self) -> usize {
        self.query.chars().count()
    }

    /// Byte offset of the `char_index`-th character.
    fn byte_index(&self, char_index: usize) -> usize {
        self.query
            .char_indices()
            .nth(char_index)
            .map(|(index, _)| index)
            .unwrap_or(self.query.len())
    }

    /// Edit the query from a key event while the bar is active. Returns
    /// true when the event closes the bar (Enter or Esc).
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.deactivate();
                return true;
            }
            KeyCode::Backspace => {
                if self.cursor_pos > 0 {
                    self.cursor_pos -= 1;
                    let index = self.byte_index(self.cursor_pos);
                    self.query.remove(index);
                }
            }
            KeyCode::Delete => {
                if self.cursor_pos < self.char_count() {
                    let index = self.byte_index(self.cursor_pos);
                    self.query.remove(index);
                }
            }
            KeyCode::Left => {
                self.cursor_pos = self.cursor_pos.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.cursor_pos < self.char_count() {
                    self.cursor_pos += 1;
                }
            }
            KeyCode::Home => {
                self.cursor_pos = 0;
            }
            KeyCode::End => {
                self.cursor_pos = self.char_count();
            }
            KeyCode::Char(c) => {
                let index = self.byte_index(self.cursor_pos);
                self.query.insert(index, c);
                self.cursor_pos += 1;
            }
            _ => {}
        }
        false
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, style: Style, focused_style: Style) {
        let border_style = if self.active { focused_style } else { style };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Filter (/ to edit, Esc to clear) ");

        let display_text = if self.query.is_empty() && !self.active {
            "Type to filter...".to_string()
        } else {
            self.query.clone()
        };

        let paragraph = Paragraph::new(display_text).block(block).style(style);
        frame.render_widget(paragraph, area);

        if self.active {
            frame.set_cursor_position((area.x + 1 + self.cursor_pos as u16, area.y + 1));
        }
    }
}

impl Default for SearchBar {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(bar: &mut SearchBar, code: KeyCode) -> bool {
        bar.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn typing_and_editing() {
        let mut bar = SearchBar::new();
        bar.activate();
        press(&mut bar, KeyCode::Char('g'));
        press(&mut bar, KeyCode::Char('i'));
        press(&mut bar, KeyCode::Char('t'));
        assert_eq!(bar.query, "git");

        press(&mut bar, KeyCode::Backspace);
        assert_eq!(bar.query, "gi");

        press(&mut bar, KeyCode::Home);
        press(&mut bar, KeyCode::Delete);
        assert_eq!(bar.query, "i");
    }

    #[test]
    fn multibyte_input_edits_on_char_boundaries() {
        let mut bar = SearchBar::new();
        bar.activate();
        press(&mut bar, KeyCode::Char('é'));
        press(&mut bar, KeyCode::Char('a'));
        assert_eq!(bar.query, "éa");

        press(&mut bar, KeyCode::Left);
        press(&mut bar, KeyCode::Char('ü'));
        assert_eq!(bar.query, "éüa");

        press(&mut bar, KeyCode::Backspace);
        assert_eq!(bar.query, "éa");

        press(&mut bar, KeyCode::Home);
        press(&mut bar, KeyCode::Delete);
        assert_eq!(bar.query, "a");
    }

    #[test]
    fn enter_closes_but_keeps_query() {
        let mut bar = SearchBar::new();
        bar.activate();
        press(&mut bar, KeyCode::Char('x'));
        assert!(press(&mut bar, KeyCode::Enter));
        assert!(!bar.active);
        assert_eq!(bar.query, "x");
    }
}
