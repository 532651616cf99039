//! Confirmation dialog

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::ui::layout::DialogLayout;
use crate::ui::theme::Theme;

pub struct ConfirmDialog {
    pub title: String,
    pub message: String,
    pub confirm_label: String,
    pub cancel_label: String,
    pub selected: bool, // true = confirm selected
    pub result: Option<bool>,
}

impl ConfirmDialog {
    pub fn new(title: &str, message: &str) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
            confirm_label: "Yes".to_string(),
            cancel_label: "No".to_string(),
            selected: false,
            result: None,
        }
    }

    pub fn with_labels(mut self, confirm: &str, cancel: &str) -> Self {
        self.confirm_label = confirm.to_string();
        self.cancel_label = cancel.to_string();
        self
    }

    /// Returns true once the dialog is resolved; `result` then holds the
    /// user's answer.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                self.selected = !self.selected;
            }
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.result = Some(true);
                return true;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.result = Some(false);
                return true;
            }
            KeyCode::Enter => {
                self.result = Some(self.selected);
                return true;
            }
            _ => {}
        }
        false
    }

    pub fn render(&self, frame: &mut Frame, theme: &Theme) {
        let area = frame.area();
        let dialog_area = DialogLayout::centered(area, 54, 9).dialog;

        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .title(format!(" {} ", self.title))
            .borders(Borders::ALL)
            .border_style(theme.border_focused());

        frame.render_widget(block.clone(), dialog_area);

        let inner = block.inner(dialog_area);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Min(2),    // Message
                Constraint::Length(1), // Buttons
            ])
            .split(inner);

        let message = Paragraph::new(self.message.clone())
            .style(theme.normal())
            .wrap(Wrap { trim: true });
        frame.render_widget(message, chunks[0]);

        let confirm_style = if self.selected {
            theme.accent().add_modifier(Modifier::BOLD)
        } else {
            theme.dim()
        };
        let cancel_style = if self.selected {
            theme.dim()
        } else {
            theme.accent().add_modifier(Modifier::BOLD)
        };

        let buttons = Line::from(vec![
            Span::styled(format!("[ {} ]", self.confirm_label), confirm_style),
            Span::raw("    "),
            Span::styled(format!("[ {} ]", self.cancel_label), cancel_style),
        ])
        .centered();

        frame.render_widget(Paragraph::new(buttons), chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(dialog: &mut ConfirmDialog, code: KeyCode) -> bool {
        dialog.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn y_and_n_resolve_immediately() {
        let mut dialog = ConfirmDialog::new("Suspend", "Suspend podinfo?");
        assert!(press(&mut dialog, KeyCode::Char('y')));
        assert_eq!(dialog.result, Some(true));

        let mut dialog = ConfirmDialog::new("Suspend", "Suspend podinfo?");
        assert!(press(&mut dialog, KeyCode::Esc));
        assert_eq!(dialog.result, Some(false));
    }

    #[test]
    fn enter_confirms_the_highlighted_button() {
        let mut dialog = ConfirmDialog::new("Suspend", "Suspend podinfo?");
        // Cancel is highlighted initially.
        assert!(!press(&mut dialog, KeyCode::Tab));
        assert!(press(&mut dialog, KeyCode::Enter));
        assert_eq!(dialog.result, Some(true));
    }
}
