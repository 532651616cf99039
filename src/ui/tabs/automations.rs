//! Automations tab implementation

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    Frame,
};

use crate::app::events::{navigation_delta, sort_key, SortKeyPress};
use crate::app::state::AppState;
use crate::models::{Automation, ReadyStatus};
use crate::sort::{Field, FieldValue, SortKey};
use crate::ui::layout::FilterLayout;
use crate::ui::theme::Theme;
use crate::ui::widgets::{DataTable, SearchBar};

fn status_rank(status: ReadyStatus) -> i64 {
    match status {
        ReadyStatus::Ready => 0,
        ReadyStatus::Reconciling => 1,
        ReadyStatus::NotReady => 2,
        ReadyStatus::Suspended => 3,
        ReadyStatus::Unknown => 4,
    }
}

fn automation_fields() -> Vec<Field<Automation>> {
    vec![
        Field::new("Name", FieldValue::Attr("name"))
            .default_sort()
            .secondary_sort()
            .searchable()
            .with_width(Constraint::Length(24)),
        Field::new("Kind", FieldValue::Attr("kind")).with_width(Constraint::Length(14)),
        Field::new("Namespace", FieldValue::Attr("namespace"))
            .searchable()
            .with_width(Constraint::Length(16)),
        Field::new("Source", FieldValue::Attr("source"))
            .searchable()
            .with_width(Constraint::Length(20)),
        Field::new("Status", FieldValue::Attr("status"))
            .with_sort_value(|automation: &Automation| SortKey::Int(status_rank(automation.status())))
            .with_width(Constraint::Length(12)),
        Field::new("Revision", FieldValue::Attr("revision")).with_width(Constraint::Fill(1)),
        Field::new("Age", FieldValue::Attr("age"))
            .with_sort_value(|automation: &Automation| {
                automation
                    .last_updated
                    .map_or(SortKey::Missing, |t| SortKey::Int(t.timestamp()))
            })
            .with_width(Constraint::Length(7)),
    ]
}

pub struct AutomationsTab {
    table: DataTable<Automation>,
    search_bar: SearchBar,
    filter_active: bool,
    visible: Vec<Automation>,
    total: usize,
}

impl AutomationsTab {
    pub fn new() -> Self {
        Self {
            table: DataTable::new(automation_fields()),
            search_bar: SearchBar::new(),
            filter_active: false,
            visible: Vec::new(),
            total: 0,
        }
    }

    /// Update cached data from state (call before render)
    pub async fn update_cache(&mut self, state: &Arc<AppState>) {
        let automations = state.automations.read().await;
        self.total = automations.len();
        self.visible = self
            .table
            .visible_rows(&automations, &self.search_bar.query);

        if let Some(selected) = self.table.selected() {
            if selected >= self.visible.len() && !self.visible.is_empty() {
                self.table.navigate(i32::MAX, self.visible.len());
            }
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let layout = FilterLayout::new(area, self.filter_active);

        if self.filter_active {
            self.search_bar
                .render(frame, layout.filter, theme.normal(), theme.border_focused());
        }

        let title = if self.search_bar.query.is_empty() {
            format!(" Automations ({}) ", self.visible.len())
        } else {
            format!(
                " Automations ({}/{}) [filter: {}] ",
                self.visible.len(),
                self.total,
                self.search_bar.query
            )
        };

        let footer = self
            .table
            .selected()
            .and_then(|index| self.visible.get(index))
            .map(|automation| {
                let status = automation.status();
                let detail = automation.message().unwrap_or_default();
                Line::from(vec![
                    Span::styled(format!(" {} ", automation.name), theme.accent()),
                    Span::styled(format!("[{}] ", status), theme.status_style(status)),
                    Span::styled(detail, theme.dim()),
                ])
            });

        self.table.render(
            frame,
            layout.content,
            &self.visible,
            theme,
            &title,
            "No automations",
            footer,
        );
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.filter_active {
            if self.search_bar.handle_key(key) {
                self.filter_active = false;
            }
            return;
        }

        if let Some(press) = sort_key(&key) {
            match press {
                SortKeyPress::NextColumn => self.table.next_sort_column(),
                SortKeyPress::PrevColumn => self.table.prev_sort_column(),
                SortKeyPress::ToggleDirection => self.table.toggle_sort_direction(),
            }
            return;
        }

        match key.code {
            KeyCode::Char('/') => {
                self.filter_active = true;
                self.search_bar.activate();
            }
            KeyCode::Esc => {
                self.search_bar.clear();
            }
            _ => {
                if let Some(delta) = navigation_delta(&key) {
                    self.table.navigate(delta, self.visible.len());
                }
            }
        }
    }
}
