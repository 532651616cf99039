//! Events tab implementation

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Rect},
    Frame,
};

use crate::app::events::{navigation_delta, sort_key, SortKeyPress};
use crate::app::state::AppState;
use crate::models::Event;
use crate::sort::{Field, FieldValue, SortKey};
use crate::ui::layout::FilterLayout;
use crate::ui::theme::Theme;
use crate::ui::widgets::{DataTable, SearchBar};

fn event_fields() -> Vec<Field<Event>> {
    vec![
        // Age doubles as default and secondary: whatever column the user
        // sorts by, ties break chronologically.
        Field::new("Age", FieldValue::Attr("age"))
            .default_sort()
            .secondary_sort()
            .with_sort_value(|event: &Event| {
                event
                    .timestamp
                    .map_or(SortKey::Missing, |t| SortKey::Int(t.timestamp()))
            })
            .with_width(Constraint::Length(7)),
        Field::new("Type", FieldValue::Attr("type")).with_width(Constraint::Length(8)),
        Field::new("Reason", FieldValue::Attr("reason"))
            .searchable()
            .with_width(Constraint::Length(20)),
        Field::new("Object", FieldValue::Attr("object"))
            .searchable()
            .with_width(Constraint::Fill(1)),
        Field::new("Message", FieldValue::Attr("message"))
            .searchable()
            .with_width(Constraint::Fill(2)),
        Field::new("Component", FieldValue::Attr("component")).with_width(Constraint::Length(16)),
    ]
}

pub struct EventsTab {
    table: DataTable<Event>,
    search_bar: SearchBar,
    filter_active: bool,
    visible: Vec<Event>,
    total: usize,
}

impl EventsTab {
    pub fn new() -> Self {
        Self {
            table: DataTable::new(event_fields()),
            search_bar: SearchBar::new(),
            filter_active: false,
            visible: Vec::new(),
            total: 0,
        }
    }

    /// Update cached data from state (call before render)
    pub async fn update_cache(&mut self, state: &Arc<AppState>) {
        let events = state.events.read().await;
        self.total = events.len();
        self.visible = self.table.visible_rows(&events, &self.search_bar.query);

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

        let warnings = self.visible.iter().filter(|event| event.is_warning()).count();
        let title = if self.search_bar.query.is_empty() {
            format!(" Events ({}, {} warnings) ", self.visible.len(), warnings)
        } else {
            format!(
                " Events ({}/{}) [filter: {}] ",
                self.visible.len(),
                self.total,
                self.search_bar.query
            )
        };

        self.table.render(
            frame,
            layout.content,
            &self.visible,
            theme,
            &title,
            "No events",
            None,
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
