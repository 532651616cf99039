//! Sources tab implementation

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    Frame,
};
use tokio::sync::mpsc;

use crate::app::events::{navigation_delta, sort_key, SortKeyPress};
use crate::app::state::{AppMessage, AppState};
use crate::models::{Automation, ObjectRef, ReadyStatus, Source};
use crate::sort::{Field, FieldValue, SortKey};
use crate::ui::dialogs::ConfirmDialog;
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

fn source_fields() -> Vec<Field<Source>> {
    vec![
        Field::new("Name", FieldValue::Attr("name"))
            .default_sort()
            .secondary_sort()
            .searchable()
            .with_width(Constraint::Length(24)),
        Field::new("Kind", FieldValue::Attr("kind")).with_width(Constraint::Length(15)),
        Field::new("Namespace", FieldValue::Attr("namespace"))
            .searchable()
            .with_width(Constraint::Length(16)),
        Field::new("Status", FieldValue::Attr("status"))
            .with_sort_value(|source: &Source| SortKey::Int(status_rank(source.status())))
            .with_width(Constraint::Length(12)),
        Field::new("Message", FieldValue::Attr("message")).with_width(Constraint::Fill(2)),
        Field::new("URL", FieldValue::Attr("url"))
            .searchable()
            .with_width(Constraint::Fill(2)),
        Field::new("Interval", FieldValue::Attr("interval"))
            .with_sort_value(|source: &Source| {
                source
                    .interval
                    .map_or(SortKey::Missing, |secs| SortKey::Int(secs as i64))
            })
            .with_width(Constraint::Length(8)),
        Field::new("Age", FieldValue::Attr("age"))
            .with_sort_value(|source: &Source| {
                source
                    .last_updated
                    .map_or(SortKey::Missing, |t| SortKey::Int(t.timestamp()))
            })
            .with_width(Constraint::Length(7)),
    ]
}

/// Pending suspend/resume toggle behind a confirmation dialog.
struct PendingSuspend {
    dialog: ConfirmDialog,
    object: ObjectRef,
    suspend: bool,
}

pub struct SourcesTab {
    table: DataTable<Source>,
    search_bar: SearchBar,
    filter_active: bool,
    /// Filtered and sorted rows shown this frame.
    visible: Vec<Source>,
    total: usize,
    automations: Vec<Automation>,
    pending: Option<PendingSuspend>,
}

impl SourcesTab {
    pub fn new() -> Self {
        Self {
            table: DataTable::new(source_fields()),
            search_bar: SearchBar::new(),
            filter_active: false,
            visible: Vec::new(),
            total: 0,
            automations: Vec::new(),
            pending: None,
        }
    }

    pub fn showing_dialog(&self) -> bool {
        self.pending.is_some()
    }

    /// Update cached data from state (call before render)
    pub async fn update_cache(&mut self, state: &Arc<AppState>) {
        let sources = state.sources.read().await;
        self.total = sources.len();
        self.visible = self.table.visible_rows(&sources, &self.search_bar.query);
        drop(sources);

        self.automations = state.automations.read().await.clone();

        // Keep the selection inside the visible range.
        if let Some(selected) = self.table.selected() {
            if selected >= self.visible.len() && !self.visible.is_empty() {
                self.table.navigate(i32::MAX, self.visible.len());
            }
        }
    }

    fn selected_source(&self) -> Option<&Source> {
        self.table
            .selected()
            .and_then(|index| self.visible.get(index))
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let layout = FilterLayout::new(area, self.filter_active);

        if self.filter_active {
            self.search_bar
                .render(frame, layout.filter, theme.normal(), theme.border_focused());
        }

        let title = if self.search_bar.query.is_empty() {
            format!(" Sources ({}) ", self.visible.len())
        } else {
            format!(
                " Sources ({}/{}) [filter: {}] ",
                self.visible.len(),
                self.total,
                self.search_bar.query
            )
        };

        let footer = self.selected_source().map(|source| {
            let used_by = self
                .automations
                .iter()
                .filter(|automation| automation.uses_source(source))
                .count();
            Line::from(vec![
                Span::styled(format!(" {} ", source.name), theme.accent()),
                Span::styled(
                    format!("[{}] ", source.status()),
                    theme.status_style(source.status()),
                ),
                Span::styled(format!("used by {} automation(s)", used_by), theme.dim()),
                Span::styled("  y=sync u=suspend/resume s/S/o=sort /=filter", theme.dim()),
            ])
        });

        self.table.render(
            frame,
            layout.content,
            &self.visible,
            theme,
            &title,
            "No sources",
            footer,
        );

        if let Some(pending) = &self.pending {
            pending.dialog.render(frame, theme);
        }
    }

    pub async fn handle_key(&mut self, key: KeyEvent, state_tx: &mpsc::Sender<AppMessage>) {
        // Handle the confirm dialog first
        if let Some(pending) = &mut self.pending {
            if pending.dialog.handle_key(key) {
                let confirmed = pending.dialog.result == Some(true);
                let object = pending.object.clone();
                let suspend = pending.suspend;
                self.pending = None;
                if confirmed {
                    let _ = state_tx
                        .send(AppMessage::SuspendRequested { object, suspend })
                        .await;
                }
            }
            return;
        }

        // Filter input mode
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
            KeyCode::Char('y') => {
                if let Some(source) = self.selected_source() {
                    // Syncing a suspended source is a no-op server side;
                    // mirror the disabled button and skip it.
                    if !source.suspended {
                        let _ = state_tx
                            .send(AppMessage::SyncRequested {
                                object: source.object_ref(),
                            })
                            .await;
                    }
                }
            }
            KeyCode::Char('u') => {
                if let Some(source) = self.selected_source() {
                    let suspend = !source.suspended;
                    let (title, verb) = if suspend {
                        ("Suspend source", "Suspend")
                    } else {
                        ("Resume source", "Resume")
                    };
                    let message = format!("{} {}/{}?", verb, source.namespace, source.name);
                    self.pending = Some(PendingSuspend {
                        dialog: ConfirmDialog::new(title, &message).with_labels(verb, "Cancel"),
                        object: source.object_ref(),
                        suspend,
                    });
                }
            }
            KeyCode::Char('r') => {
                let _ = state_tx.send(AppMessage::RefreshRequested).await;
            }
            _ => {
                if let Some(delta) = navigation_delta(&key) {
                    self.table.navigate(delta, self.visible.len());
                }
            }
        }
    }
}
