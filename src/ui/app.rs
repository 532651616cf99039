//! Main TUI application

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame, Terminal,
};
use tokio::sync::{broadcast, mpsc};

use crate::app::events::{is_quit, tab_delta, tab_number, AppEvent, EventHandler};
use crate::app::state::{AppMessage, AppState, UiUpdateSignal};
use crate::ui::layout::{AppLayout, DialogLayout};
use crate::ui::tabs::{automations::AutomationsTab, events::EventsTab, sources::SourcesTab};
use crate::ui::theme::Theme;
use crate::ui::widgets::statusbar::{build_status_line, StatusItem};
use crate::utils::format_age;

/// Tab identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabId {
    Sources = 0,
    Automations = 1,
    Events = 2,
}

impl TabId {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Sources => "Sources",
            Self::Automations => "Automations",
            Self::Events => "Events",
        }
    }

    pub fn all() -> &'static [TabId] {
        &[Self::Sources, Self::Automations, Self::Events]
    }
}

/// Main TUI application
pub struct TuiApp {
    state: Arc<AppState>,
    state_tx: mpsc::Sender<AppMessage>,
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_handler: EventHandler,
    ui_update_rx: broadcast::Receiver<UiUpdateSignal>,

    // UI state
    current_tab: usize,
    theme: Theme,
    show_help: bool,

    // Tabs
    sources_tab: SourcesTab,
    automations_tab: AutomationsTab,
    events_tab: EventsTab,
}

impl TuiApp {
    pub fn new(state: Arc<AppState>, state_tx: mpsc::Sender<AppMessage>, theme: Theme) -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        let ui_update_rx = state.ui_update_tx.subscribe();

        Ok(Self {
            state,
            state_tx,
            terminal,
            event_handler: EventHandler::new(Duration::from_millis(100)),
            ui_update_rx,

            current_tab: 0,
            theme,
            show_help: false,

            sources_tab: SourcesTab::new(),
            automations_tab: AutomationsTab::new(),
            events_tab: EventsTab::new(),
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        loop {
            // Drain UI update signals; the per-frame cache refresh below
            // picks up whatever changed.
            while self.ui_update_rx.try_recv().is_ok() {}

            self.update_tab_caches().await;
            self.draw()?;

            if let Some(event) = self.event_handler.next() {
                match event {
                    AppEvent::Key(key) => {
                        if self.show_help {
                            self.show_help = false;
                            continue;
                        }

                        if is_quit(&key) {
                            break;
                        }

                        if key.code == crossterm::event::KeyCode::Char('?')
                            || key.code == crossterm::event::KeyCode::F(1)
                        {
                            self.show_help = true;
                            continue;
                        }

                        // While a dialog is open, keys belong to it.
                        let has_dialog = match TabId::all()[self.current_tab] {
                            TabId::Sources => self.sources_tab.showing_dialog(),
                            _ => false,
                        };

                        if !has_dialog {
                            if let Some(tab) = tab_number(&key) {
                                if tab < TabId::all().len() {
                                    self.current_tab = tab;
                                }
                                continue;
                            }

                            if let Some(delta) = tab_delta(&key) {
                                let len = TabId::all().len() as i32;
                                self.current_tab =
                                    ((self.current_tab as i32 + delta).rem_euclid(len)) as usize;
                                continue;
                            }
                        }

                        match TabId::all()[self.current_tab] {
                            TabId::Sources => {
                                self.sources_tab.handle_key(key, &self.state_tx).await
                            }
                            TabId::Automations => self.automations_tab.handle_key(key),
                            TabId::Events => self.events_tab.handle_key(key),
                        }
                    }
                    AppEvent::Resize(_, _) => {}
                    AppEvent::Tick => {}
                }
            }
        }

        Ok(())
    }

    async fn update_tab_caches(&mut self) {
        match TabId::all()[self.current_tab] {
            TabId::Sources => self.sources_tab.update_cache(&self.state).await,
            TabId::Automations => self.automations_tab.update_cache(&self.state).await,
            TabId::Events => self.events_tab.update_cache(&self.state).await,
        }
    }

    fn draw(&mut self) -> Result<()> {
        let theme = self.theme.clone();
        let current_tab = self.current_tab;
        let show_help = self.show_help;

        // Status bar data, read without blocking the draw.
        let (connected, error, source_count, automation_count, event_count, refreshed) = {
            let error = self
                .state
                .last_error
                .try_read()
                .ok()
                .and_then(|e| e.clone());
            let refreshed = self
                .state
                .last_refresh
                .try_read()
                .ok()
                .and_then(|r| r.map(format_age));
            let sources = self.state.sources.try_read().map(|s| s.len()).unwrap_or(0);
            let automations = self
                .state
                .automations
                .try_read()
                .map(|a| a.len())
                .unwrap_or(0);
            let events = self.state.events.try_read().map(|e| e.len()).unwrap_or(0);

            let connected = error.is_none() && refreshed.is_some();
            (connected, error, sources, automations, events, refreshed)
        };

        let status_message = self
            .state
            .status_message
            .try_read()
            .ok()
            .and_then(|m| m.clone());

        self.terminal.draw(|frame| {
            let layout = AppLayout::new(frame.area());

            // Tab bar
            let tab_titles: Vec<Line> = TabId::all()
                .iter()
                .enumerate()
                .map(|(i, tab)| {
                    let style = if i == current_tab {
                        theme.tab_active()
                    } else {
                        theme.tab_inactive()
                    };
                    Line::from(Span::styled(format!(" {} ", tab.title()), style))
                })
                .collect();

            let tabs = Tabs::new(tab_titles)
                .select(current_tab)
                .highlight_style(theme.tab_active())
                .divider("|");

            frame.render_widget(tabs, layout.tabs);

            // Content
            let content_block = Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border())
                .title(format!(" {} ", TabId::all()[current_tab].title()));

            let inner = content_block.inner(layout.content);
            frame.render_widget(content_block, layout.content);

            match TabId::all()[current_tab] {
                TabId::Sources => self.sources_tab.render(frame, inner, &theme),
                TabId::Automations => self.automations_tab.render(frame, inner, &theme),
                TabId::Events => self.events_tab.render(frame, inner, &theme),
            }

            // Status bar
            let mut items = vec![if connected {
                StatusItem::new("", "● Connected").with_style(theme.success())
            } else if let Some(error) = &error {
                StatusItem::new("", format!("○ {}", error)).with_style(theme.error())
            } else {
                StatusItem::new("", "○ Connecting...").with_style(theme.warning())
            }];

            items.push(StatusItem::new("Sources", source_count.to_string()));
            items.push(StatusItem::new("Autos", automation_count.to_string()));
            items.push(StatusItem::new("Events", event_count.to_string()));
            if let Some(refreshed) = &refreshed {
                items.push(StatusItem::new("Refreshed", format!("{} ago", refreshed)));
            }
            if let Some(message) = &status_message {
                items.push(StatusItem::new("", message.clone()).with_style(theme.accent()));
            }
            items.push(StatusItem::new("", "?=help q=quit").with_style(theme.dim()));

            let status_bar = Paragraph::new(build_status_line(items, theme.dim()));
            frame.render_widget(status_bar, layout.status);

            // Help overlay
            if show_help {
                render_help(frame, &theme);
            }
        })?;

        Ok(())
    }
}

impl Drop for TuiApp {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

fn render_help(frame: &mut Frame, theme: &Theme) {
    let area = frame.area();
    let help_area = DialogLayout::centered(area, 58, 24).dialog;

    let help_text = vec![
        "",
        "  gitops-tui - Keyboard Shortcuts",
        "  ───────────────────────────────",
        "",
        "  Navigation:",
        "    1-3, Tab      Switch tabs",
        "    ↑/↓, j/k      Navigate list",
        "    PgUp/PgDn     Page up/down",
        "    Home/End      Go to top/bottom",
        "",
        "  Sorting:",
        "    s / S         Sort by next/previous column",
        "    o             Reverse sort direction",
        "",
        "  Actions (Sources):",
        "    y             Sync (reconcile) selected source",
        "    u             Suspend/resume selected source",
        "    r             Refresh now",
        "    /             Filter, Esc clears",
        "",
        "  Press any key to close",
    ];

    let help_block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(theme.border_focused())
        .style(theme.normal());

    let help_content = Paragraph::new(help_text.join("\n"))
        .block(help_block)
        .style(theme.normal());

    frame.render_widget(ratatui::widgets::Clear, help_area);
    frame.render_widget(help_content, help_area);
}
