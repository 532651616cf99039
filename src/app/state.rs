//! Application state management

use chrono::{DateTime, Utc};
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, RwLock};

use crate::grpc::client::ClientCommand;
use crate::models::{Automation, Event, ObjectRef, Source};

/// Messages for state updates
#[derive(Debug)]
pub enum AppMessage {
    // Poller results
    SourcesLoaded {
        sources: Vec<Source>,
    },
    AutomationsLoaded {
        automations: Vec<Automation>,
    },
    EventsLoaded {
        events: Vec<Event>,
    },
    PollFailed {
        error: String,
    },

    // User actions
    SyncRequested {
        object: ObjectRef,
    },
    SuspendRequested {
        object: ObjectRef,
        suspend: bool,
    },
    RefreshRequested,

    // Action outcomes reported by the client task
    ActionFinished {
        message: String,
    },
    ActionFailed {
        error: String,
    },
}

/// UI update signals
#[derive(Debug, Clone)]
pub enum UiUpdateSignal {
    SourcesUpdated,
    AutomationsUpdated,
    EventsUpdated,
    StatusChanged,
    Redraw,
}

/// Central application state
pub struct AppState {
    pub sources: RwLock<Vec<Source>>,
    pub automations: RwLock<Vec<Automation>>,
    pub events: RwLock<Vec<Event>>,

    /// Last poll error, cleared on a successful refresh.
    pub last_error: RwLock<Option<String>>,
    /// Result of the most recent user action, shown in the status bar.
    pub status_message: RwLock<Option<String>>,
    pub last_refresh: RwLock<Option<DateTime<Utc>>>,

    pub ui_update_tx: broadcast::Sender<UiUpdateSignal>,

    // Configuration
    pub max_events: usize,
}

impl AppState {
    pub fn new(ui_update_tx: broadcast::Sender<UiUpdateSignal>, max_events: usize) -> Self {
        Self {
            sources: RwLock::new(Vec::new()),
            automations: RwLock::new(Vec::new()),
            events: RwLock::new(Vec::new()),
            last_error: RwLock::new(None),
            status_message: RwLock::new(None),
            last_refresh: RwLock::new(None),
            ui_update_tx,
            max_events,
        }
    }

    pub fn notify_ui(&self, signal: UiUpdateSignal) {
        let _ = self.ui_update_tx.send(signal);
    }

    pub async fn set_status_message(&self, message: Option<String>) {
        *self.status_message.write().await = message;
        self.notify_ui(UiUpdateSignal::StatusChanged);
    }

    async fn mark_refreshed(&self) {
        *self.last_refresh.write().await = Some(Utc::now());
        *self.last_error.write().await = None;
    }
}

/// Run the state manager task
pub async fn run_state_manager(
    state: Arc<AppState>,
    mut rx: mpsc::Receiver<AppMessage>,
    command_tx: mpsc::Sender<ClientCommand>,
) {
    tracing::info!("State manager started");

    while let Some(msg) = rx.recv().await {
        match msg {
            AppMessage::SourcesLoaded { sources } => {
                *state.sources.write().await = sources;
                state.mark_refreshed().await;
                state.notify_ui(UiUpdateSignal::SourcesUpdated);
            }

            AppMessage::AutomationsLoaded { automations } => {
                *state.automations.write().await = automations;
                state.mark_refreshed().await;
                state.notify_ui(UiUpdateSignal::AutomationsUpdated);
            }

            AppMessage::EventsLoaded { mut events } => {
                if events.len() > state.max_events {
                    events.truncate(state.max_events);
                }
                *state.events.write().await = events;
                state.mark_refreshed().await;
                state.notify_ui(UiUpdateSignal::EventsUpdated);
            }

            AppMessage::PollFailed { error } => {
                tracing::warn!("Poll failed: {}", error);
                *state.last_error.write().await = Some(error);
                state.notify_ui(UiUpdateSignal::StatusChanged);
            }

            AppMessage::SyncRequested { object } => {
                tracing::info!("Sync requested: {}", object);
                state
                    .set_status_message(Some(format!("Syncing {}...", object.name)))
                    .await;
                send_command(&command_tx, ClientCommand::Sync { object }).await;
            }

            AppMessage::SuspendRequested { object, suspend } => {
                tracing::info!("Suspend={} requested: {}", suspend, object);
                let verb = if suspend { "Suspending" } else { "Resuming" };
                state
                    .set_status_message(Some(format!("{} {}...", verb, object.name)))
                    .await;
                send_command(&command_tx, ClientCommand::ToggleSuspend { object, suspend }).await;
            }

            AppMessage::RefreshRequested => {
                send_command(&command_tx, ClientCommand::Refresh).await;
            }

            AppMessage::ActionFinished { message } => {
                state.set_status_message(Some(message)).await;
            }

            AppMessage::ActionFailed { error } => {
                tracing::error!("Action failed: {}", error);
                state.set_status_message(Some(format!("Error: {}", error))).await;
            }
        }
    }

    tracing::info!("State manager stopped");
}

async fn send_command(command_tx: &mpsc::Sender<ClientCommand>, command: ClientCommand) {
    if let Err(e) = command_tx.send(command).await {
        tracing::error!("Client task unavailable: {}", e);
    }
}
