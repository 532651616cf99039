//! Core API client and background poller

use std::time::Duration;

use thiserror::Error;
use tokio::sync::mpsc;
use tonic::transport::{Channel, Endpoint};

use crate::app::state::AppMessage;
use crate::grpc::proto::{self, core_client};
use crate::models::{Automation, Event, ObjectRef, Source};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] tonic::transport::Error),
    #[error("request failed: {0}")]
    Status(#[from] tonic::Status),
}

/// Commands forwarded from the state manager to the client task.
#[derive(Debug)]
pub enum ClientCommand {
    Sync { object: ObjectRef },
    ToggleSuspend { object: ObjectRef, suspend: bool },
    Refresh,
}

/// Client for the core inspection API.
pub struct CoreClient {
    inner: core_client::CoreClient<Channel>,
    cluster_name: String,
}

impl CoreClient {
    pub async fn connect(address: &str, cluster_name: &str) -> Result<Self, ClientError> {
        let channel = Endpoint::from_shared(address.to_string())?
            .connect_timeout(Duration::from_secs(5))
            .connect()
            .await?;
        Ok(Self {
            inner: core_client::CoreClient::new(channel),
            cluster_name: cluster_name.to_string(),
        })
    }

    pub async fn list_sources(&mut self) -> Result<Vec<Source>, ClientError> {
        let response = self
            .inner
            .list_sources(proto::ListSourcesRequest {
                cluster_name: self.cluster_name.clone(),
            })
            .await?;
        Ok(response
            .into_inner()
            .sources
            .into_iter()
            .map(Into::into)
            .collect())
    }

    pub async fn list_automations(&mut self) -> Result<Vec<Automation>, ClientError> {
        let response = self
            .inner
            .list_automations(proto::ListAutomationsRequest {
                cluster_name: self.cluster_name.clone(),
            })
            .await?;
        Ok(response
            .into_inner()
            .automations
            .into_iter()
            .map(Into::into)
            .collect())
    }

    pub async fn list_events(&mut self) -> Result<Vec<Event>, ClientError> {
        let response = self
            .inner
            .list_events(proto::ListEventsRequest {
                cluster_name: self.cluster_name.clone(),
                involved_object: None,
            })
            .await?;
        Ok(response
            .into_inner()
            .events
            .into_iter()
            .map(Into::into)
            .collect())
    }

    pub async fn sync_object(&mut self, object: ObjectRef) -> Result<(), ClientError> {
        self.inner
            .sync_object(proto::SyncObjectRequest {
                cluster_name: self.cluster_name.clone(),
                object: Some(object.into()),
                with_source: false,
            })
            .await?;
        Ok(())
    }

    pub async fn toggle_suspend(
        &mut self,
        object: ObjectRef,
        suspend: bool,
    ) -> Result<(), ClientError> {
        self.inner
            .toggle_suspend(proto::ToggleSuspendRequest {
                cluster_name: self.cluster_name.clone(),
                object: Some(object.into()),
                suspend,
            })
            .await?;
        Ok(())
    }
}

/// Run the client task: connect, refresh on an interval, execute
/// mutation commands, reconnect after transport failures.
pub async fn run_client(
    address: String,
    cluster_name: String,
    poll_interval: Duration,
    state_tx: mpsc::Sender<AppMessage>,
    mut commands: mpsc::Receiver<ClientCommand>,
) {
    loop {
        let mut client = match CoreClient::connect(&address, &cluster_name).await {
            Ok(client) => {
                tracing::info!("Connected to {}", address);
                client
            }
            Err(e) => {
                let _ = state_tx
                    .send(AppMessage::PollFailed {
                        error: e.to_string(),
                    })
                    .await;
                tokio::time::sleep(poll_interval).await;
                continue;
            }
        };

        let mut ticker = tokio::time::interval(poll_interval);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = refresh(&mut client, &state_tx).await {
                        let _ = state_tx
                            .send(AppMessage::PollFailed { error: e.to_string() })
                            .await;
                        // Reconnect from scratch.
                        break;
                    }
                }
                command = commands.recv() => {
                    let Some(command) = command else {
                        tracing::info!("Client task stopped");
                        return;
                    };
                    handle_command(&mut client, &state_tx, command).await;
                }
            }
        }
    }
}

async fn refresh(
    client: &mut CoreClient,
    state_tx: &mpsc::Sender<AppMessage>,
) -> Result<(), ClientError> {
    let sources = client.list_sources().await?;
    let automations = client.list_automations().await?;
    let events = client.list_events().await?;

    let _ = state_tx.send(AppMessage::SourcesLoaded { sources }).await;
    let _ = state_tx
        .send(AppMessage::AutomationsLoaded { automations })
        .await;
    let _ = state_tx.send(AppMessage::EventsLoaded { events }).await;
    Ok(())
}

async fn handle_command(
    client: &mut CoreClient,
    state_tx: &mpsc::Sender<AppMessage>,
    command: ClientCommand,
) {
    let result = match command {
        ClientCommand::Sync { object } => {
            let name = object.name.clone();
            client
                .sync_object(object)
                .await
                .map(|_| format!("{} synced", name))
        }
        ClientCommand::ToggleSuspend { object, suspend } => {
            let name = object.name.clone();
            client.toggle_suspend(object, suspend).await.map(|_| {
                if suspend {
                    format!("{} suspended", name)
                } else {
                    format!("{} resumed", name)
                }
            })
        }
        ClientCommand::Refresh => match refresh(client, state_tx).await {
            Ok(()) => return,
            Err(e) => Err(e),
        },
    };

    let message = match result {
        Ok(message) => AppMessage::ActionFinished { message },
        Err(e) => AppMessage::ActionFailed {
            error: e.to_string(),
        },
    };
    let _ = state_tx.send(message).await;

    // Mutations change cluster state; refresh so the tables catch up.
    if let Err(e) = refresh(client, state_tx).await {
        tracing::warn!("Refresh after action failed: {}", e);
    }
}
