//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{HttpEmployeeApi, ListController, ListEvent};
use crossbeam_channel::{Receiver, Sender, TrySendError};
use tokio::{sync::broadcast, task::JoinHandle};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Info(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let mut worker = BackendWorker::new(ui_tx);
            while let Ok(cmd) = cmd_rx.recv() {
                worker.handle(cmd);
            }
            tracing::debug!("ui command queue closed; backend worker exiting");
        });
    });
}

/// Owns the list controller once connected and relays its events to the UI.
pub(crate) struct BackendWorker {
    ui_tx: Sender<UiEvent>,
    controller: Option<Arc<ListController>>,
    relay: Option<JoinHandle<()>>,
}

impl BackendWorker {
    pub(crate) fn new(ui_tx: Sender<UiEvent>) -> Self {
        Self {
            ui_tx,
            controller: None,
            relay: None,
        }
    }

    /// Must run inside a tokio runtime; controller work is spawned, never awaited.
    pub(crate) fn handle(&mut self, cmd: BackendCommand) {
        match cmd {
            BackendCommand::Connect { server_url } => self.connect(&server_url),
            BackendCommand::Load => {
                if let Some(controller) = self.connected("load") {
                    controller.spawn_load();
                }
            }
            BackendCommand::Create(draft) => {
                if let Some(controller) = self.connected("create") {
                    controller.spawn_create(draft);
                }
            }
            BackendCommand::Delete(id) => {
                if let Some(controller) = self.connected("delete") {
                    controller.spawn_delete(id);
                }
            }
        }
    }

    fn connect(&mut self, server_url: &str) {
        let api = match HttpEmployeeApi::new(server_url) {
            Ok(api) => api,
            Err(err) => {
                tracing::error!(%server_url, error = %err, "invalid employee backend url");
                let _ = self
                    .ui_tx
                    .try_send(UiEvent::Info(format!("Invalid server URL: {err}")));
                return;
            }
        };

        if let Some(relay) = self.relay.take() {
            relay.abort();
        }
        let controller = ListController::new(Arc::new(api));
        self.relay = Some(tokio::spawn(relay_events(
            controller.subscribe(),
            self.ui_tx.clone(),
        )));

        tracing::info!(%server_url, "connected to employee backend");
        let _ = self
            .ui_tx
            .try_send(UiEvent::Info(format!("Connected to {server_url}")));
        controller.spawn_load();
        self.controller = Some(controller);
    }

    fn connected(&self, command: &'static str) -> Option<&Arc<ListController>> {
        if self.controller.is_none() {
            tracing::warn!(command, "employee backend not connected; dropping command");
        }
        self.controller.as_ref()
    }
}

async fn relay_events(mut events: broadcast::Receiver<ListEvent>, ui_tx: Sender<UiEvent>) {
    loop {
        match events.recv().await {
            Ok(event) => match ui_tx.try_send(UiEvent::from(event)) {
                Ok(()) => {}
                Err(TrySendError::Full(dropped)) => {
                    tracing::warn!(?dropped, "ui event queue full; dropping list event");
                }
                Err(TrySendError::Disconnected(_)) => break,
            },
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "ui relay lagged behind list events");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
