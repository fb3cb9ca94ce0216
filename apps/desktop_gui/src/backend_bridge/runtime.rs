//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::ShortenerApi;
use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

/// Starts the worker thread. It exits once every command sender is dropped.
pub fn launch(
    api: Arc<dyn ShortenerApi>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) -> thread::JoinHandle<()> {
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
            let _ = ui_tx.try_send(UiEvent::Info("Ready".to_string()));

            // Each request runs as its own task so a reset or resubmit is never
            // stuck behind a slow response; the controller drops stale ones.
            while let Ok(cmd) = cmd_rx.recv() {
                let api = Arc::clone(&api);
                let ui_tx = ui_tx.clone();
                match cmd {
                    BackendCommand::Shorten { ticket } => {
                        tokio::spawn(async move {
                            tracing::info!(request_id = ticket.id.0, "backend: shorten");
                            let outcome = api.shorten(&ticket.request).await;
                            if let Err(err) = &outcome {
                                tracing::warn!(
                                    request_id = ticket.id.0,
                                    "backend: shorten failed: {err}"
                                );
                            }
                            deliver(
                                &ui_tx,
                                UiEvent::ShortenCompleted {
                                    id: ticket.id,
                                    outcome,
                                },
                            );
                        });
                    }
                    BackendCommand::CheckHealth => {
                        tokio::spawn(async move {
                            tracing::info!("backend: check_health");
                            let result = api.health().await.map_err(|err| err.to_string());
                            deliver(&ui_tx, UiEvent::HealthChecked(result));
                        });
                    }
                }
            }
            tracing::debug!("backend command channel closed; worker exiting");
        });
    })
}

/// Never blocks a runtime worker; events the UI has no room for are dropped.
fn deliver(ui_tx: &Sender<UiEvent>, event: UiEvent) -> bool {
    match ui_tx.try_send(event) {
        Ok(()) => true,
        Err(TrySendError::Full(event)) => {
            tracing::warn!("ui event queue full; dropping {}", event.name());
            false
        }
        Err(TrySendError::Disconnected(event)) => {
            tracing::warn!("ui event queue closed; dropping {}", event.name());
            false
        }
    }
}
