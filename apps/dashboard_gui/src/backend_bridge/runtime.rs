//! Runtime bridge between UI command queue and backend event intake.

use std::{thread, time::Duration};

use client_core::{
    transport::{self, ChannelEvent},
    EventChannel,
};
use crossbeam_channel::{Receiver, Sender, TrySendError};
use eframe::egui;
use shared::protocol::ClientRequest;
use tokio::{sync::mpsc, task::JoinHandle};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

const FULL_QUEUE_RETRY: Duration = Duration::from_millis(20);

/// Hands events to the egui thread and wakes it up.
#[derive(Clone)]
pub struct UiNotifier {
    ui_tx: Sender<UiEvent>,
    ctx: egui::Context,
}

impl UiNotifier {
    pub fn new(ui_tx: Sender<UiEvent>, ctx: egui::Context) -> Self {
        Self { ui_tx, ctx }
    }

    /// Status messages are best effort; a full queue drops them.
    pub fn notify(&self, event: UiEvent) {
        if self.ui_tx.try_send(event).is_ok() {
            self.ctx.request_repaint();
        }
    }

    /// Waits for room instead of dropping, so channel events arrive complete and
    /// in order. Returns false once the UI side is gone.
    pub async fn deliver(&self, event: UiEvent) -> bool {
        let mut pending = event;
        loop {
            match self.ui_tx.try_send(pending) {
                Ok(()) => {
                    self.ctx.request_repaint();
                    return true;
                }
                Err(TrySendError::Full(event)) => {
                    pending = event;
                    self.ctx.request_repaint();
                    tokio::time::sleep(FULL_QUEUE_RETRY).await;
                }
                Err(TrySendError::Disconnected(_)) => return false,
            }
        }
    }
}

pub fn launch(cmd_rx: Receiver<BackendCommand>, notifier: UiNotifier) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                notifier.notify(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let mut requests: Option<mpsc::UnboundedSender<ClientRequest>> = None;
            let mut event_task: Option<JoinHandle<()>> = None;

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Connect {
                        server_url,
                        ws_path,
                    } => {
                        requests = None;
                        if let Some(task) = event_task.take() {
                            task.abort();
                        }

                        let url = match transport::websocket_url(&server_url, &ws_path) {
                            Ok(url) => url,
                            Err(err) => {
                                notifier.notify(UiEvent::Error(UiError::from_message(
                                    UiErrorContext::Connect,
                                    err.to_string(),
                                )));
                                continue;
                            }
                        };
                        notifier.notify(UiEvent::Info(format!("Connecting to {url}...")));

                        match transport::connect(&url).await {
                            Ok(EventChannel {
                                requests: tx,
                                events,
                            }) => {
                                requests = Some(tx);
                                event_task = Some(tokio::spawn(forward_channel_events(
                                    events,
                                    notifier.clone(),
                                )));
                            }
                            Err(err) => {
                                notifier.notify(UiEvent::Error(UiError::from_message(
                                    UiErrorContext::Connect,
                                    format!("{err:#}"),
                                )));
                            }
                        }
                    }
                    BackendCommand::Send(request) => {
                        let event = request.event_name();
                        let sent = requests
                            .as_ref()
                            .map(|tx| tx.send(request).is_ok())
                            .unwrap_or(false);
                        if !sent {
                            tracing::warn!(event, "no open event channel; request dropped");
                            notifier.notify(UiEvent::Error(UiError::from_message(
                                UiErrorContext::SendRequest,
                                format!("not connected; {event} was not delivered"),
                            )));
                        }
                    }
                    BackendCommand::Disconnect => {
                        // Dropping the sender closes the socket; the reader reports the disconnect.
                        requests = None;
                    }
                }
            }
        });
    });
}

/// Relays one connection's events until it reports `Disconnected`.
pub async fn forward_channel_events(
    mut events: mpsc::UnboundedReceiver<ChannelEvent>,
    notifier: UiNotifier,
) {
    while let Some(event) = events.recv().await {
        let done = event == ChannelEvent::Disconnected;
        if !notifier.deliver(UiEvent::Channel(event)).await {
            tracing::debug!("ui event queue closed; stopping channel relay");
            return;
        }
        if done {
            return;
        }
    }
}
