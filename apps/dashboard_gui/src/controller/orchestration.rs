//! Command orchestration helpers from UI actions to backend command queue.

use anyhow::{anyhow, Result};
use client_core::RequestSink;
use crossbeam_channel::{Sender, TrySendError};
use shared::protocol::ClientRequest;

use crate::backend_bridge::commands::BackendCommand;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->backend command"),
        Err(TrySendError::Full(_)) => {
            *status = "UI command queue is full; please retry".to_string();
        }
        Err(TrySendError::Disconnected(_)) => {
            *status = "Backend worker disconnected (possible startup failure); restart the dashboard"
                .to_string();
        }
    }
}

/// Routes controller requests through the backend command queue.
pub struct BridgeRequestSink {
    cmd_tx: Sender<BackendCommand>,
}

impl BridgeRequestSink {
    pub fn new(cmd_tx: Sender<BackendCommand>) -> Self {
        Self { cmd_tx }
    }
}

impl RequestSink for BridgeRequestSink {
    fn send(&self, request: ClientRequest) -> Result<()> {
        let event = request.event_name();
        self.cmd_tx
            .try_send(BackendCommand::Send(request))
            .map_err(|err| match err {
                TrySendError::Full(_) => anyhow!("command queue full; {event} dropped"),
                TrySendError::Disconnected(_) => anyhow!("backend worker gone; {event} dropped"),
            })
    }
}

#[cfg(test)]
mod tests {
    use crossbeam_channel::bounded;

    use super::*;

    #[test]
    fn sink_queues_requests_as_send_commands() {
        let (tx, rx) = bounded(4);
        let sink = BridgeRequestSink::new(tx);
        sink.send(ClientRequest::StopSimulation).expect("queued");
        match rx.try_recv().expect("command") {
            BackendCommand::Send(request) => assert_eq!(request, ClientRequest::StopSimulation),
            other => panic!("unexpected command {}", other.name()),
        }
    }

    #[test]
    fn sink_reports_full_queue() {
        let (tx, _rx) = bounded(1);
        let sink = BridgeRequestSink::new(tx);
        sink.send(ClientRequest::ResetSimulation).expect("first fits");
        assert!(sink.send(ClientRequest::ResetSimulation).is_err());
    }

    #[test]
    fn dispatch_reports_disconnected_worker() {
        let (tx, rx) = bounded(1);
        drop(rx);
        let mut status = String::new();
        dispatch_backend_command(&tx, BackendCommand::Disconnect, &mut status);
        assert!(status.contains("disconnected"));
    }
}
