//! Backend commands queued from UI to backend worker.

use shared::protocol::ClientRequest;

pub enum BackendCommand {
    Connect { server_url: String, ws_path: String },
    Send(ClientRequest),
    Disconnect,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Connect { .. } => "connect",
            BackendCommand::Send(request) => request.event_name(),
            BackendCommand::Disconnect => "disconnect",
        }
    }
}
