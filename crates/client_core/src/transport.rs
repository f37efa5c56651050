//! WebSocket event channel to the simulation server.
//!
//! Each text frame carries one named event as `{"event": .., "data": ..}`.
//! Frames that fail validation are logged and dropped here.

use anyhow::{Context, Result};
use futures::{SinkExt, StreamExt};
use shared::protocol::{decode_server_event, encode_request, ClientRequest, ServerEvent};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, info, warn};
use url::Url;

#[derive(Debug, Clone, PartialEq)]
pub enum ChannelEvent {
    Connected,
    Server(ServerEvent),
    Disconnected,
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("server_url must start with http://, https://, ws:// or wss://: {0}")]
    UnsupportedScheme(String),
    #[error("invalid server url {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

pub struct EventChannel {
    pub requests: mpsc::UnboundedSender<ClientRequest>,
    pub events: mpsc::UnboundedReceiver<ChannelEvent>,
}

pub fn websocket_url(server_url: &str, ws_path: &str) -> Result<Url, TransportError> {
    let server_url = server_url.trim().trim_end_matches('/');
    let ws_base = if let Some(rest) = server_url.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if let Some(rest) = server_url.strip_prefix("http://") {
        format!("ws://{rest}")
    } else if server_url.starts_with("ws://") || server_url.starts_with("wss://") {
        server_url.to_string()
    } else {
        return Err(TransportError::UnsupportedScheme(server_url.to_string()));
    };

    let path = ws_path.trim();
    let raw = if path.is_empty() {
        ws_base
    } else if path.starts_with('/') {
        format!("{ws_base}{path}")
    } else {
        format!("{ws_base}/{path}")
    };
    Url::parse(&raw).map_err(|source| TransportError::InvalidUrl { url: raw, source })
}

/// Opens the socket and spawns its reader and writer tasks.
///
/// The first event is always [`ChannelEvent::Connected`]; the stream ends with
/// [`ChannelEvent::Disconnected`] once the server closes or a read fails.
/// Dropping every request sender closes the socket.
pub async fn connect(url: &Url) -> Result<EventChannel> {
    let (ws_stream, _) = connect_async(url.as_str())
        .await
        .with_context(|| format!("failed to connect websocket: {url}"))?;
    let (mut ws_writer, mut ws_reader) = ws_stream.split();
    info!(%url, "event channel open");

    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let (requests_tx, mut requests_rx) = mpsc::unbounded_channel::<ClientRequest>();
    let _ = events_tx.send(ChannelEvent::Connected);

    tokio::spawn(async move {
        while let Some(msg) = ws_reader.next().await {
            match msg {
                Ok(Message::Text(text)) => match decode_server_event(&text) {
                    Ok(event) => {
                        if events_tx.send(ChannelEvent::Server(event)).is_err() {
                            break;
                        }
                    }
                    Err(err) => {
                        warn!(event = err.event(), "dropping rejected server frame: {err}");
                    }
                },
                Ok(Message::Close(_)) => break,
                Ok(Message::Binary(bytes)) => {
                    debug!(len = bytes.len(), "ignoring binary frame");
                }
                Ok(_) => {}
                Err(err) => {
                    warn!("websocket receive failed: {err}");
                    break;
                }
            }
        }
        let _ = events_tx.send(ChannelEvent::Disconnected);
    });

    tokio::spawn(async move {
        while let Some(request) = requests_rx.recv().await {
            let event = request.event_name();
            let text = match encode_request(&request) {
                Ok(text) => text,
                Err(err) => {
                    warn!(event, "failed to encode request: {err}");
                    continue;
                }
            };
            if let Err(err) = ws_writer.send(Message::Text(text)).await {
                warn!(event, "websocket send failed: {err}");
                return;
            }
            debug!(event, "request sent");
        }
        let _ = ws_writer.close().await;
    });

    Ok(EventChannel {
        requests: requests_tx,
        events: events_rx,
    })
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
