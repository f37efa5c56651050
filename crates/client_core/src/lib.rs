//! Client side of the traffic-signal dashboard: view-model, rendering and the
//! event channel to the simulation server.

use anyhow::Result;

pub mod config;
pub mod controller;
pub mod history;
pub mod transport;
pub mod view;

pub use config::{load_settings, ClientSettings};
pub use controller::{DashboardController, DashboardState, RequestSink, UserAction};
pub use transport::{ChannelEvent, EventChannel};
pub use view::DashboardView;

/// Resolves the socket url from settings and connects.
pub async fn connect_dashboard(settings: &ClientSettings) -> Result<EventChannel> {
    let url = transport::websocket_url(&settings.server_url, &settings.ws_path)?;
    transport::connect(&url).await
}
