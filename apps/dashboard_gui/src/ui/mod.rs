//! UI layer for the dashboard GUI: app shell, widgets and palette.

pub mod app;
pub mod theme;
pub mod widgets;

pub use app::{DashboardApp, StartupConfig};
