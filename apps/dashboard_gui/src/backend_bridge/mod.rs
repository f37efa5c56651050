//! Backend worker: owns the tokio runtime and the event channel.

pub mod commands;
pub mod runtime;
