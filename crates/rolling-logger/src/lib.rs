//! Rolling Logger
//!
//! Process-wide logging for the frontend. Installs a `tracing` subscriber
//! whose [`RingLayer`] keeps the most recent lines in a circular buffer and
//! mirrors them to the browser console. Records emitted through the `log`
//! facade are bridged into the same subscriber.

mod buffer;
mod layer;

use std::sync::{Arc, Mutex, OnceLock};

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;

pub use buffer::LogBuffer;
pub use layer::RingLayer;

static BUFFER: OnceLock<Arc<Mutex<LogBuffer>>> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    #[error("logger already initialized")]
    AlreadyInitialized,
    #[error("logger not initialized")]
    NotInitialized,
    #[error("failed to install subscriber: {0}")]
    Install(String),
}

fn default_level() -> LevelFilter {
    if cfg!(debug_assertions) {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    }
}

/// Install the global subscriber, keeping `capacity` recent lines
pub fn init_logger(app_name: &str, capacity: usize) -> Result<(), LoggerError> {
    let buffer = Arc::new(Mutex::new(LogBuffer::new(capacity)));
    BUFFER
        .set(buffer.clone())
        .map_err(|_| LoggerError::AlreadyInitialized)?;

    tracing_subscriber::registry()
        .with(RingLayer::new(buffer).with_filter(default_level()))
        .try_init()
        .map_err(|e| LoggerError::Install(e.to_string()))?;

    tracing::info!(target: "rolling_logger", "{} logging started, keeping {} lines", app_name, capacity);
    Ok(())
}

fn ensure_init() -> Result<(), LoggerError> {
    BUFFER.get().map(|_| ()).ok_or(LoggerError::NotInitialized)
}

pub fn info(message: &str) -> Result<(), LoggerError> {
    ensure_init()?;
    tracing::info!(target: "app", "{}", message);
    Ok(())
}

pub fn warn(message: &str) -> Result<(), LoggerError> {
    ensure_init()?;
    tracing::warn!(target: "app", "{}", message);
    Ok(())
}

pub fn error(message: &str) -> Result<(), LoggerError> {
    ensure_init()?;
    tracing::error!(target: "app", "{}", message);
    Ok(())
}

/// Buffered lines, oldest first; empty before initialization
pub fn recent_logs() -> Vec<String> {
    BUFFER
        .get()
        .and_then(|buffer| buffer.lock().ok().map(|b| b.lines()))
        .unwrap_or_default()
}
