//! Ring Buffer Layer
//!
//! `tracing-subscriber` layer that formats each event as one line, pushes it
//! into a shared [`LogBuffer`], and mirrors it to the console.

use std::fmt::Write as _;
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use crate::buffer::LogBuffer;

/// Layer writing into a shared ring buffer
pub struct RingLayer {
    buffer: Arc<Mutex<LogBuffer>>,
    echo: bool,
}

impl RingLayer {
    pub fn new(buffer: Arc<Mutex<LogBuffer>>) -> Self {
        Self { buffer, echo: true }
    }

    /// Keep lines in the buffer only, without console output
    pub fn quiet(buffer: Arc<Mutex<LogBuffer>>) -> Self {
        Self { buffer, echo: false }
    }
}

impl<S: Subscriber> Layer<S> for RingLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);

        let target = visitor.log_target.as_deref().unwrap_or_else(|| meta.target());
        let line = format!(
            "{} {:>5} {}: {}{}",
            chrono::Local::now().format("%H:%M:%S%.3f"),
            meta.level(),
            target,
            visitor.message,
            visitor.fields
        );

        if self.echo {
            emit(*meta.level(), &line);
        }
        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.push(line);
        }
    }
}

/// Collects the message plus any extra `key=value` fields.
/// Fields added by the `log` bridge are consumed, not printed.
#[derive(Default)]
struct LineVisitor {
    message: String,
    fields: String,
    log_target: Option<String>,
}

impl Visit for LineVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message = value.to_string(),
            "log.target" => self.log_target = Some(value.to_string()),
            name if name.starts_with("log.") => {}
            name => {
                let _ = write!(self.fields, " {}={}", name, value);
            }
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        match field.name() {
            "message" => self.message = format!("{:?}", value),
            name if name.starts_with("log.") => {}
            name => {
                let _ = write!(self.fields, " {}={:?}", name, value);
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn emit(level: Level, line: &str) {
    let value = wasm_bindgen::JsValue::from_str(line);
    match level {
        Level::ERROR => web_sys::console::error_1(&value),
        Level::WARN => web_sys::console::warn_1(&value),
        _ => web_sys::console::log_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: Level, line: &str) {
    eprintln!("{}", line);
}
