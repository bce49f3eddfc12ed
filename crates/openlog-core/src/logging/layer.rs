//! Tracing Layer that forwards events to a shared [`Logger`].
//!
//! Lets code instrumented with `tracing` macros end up in the same memory
//! store, console and log file as direct logger calls.

use std::fmt::Write as FmtWrite;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

use super::entry::Level;
use crate::logger::Logger;
use crate::value::{Mapping, Scalar, Value};

/// Events emitted by this crate are not forwarded. They are raised while the
/// logger's lock is held, and the lock is not reentrant.
const OWN_TARGET: &str = "openlog_core";

/// A tracing Layer that logs events through a shared [`Logger`].
///
/// ERROR events are logged at ERROR, WARN at WARN, everything else at INFO.
/// The `message` field becomes the text; other fields are appended as a
/// mapping rendered by the logger's formatter.
pub struct OpenlogLayer {
    logger: Arc<Mutex<Logger>>,
}

impl OpenlogLayer {
    pub fn new(logger: Arc<Mutex<Logger>>) -> Self {
        Self { logger }
    }

    /// The logger events are forwarded to.
    pub fn logger(&self) -> &Arc<Mutex<Logger>> {
        &self.logger
    }
}

impl<S: Subscriber> Layer<S> for OpenlogLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if metadata.target().starts_with(OWN_TARGET) {
            return;
        }

        let level = match *metadata.level() {
            tracing::Level::ERROR => Level::Error,
            tracing::Level::WARN => Level::Warn,
            _ => Level::Info,
        };

        let mut visitor = FieldVisitor::new();
        event.record(&mut visitor);
        let message = visitor.message.unwrap_or_default();

        let mut logger = self.logger.lock();

        let text = if visitor.fields.is_empty() {
            message
        } else {
            let fields = logger.formatter().render(&Value::Mapping(visitor.fields));
            if message.is_empty() {
                fields
            } else {
                format!("{} {}", message, fields)
            }
        };

        // Ignore errors to avoid panics in logging
        let _ = logger.emit(level, text);
    }
}

/// Visitor that collects event fields into a [`Mapping`].
struct FieldVisitor {
    message: Option<String>,
    fields: Mapping,
}

impl FieldVisitor {
    fn new() -> Self {
        Self {
            message: None,
            fields: Mapping::new(),
        }
    }
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let mut buf = String::new();
        let _ = write!(&mut buf, "{:?}", value);

        if field.name() == "message" {
            self.message = Some(buf);
        } else {
            self.fields.insert(field.name(), buf);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.fields.insert(field.name(), value);
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.fields.insert(field.name(), value);
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        let value = match i64::try_from(value) {
            Ok(v) => Scalar::Int(v),
            Err(_) => Scalar::Float(value as f64),
        };
        self.fields.insert(field.name(), value);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.fields.insert(field.name(), value);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.fields.insert(field.name(), value);
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.fields.insert(field.name(), value.to_string());
    }
}
