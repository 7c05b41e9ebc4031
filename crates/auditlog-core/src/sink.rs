//! Log sinks
//!
//! The interception core writes through an injected [`LogSink`]; it never
//! looks a logger up ambiently. Two sinks ship with the crate:
//!
//! - [`TracingSink`]: emits `tracing` events on the `auditlog` target
//! - [`MemorySink`]: records calls in memory with configurable enabled levels

use auditlog_core_types::schema::{
    EVENT_ENTRY, EVENT_EXIT, EVENT_FAILURE, EVENT_INSTRUMENTATION_ERROR, LOG_TARGET,
};
use std::collections::HashSet;
use std::error::Error;
use std::sync::{Arc, Mutex};
use tracing::Level;

/// One structured record produced by the interception core
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallRecord<'a> {
    /// Phase event name, one of the `EVENT_*` schema constants
    pub event: &'static str,
    pub business: &'a str,
    /// `type.method` of the intercepted call
    pub method: &'a str,
    pub message: &'a str,
    /// Error code of an instrumentation failure
    pub err_code: Option<&'static str>,
}

/// Leveled log destination
///
/// Implementations own their thread-safety and ordering guarantees.
pub trait LogSink: Send + Sync {
    fn is_enabled(&self, level: Level) -> bool;

    fn debug(&self, record: &CallRecord<'_>);

    fn info(&self, record: &CallRecord<'_>);

    fn warn(&self, record: &CallRecord<'_>);

    fn error(&self, record: &CallRecord<'_>);

    /// ERROR write carrying the error that caused the record
    fn error_with_cause(&self, record: &CallRecord<'_>, cause: &(dyn Error + 'static));
}

impl<S: LogSink + ?Sized> LogSink for Arc<S> {
    fn is_enabled(&self, level: Level) -> bool {
        (**self).is_enabled(level)
    }

    fn debug(&self, record: &CallRecord<'_>) {
        (**self).debug(record)
    }

    fn info(&self, record: &CallRecord<'_>) {
        (**self).info(record)
    }

    fn warn(&self, record: &CallRecord<'_>) {
        (**self).warn(record)
    }

    fn error(&self, record: &CallRecord<'_>) {
        (**self).error(record)
    }

    fn error_with_cause(&self, record: &CallRecord<'_>, cause: &(dyn Error + 'static)) {
        (**self).error_with_cause(record, cause)
    }
}

// ========== tracing sink ==========

/// Sink emitting `tracing` events on the `auditlog` target
///
/// Level checks go through the installed subscriber, so an `EnvFilter`
/// directive such as `auditlog=info` disables DEBUG resolution work too.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

macro_rules! emit {
    ($level:expr, $record:expr) => {
        tracing::event!(
            target: LOG_TARGET,
            $level,
            component = module_path!(),
            event = $record.event,
            business = $record.business,
            method = $record.method,
            err_code = $record.err_code,
            "{}",
            $record.message
        )
    };
}

impl LogSink for TracingSink {
    fn is_enabled(&self, level: Level) -> bool {
        match level {
            Level::TRACE => tracing::enabled!(target: LOG_TARGET, Level::TRACE),
            Level::DEBUG => tracing::enabled!(target: LOG_TARGET, Level::DEBUG),
            Level::INFO => tracing::enabled!(target: LOG_TARGET, Level::INFO),
            Level::WARN => tracing::enabled!(target: LOG_TARGET, Level::WARN),
            _ => tracing::enabled!(target: LOG_TARGET, Level::ERROR),
        }
    }

    fn debug(&self, record: &CallRecord<'_>) {
        emit!(Level::DEBUG, record);
    }

    fn info(&self, record: &CallRecord<'_>) {
        emit!(Level::INFO, record);
    }

    fn warn(&self, record: &CallRecord<'_>) {
        emit!(Level::WARN, record);
    }

    fn error(&self, record: &CallRecord<'_>) {
        emit!(Level::ERROR, record);
    }

    fn error_with_cause(&self, record: &CallRecord<'_>, cause: &(dyn Error + 'static)) {
        tracing::error!(
            target: LOG_TARGET,
            component = module_path!(),
            event = record.event,
            business = record.business,
            method = record.method,
            error = cause,
            "{}",
            record.message
        );
    }
}

// ========== in-memory sink ==========

/// A record written to a [`MemorySink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedRecord {
    pub level: Level,
    pub event: String,
    pub business: String,
    pub method: String,
    pub message: String,
    pub err_code: Option<String>,
    /// `Display` of the attached cause, if any
    pub cause: Option<String>,
}

/// Sink recording every write, with a fixed set of enabled levels
///
/// Writes are recorded whether or not their level is enabled; gating is the
/// caller's job and tests assert on exactly what was written.
#[derive(Debug, Default)]
pub struct MemorySink {
    enabled: HashSet<Level>,
    records: Mutex<Vec<CapturedRecord>>,
}

impl MemorySink {
    pub fn with_levels<I: IntoIterator<Item = Level>>(levels: I) -> Self {
        Self {
            enabled: levels.into_iter().collect(),
            records: Mutex::new(Vec::new()),
        }
    }

    /// All five levels enabled
    pub fn all_enabled() -> Self {
        Self::with_levels([
            Level::TRACE,
            Level::DEBUG,
            Level::INFO,
            Level::WARN,
            Level::ERROR,
        ])
    }

    /// Every level disabled
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Snapshot of the records written so far
    pub fn records(&self) -> Vec<CapturedRecord> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Records of one phase event
    pub fn records_for(&self, event: &str) -> Vec<CapturedRecord> {
        self.records()
            .into_iter()
            .filter(|r| r.event == event)
            .collect()
    }

    pub fn clear(&self) {
        self.records.lock().map(|mut r| r.clear()).ok();
    }

    fn push(&self, level: Level, record: &CallRecord<'_>, cause: Option<String>) {
        let captured = CapturedRecord {
            level,
            event: record.event.to_string(),
            business: record.business.to_string(),
            method: record.method.to_string(),
            message: record.message.to_string(),
            err_code: record.err_code.map(str::to_string),
            cause,
        };
        self.records
            .lock()
            .map(|mut records| records.push(captured))
            .ok();
    }
}

impl LogSink for MemorySink {
    fn is_enabled(&self, level: Level) -> bool {
        self.enabled.contains(&level)
    }

    fn debug(&self, record: &CallRecord<'_>) {
        self.push(Level::DEBUG, record, None);
    }

    fn info(&self, record: &CallRecord<'_>) {
        self.push(Level::INFO, record, None);
    }

    fn warn(&self, record: &CallRecord<'_>) {
        self.push(Level::WARN, record, None);
    }

    fn error(&self, record: &CallRecord<'_>) {
        self.push(Level::ERROR, record, None);
    }

    fn error_with_cause(&self, record: &CallRecord<'_>, cause: &(dyn Error + 'static)) {
        self.push(Level::ERROR, record, Some(cause.to_string()));
    }
}

/// Whether an event name belongs to the call record schema
pub fn is_call_event(event: &str) -> bool {
    matches!(
        event,
        EVENT_ENTRY | EVENT_EXIT | EVENT_FAILURE | EVENT_INSTRUMENTATION_ERROR
    )
}
