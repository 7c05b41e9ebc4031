//! Level gating and severity routing

use crate::model::Severity;
use crate::sink::{CallRecord, LogSink};
use tracing::Level;

/// Whether the sink would emit anything at all
///
/// Entry and exit phases skip resolution and assembly entirely when this is
/// false; resolution is always dearer than a discarded log call.
pub fn is_any_level_enabled(sink: &dyn LogSink) -> bool {
    [
        Level::DEBUG,
        Level::INFO,
        Level::WARN,
        Level::ERROR,
        Level::TRACE,
    ]
    .into_iter()
    .any(|level| sink.is_enabled(level))
}

/// Route a record to the sink method matching `severity`
pub fn print(sink: &dyn LogSink, severity: Severity, record: &CallRecord<'_>) {
    match severity {
        Severity::Debug => sink.debug(record),
        Severity::Info => sink.info(record),
        Severity::Warn => sink.warn(record),
        Severity::Error => sink.error(record),
    }
}
