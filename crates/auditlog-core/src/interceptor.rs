//! Interception dispatcher
//!
//! Four entry points, one per interception event:
//!
//! - [`Interceptor::on_entry`]: before the call
//! - [`Interceptor::on_exit`]: after a normal return
//! - [`Interceptor::on_failure`]: after the call returned an error
//! - [`Interceptor::around`]: all of the above around a closure
//!
//! Each phase looks up the method's markers, gates on the sink's levels,
//! resolves call metadata, assembles the message and writes it. Failures
//! of resolution or assembly are contained here: they turn into a single
//! ERROR fallback record and never reach the caller.

use crate::errors::{AuditLogError, ExError};
use crate::gate;
use crate::message;
use crate::method_table::MethodTable;
use crate::model::{AsValue, Call, CallMetadata, LocationPolicy, MarkerSet};
use crate::registry::MarkerRegistry;
use crate::resolver::{
    select_resolver, FastResolver, MetadataResolver, PreciseResolver, ResolverKind,
};
use crate::sink::{CallRecord, LogSink};
use auditlog_core_types::schema::{
    EVENT_ENTRY, EVENT_EXIT, EVENT_FAILURE, EVENT_INSTRUMENTATION_ERROR,
};
use std::convert::Infallible;
use std::error::Error;
use std::sync::Arc;
use tracing::Level;

/// Stateless dispatcher shared by all instrumented calls
#[derive(Clone)]
pub struct Interceptor {
    sink: Arc<dyn LogSink>,
    registry: Arc<MarkerRegistry>,
    fast: Arc<dyn MetadataResolver>,
    precise: Arc<dyn MetadataResolver>,
}

impl Interceptor {
    /// Dispatcher with the standard resolvers over `table`
    pub fn new(
        sink: Arc<dyn LogSink>,
        registry: Arc<MarkerRegistry>,
        table: Arc<dyn MethodTable>,
    ) -> Self {
        Self::with_resolvers(
            sink,
            registry,
            Arc::new(FastResolver::new()),
            Arc::new(PreciseResolver::new(table)),
        )
    }

    /// Dispatcher with caller-supplied resolution strategies
    pub fn with_resolvers(
        sink: Arc<dyn LogSink>,
        registry: Arc<MarkerRegistry>,
        fast: Arc<dyn MetadataResolver>,
        precise: Arc<dyn MetadataResolver>,
    ) -> Self {
        Self {
            sink,
            registry,
            fast,
            precise,
        }
    }

    /// Log the entry of a call
    pub fn on_entry(&self, call: &Call<'_>) {
        if !gate::is_any_level_enabled(self.sink.as_ref()) {
            return;
        }
        let Some(marker) = self.markers(call).and_then(MarkerSet::entry_marker) else {
            return;
        };

        let outcome = self.resolve(call, marker.location).and_then(|meta| {
            message::entry_message(&marker.business_name, &meta, call.args)
                .map(|message| (meta, message))
        });
        match outcome {
            Ok((meta, message)) => gate::print(
                self.sink.as_ref(),
                marker.level,
                &record(EVENT_ENTRY, &marker.business_name, &meta.qualified_name(), &message),
            ),
            Err(err) => self.report_instrumentation_error(call, err),
        }
    }

    /// Log the normal return of a call
    ///
    /// `result` is only converted once the record is known to be written.
    pub fn on_exit(&self, call: &Call<'_>, result: &dyn AsValue) {
        if !gate::is_any_level_enabled(self.sink.as_ref()) {
            return;
        }
        let Some(marker) = self.markers(call).and_then(MarkerSet::exit_marker) else {
            return;
        };

        match self.resolve(call, marker.location) {
            Ok(meta) => {
                let message =
                    message::exit_message(&marker.business_name, &meta, &result.as_value());
                gate::print(
                    self.sink.as_ref(),
                    marker.level,
                    &record(EVENT_EXIT, &marker.business_name, &meta.qualified_name(), &message),
                );
            }
            Err(err) => self.report_instrumentation_error(call, err),
        }
    }

    /// Log the failure of a call
    ///
    /// Not gated: failures are always written, at ERROR, with `error`
    /// attached as the cause. Only the fast resolver is used so that a
    /// lookup problem cannot mask the original failure.
    pub fn on_failure(&self, call: &Call<'_>, error: &(dyn Error + 'static)) {
        let Some(business) = self.markers(call).and_then(MarkerSet::failure_business) else {
            return;
        };

        match self.fast.resolve(call) {
            Ok(meta) => {
                let message = message::failure_message(business, &meta);
                let method = meta.qualified_name();
                self.sink
                    .error_with_cause(&record(EVENT_FAILURE, business, &method, &message), error);
            }
            Err(err) => self.report_instrumentation_error(call, err),
        }
    }

    /// Run `f` with entry, exit and failure logging around it
    ///
    /// `f`'s result is returned unchanged, error included.
    pub fn around<T, E, F>(&self, call: &Call<'_>, f: F) -> Result<T, E>
    where
        T: AsValue,
        E: Error + 'static,
        F: FnOnce() -> Result<T, E>,
    {
        self.on_entry(call);
        match f() {
            Ok(value) => {
                self.on_exit(call, &value);
                Ok(value)
            }
            Err(err) => {
                self.on_failure(call, &err);
                Err(err)
            }
        }
    }

    /// [`Interceptor::around`] for calls that cannot fail
    pub fn around_ok<T, F>(&self, call: &Call<'_>, f: F) -> T
    where
        T: AsValue,
        F: FnOnce() -> T,
    {
        match self.around(call, || Ok::<T, Infallible>(f())) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    fn markers(&self, call: &Call<'_>) -> Option<&MarkerSet> {
        self.registry.markers(&call.signature.id)
    }

    fn resolve(&self, call: &Call<'_>, policy: LocationPolicy) -> crate::Result<CallMetadata> {
        match select_resolver(self.sink.is_enabled(Level::DEBUG), policy) {
            ResolverKind::Fast => self.fast.resolve(call),
            ResolverKind::Precise => self.precise.resolve(call),
        }
    }

    /// Replace the business record with the two-field fallback line
    fn report_instrumentation_error(&self, call: &Call<'_>, err: AuditLogError) {
        let ex: ExError = err.into();

        let signature = call.signature;
        let method = signature.id.to_string();
        let message = message::fallback_message(signature.type_name(), signature.method_name());
        self.sink.error(&CallRecord {
            event: EVENT_INSTRUMENTATION_ERROR,
            business: "",
            method: &method,
            message: &message,
            err_code: Some(ex.code()),
        });
    }
}

impl std::fmt::Debug for Interceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interceptor")
            .field("methods", &self.registry.len())
            .finish_non_exhaustive()
    }
}

fn record<'a>(
    event: &'static str,
    business: &'a str,
    method: &'a str,
    message: &'a str,
) -> CallRecord<'a> {
    CallRecord {
        event,
        business,
        method,
        message,
        err_code: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::method_table::{DebugInfoTable, MethodDebugInfo};
    use crate::model::{CallSignature, FailureMarker, Marker, PhaseMarker, Severity, Value};
    use crate::sink::MemorySink;
    use std::fmt;

    #[derive(Debug)]
    struct Overdrawn;

    impl fmt::Display for Overdrawn {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("insufficient funds")
        }
    }

    impl Error for Overdrawn {}

    fn interceptor(sink: Arc<MemorySink>, marker: Marker) -> Interceptor {
        let mut registry = MarkerRegistry::new();
        registry.register("bank::Account", "transfer", marker).unwrap();
        let mut table = DebugInfoTable::new();
        table
            .register(
                "bank::Account",
                "transfer",
                MethodDebugInfo::new(["amount"], 42),
            )
            .unwrap();
        Interceptor::new(sink, Arc::new(registry), Arc::new(table))
    }

    fn signature() -> CallSignature {
        CallSignature::new("bank::Account", "transfer").with_parameter_names(["amount"])
    }

    #[test]
    fn test_entry_and_exit_logged_at_marker_level() {
        let sink = Arc::new(MemorySink::with_levels([Level::INFO, Level::ERROR]));
        let interceptor = interceptor(
            sink.clone(),
            Marker::Composite(PhaseMarker::new("transfer").with_level(Severity::Info)),
        );
        let signature = signature();
        let args = [Value::I64(50)];

        let result = interceptor.around_ok(&Call::new(&signature, &args), || true);

        assert!(result);
        let records = sink.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].level, Level::INFO);
        assert_eq!(
            records[0].message,
            "Method: [bank::Account.transfer], Business: [transfer], Params: [{amount=50}]"
        );
        assert_eq!(
            records[1].message,
            "Method: [bank::Account.transfer], Business: [transfer], Result: [true]"
        );
    }

    #[test]
    fn test_debug_sink_renders_source_line() {
        let sink = Arc::new(MemorySink::all_enabled());
        let interceptor = interceptor(sink.clone(), Marker::Entry(PhaseMarker::new("transfer")));
        let signature = signature();
        let args = [Value::I64(50)];

        interceptor.on_entry(&Call::new(&signature, &args));

        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].level, Level::DEBUG);
        assert!(records[0]
            .message
            .starts_with("Method: [bank::Account.transfer(Account.rs:42)]"));
    }

    #[test]
    fn test_failure_logged_and_propagated() {
        let sink = Arc::new(MemorySink::with_levels([Level::ERROR]));
        let interceptor = interceptor(
            sink.clone(),
            Marker::Failure(FailureMarker::new("transfer failed")),
        );
        let signature = signature();
        let args = [Value::I64(50)];

        let result: std::result::Result<bool, Overdrawn> =
            interceptor.around(&Call::new(&signature, &args), || Err(Overdrawn));

        assert!(result.is_err());
        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].level, Level::ERROR);
        assert_eq!(records[0].event, EVENT_FAILURE);
        assert!(records[0].message.ends_with("Exception: "));
        assert_eq!(records[0].cause.as_deref(), Some("insufficient funds"));
    }

    #[test]
    fn test_unregistered_method_passes_through() {
        let sink = Arc::new(MemorySink::all_enabled());
        let interceptor = interceptor(sink.clone(), Marker::Composite(PhaseMarker::new("t")));
        let signature = CallSignature::new("bank::Account", "close");

        let value = interceptor.around_ok(&Call::new(&signature, &[]), || 7i32);

        assert_eq!(value, 7);
        assert!(sink.records().is_empty());
    }

    #[test]
    fn test_arity_mismatch_writes_fallback_line() {
        let sink = Arc::new(MemorySink::all_enabled());
        let interceptor = interceptor(
            sink.clone(),
            Marker::Entry(PhaseMarker::new("transfer").with_location(LocationPolicy::Disabled)),
        );
        let signature = signature();
        let args = [Value::I64(50), Value::I64(1)];

        interceptor.on_entry(&Call::new(&signature, &args));

        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].level, Level::ERROR);
        assert_eq!(records[0].event, EVENT_INSTRUMENTATION_ERROR);
        assert_eq!(
            records[0].message,
            "bank::Account.transfer instrumentation error"
        );
        assert_eq!(records[0].err_code.as_deref(), Some("ERR_ARITY_MISMATCH"));
    }
}
