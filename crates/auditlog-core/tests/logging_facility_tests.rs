#![allow(clippy::unwrap_used, clippy::expect_used)]

//! `TracingSink` output observed through the test capture layer
//!
//! Tests in this binary share one global subscriber; each uses its own
//! method name and filters on it.

mod common;

use auditlog_core::logging_facility::test_capture::init_test_capture;
use auditlog_core::{
    call_args, Call, CallSignature, DebugInfoTable, Interceptor, LogSink, Marker, MarkerRegistry,
    PhaseMarker, Severity, TracingSink,
};
use auditlog_core_types::schema::{
    EVENT_ENTRY, EVENT_EXIT, EVENT_FAILURE, EVENT_INSTRUMENTATION_ERROR, FIELD_COMPONENT,
    FIELD_ERROR, FIELD_ERR_CODE, LOG_TARGET,
};
use common::InsufficientFunds;
use std::sync::Arc;
use tracing::Level;

const TYPE: &str = "capture::Account";

fn interceptor(method: &str, marker: Marker) -> Interceptor {
    let mut registry = MarkerRegistry::new();
    registry.register(TYPE, method, marker).unwrap();
    Interceptor::new(
        Arc::new(TracingSink::new()),
        Arc::new(registry),
        Arc::new(DebugInfoTable::new()),
    )
}

#[test]
fn test_tracing_sink_reports_enabled_levels() {
    let _capture = init_test_capture();

    assert!(TracingSink::new().is_enabled(Level::DEBUG));
    assert!(TracingSink::new().is_enabled(Level::ERROR));
}

#[test]
fn test_entry_and_exit_events_emitted() {
    let capture = init_test_capture();
    let method = format!("{}.deposit", TYPE);
    let interceptor = interceptor(
        "deposit",
        Marker::Composite(
            PhaseMarker::new("deposit")
                .with_level(Severity::Info)
                .with_location(auditlog_core::LocationPolicy::Disabled),
        ),
    );
    let signature = CallSignature::new(TYPE, "deposit").with_parameter_names(["amount"]);
    let args = call_args!(25i32);

    interceptor.around_ok(&Call::new(&signature, &args), || 125i64);

    capture.assert_event_exists(&method, EVENT_ENTRY);
    capture.assert_event_exists(&method, EVENT_EXIT);

    let records = capture.call_records(&method);
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|e| e.level == Level::INFO));
    assert!(records.iter().all(|e| e.target == LOG_TARGET));
    assert!(records.iter().all(|e| e.field(FIELD_COMPONENT).is_some()));
    assert_eq!(records[0].business.as_deref(), Some("deposit"));
    assert_eq!(
        records[0].message.as_deref(),
        Some("Method: [capture::Account.deposit], Business: [deposit], Params: [{amount=25}]")
    );
    assert_eq!(
        records[1].message.as_deref(),
        Some("Method: [capture::Account.deposit], Business: [deposit], Result: [125]")
    );
}

#[test]
fn test_failure_event_carries_cause() {
    let capture = init_test_capture();
    let method = format!("{}.withdraw", TYPE);
    let interceptor = interceptor(
        "withdraw",
        Marker::Composite(PhaseMarker::new("withdraw")),
    );
    let signature = CallSignature::new(TYPE, "withdraw");
    let args = call_args!(500i32);

    let result = interceptor.around(&Call::new(&signature, &args), || {
        Err::<(), _>(InsufficientFunds { requested: 500 })
    });

    assert!(result.is_err());
    let failures: Vec<_> = capture
        .call_records(&method)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_FAILURE))
        .collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].level, Level::ERROR);
    let errors = capture.count_events(|e| {
        e.method.as_deref() == Some(method.as_str()) && e.level == Level::ERROR
    });
    // The failure record plus the fallback line of the unresolvable entry
    assert_eq!(errors, 2);
    assert_eq!(failures[0].field(FIELD_ERROR), Some("insufficient funds for 500"));
}

#[test]
fn test_instrumentation_error_event_carries_code() {
    let capture = init_test_capture();
    let method = format!("{}.audit", TYPE);
    // Debug is enabled under the capture layer, so the precise path runs
    // against an empty table
    let interceptor = interceptor("audit", Marker::Entry(PhaseMarker::new("audit")));
    let signature = CallSignature::new(TYPE, "audit");
    let args = call_args!();

    interceptor.on_entry(&Call::new(&signature, &args));

    let records = capture.call_records(&method);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].event.as_deref(), Some(EVENT_INSTRUMENTATION_ERROR));
    assert_eq!(records[0].field(FIELD_ERR_CODE), Some("ERR_METHOD_NOT_FOUND"));
    assert_eq!(
        records[0].message.as_deref(),
        Some("capture::Account.audit instrumentation error")
    );
}
