//! Canonical schema constants for call records
//!
//! Every record written by the `tracing` sink uses these keys, so subscribers
//! and test captures can rely on them.

/// Target used for every call record event
pub const LOG_TARGET: &str = "auditlog";

// Canonical field keys
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_BUSINESS: &str = "business";
pub const FIELD_METHOD: &str = "method";
pub const FIELD_MESSAGE: &str = "message";
pub const FIELD_ERROR: &str = "error";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names, one per interception phase
pub const EVENT_ENTRY: &str = "entry";
pub const EVENT_EXIT: &str = "exit";
pub const EVENT_FAILURE: &str = "failure";
pub const EVENT_INSTRUMENTATION_ERROR: &str = "instrumentation_error";
