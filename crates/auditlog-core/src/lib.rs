//! auditlog core - method-call instrumentation
//!
//! Intercepts calls registered with markers, reconstructs the call's metadata
//! and writes leveled log records for the call's entry, its result or its
//! failure:
//! - Marker registry keyed by owner type + method name, loadable from TOML
//! - Fast and precise call-site metadata resolvers with policy selection
//! - Message assembly with array flattening
//! - Level gating and routing onto an injected `LogSink`
//! - Failure containment: instrumentation never disturbs the business call
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use auditlog_core::{call_args, call_signature};
//! use auditlog_core::{
//!     Call, DebugInfoTable, Interceptor, LocationPolicy, Marker, MarkerRegistry, MemorySink,
//!     PhaseMarker, Severity,
//! };
//!
//! struct Account;
//!
//! let mut registry = MarkerRegistry::new();
//! registry
//!     .register(
//!         std::any::type_name::<Account>(),
//!         "deposit",
//!         Marker::Composite(
//!             PhaseMarker::new("deposit")
//!                 .with_level(Severity::Info)
//!                 .with_location(LocationPolicy::Disabled),
//!         ),
//!     )
//!     .unwrap();
//!
//! let sink = Arc::new(MemorySink::all_enabled());
//! let interceptor = Interceptor::new(sink.clone(), Arc::new(registry), Arc::new(DebugInfoTable::new()));
//!
//! let signature = call_signature!(Account, "deposit", [amount]);
//! let amount = 10i32;
//! let args = call_args!(amount);
//! let total = interceptor.around_ok(&Call::new(&signature, &args), || amount + 5);
//!
//! assert_eq!(total, 15);
//! assert_eq!(sink.records().len(), 2);
//! assert_eq!(
//!     sink.records()[1].message,
//!     format!(
//!         "Method: [{}.deposit], Business: [deposit], Result: [15]",
//!         std::any::type_name::<Account>()
//!     )
//! );
//! ```

pub mod config;
pub mod errors;
pub mod flatten;
pub mod gate;
pub mod interceptor;
pub mod logging_facility;
pub mod macros;
pub mod message;
pub mod method_table;
pub mod model;
pub mod registry;
pub mod resolver;
pub mod sink;

// Re-export commonly used types
pub use config::load_markers;
pub use errors::{AuditLogError, ExError, ExErrorKind, Result};
pub use flatten::flatten;
pub use interceptor::Interceptor;
pub use method_table::{DebugInfoTable, MethodDebugInfo, MethodTable};
pub use model::{
    ArrayValue, AsValue, Call, CallMetadata, CallSignature, FailureMarker, LocationPolicy, Marker,
    MarkerKind, MarkerSet, MethodId, PhaseMarker, Severity, SourceLine, Value, SENTINEL_LINE,
};
pub use registry::MarkerRegistry;
pub use resolver::{select_resolver, FastResolver, MetadataResolver, PreciseResolver, ResolverKind};
pub use sink::{CallRecord, CapturedRecord, LogSink, MemorySink, TracingSink};

pub use auditlog_core_types::{Sensitive, REDACTED};
