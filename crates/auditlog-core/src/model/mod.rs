//! Domain model for instrumented calls
//!
//! - `Severity`, `LocationPolicy`: marker configuration values
//! - `Marker`, `MarkerSet`: per-method marker configuration
//! - `CallSignature`, `Call`: what the host hands over per intercepted call
//! - `CallMetadata`: resolved snapshot of one call site
//! - `Value`: generic argument and result values

pub mod location;
pub mod marker;
pub mod metadata;
pub mod severity;
pub mod signature;
pub mod value;

pub use location::LocationPolicy;
pub use marker::{FailureMarker, Marker, MarkerKind, MarkerSet, PhaseMarker};
pub use metadata::{CallMetadata, SourceLine, SENTINEL_LINE};
pub use severity::Severity;
pub use signature::{Call, CallSignature, MethodId};
pub use value::{ArrayElement, ArrayValue, AsValue, Value};
