//! Core types shared across auditlog facilities
//!
//! This crate provides foundational types used by the interception core,
//! its sinks and the CLI:
//!
//! - **Schema constants**: canonical log target, field keys and event names
//! - **Sensitive data**: `Sensitive<T>` marker for argument redaction

pub mod schema;
pub mod sensitive;

pub use sensitive::{Sensitive, REDACTED};
