//! Logging facility for auditlog
//!
//! - Single initialization point via `init(profile)`
//! - Test capture mode for assertions on the events a [`crate::TracingSink`]
//!   emits
//!
//! # Usage
//!
//! ```rust
//! use auditlog_core::logging_facility::{init, Profile};
//!
//! // Initialize once at application startup
//! init(Profile::Development);
//! ```

pub mod init;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
