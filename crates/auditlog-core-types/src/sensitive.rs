//! Sensitive argument marker
//!
//! Arguments wrapped in `Sensitive<T>` never reach a log line: they render
//! as [`REDACTED`] in `Debug`, in `Display`, and in the interception core's
//! value model.

use std::fmt;

/// Placeholder rendered instead of a sensitive value
pub const REDACTED: &str = "***REDACTED***";

/// Wrapper for an argument that must not be logged
///
/// # Example
///
/// ```
/// use auditlog_core_types::Sensitive;
///
/// let pin = Sensitive::new(1234);
/// assert_eq!(format!("{}", pin), "***REDACTED***");
/// assert_eq!(pin.expose(), &1234);
/// ```
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Borrow the wrapped value for business use
    pub fn expose(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T: Clone> Clone for Sensitive<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}
