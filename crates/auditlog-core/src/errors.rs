use thiserror::Error;

/// Result type alias using AuditLogError
pub type Result<T> = std::result::Result<T, AuditLogError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable code. The code is attached to the fallback
/// record written when instrumentation of a call fails, so operators can
/// tell a missing debug-table entry from a malformed argument list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Metadata resolution
    MethodNotFound,
    ArityMismatch,

    // Message assembly
    Assembly,

    // Configuration
    InvalidMarker,
    DuplicateMarker,
    DuplicateMethod,
    Config,
    Io,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::MethodNotFound => "ERR_METHOD_NOT_FOUND",
            ExErrorKind::ArityMismatch => "ERR_ARITY_MISMATCH",
            ExErrorKind::Assembly => "ERR_ASSEMBLY",
            ExErrorKind::InvalidMarker => "ERR_INVALID_MARKER",
            ExErrorKind::DuplicateMarker => "ERR_DUPLICATE_MARKER",
            ExErrorKind::DuplicateMethod => "ERR_DUPLICATE_METHOD",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::Io => "ERR_IO",
        }
    }
}

/// Canonical structured error type
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    type_name: Option<String>,
    method_name: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            type_name: None,
            method_name: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add owner type context
    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Add method context
    pub fn with_method_name(mut self, method_name: impl Into<String>) -> Self {
        self.method_name = Some(method_name.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    pub fn method_name(&self) -> Option<&str> {
        self.method_name.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        match (&self.type_name, &self.method_name) {
            (Some(type_name), Some(method_name)) => {
                write!(f, " (method: {}.{})", type_name, method_name)?
            }
            (Some(type_name), None) => write!(f, " (type: {})", type_name)?,
            (None, Some(method_name)) => write!(f, " (method: {})", method_name)?,
            (None, None) => {}
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for instrumentation and its configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuditLogError {
    // ===== Resolution Errors =====
    /// The compiled-method metadata source has no entry for the method
    #[error("No debug metadata for method {type_name}.{method_name}")]
    MethodNotFound {
        type_name: String,
        method_name: String,
    },

    /// Parameter names and argument values are not positionally aligned
    #[error("Method {method} declares {expected} parameters but was called with {actual} arguments")]
    ArityMismatch {
        method: String,
        expected: usize,
        actual: usize,
    },

    // ===== Assembly Errors =====
    #[error("Failed to assemble {phase} message for {method}")]
    Assembly { phase: &'static str, method: String },

    // ===== Configuration Errors =====
    #[error("Invalid marker on {method}: {reason}")]
    InvalidMarker { method: String, reason: String },

    /// A method carries two markers of the same kind
    #[error("Method {method} already has a {kind} marker")]
    DuplicateMarker { method: String, kind: String },

    /// The debug table already holds an entry for the method
    #[error("Debug metadata for {type_name}.{method_name} is already registered")]
    DuplicateMethod {
        type_name: String,
        method_name: String,
    },

    #[error("Invalid marker configuration: {message}")]
    Config { message: String },

    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },
}

/// Conversion from AuditLogError to ExError
impl From<AuditLogError> for ExError {
    fn from(err: AuditLogError) -> Self {
        match err {
            AuditLogError::MethodNotFound {
                type_name,
                method_name,
            } => ExError::new(ExErrorKind::MethodNotFound)
                .with_op("resolve_precise")
                .with_type_name(type_name)
                .with_method_name(method_name)
                .with_message("No debug metadata for method"),

            AuditLogError::ArityMismatch {
                method,
                expected,
                actual,
            } => ExError::new(ExErrorKind::ArityMismatch)
                .with_method_name(method)
                .with_message(format!(
                    "Expected {} parameters, got {} arguments",
                    expected, actual
                )),

            AuditLogError::Assembly { phase, method } => ExError::new(ExErrorKind::Assembly)
                .with_op(format!("assemble_{}", phase))
                .with_method_name(method),

            AuditLogError::InvalidMarker { method, reason } => {
                ExError::new(ExErrorKind::InvalidMarker)
                    .with_method_name(method)
                    .with_message(reason)
            }

            AuditLogError::DuplicateMarker { method, kind } => {
                ExError::new(ExErrorKind::DuplicateMarker)
                    .with_method_name(method)
                    .with_message(format!("Duplicate {} marker", kind))
            }

            AuditLogError::DuplicateMethod {
                type_name,
                method_name,
            } => ExError::new(ExErrorKind::DuplicateMethod)
                .with_op("register_debug_info")
                .with_type_name(type_name)
                .with_method_name(method_name),

            AuditLogError::Config { message } => {
                ExError::new(ExErrorKind::Config).with_message(message)
            }

            AuditLogError::Io { path, message } => ExError::new(ExErrorKind::Io)
                .with_op("load_markers")
                .with_message(format!("{}: {}", path, message)),
        }
    }
}
