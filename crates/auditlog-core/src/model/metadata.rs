use std::fmt;

/// Raw line value of an unresolved call site
pub const SENTINEL_LINE: i32 = -2;

/// Source line of a call site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceLine {
    /// Resolved line number
    Line(u32),
    /// Not resolved; no code location is rendered
    Local,
}

impl SourceLine {
    /// Line as an integer, with [`SENTINEL_LINE`] for `Local`
    pub fn as_raw(&self) -> i32 {
        match self {
            SourceLine::Line(line) => i32::try_from(*line).unwrap_or(i32::MAX),
            SourceLine::Local => SENTINEL_LINE,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, SourceLine::Line(_))
    }
}

/// Immutable snapshot of a single call site
///
/// Built fresh for every intercepted call and dropped once the message is
/// assembled. `parameter_names` is positionally aligned with the call's
/// argument values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallMetadata {
    pub type_name: String,
    pub simple_type_name: String,
    pub method_name: String,
    pub parameter_names: Vec<String>,
    pub source_line: SourceLine,
}

impl CallMetadata {
    /// `type_name.method_name`
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.type_name, self.method_name)
    }
}

impl fmt::Display for CallMetadata {
    /// Pseudo stack frame: `type.method(Simple.rs:line)`, or just
    /// `type.method` when the line is unresolved
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.type_name, self.method_name)?;
        if let SourceLine::Line(line) = self.source_line {
            write!(f, "({}.rs:{})", self.simple_type_name, line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(source_line: SourceLine) -> CallMetadata {
        CallMetadata {
            type_name: "bank::Account".to_string(),
            simple_type_name: "Account".to_string(),
            method_name: "transfer".to_string(),
            parameter_names: vec!["amount".to_string()],
            source_line,
        }
    }

    #[test]
    fn test_local_renders_qualified_name() {
        let meta = metadata(SourceLine::Local);
        assert_eq!(meta.to_string(), "bank::Account.transfer");
        assert_eq!(meta.source_line.as_raw(), SENTINEL_LINE);
    }

    #[test]
    fn test_resolved_renders_stack_frame() {
        let meta = metadata(SourceLine::Line(42));
        assert_eq!(meta.to_string(), "bank::Account.transfer(Account.rs:42)");
        assert!(meta.source_line.is_resolved());
        assert_eq!(meta.qualified_name(), "bank::Account.transfer");
    }
}
