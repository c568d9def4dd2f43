//! Error types for native calls

use std::fmt;
use thiserror::Error;

/// Result type for native calls
pub type Result<T, E = MagickError> = std::result::Result<T, E>;

/// Errors raised by wrappers and mutators
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MagickError {
    /// The native library reported an error-class exception
    #[error("{0}")]
    Native(NativeException),

    /// An argument could not be marshaled; the native library was not called
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument { name: String, reason: String },

    /// The call violates the ownership protocol
    #[error("{0}")]
    InvalidOperation(String),
}

impl MagickError {
    pub fn invalid_argument(name: impl Into<String>, reason: impl Into<String>) -> Self {
        MagickError::InvalidArgument {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_operation(message: impl Into<String>) -> Self {
        MagickError::InvalidOperation(message.into())
    }
}

impl From<NativeException> for MagickError {
    fn from(exception: NativeException) -> Self {
        MagickError::Native(exception)
    }
}

/// Severity class of a native exception, derived from its code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExceptionSeverity {
    Undefined,
    Warning,
    Error,
    Fatal,
}

impl ExceptionSeverity {
    pub fn from_code(code: i32) -> Self {
        match code {
            i32::MIN..=299 => ExceptionSeverity::Undefined,
            300..=399 => ExceptionSeverity::Warning,
            400..=699 => ExceptionSeverity::Error,
            _ => ExceptionSeverity::Fatal,
        }
    }
}

/// An exception raised by the native library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeException {
    pub code: i32,
    pub message: String,
    pub description: Option<String>,
}

impl NativeException {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        NativeException {
            code,
            message: message.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn severity(&self) -> ExceptionSeverity {
        ExceptionSeverity::from_code(self.code)
    }

    pub fn is_warning(&self) -> bool {
        self.severity() == ExceptionSeverity::Warning
    }
}

impl fmt::Display for NativeException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:?} {})", self.message, self.severity(), self.code)?;
        if let Some(description) = &self.description {
            write!(f, ": {}", description)?;
        }
        Ok(())
    }
}

impl std::error::Error for NativeException {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ranges() {
        assert_eq!(ExceptionSeverity::from_code(0), ExceptionSeverity::Undefined);
        assert_eq!(ExceptionSeverity::from_code(350), ExceptionSeverity::Warning);
        assert_eq!(ExceptionSeverity::from_code(445), ExceptionSeverity::Error);
        assert_eq!(ExceptionSeverity::from_code(699), ExceptionSeverity::Error);
        assert_eq!(ExceptionSeverity::from_code(700), ExceptionSeverity::Fatal);
    }

    #[test]
    fn test_display() {
        let exception = NativeException::new(425, "unable to open image").with_description("missing.png");
        assert_eq!(exception.to_string(), "unable to open image (Error 425): missing.png");

        let error = MagickError::invalid_argument("file_name", "contains a NUL byte");
        assert_eq!(error.to_string(), "Invalid argument 'file_name': contains a NUL byte");
    }
}
