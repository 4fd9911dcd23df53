//! Input Synthesis Error Types
//!
//! Error handling for the input synthesis library.

use thiserror::Error;

/// Result type for input operations
pub type Result<T> = std::result::Result<T, InputError>;

/// Input synthesis error types
#[derive(Error, Debug)]
pub enum InputError {
    /// Key name has no scan-code mapping
    #[error("Unknown key: {key:?}")]
    UnknownKey {
        /// The key name that failed to resolve
        key: String,
    },

    /// Character has no scan-code mapping
    #[error("Unknown character: {0:?}")]
    UnknownChar(char),

    /// The injection call accepted fewer events than were submitted
    #[error("Injection rejected: {injected} of {expected} events accepted")]
    InjectionRejected {
        /// Number of events submitted
        expected: u32,
        /// Number of events the OS accepted
        injected: u32,
    },

    /// Fail-safe triggered by cursor resting on a fail-safe point
    #[error("Fail-safe triggered at ({x}, {y}); move the cursor off the fail-safe point or disable the fail-safe")]
    FailSafeTriggered {
        /// Cursor X when the check fired
        x: i32,
        /// Cursor Y when the check fired
        y: i32,
    },

    /// Display metrics query failed or returned a degenerate display
    #[error("Invalid display metrics: {0}x{1}")]
    DisplayMetrics(u32, u32),

    /// Cursor position query failed
    #[error("Cursor position query failed: {0}")]
    CursorPosition(String),

    /// Mouse parameter (acceleration) query or update failed
    #[error("Mouse parameter access failed: {0}")]
    MouseParameters(String),

    /// Platform call failed
    #[error("Platform error: {0}")]
    Platform(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Error classification, for callers that branch on error class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Key/character name resolution errors
    Translation,
    /// Event injection errors
    Injection,
    /// Fail-safe aborts
    FailSafe,
    /// OS query/update errors
    Platform,
    /// Configuration errors
    Config,
}

/// Classify an error for handling-strategy selection
pub fn classify_error(error: &InputError) -> ErrorKind {
    match error {
        InputError::UnknownKey { .. } | InputError::UnknownChar(_) => ErrorKind::Translation,

        InputError::InjectionRejected { .. } => ErrorKind::Injection,

        InputError::FailSafeTriggered { .. } => ErrorKind::FailSafe,

        InputError::DisplayMetrics(_, _)
        | InputError::CursorPosition(_)
        | InputError::MouseParameters(_)
        | InputError::Platform(_) => ErrorKind::Platform,

        InputError::Config(_) => ErrorKind::Config,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let error = InputError::UnknownKey {
            key: "hyperkey".to_string(),
        };
        assert_eq!(classify_error(&error), ErrorKind::Translation);

        let error = InputError::InjectionRejected {
            expected: 2,
            injected: 1,
        };
        assert_eq!(classify_error(&error), ErrorKind::Injection);

        let error = InputError::FailSafeTriggered { x: 0, y: 0 };
        assert_eq!(classify_error(&error), ErrorKind::FailSafe);

        let error = InputError::DisplayMetrics(0, 0);
        assert_eq!(classify_error(&error), ErrorKind::Platform);

        let error = InputError::Config("bad toml".to_string());
        assert_eq!(classify_error(&error), ErrorKind::Config);
    }

    #[test]
    fn test_error_display() {
        let error = InputError::InjectionRejected {
            expected: 3,
            injected: 0,
        };
        assert_eq!(
            error.to_string(),
            "Injection rejected: 0 of 3 events accepted"
        );

        let error = InputError::UnknownKey {
            key: "nope".to_string(),
        };
        assert!(error.to_string().contains("nope"));
    }
}
