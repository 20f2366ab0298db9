//! Mouse Device Error Types
//!
//! Only failures that make the device unusable are surfaced as errors.
//! Malformed or unexpected raw events are dropped where they are seen, and
//! grab/hide transitions that would break an invariant are turned into
//! no-ops by the controller guards.

use thiserror::Error;

/// Result type for mouse device operations
pub type Result<T> = std::result::Result<T, MouseError>;

/// Mouse device error types
#[derive(Error, Debug)]
pub enum MouseError {
    /// The window-system event source could not be opened
    #[error("Cannot open window-system event source: {0}")]
    EventSourceUnavailable(String),

    /// The window system refused the requested event subscription
    #[error("Event subscription rejected: {0}")]
    EventMaskRejected(String),

    /// Window bounds cannot hold a pointer
    #[error("Invalid window bounds: {width}x{height}")]
    InvalidBounds {
        /// Requested width
        width: i32,
        /// Requested height
        height: i32,
    },

    /// Replay script could not be parsed
    #[error("Invalid replay script: {0}")]
    InvalidScript(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorType {
    /// Device construction failed; nothing usable was created
    Initialization,
    /// Bounds or other settings were rejected
    Configuration,
    /// Replay input was malformed
    Script,
}

/// Classify error for reporting
pub fn classify_error(error: &MouseError) -> ErrorType {
    match error {
        MouseError::EventSourceUnavailable(_) | MouseError::EventMaskRejected(_) => {
            ErrorType::Initialization
        }
        MouseError::InvalidBounds { .. } => ErrorType::Configuration,
        MouseError::InvalidScript(_) | MouseError::Io(_) => ErrorType::Script,
    }
}

impl MouseError {
    /// Whether the error leaves the device unusable
    pub fn is_fatal(&self) -> bool {
        matches!(
            classify_error(self),
            ErrorType::Initialization | ErrorType::Configuration
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let error = MouseError::EventSourceUnavailable("no display".to_string());
        assert_eq!(classify_error(&error), ErrorType::Initialization);

        let error = MouseError::EventMaskRejected("bad window".to_string());
        assert_eq!(classify_error(&error), ErrorType::Initialization);

        let error = MouseError::InvalidBounds {
            width: 0,
            height: 480,
        };
        assert_eq!(classify_error(&error), ErrorType::Configuration);

        let error = MouseError::InvalidScript("eof".to_string());
        assert_eq!(classify_error(&error), ErrorType::Script);
    }

    #[test]
    fn test_fatal_errors() {
        assert!(MouseError::EventSourceUnavailable("x".to_string()).is_fatal());
        assert!(MouseError::InvalidBounds {
            width: -1,
            height: -1
        }
        .is_fatal());
        assert!(!MouseError::InvalidScript("x".to_string()).is_fatal());
    }

    #[test]
    fn test_error_display() {
        let error = MouseError::InvalidBounds {
            width: 0,
            height: 10,
        };
        assert_eq!(error.to_string(), "Invalid window bounds: 0x10");
    }
}
