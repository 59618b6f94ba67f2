//! Error types for peripheral operations.
//!
//! Covers the failure scenarios of the kiosk peripherals: the scan input
//! stream closing, feedback devices that cannot emit a cue, and autostart
//! management on platforms that do not support it.

/// Result type alias for peripheral operations.
pub type Result<T> = std::result::Result<T, HardwareError>;

/// Errors that can occur during peripheral operations.
#[derive(Debug, thiserror::Error)]
pub enum HardwareError {
    /// Input stream or device is no longer available.
    #[error("Device disconnected: {device}")]
    Disconnected { device: String },

    /// Operation is not supported on this platform or device.
    #[error("Unsupported operation: {operation}")]
    Unsupported { operation: String },

    /// Invalid data received from a device.
    #[error("Invalid data: {message}")]
    InvalidData { message: String },

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HardwareError {
    /// Create a new disconnected error.
    pub fn disconnected(device: impl Into<String>) -> Self {
        Self::Disconnected {
            device: device.into(),
        }
    }

    /// Create a new unsupported operation error.
    pub fn unsupported(operation: impl Into<String>) -> Self {
        Self::Unsupported {
            operation: operation.into(),
        }
    }

    /// Create a new invalid data error.
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disconnected_error() {
        let error = HardwareError::disconnected("stdin");
        assert!(matches!(error, HardwareError::Disconnected { .. }));
        assert_eq!(error.to_string(), "Device disconnected: stdin");
    }

    #[test]
    fn test_unsupported_error() {
        let error = HardwareError::unsupported("autostart");
        assert_eq!(error.to_string(), "Unsupported operation: autostart");
    }

    #[test]
    fn test_invalid_data_error() {
        let error = HardwareError::invalid_data("non-UTF8 input");
        assert_eq!(error.to_string(), "Invalid data: non-UTF8 input");
    }
}
