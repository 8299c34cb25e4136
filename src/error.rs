use crate::report::DecodeError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when talking to an MCP2200.
///
/// Covers discovery, locking, raw I/O on the hidraw node, and malformed
/// responses. Nothing in this crate retries on any of these.
#[derive(Error, Debug)]
pub enum Error {
    /// Error from the underlying HID API layer (`hidapi` feature only).
    #[cfg(feature = "hidapi")]
    #[error("HID API error: {0}")]
    Hid(#[from] hidapi::HidError),
    /// No hidraw node with the MCP2200 VID/PID was found.
    #[error("No MCP2200 device found (looking for 04D8:00DF)")]
    DeviceNotFound,
    /// Another process holds the exclusive lock on the device node.
    #[error("Device {} is locked by another process", .path.display())]
    DeviceBusy {
        /// The device node that could not be locked.
        path: PathBuf,
    },
    /// Open, read, write, seek or lock failure on the device node.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The device answered with something other than a valid echo of the request.
    #[error("Unexpected response from device: {0}")]
    UnexpectedResponse(#[from] DecodeError),
    /// Function argument is outside the valid range.
    #[error("Argument out of range: {0}")]
    ArgumentOutOfRange(String),
    /// GPIO pin number is outside the valid range for this device.
    #[error("GPIO pin {pin} argument out of range (0-7): {message}")]
    PinArgumentOutOfRange {
        /// The invalid pin number that was specified.
        pin: u8,
        /// Detailed error message explaining the constraint.
        message: String,
    },
}

/// Result type alias for MCP2200 operations.
pub type Result<T> = std::result::Result<T, Error>;
