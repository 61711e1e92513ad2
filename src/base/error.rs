use std::error;
use std::fmt;
use std::io;

/// Reasons a complete 9-byte frame was rejected by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolError {
    /// The first byte of the frame was not the `0xFF` start marker.
    BadMarker { marker: u8 },

    /// The trailing checksum byte did not match the one computed over bytes 1..=7.
    BadChecksum { received: u8, calculated: u8 },
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::BadMarker { marker } => {
                write!(f, "bad start marker: expected 0xFF, got {:#04X}", marker)
            }
            ProtocolError::BadChecksum {
                received,
                calculated,
            } => write!(
                f,
                "bad checksum: received {:#04X}, calculated {:#04X}",
                received, calculated
            ),
        }
    }
}

impl error::Error for ProtocolError {}

/// Represents errors that can occur while talking to an MH-Z19 sensor.
#[derive(Debug)]
pub enum Error {
    /// The sensor did not deliver a full frame before the deadline.
    /// Carries the number of bytes accumulated when the deadline passed.
    ReadTimeout { bytes_received: usize },

    /// A full frame arrived but failed validation.
    Protocol(ProtocolError),

    /// An I/O error occurred while communicating with the underlying transport (e.g., serial port).
    IoError(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ReadTimeout { bytes_received } => {
                write!(f, "read timeout after receiving {} bytes", bytes_received)
            }
            Error::Protocol(err) => write!(f, "protocol error: {}", err),
            Error::IoError(err) => write!(f, "io error: {}", err),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Protocol(err) => Some(err),
            Error::IoError(err) => Some(err),
            Error::ReadTimeout { .. } => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::IoError(err)
    }
}

impl From<ProtocolError> for Error {
    fn from(err: ProtocolError) -> Self {
        Error::Protocol(err)
    }
}

/// A specialized `Result` type for MH-Z19 operations.
pub type Result<T> = std::result::Result<T, Error>;
