//! `Transport` over a host serial port, via the `serialport` crate.

use crate::base::{Result, Transport};
use log::{error, trace};
use serialport::{DataBits, Parity, SerialPort, StopBits};
use std::fmt;
use std::io::{self, Read, Write};
use std::time::Duration;

/// Line settings required by the sensor's UART.
pub const MHZ19_BAUD_RATE: u32 = 9600;

/// Read timeout configured on the port itself. Only bounds a single `read_exact`;
/// the frame deadline is enforced by the frame reader.
pub const MHZ19_DEFAULT_PORT_TIMEOUT: Duration = Duration::from_millis(100);

/// Serial line configuration for a sensor.
#[derive(Debug, Clone, PartialEq)]
pub struct SerialConfig {
    /// Device path or name, e.g. `/dev/ttyS0` or `COM3`.
    pub path: String,
    pub baud_rate: u32,
    pub data_bits: DataBits,
    pub parity: Parity,
    pub stop_bits: StopBits,
    pub port_timeout: Duration,
}

impl SerialConfig {
    /// Creates the configuration the sensor expects (9600 8N1) for the port at `path`.
    pub fn new(path: impl Into<String>) -> SerialConfig {
        SerialConfig {
            path: path.into(),
            baud_rate: MHZ19_BAUD_RATE,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
            port_timeout: MHZ19_DEFAULT_PORT_TIMEOUT,
        }
    }

    /// Opens the port with these settings.
    pub fn open(&self) -> Result<SerialTransport> {
        trace!("Opening serial port {:?}", self);
        let port = serialport::new(self.path.as_str(), self.baud_rate)
            .data_bits(self.data_bits)
            .parity(self.parity)
            .stop_bits(self.stop_bits)
            .timeout(self.port_timeout)
            .open()
            .map_err(|err| {
                error!("Failed to open serial port {}: {}", self.path, err);
                io::Error::from(err)
            })?;
        Ok(SerialTransport::new(port))
    }
}

/// A sensor connection over an open serial port.
pub struct SerialTransport {
    port: Box<dyn SerialPort>,
}

impl SerialTransport {
    /// Wraps an already opened and configured port.
    pub fn new(port: Box<dyn SerialPort>) -> SerialTransport {
        SerialTransport { port }
    }

    /// Returns the underlying port.
    pub fn into_inner(self) -> Box<dyn SerialPort> {
        self.port
    }
}

impl fmt::Debug for SerialTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerialTransport")
            .field("port", &self.port.name())
            .finish()
    }
}

impl Transport for SerialTransport {
    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        Write::write_all(&mut self.port, bytes)?;
        self.port.flush()
    }

    fn bytes_available(&mut self) -> io::Result<usize> {
        Ok(self.port.bytes_to_read()? as usize)
    }

    fn read_byte(&mut self) -> io::Result<u8> {
        let mut byte = [0u8; 1];
        self.port.read_exact(&mut byte)?;
        Ok(byte[0])
    }
}
