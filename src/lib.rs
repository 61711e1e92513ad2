//! # MH-Z19 Driver
//!
//! `mhz19` reads CO2 concentration and temperature from Winsen MH-Z19 series infrared
//! CO2 sensors over their 9-byte UART protocol. It can also trigger a zero-point
//! calibration and switch off automatic baseline correction.
//!
//! The sensor is reached through a [`Transport`]. With the default `serial` feature,
//! [`SerialConfig`] opens a host serial port configured the way the sensor expects.

extern crate byteorder;
extern crate log;

pub mod base;
mod checksum;
mod cmds;
mod internals;
mod protocol;
#[cfg(feature = "serial")]
mod serial;
pub mod types;

pub use crate::base::{Clock, Error, ProtocolError, Result, SystemClock, Transport};
pub use crate::cmds::{Command, MHZ19_CMD_DISABLE_ABC, MHZ19_CMD_READ, MHZ19_CMD_RESET};
pub use crate::internals::{MHZ19_DEFAULT_POLL_INTERVAL, MHZ19_DEFAULT_TIMEOUT, MHZ19_FRAME_SIZE};
pub use crate::protocol::{decode, read_frame, send_command};
#[cfg(feature = "serial")]
pub use crate::serial::{SerialConfig, SerialTransport, MHZ19_BAUD_RATE};
pub use crate::types::{RawFrame, SensorReading};

use crate::protocol::request_reading;
use log::trace;
use std::time::Duration;

/// Reads the CO2 concentration in ppm, waiting up to `MHZ19_DEFAULT_TIMEOUT` for the response.
pub fn read_ppm<T: Transport + ?Sized>(transport: &mut T) -> Result<u16> {
    Ok(read_ppm_and_temperature(transport)?.ppm)
}

/// Reads CO2 concentration and temperature, waiting up to `MHZ19_DEFAULT_TIMEOUT` for the response.
pub fn read_ppm_and_temperature<T: Transport + ?Sized>(transport: &mut T) -> Result<SensorReading> {
    request_reading(
        transport,
        &mut SystemClock::new(),
        MHZ19_DEFAULT_TIMEOUT,
        MHZ19_DEFAULT_POLL_INTERVAL,
    )
}

/// Sends the zero-point calibration command. The sensor does not answer.
pub fn reset<T: Transport + ?Sized>(transport: &mut T) -> Result<()> {
    send_command(transport, Command::Reset)
}

/// Turns off automatic baseline correction. The sensor does not answer.
pub fn disable_auto_baseline_correction<T: Transport + ?Sized>(transport: &mut T) -> Result<()> {
    send_command(transport, Command::DisableAutoBaselineCorrection)
}

/// Represents a connection to an MH-Z19 sensor.
///
/// Owns the transport, so every exchange has exclusive access to the line. Callers that
/// share one sensor across threads should put the `Mhz19` behind a mutex.
#[derive(Debug)]
pub struct Mhz19<T, C = SystemClock> {
    transport: T,
    clock: C,
    timeout: Duration,
    poll_interval: Duration,
}

impl<T: Transport> Mhz19<T> {
    /// Constructs a new `Mhz19` over `transport`, using the system clock.
    ///
    /// # Example
    /// ```no_run
    /// # use mhz19::{Mhz19, SerialConfig};
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let transport = SerialConfig::new("/dev/ttyS0").open()?;
    /// let mut sensor = Mhz19::new(transport);
    /// println!("CO2: {} ppm", sensor.read_ppm()?);
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(transport: T) -> Mhz19<T> {
        Mhz19::with_clock(transport, SystemClock::new())
    }
}

impl<T: Transport, C: Clock> Mhz19<T, C> {
    /// Constructs a new `Mhz19` driven by a custom clock.
    pub fn with_clock(transport: T, clock: C) -> Mhz19<T, C> {
        trace!("Creating new Mhz19");
        Mhz19 {
            transport,
            clock,
            timeout: MHZ19_DEFAULT_TIMEOUT,
            poll_interval: MHZ19_DEFAULT_POLL_INTERVAL,
        }
    }

    /// Sets the response timeout used by `read_ppm` and `read_ppm_and_temperature`.
    pub fn with_timeout(mut self, timeout: Duration) -> Mhz19<T, C> {
        self.timeout = timeout;
        self
    }

    /// Sets how long the reader sleeps between polls of an idle line.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Mhz19<T, C> {
        self.poll_interval = poll_interval;
        self
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Reads the CO2 concentration in ppm using the configured timeout.
    pub fn read_ppm(&mut self) -> Result<u16> {
        self.read_ppm_with_timeout(self.timeout)
    }

    /// Reads the CO2 concentration in ppm with a specified timeout.
    ///
    /// # Arguments
    ///
    /// * `timeout` - The maximum duration to wait for the response frame.
    pub fn read_ppm_with_timeout(&mut self, timeout: Duration) -> Result<u16> {
        Ok(self.read_ppm_and_temperature_with_timeout(timeout)?.ppm)
    }

    /// Reads CO2 concentration and temperature using the configured timeout.
    pub fn read_ppm_and_temperature(&mut self) -> Result<SensorReading> {
        self.read_ppm_and_temperature_with_timeout(self.timeout)
    }

    /// Reads CO2 concentration and temperature with a specified timeout.
    ///
    /// # Arguments
    ///
    /// * `timeout` - The maximum duration to wait for the response frame.
    pub fn read_ppm_and_temperature_with_timeout(
        &mut self,
        timeout: Duration,
    ) -> Result<SensorReading> {
        trace!("Reading sensor with timeout {:?}", timeout);
        request_reading(
            &mut self.transport,
            &mut self.clock,
            timeout,
            self.poll_interval,
        )
    }

    /// Sends the zero-point calibration command.
    pub fn reset(&mut self) -> Result<()> {
        send_command(&mut self.transport, Command::Reset)
    }

    /// Turns off automatic baseline correction.
    pub fn disable_auto_baseline_correction(&mut self) -> Result<()> {
        send_command(&mut self.transport, Command::DisableAutoBaselineCorrection)
    }

    /// Consumes the handle and returns the transport.
    pub fn into_inner(self) -> T {
        self.transport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::mock::{FakeClock, MockTransport};

    const SAMPLE: [u8; 9] = [255, 1, 3, 32, 63, 0, 0, 0, 157];

    #[test]
    fn free_read_functions_decode_response() {
        let mut transport = MockTransport::new().reply(&SAMPLE).reply(&SAMPLE);
        assert_eq!(read_ppm(&mut transport).unwrap(), 800);
        assert_eq!(
            read_ppm_and_temperature(&mut transport).unwrap(),
            SensorReading {
                ppm: 800,
                temperature_celsius: 23
            }
        );
        assert_eq!(transport.written, [MHZ19_CMD_READ, MHZ19_CMD_READ].concat());
    }

    #[test]
    fn free_commands_are_fire_and_forget() {
        let mut transport = MockTransport::new();
        reset(&mut transport).unwrap();
        disable_auto_baseline_correction(&mut transport).unwrap();
        assert_eq!(
            transport.written,
            [MHZ19_CMD_RESET, MHZ19_CMD_DISABLE_ABC].concat()
        );
    }

    #[test]
    fn device_reads_through_owned_transport() {
        let transport = MockTransport::new().reply(&SAMPLE);
        let mut sensor = Mhz19::with_clock(transport, FakeClock::new());
        assert_eq!(sensor.read_ppm().unwrap(), 800);
        assert_eq!(sensor.into_inner().written, MHZ19_CMD_READ);
    }

    #[test]
    fn device_times_out_without_partial_value() {
        let transport = MockTransport::new().reply(&SAMPLE[..6]);
        let mut sensor = Mhz19::with_clock(transport, FakeClock::new())
            .with_timeout(Duration::from_millis(500));
        let err = sensor.read_ppm_and_temperature().unwrap_err();
        assert!(matches!(err, Error::ReadTimeout { bytes_received: 6 }));
    }

    #[test]
    fn device_timeout_override() {
        let mut sensor = Mhz19::with_clock(MockTransport::new(), FakeClock::new());
        assert_eq!(sensor.timeout(), MHZ19_DEFAULT_TIMEOUT);
        sensor.set_timeout(Duration::from_secs(5));
        assert_eq!(sensor.timeout(), Duration::from_secs(5));

        let err = sensor.read_ppm_with_timeout(Duration::ZERO).unwrap_err();
        assert!(matches!(err, Error::ReadTimeout { bytes_received: 0 }));
    }

    #[test]
    fn device_and_free_function_report_same_failure() {
        let mut bytes = SAMPLE;
        bytes[8] = 0x10;
        let mut transport = MockTransport::new().reply(&bytes);
        let free = read_ppm_and_temperature(&mut transport).unwrap_err();

        let mut sensor = Mhz19::with_clock(MockTransport::new().reply(&bytes), FakeClock::new());
        let handle = sensor.read_ppm_and_temperature().unwrap_err();

        let expected = ProtocolError::BadChecksum {
            received: 0x10,
            calculated: 157,
        };
        assert!(matches!(free, Error::Protocol(e) if e == expected));
        assert!(matches!(handle, Error::Protocol(e) if e == expected));
        assert_eq!(free.to_string(), handle.to_string());
    }

    #[test]
    fn device_reports_bad_marker() {
        let mut bytes = SAMPLE;
        bytes[0] = 0x00;
        let transport = MockTransport::new().reply(&bytes);
        let mut sensor = Mhz19::with_clock(transport, FakeClock::new());
        let err = sensor.read_ppm().unwrap_err();
        assert!(matches!(
            err,
            Error::Protocol(ProtocolError::BadMarker { marker: 0x00 })
        ));
    }

    #[test]
    fn device_sends_control_commands() {
        let mut sensor = Mhz19::with_clock(MockTransport::new(), FakeClock::new());
        sensor.disable_auto_baseline_correction().unwrap();
        sensor.reset().unwrap();
        assert_eq!(
            sensor.into_inner().written,
            [MHZ19_CMD_DISABLE_ABC, MHZ19_CMD_RESET].concat()
        );
    }

    #[test]
    fn write_failure_aborts_read() {
        let transport = MockTransport::new().reply(&SAMPLE).failing_writes();
        let mut sensor = Mhz19::with_clock(transport, FakeClock::new());
        assert!(matches!(sensor.read_ppm(), Err(Error::IoError(_))));
        assert_eq!(sensor.into_inner().unread(), 9);
    }
}
