use crate::checksum::Checksum;
use crate::internals::{MHZ19_FRAME_SIZE, MHZ19_START_MARKER};
use std::fmt;

/// One complete 9-byte frame as received from the sensor.
///
/// A `RawFrame` has not been validated; pass it to [`decode`](crate::decode) to check
/// the start marker and checksum.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RawFrame([u8; MHZ19_FRAME_SIZE]);

impl RawFrame {
    /// Wraps nine bytes as a frame.
    #[inline]
    pub fn new(bytes: [u8; MHZ19_FRAME_SIZE]) -> RawFrame {
        RawFrame(bytes)
    }

    /// Builds a well-formed frame around a 7-byte payload: prepends the start marker
    /// and appends the matching checksum.
    ///
    /// # Arguments
    ///
    /// * `payload` - Bytes 1..=7 of the frame.
    pub fn from_payload(payload: [u8; 7]) -> RawFrame {
        let mut checksum = Checksum::new();
        checksum.push_slice(&payload);

        let mut bytes = [0; MHZ19_FRAME_SIZE];
        bytes[0] = MHZ19_START_MARKER;
        bytes[1..8].copy_from_slice(&payload);
        bytes[8] = checksum.checksum();
        RawFrame(bytes)
    }

    /// Returns the frame bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; MHZ19_FRAME_SIZE] {
        &self.0
    }

    /// First byte, expected to be the start marker.
    #[inline]
    pub fn marker(&self) -> u8 {
        self.0[0]
    }

    /// The checksum byte carried by the frame.
    #[inline]
    pub fn received_checksum(&self) -> u8 {
        self.0[MHZ19_FRAME_SIZE - 1]
    }

    /// The checksum computed over bytes 1..=7.
    pub fn calculated_checksum(&self) -> u8 {
        let mut checksum = Checksum::new();
        checksum.push_slice(&self.0[1..MHZ19_FRAME_SIZE - 1]);
        checksum.checksum()
    }

    /// Returns `true` if the carried checksum matches the computed one.
    #[inline]
    pub fn checksum_matches(&self) -> bool {
        self.received_checksum() == self.calculated_checksum()
    }
}

impl fmt::Debug for RawFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RawFrame({:02X?})", self.0)
    }
}

/// A decoded measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorReading {
    /// CO2 concentration in parts per million.
    pub ppm: u16,

    /// Sensor temperature in degrees Celsius. Coarse, and may be negative.
    pub temperature_celsius: i16,
}
