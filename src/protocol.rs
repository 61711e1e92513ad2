use crate::base::{Clock, Error, ProtocolError, Result, Transport};
use crate::cmds::Command;
use crate::internals::*;
use crate::types::{RawFrame, SensorReading};
use byteorder::{BigEndian, ByteOrder};
use log::{debug, error, trace, warn};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
enum DecodeStatus {
    Waiting(usize),
    Complete,
}

/// Accumulates bytes of one response frame.
#[derive(Debug, Clone)]
struct FrameAssembler {
    status: DecodeStatus,
    buf: [u8; MHZ19_FRAME_SIZE],
}

impl FrameAssembler {
    fn new() -> FrameAssembler {
        FrameAssembler {
            status: DecodeStatus::Waiting(0),
            buf: [0; MHZ19_FRAME_SIZE],
        }
    }

    fn received(&self) -> usize {
        match self.status {
            DecodeStatus::Waiting(len) => len,
            DecodeStatus::Complete => MHZ19_FRAME_SIZE,
        }
    }

    /// Appends one byte. Returns the frame once the ninth byte has arrived.
    fn push(&mut self, byte: u8) -> Option<RawFrame> {
        match self.status {
            DecodeStatus::Waiting(len) => {
                self.buf[len] = byte;
                let len = len + 1;
                if len == MHZ19_FRAME_SIZE {
                    trace!("Assembler state -> Complete");
                    self.status = DecodeStatus::Complete;
                    Some(RawFrame::new(self.buf))
                } else {
                    self.status = DecodeStatus::Waiting(len);
                    None
                }
            }
            // read_frame returns as soon as the frame completes
            DecodeStatus::Complete => None,
        }
    }
}

/// Writes the fixed bytes of `cmd` to the transport.
pub fn send_command<T: Transport + ?Sized>(transport: &mut T, cmd: Command) -> Result<()> {
    let bytes = cmd.bytes();
    trace!("Sending {:?} command: {:02X?}", cmd, bytes);
    match transport.write_all(bytes) {
        Ok(()) => {
            trace!("{:?} command sent successfully", cmd);
            Ok(())
        }
        Err(err) => {
            error!("IO error writing {:?} command: {}", cmd, err);
            Err(err.into())
        }
    }
}

/// Polls the transport until a full 9-byte frame has arrived or `timeout` has elapsed.
///
/// The deadline is measured from the call, regardless of how many bytes are already in;
/// a frame still incomplete at the deadline is discarded.
///
/// # Arguments
///
/// * `transport` - The serial line to read from.
/// * `clock` - Time source and sleep primitive.
/// * `timeout` - The maximum duration to wait for the whole frame.
/// * `poll_interval` - How long to sleep whenever no byte is waiting.
pub fn read_frame<T, C>(
    transport: &mut T,
    clock: &mut C,
    timeout: Duration,
    poll_interval: Duration,
) -> Result<RawFrame>
where
    T: Transport + ?Sized,
    C: Clock + ?Sized,
{
    trace!("Reading frame with timeout {:?}", timeout);
    let start = clock.now();
    let mut assembler = FrameAssembler::new();

    loop {
        let elapsed = clock.now().saturating_sub(start);
        if elapsed > timeout {
            warn!(
                "Read timeout after {:?}, read {} bytes",
                timeout,
                assembler.received()
            );
            return Err(Error::ReadTimeout {
                bytes_received: assembler.received(),
            });
        }

        let available = match transport.bytes_available() {
            Ok(n) => n,
            Err(err) => {
                error!("IO error polling transport: {}", err);
                return Err(err.into());
            }
        };

        if available > 0 {
            let byte = match transport.read_byte() {
                Ok(byte) => byte,
                Err(err) => {
                    error!("IO error reading from transport: {}", err);
                    return Err(err.into());
                }
            };
            trace!(
                "Received byte {:02X} ({} of {})",
                byte,
                assembler.received() + 1,
                MHZ19_FRAME_SIZE
            );
            if let Some(frame) = assembler.push(byte) {
                debug!("Finished reading frame {:?}", frame);
                return Ok(frame);
            }
        } else {
            trace!("Waiting for data, buffer length={}", assembler.received());
            clock.sleep(poll_interval);
        }
    }
}

/// Validates the start marker and checksum of `frame` and extracts the measurement.
pub fn decode(frame: &RawFrame) -> std::result::Result<SensorReading, ProtocolError> {
    if frame.marker() != MHZ19_START_MARKER {
        error!(
            "Bad start marker for frame {:?}: expected {:02X}, got {:02X}",
            frame,
            MHZ19_START_MARKER,
            frame.marker()
        );
        return Err(ProtocolError::BadMarker {
            marker: frame.marker(),
        });
    }

    let received = frame.received_checksum();
    let calculated = frame.calculated_checksum();
    trace!(
        "Checksum: received {:02X}, calculated {:02X}",
        received,
        calculated
    );
    if received != calculated {
        error!(
            "Bad checksum for frame {:?}: received {:02X}, calculated {:02X}",
            frame, received, calculated
        );
        return Err(ProtocolError::BadChecksum {
            received,
            calculated,
        });
    }

    let bytes = frame.as_bytes();
    let reading = SensorReading {
        ppm: BigEndian::read_u16(&bytes[2..4]),
        temperature_celsius: bytes[4] as i16 - MHZ19_TEMPERATURE_OFFSET,
    };
    trace!("Decoded reading: {:?}", reading);
    Ok(reading)
}

/// Sends the read command and waits for, validates and decodes the response.
pub fn request_reading<T, C>(
    transport: &mut T,
    clock: &mut C,
    timeout: Duration,
    poll_interval: Duration,
) -> Result<SensorReading>
where
    T: Transport + ?Sized,
    C: Clock + ?Sized,
{
    send_command(transport, Command::Read)?;
    let frame = read_frame(transport, clock, timeout, poll_interval)?;
    Ok(decode(&frame)?)
}
