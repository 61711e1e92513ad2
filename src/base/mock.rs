//! Scripted transport and virtual clock used by the unit tests.

use crate::base::traits::{Clock, Transport};
use std::collections::VecDeque;
use std::io;
use std::time::Duration;

/// In-memory transport: bytes queued with `reply` are handed out one at a time,
/// everything written is captured in `written`.
#[derive(Debug, Default)]
pub struct MockTransport {
    pub written: Vec<u8>,
    inbound: VecDeque<u8>,
    delivered: usize,
    stall_after: Option<usize>,
    fail_writes: bool,
    fail_polls: bool,
    fail_reads: bool,
}

impl MockTransport {
    pub fn new() -> MockTransport {
        MockTransport::default()
    }

    /// Queues bytes the "sensor" will send back.
    pub fn reply(mut self, bytes: &[u8]) -> MockTransport {
        self.inbound.extend(bytes);
        self
    }

    /// Stops reporting available bytes once `count` bytes have been delivered.
    pub fn stall_after(mut self, count: usize) -> MockTransport {
        self.stall_after = Some(count);
        self
    }

    pub fn failing_writes(mut self) -> MockTransport {
        self.fail_writes = true;
        self
    }

    /// `bytes_available` returns an error.
    pub fn failing_polls(mut self) -> MockTransport {
        self.fail_polls = true;
        self
    }

    /// `bytes_available` keeps reporting queued bytes but `read_byte` errors.
    pub fn failing_reads(mut self) -> MockTransport {
        self.fail_reads = true;
        self
    }

    pub fn unread(&self) -> usize {
        self.inbound.len()
    }
}

impl Transport for MockTransport {
    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        if self.fail_writes {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "port closed"));
        }
        self.written.extend_from_slice(bytes);
        Ok(())
    }

    fn bytes_available(&mut self) -> io::Result<usize> {
        if self.fail_polls {
            return Err(io::Error::new(io::ErrorKind::Other, "device disconnected"));
        }
        match self.stall_after {
            Some(limit) if self.delivered >= limit => Ok(0),
            _ => Ok(self.inbound.len()),
        }
    }

    fn read_byte(&mut self) -> io::Result<u8> {
        if self.fail_reads {
            return Err(io::Error::new(io::ErrorKind::TimedOut, "read timed out"));
        }
        let byte = self
            .inbound
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no byte queued"))?;
        self.delivered += 1;
        Ok(byte)
    }
}

/// Virtual clock: `sleep` advances time instantly and counts the calls.
#[derive(Debug, Default)]
pub struct FakeClock {
    now: Duration,
    pub sleeps: usize,
}

impl FakeClock {
    pub fn new() -> FakeClock {
        FakeClock::default()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Duration {
        self.now
    }

    fn sleep(&mut self, duration: Duration) {
        self.sleeps += 1;
        self.now += duration;
    }
}
