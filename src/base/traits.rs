use std::io;
use std::thread;
use std::time::{Duration, Instant};

/// Byte-level access to the serial line the sensor is attached to.
///
/// The transport exposes no blocking "byte arrived" notification, so the frame reader
/// polls `bytes_available` and sleeps between checks.
pub trait Transport {
    /// Writes all of `bytes`, blocking until the underlying channel has accepted them.
    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Returns the number of bytes that can currently be read without blocking.
    fn bytes_available(&mut self) -> io::Result<usize>;

    /// Consumes exactly one byte. Only called after `bytes_available` reported data.
    fn read_byte(&mut self) -> io::Result<u8>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        (**self).write_all(bytes)
    }

    fn bytes_available(&mut self) -> io::Result<usize> {
        (**self).bytes_available()
    }

    fn read_byte(&mut self) -> io::Result<u8> {
        (**self).read_byte()
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        (**self).write_all(bytes)
    }

    fn bytes_available(&mut self) -> io::Result<usize> {
        (**self).bytes_available()
    }

    fn read_byte(&mut self) -> io::Result<u8> {
        (**self).read_byte()
    }
}

/// Time source and sleep primitive driving the read deadline.
pub trait Clock {
    /// Monotonic time elapsed since an arbitrary, fixed origin.
    fn now(&self) -> Duration;

    /// Suspends the caller for `duration`.
    fn sleep(&mut self, duration: Duration);
}

/// `Clock` backed by `std::time::Instant` and `std::thread::sleep`.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Creates a new `SystemClock` whose origin is the current instant.
    pub fn new() -> SystemClock {
        SystemClock {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> SystemClock {
        SystemClock::new()
    }
}

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    #[inline]
    fn sleep(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

impl<C: Clock + ?Sized> Clock for &mut C {
    fn now(&self) -> Duration {
        (**self).now()
    }

    fn sleep(&mut self, duration: Duration) {
        (**self).sleep(duration)
    }
}
