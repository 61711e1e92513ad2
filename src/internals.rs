use std::time::Duration;

/// Default time allowed for a complete response frame to arrive.
pub const MHZ19_DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// How long the frame reader sleeps when no byte is waiting.
pub const MHZ19_DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Every frame, in either direction, is exactly this long.
pub const MHZ19_FRAME_SIZE: usize = 9;

/// First byte of every frame.
pub const MHZ19_START_MARKER: u8 = 0xFF;

/// Temperature is reported with this offset added.
pub const MHZ19_TEMPERATURE_OFFSET: i16 = 40;
