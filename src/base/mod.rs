mod error;
#[cfg(test)]
pub(crate) mod mock;
mod traits;

pub use self::error::{Error, ProtocolError, Result};
pub use self::traits::{Clock, SystemClock, Transport};
