//! Error types for SBUS reception.
//!
//! Reception problems on the wire (parity or framing errors) are handled inside the
//! interrupt handler and never reach this type: the receiver simply resynchronizes
//! on the next start edge. [`Error`] only covers what a caller can act upon.
//!
//! # Example
//!
//! ```no_run
//! # use sbus_softrx::{Error, Sbus};
//! # use sbus_softrx::hal::{EdgeInterrupt, MillisClock};
//! fn read_throttle<E: EdgeInterrupt, C: MillisClock>(sbus: &mut Sbus<'_, E, C>) -> Option<u16> {
//!     match sbus.wait_frame(20) {
//!         Ok(()) => Some(sbus.channel(3)),
//!         Err(Error::Timeout { .. }) => None,
//!         Err(_) => None,
//!     }
//! }
//! ```

use core::fmt;

/// Errors surfaced by the consumer-facing SBUS API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// No complete frame arrived before the deadline passed to
    /// [`Sbus::wait_frame`](crate::Sbus::wait_frame).
    Timeout {
        /// The timeout that elapsed, in milliseconds
        waited_ms: u32,
    },

    /// A channel index outside `1..=18` was requested.
    InvalidChannel(u8),

    /// The bit timer rejected the requested bit period.
    ///
    /// This typically means the platform clock cannot produce a compare
    /// interval that short (or that long) with the selected prescaler.
    TimerConfig,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Timeout { waited_ms } => {
                write!(f, "No SBUS frame received within {waited_ms} ms")
            }
            Error::InvalidChannel(index) => {
                write!(f, "Invalid SBUS channel {index}: expected 1..=18")
            }
            Error::TimerConfig => write!(f, "Bit timer could not be configured"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// A specialized Result type for SBUS operations.
///
/// This is defined as `core::result::Result<T, Error>` for convenience.
pub type Result<T> = core::result::Result<T, Error>;
