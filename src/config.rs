//! Receiver configuration.

use crate::timing::BIT_PERIOD_US;

/// When the receiver listens to the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// The edge interrupt is always enabled. Every frame on the wire updates the
    /// shared payload and reads never block.
    #[default]
    Continuous,
    /// The edge interrupt is enabled by [`Sbus::wait_frame`](crate::Sbus::wait_frame)
    /// and disabled again by the receiver once a frame completes. Cuts interrupt
    /// load between reads at the cost of waiting for a frame before each one.
    OnDemand,
}

/// Settings passed to [`Sbus::begin`](crate::Sbus::begin).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SbusConfig {
    /// Reception mode.
    pub mode: Mode,
    /// Bit period the timer is programmed with, in microseconds.
    pub bit_period_us: u32,
}

impl SbusConfig {
    /// Standard SBUS timing with the given mode.
    pub const fn new(mode: Mode) -> Self {
        Self {
            mode,
            bit_period_us: BIT_PERIOD_US,
        }
    }

    /// Override the bit period, e.g. to trim for a slow or fast clock.
    pub const fn with_bit_period_us(mut self, bit_period_us: u32) -> Self {
        self.bit_period_us = bit_period_us;
        self
    }
}

impl Default for SbusConfig {
    fn default() -> Self {
        Self::new(Mode::default())
    }
}
