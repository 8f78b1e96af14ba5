//! Capability traits the receiver needs from the platform.
//!
//! The line level is read through [`embedded_hal::digital::InputPin`]. The
//! remaining pieces have no `embedded-hal` counterpart and are defined here:
//!
//! - [`EdgeInterrupt`]: the edge/pin-change interrupt watching the SBUS pin
//! - [`BitTimer`]: a free-running timer raising a "tick ready" flag once per bit
//! - [`MillisClock`]: a millisecond counter used for [`Sbus::wait_frame`](crate::Sbus::wait_frame)
//!
//! # Safety Invariants
//!
//! - The edge interrupt handler must call [`SbusReceiver::on_edge`](crate::SbusReceiver::on_edge)
//!   and nothing else may run the receiver concurrently
//! - The bit timer is owned by the receiver for the lifetime of the program
//! - [`EdgeInterrupt`] methods take `&self` since both the interrupt handler and
//!   the consumer touch them; implementations map to interrupt control registers
//!   or atomics

use core::convert::Infallible;

/// Edge (pin change) interrupt on the SBUS input pin.
pub trait EdgeInterrupt {
    /// Select the SBUS pin as edge source without enabling the interrupt.
    fn arm(&self);

    /// Clear any latched edge and enable the interrupt.
    fn enable(&self);

    /// Disable the interrupt.
    fn disable(&self);

    /// Whether the interrupt is currently enabled.
    fn is_enabled(&self) -> bool;

    /// Clear latched edge events so the next edge triggers afresh.
    fn clear_pending(&self);
}

/// Timer pacing the bit samples.
///
/// Once configured the timer runs continuously and raises a "tick ready" flag
/// every bit period. [`restart`](BitTimer::restart) re-aligns it with a start
/// edge.
pub trait BitTimer {
    /// Error returned when the period cannot be produced.
    type Error;

    /// Program the timer for a periodic tick every `period_us` microseconds.
    fn configure(&mut self, period_us: u32) -> Result<(), Self::Error>;

    /// Reset the counter to zero and clear any pending tick.
    fn restart(&mut self);

    /// `Ok` once the tick-ready flag is set, clearing it; `WouldBlock` before.
    fn poll_tick(&mut self) -> nb::Result<(), Infallible>;
}

/// Millisecond counter. Wraps around at `u32::MAX`.
pub trait MillisClock {
    /// Milliseconds since an arbitrary epoch.
    fn millis(&self) -> u32;
}

impl<T: MillisClock + ?Sized> MillisClock for &T {
    fn millis(&self) -> u32 {
        (**self).millis()
    }
}
