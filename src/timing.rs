//! Bit timing of the SBUS line.
//!
//! SBUS runs at 100 000 baud, so one bit lasts 10 µs. The receiver samples bit
//! `n` of a word at `n` bit periods after the start edge, which puts each sample
//! roughly at the end of the bit cell.

/// Duration of one bit on the wire, in microseconds.
pub const BIT_PERIOD_US: u32 = 10;

/// Bits per word on the wire: start, 8 data, parity, 2 stop.
pub const WORD_BITS: u32 = 12;

/// Bits sampled per word after the start edge (8 data + parity).
pub const SAMPLED_BITS: u8 = 9;

/// Time needed to transmit a complete frame, in microseconds.
pub const FRAME_TIME_US: u32 = crate::frame::FRAME_WORDS as u32 * WORD_BITS * BIT_PERIOD_US;

/// Compare value for a clear-on-compare timer ticking at `clock_hz` with no
/// prescaler, so that it fires every `period_us` microseconds.
///
/// Returns `None` if the clock is too slow to produce the interval.
///
/// ```
/// use sbus_softrx::timing::{compare_ticks, BIT_PERIOD_US};
///
/// assert_eq!(compare_ticks(16_000_000, BIT_PERIOD_US), Some(159));
/// ```
pub const fn compare_ticks(clock_hz: u32, period_us: u32) -> Option<u32> {
    match (clock_hz / 1_000_000).checked_mul(period_us) {
        Some(ticks) if ticks > 0 => Some(ticks - 1),
        _ => None,
    }
}
