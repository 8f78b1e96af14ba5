//! Interrupt-context bit and frame receiver.
//!
//! [`SbusReceiver::on_edge`] is meant to be called from the edge interrupt of the
//! SBUS pin. Each call receives exactly one word:
//!
//! 1. A high level means the edge was the (inverted) start bit; anything else is
//!    the falling edge between words and is ignored. So is an edge whose level
//!    cannot be read, since no word has started yet.
//! 2. The bit timer is restarted so its tick flag fires once per bit period,
//!    and the handler busy-waits for 9 ticks, sampling 8 data bits and parity.
//! 3. The byte is checked against the even parity bit and dispatched on the
//!    current word index: word 0 must be the start byte, words 1..=23 go into a
//!    staging payload, and word 24 publishes the staging payload to the shared
//!    [`SbusContext`].
//!
//! Any parity or framing error, or a pin read failure while sampling, resets
//! the word index to 0 and drops the staged frame, so the receiver
//! waits for the next start byte. The handler never yields while sampling: the
//! sample instants are defined relative to the start edge.

use embedded_hal::digital::InputPin;

use crate::config::Mode;
use crate::context::SbusContext;
use crate::frame::{FRAME_WORDS, Payload, START_BYTE};
use crate::hal::{BitTimer, EdgeInterrupt};
use crate::timing::SAMPLED_BITS;

const LAST_WORD: u8 = FRAME_WORDS - 1;

/// What a single call to [`SbusReceiver::on_edge`] did.
///
/// Only interesting to interrupt glue and diagnostics; the consumer API never
/// sees reception errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WordOutcome {
    /// The line was low or unreadable: not a start bit.
    Ignored,
    /// A start byte was received; the frame begins.
    FrameStarted,
    /// A payload byte was staged for frame word `word` (1..=23).
    Stored {
        /// Word index the byte belonged to
        word: u8,
    },
    /// The end word arrived and the staged payload was published.
    FrameCompleted,
    /// Parity did not match while receiving word `word`. The frame is dropped.
    ParityError {
        /// Word index that failed
        word: u8,
    },
    /// Word 0 was not the start byte.
    FramingError {
        /// The byte that was received instead
        byte: u8,
    },
    /// The pin could not be read while receiving word `word`. The frame is dropped.
    LineFault {
        /// Word index that failed
        word: u8,
    },
}

/// Software SBUS receiver run from the edge interrupt.
///
/// Owns the sampling pin, the bit timer and the reception state; shares the
/// completed payload with [`Sbus`](crate::Sbus) through a borrowed
/// [`SbusContext`]. Create it with [`Sbus::begin`](crate::Sbus::begin).
#[derive(Debug)]
pub struct SbusReceiver<'a, P, T, E> {
    ctx: &'a SbusContext,
    pin: P,
    timer: T,
    edge: &'a E,
    mode: Mode,
    word: u8,
    staging: Payload,
}

enum SampleError {
    Pin,
}

impl<'a, P, T, E> SbusReceiver<'a, P, T, E>
where
    P: InputPin,
    T: BitTimer,
    E: EdgeInterrupt,
{
    pub(crate) fn new(ctx: &'a SbusContext, pin: P, timer: T, edge: &'a E, mode: Mode) -> Self {
        Self {
            ctx,
            pin,
            timer,
            edge,
            mode,
            word: 0,
            staging: Payload::new(),
        }
    }

    /// Handle an edge on the SBUS pin. Call from the edge interrupt only.
    pub fn on_edge(&mut self) -> WordOutcome {
        let outcome = match self.pin.is_high() {
            Ok(true) => self.receive_word(),
            Ok(false) => WordOutcome::Ignored,
            Err(_) => {
                debug!("sbus: pin unreadable on edge before word {}", self.word);
                WordOutcome::Ignored
            }
        };

        // Edges seen while sampling belong to this word.
        self.edge.clear_pending();
        outcome
    }

    /// Index of the word expected next (0..=24).
    pub fn word_index(&self) -> u8 {
        self.word
    }

    /// Reception mode this receiver was started with.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Give back the pin and the timer.
    pub fn release(self) -> (P, T) {
        (self.pin, self.timer)
    }

    fn receive_word(&mut self) -> WordOutcome {
        self.timer.restart();

        // Data is active-low: a high sample is a logical 0.
        let mut inverted = 0u8;
        let mut even = true;
        for bit in 0..SAMPLED_BITS - 1 {
            match self.sample() {
                Ok(true) => inverted |= 1 << bit,
                Ok(false) => even = !even,
                Err(SampleError::Pin) => return self.line_fault(),
            }
        }

        // The parity bit is inverted too, so the line is high exactly when the
        // data holds an even number of ones.
        match self.sample() {
            Ok(level) if level == even => self.dispatch(!inverted),
            Ok(_) => {
                trace!("sbus: parity error in word {}", self.word);
                let word = self.word;
                self.word = 0;
                WordOutcome::ParityError { word }
            }
            Err(SampleError::Pin) => self.line_fault(),
        }
    }

    fn sample(&mut self) -> Result<bool, SampleError> {
        let Ok(()) = nb::block!(self.timer.poll_tick());
        self.pin.is_high().map_err(|_| SampleError::Pin)
    }

    fn dispatch(&mut self, byte: u8) -> WordOutcome {
        match self.word {
            0 if byte != START_BYTE => {
                trace!("sbus: expected start byte, got {}", byte);
                WordOutcome::FramingError { byte }
            }
            0 => {
                self.word = 1;
                WordOutcome::FrameStarted
            }
            LAST_WORD => {
                self.ctx.publish(&self.staging);
                if self.mode == Mode::OnDemand {
                    self.edge.disable();
                }
                self.word = 0;
                WordOutcome::FrameCompleted
            }
            word => {
                self.staging.store_word(word, byte);
                self.word += 1;
                WordOutcome::Stored { word }
            }
        }
    }

    fn line_fault(&mut self) -> WordOutcome {
        debug!("sbus: pin read failed in word {}", self.word);
        let word = self.word;
        self.word = 0;
        WordOutcome::LineFault { word }
    }
}
