//! Simulated SBUS line shared by the integration tests.
//!
//! The pin and the bit timer handed to the receiver share one [`LineState`]:
//! restarting the timer rewinds to the start bit and every tick advances by one
//! bit, so the receiver samples exactly the levels of the word being "sent".

#![allow(dead_code)]

use std::convert::Infallible;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use embedded_hal::digital::{ErrorType, InputPin};
use sbus_softrx::frame::{FRAME_WORDS, PAYLOAD_LEN, START_BYTE, even_parity_bit};
use sbus_softrx::hal::{BitTimer, EdgeInterrupt, MillisClock};
use sbus_softrx::{Mode, Payload, Sbus, SbusConfig, SbusContext, SbusReceiver, WordOutcome};

/// Levels of one word on the wire: start, 8 data, parity, 2 stop.
pub type WordLevels = [bool; 12];

#[derive(Debug, Default)]
pub struct LineState {
    levels: WordLevels,
    bit: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Line(Arc<Mutex<LineState>>);

impl Line {
    fn put(&self, levels: WordLevels) {
        let mut state = self.0.lock().unwrap();
        state.levels = levels;
        state.bit = 0;
    }

    fn level(&self) -> bool {
        let state = self.0.lock().unwrap();
        state.levels.get(state.bit).copied().unwrap_or(false)
    }
}

#[derive(Debug)]
pub struct SimPin(Line);

impl ErrorType for SimPin {
    type Error = Infallible;
}

impl InputPin for SimPin {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.0.level())
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(!self.0.level())
    }
}

#[derive(Debug)]
pub struct SimTimer {
    line: Line,
    pub period_us: Option<u32>,
}

impl BitTimer for SimTimer {
    type Error = Infallible;

    fn configure(&mut self, period_us: u32) -> Result<(), Infallible> {
        self.period_us = Some(period_us);
        Ok(())
    }

    fn restart(&mut self) {
        self.line.0.lock().unwrap().bit = 0;
    }

    fn poll_tick(&mut self) -> nb::Result<(), Infallible> {
        self.line.0.lock().unwrap().bit += 1;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct SimEdge {
    enabled: AtomicBool,
    armed: AtomicBool,
    pub cleared: AtomicU32,
}

impl EdgeInterrupt for SimEdge {
    fn arm(&self) {
        self.armed.store(true, Ordering::SeqCst);
    }

    fn enable(&self) {
        self.enabled.store(true, Ordering::SeqCst);
    }

    fn disable(&self) {
        self.enabled.store(false, Ordering::SeqCst);
    }

    fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    fn clear_pending(&self) {
        self.cleared.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Debug)]
pub struct StdClock(Instant);

impl Default for StdClock {
    fn default() -> Self {
        Self(Instant::now())
    }
}

impl MillisClock for StdClock {
    fn millis(&self) -> u32 {
        self.0.elapsed().as_millis() as u32
    }
}

pub type SimReceiver<'a> = SbusReceiver<'a, SimPin, SimTimer, SimEdge>;
pub type SimSbus<'a> = Sbus<'a, SimEdge, StdClock>;

/// Drives words into a receiver through the simulated line.
#[derive(Debug, Clone)]
pub struct Wire {
    line: Line,
}

impl Wire {
    /// Send one word and run the edge handler for its start bit.
    pub fn send(&self, rx: &mut SimReceiver<'_>, byte: u8) -> WordOutcome {
        self.send_levels(rx, word_levels(byte, false))
    }

    /// Send one word with the parity bit flipped.
    pub fn send_bad_parity(&self, rx: &mut SimReceiver<'_>, byte: u8) -> WordOutcome {
        self.send_levels(rx, word_levels(byte, true))
    }

    pub fn send_levels(&self, rx: &mut SimReceiver<'_>, levels: WordLevels) -> WordOutcome {
        self.line.put(levels);
        rx.on_edge()
    }

    /// Send a complete frame and return the outcome of its last word.
    pub fn send_frame(&self, rx: &mut SimReceiver<'_>, payload: &Payload) -> WordOutcome {
        let mut outcome = WordOutcome::Ignored;
        for byte in frame_words(payload) {
            outcome = self.send(rx, byte);
        }
        outcome
    }
}

/// Wire levels of a word. Everything is inverted: a logical 1 is low.
pub fn word_levels(byte: u8, flip_parity: bool) -> WordLevels {
    let mut levels = [false; 12];
    levels[0] = true;
    for bit in 0..8 {
        levels[bit + 1] = byte & (1 << bit) == 0;
    }
    levels[9] = even_parity_bit(byte) == flip_parity;
    levels
}

/// All 25 words of the frame carrying `payload`.
pub fn frame_words(payload: &Payload) -> [u8; FRAME_WORDS as usize] {
    let mut words = [0u8; FRAME_WORDS as usize];
    words[0] = START_BYTE;
    words[1..=PAYLOAD_LEN].copy_from_slice(payload.as_bytes());
    words
}

/// Payload with every proportional channel set from `value(index)`.
pub fn payload_with(value: impl Fn(u8) -> u16) -> Payload {
    let mut payload = Payload::new();
    for index in 1..=16 {
        payload.set_channel_raw(index, value(index)).unwrap();
    }
    payload
}

pub fn setup<'a>(
    ctx: &'a SbusContext,
    edge: &'a SimEdge,
    mode: Mode,
) -> (Wire, SimReceiver<'a>, SimSbus<'a>) {
    let line = Line::default();
    let pin = SimPin(line.clone());
    let timer = SimTimer {
        line: line.clone(),
        period_us: None,
    };
    let (rx, sbus) = Sbus::begin(
        ctx,
        pin,
        timer,
        edge,
        StdClock::default(),
        SbusConfig::new(mode),
    )
    .unwrap();
    (Wire { line }, rx, sbus)
}
