#![forbid(unsafe_code)]
#![cfg_attr(not(any(feature = "std", test)), no_std)]

//! # sbus-softrx
//!
//! A `no_std` receiver for the SBUS radio-control protocol that decodes frames
//! straight from a GPIO pin, without a UART peripheral.
//!
//! SBUS is an inverted serial line at 100 000 baud with 8E2 framing. A frame is
//! 25 words: a start byte, 22 bytes carrying 16 channels of 11 bits, a flags
//! byte (two digital channels, signal loss, failsafe) and an end byte.
//!
//! ## How reception works
//!
//! The edge interrupt of the SBUS pin calls [`SbusReceiver::on_edge`]. On a start
//! edge it restarts a bit timer and busy-waits for one tick per bit, sampling
//! 8 data bits and the parity bit, then validates and stores the word. Words of
//! a frame are staged privately and published to the shared [`SbusContext`] when
//! the frame completes. Parity and framing errors silently restart the search
//! for the next start byte.
//!
//! The consumer side, [`Sbus`], reads channels out of the last complete frame
//! inside short critical sections, so a read never mixes two frames.
//!
//! ## Quick Start
//!
//! ```no_run
//! use sbus_softrx::hal::{BitTimer, EdgeInterrupt, MillisClock};
//! use sbus_softrx::{Mode, Result, Sbus, SbusConfig, SbusContext};
//! # use embedded_hal::digital::InputPin;
//!
//! static CONTEXT: SbusContext = SbusContext::new();
//!
//! fn run<P, T, E, C>(pin: P, timer: T, edge: &'static E, clock: C) -> Result<()>
//! where
//!     P: InputPin,
//!     T: BitTimer,
//!     E: EdgeInterrupt,
//!     C: MillisClock,
//! {
//!     let (mut receiver, sbus) =
//!         Sbus::begin(&CONTEXT, pin, timer, edge, clock, SbusConfig::new(Mode::OnDemand))?;
//!
//!     // In firmware the receiver lives in the edge interrupt handler and
//!     // `receiver.on_edge()` is called from there.
//!     # let _ = &mut receiver;
//!     loop {
//!         sbus.wait_frame(20)?;
//!         let throttle = sbus.channel(3);
//!         if sbus.failsafe_active() {
//!             break;
//!         }
//!         # let _ = throttle;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`frame`] | Frame constants, [`Payload`], [`SbusFlags`], [`ChannelFrame`] |
//! | [`layout`] | Bit layout of the 16 proportional channels |
//! | [`hal`] | Capability traits the platform implements |
//! | [`timing`] | Bit period constants and timer helpers |
//! | [`error`] | Error types and [`Result`] alias |
//!
//! ## Crate features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `std`   | Implements `std::error::Error` for [`Error`] |
//! | `serde` | Derives `Serialize`/`Deserialize` for config and frame types |
//! | `defmt` | Logs through `defmt` and derives `defmt::Format` |
//! | `log`   | Logs through `log` |

#[macro_use]
mod fmt;

mod config;
mod context;
mod decoder;
mod receiver;

pub mod error;
pub mod frame;
pub mod hal;
pub mod layout;
pub mod timing;

pub use config::{Mode, SbusConfig};
pub use context::SbusContext;
pub use decoder::Sbus;
pub use error::{Error, Result};
pub use frame::{ChannelFrame, Payload, SbusFlags};
pub use receiver::{SbusReceiver, WordOutcome};

pub use critical_section;
