//! SBUS frame types and constants.
//!
//! # SBUS frame format
//!
//! A frame is 25 words. Each word is 1 start bit, 8 data bits (LSB first),
//! 1 even parity bit and 2 stop bits, all inverted on the wire.
//!
//! - Word 0: start byte `0x0F`
//! - Words 1-22: 16 channels × 11 bits, see [`crate::layout`]
//! - Word 23: flags (bit 0 channel 17, bit 1 channel 18, bit 2 signal loss,
//!   bit 3 failsafe)
//! - Word 24: end byte (not interpreted)
//!
//! Words 1..=23 make up the 23-byte [`Payload`] kept by the receiver.

use crate::layout::{CHANNEL_MASK, ChannelLayout};
use crate::{Error, Result};

/// Value of the first word of every frame.
pub const START_BYTE: u8 = 0x0F;

/// Number of words in a frame.
pub const FRAME_WORDS: u8 = 25;

/// Number of payload bytes (channel data plus flags).
pub const PAYLOAD_LEN: usize = 23;

/// Offset of the flags byte inside the payload.
pub const FLAGS_OFFSET: usize = 22;

/// Number of 11-bit proportional channels.
pub const PROPORTIONAL_CHANNELS: u8 = 16;

/// Total number of channels, including the two digital ones.
pub const CHANNEL_COUNT: u8 = 18;

/// Lowest raw value a transmitter sends.
pub const CHANNEL_MIN: u16 = 173;

/// Highest raw value a transmitter sends.
pub const CHANNEL_MAX: u16 = 1812;

/// Returns the even parity bit for a data byte.
///
/// The bit is set when the byte holds an odd number of ones, so that data plus
/// parity always carry an even count. On the wire it is sent inverted like
/// every other bit.
#[inline]
pub const fn even_parity_bit(byte: u8) -> bool {
    byte.count_ones() % 2 == 1
}

/// Rescale a raw channel value to the conventional 988..2012 range.
///
/// Computes `raw * 5 / 8 + 880` with integer truncation.
#[inline]
pub const fn scale_raw(raw: u16) -> u16 {
    (raw as u32 * 5 / 8 + 880) as u16
}

/// Raw value reported for a digital channel.
#[inline]
pub const fn digital_raw(on: bool) -> u16 {
    if on { CHANNEL_MAX } else { CHANNEL_MIN }
}

/// SBUS flags byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SbusFlags(u8);

impl SbusFlags {
    /// Bit 0: digital channel 17.
    pub const CHANNEL_17: u8 = 0x01;
    /// Bit 1: digital channel 18.
    pub const CHANNEL_18: u8 = 0x02;
    /// Bit 2: receiver lost one or more frames from the transmitter.
    pub const SIGNAL_LOSS: u8 = 0x04;
    /// Bit 3: receiver is in failsafe.
    pub const FAILSAFE: u8 = 0x08;
    /// All defined bits. The upper nibble is reserved and kept clear.
    pub const MASK: u8 = 0x0F;

    /// Create flags from a raw byte, dropping reserved bits.
    pub const fn from_byte(value: u8) -> Self {
        Self(value & Self::MASK)
    }

    /// Get raw byte value.
    pub const fn to_byte(self) -> u8 {
        self.0
    }

    /// Check if digital channel 17 is on.
    pub const fn channel_17(self) -> bool {
        self.0 & Self::CHANNEL_17 != 0
    }

    /// Check if digital channel 18 is on.
    pub const fn channel_18(self) -> bool {
        self.0 & Self::CHANNEL_18 != 0
    }

    /// Check if the signal loss bit is set.
    pub const fn signal_loss(self) -> bool {
        self.0 & Self::SIGNAL_LOSS != 0
    }

    /// Check if the failsafe bit is set.
    pub const fn failsafe(self) -> bool {
        self.0 & Self::FAILSAFE != 0
    }

    const fn with(self, bit: u8, on: bool) -> Self {
        if on {
            Self(self.0 | bit)
        } else {
            Self(self.0 & !bit)
        }
    }

    /// Set digital channel 17.
    pub const fn with_channel_17(self, on: bool) -> Self {
        self.with(Self::CHANNEL_17, on)
    }

    /// Set digital channel 18.
    pub const fn with_channel_18(self, on: bool) -> Self {
        self.with(Self::CHANNEL_18, on)
    }

    /// Set the signal loss bit.
    pub const fn with_signal_loss(self, on: bool) -> Self {
        self.with(Self::SIGNAL_LOSS, on)
    }

    /// Set the failsafe bit.
    pub const fn with_failsafe(self, on: bool) -> Self {
        self.with(Self::FAILSAFE, on)
    }
}

/// The 23 payload bytes of one frame: packed channels followed by flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Payload([u8; PAYLOAD_LEN]);

impl Payload {
    /// An all-zero payload, as seen before the first frame arrives.
    pub const fn new() -> Self {
        Self([0; PAYLOAD_LEN])
    }

    /// Wrap raw payload bytes. The flags byte is kept as given.
    pub const fn from_bytes(bytes: [u8; PAYLOAD_LEN]) -> Self {
        Self(bytes)
    }

    /// Raw payload bytes.
    pub const fn as_bytes(&self) -> &[u8; PAYLOAD_LEN] {
        &self.0
    }

    /// Store the byte carried by frame word `word` (1..=23).
    ///
    /// The flags word has its reserved bits cleared. Other word indices are
    /// ignored.
    pub(crate) fn store_word(&mut self, word: u8, byte: u8) {
        let offset = word.wrapping_sub(1) as usize;
        if offset == FLAGS_OFFSET {
            self.0[offset] = byte & SbusFlags::MASK;
        } else if offset < FLAGS_OFFSET {
            self.0[offset] = byte;
        }
    }

    /// Flags byte.
    pub const fn flags(&self) -> SbusFlags {
        SbusFlags::from_byte(self.0[FLAGS_OFFSET])
    }

    /// Replace the flags byte.
    pub fn set_flags(&mut self, flags: SbusFlags) {
        self.0[FLAGS_OFFSET] = flags.to_byte();
    }

    /// Raw value of channel `index` (1..=18), or 0 for any other index.
    pub fn channel_raw(&self, index: u8) -> u16 {
        match index {
            1..=16 => match ChannelLayout::for_channel(index) {
                Some(layout) => {
                    let [b1, b2, b3] = self.layout_bytes(&layout);
                    layout.combine(b1, b2, b3)
                }
                None => 0,
            },
            17 => digital_raw(self.flags().channel_17()),
            18 => digital_raw(self.flags().channel_18()),
            _ => 0,
        }
    }

    pub(crate) fn layout_bytes(&self, layout: &ChannelLayout) -> [u8; 3] {
        let start = layout.offset as usize;
        [self.0[start], self.0[start + 1], self.0[start + 2]]
    }

    /// Pack an 11-bit value into proportional channel `index` (1..=16).
    ///
    /// Bits above the 11th are dropped. Neighbouring channels are left intact.
    pub fn set_channel_raw(&mut self, index: u8, value: u16) -> Result<()> {
        if !(1..=PROPORTIONAL_CHANNELS).contains(&index) {
            return Err(Error::InvalidChannel(index));
        }

        let value = value & CHANNEL_MASK;
        let first_bit = (index as usize - 1) * 11;
        for bit in 0..11 {
            let pos = first_bit + bit;
            let mask = 1u8 << (pos % 8);
            if value & (1 << bit) != 0 {
                self.0[pos / 8] |= mask;
            } else {
                self.0[pos / 8] &= !mask;
            }
        }
        Ok(())
    }

    /// Decode all 18 channels and the flags.
    pub fn decode(&self) -> ChannelFrame {
        let mut channels = [0u16; CHANNEL_COUNT as usize];
        for (i, slot) in channels.iter_mut().enumerate() {
            *slot = self.channel_raw(i as u8 + 1);
        }
        ChannelFrame {
            channels,
            flags: self.flags(),
        }
    }
}

/// All channels of one frame, decoded from a single consistent payload copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelFrame {
    /// Raw values of channels 1..=18 (index 0 is channel 1).
    pub channels: [u16; CHANNEL_COUNT as usize],
    /// Flags byte of the same frame.
    pub flags: SbusFlags,
}

impl ChannelFrame {
    /// Raw value of channel `index` (1..=18).
    pub fn raw(&self, index: u8) -> Option<u16> {
        index
            .checked_sub(1)
            .and_then(|i| self.channels.get(i as usize))
            .copied()
    }

    /// Rescaled value of channel `index` (1..=18), see [`scale_raw`].
    pub fn scaled(&self, index: u8) -> Option<u16> {
        self.raw(index).map(scale_raw)
    }
}
