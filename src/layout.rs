//! Bit layout of the 16 proportional channels inside the SBUS payload.
//!
//! Channels are packed as contiguous 11-bit fields, LSB first, starting at bit 0
//! of payload byte 0. A field touches either two or three consecutive bytes, so
//! every channel is described by its first byte and three shift amounts:
//!
//! ```text
//! raw = ((b1 >> shift1) | (b2 << shift2) | (b3 << shift3)) & 0x7FF
//! ```
//!
//! A `shift3` of [`UNUSED_SHIFT`] moves the third byte entirely above the
//! 11-bit mask, which is how two-byte channels ignore it.

/// Mask for an 11-bit channel value.
pub const CHANNEL_MASK: u16 = 0x7FF;

/// Shift value meaning "third byte does not contribute".
pub const UNUSED_SHIFT: u8 = 11;

/// Location of one channel inside the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelLayout {
    /// Payload offset of the first byte holding the channel.
    pub offset: u8,
    /// Right shift applied to the first byte.
    pub shift1: u8,
    /// Left shift applied to the second byte.
    pub shift2: u8,
    /// Left shift applied to the third byte ([`UNUSED_SHIFT`] if unused).
    pub shift3: u8,
}

const fn entry(offset: u8, shift1: u8, shift2: u8, shift3: u8) -> ChannelLayout {
    ChannelLayout {
        offset,
        shift1,
        shift2,
        shift3,
    }
}

/// Layout of channels 1..=16 (index 0 is channel 1).
pub const CHANNEL_LAYOUT: [ChannelLayout; 16] = [
    entry(0, 0, 8, 11),
    entry(1, 3, 5, 11),
    entry(2, 6, 2, 10),
    entry(4, 1, 7, 11),
    entry(5, 4, 4, 11),
    entry(6, 7, 1, 9),
    entry(8, 2, 6, 11),
    entry(9, 5, 3, 11),
    entry(11, 0, 8, 11),
    entry(12, 3, 5, 11),
    entry(13, 6, 2, 10),
    entry(15, 1, 7, 11),
    entry(16, 4, 4, 11),
    entry(17, 7, 1, 9),
    entry(19, 2, 6, 11),
    entry(20, 5, 3, 11),
];

impl ChannelLayout {
    /// Layout for a 1-based proportional channel index (1..=16).
    pub const fn for_channel(index: u8) -> Option<ChannelLayout> {
        if index >= 1 && index <= 16 {
            Some(CHANNEL_LAYOUT[(index - 1) as usize])
        } else {
            None
        }
    }

    /// Range of payload bytes read for this channel.
    #[inline]
    pub const fn bytes(&self) -> core::ops::Range<usize> {
        let start = self.offset as usize;
        start..start + 3
    }

    /// Combine the three payload bytes starting at [`offset`](Self::offset).
    #[inline]
    pub const fn combine(&self, b1: u8, b2: u8, b3: u8) -> u16 {
        (((b1 as u16) >> self.shift1) | ((b2 as u16) << self.shift2) | ((b3 as u16) << self.shift3))
            & CHANNEL_MASK
    }
}
