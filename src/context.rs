//! State shared between the interrupt handler and the consumer.

use core::cell::{Cell, RefCell};
use core::fmt;

use critical_section::Mutex;

use crate::frame::{Payload, SbusFlags};
use crate::layout::ChannelLayout;

/// Last complete frame plus a frame counter.
///
/// Written only by [`SbusReceiver`](crate::SbusReceiver) when a frame completes,
/// read by [`Sbus`](crate::Sbus). Every access goes through a critical section,
/// so a reader never sees a payload that is half from one frame and half from
/// the next. Usually placed in a `static`:
///
/// ```
/// use sbus_softrx::SbusContext;
///
/// static SBUS: SbusContext = SbusContext::new();
/// assert_eq!(SBUS.frame_count(), 0);
/// ```
pub struct SbusContext {
    payload: Mutex<RefCell<Payload>>,
    frames: Mutex<Cell<u32>>,
}

impl SbusContext {
    /// Empty context: all-zero payload, no frames received.
    pub const fn new() -> Self {
        Self {
            payload: Mutex::new(RefCell::new(Payload::new())),
            frames: Mutex::new(Cell::new(0)),
        }
    }

    /// Replace the payload with a completed frame.
    pub(crate) fn publish(&self, payload: &Payload) {
        critical_section::with(|cs| {
            *self.payload.borrow_ref_mut(cs) = *payload;
            let frames = self.frames.borrow(cs);
            frames.set(frames.get().wrapping_add(1));
        });
    }

    /// Copy of the whole payload of the last complete frame.
    pub fn payload(&self) -> Payload {
        critical_section::with(|cs| *self.payload.borrow_ref(cs))
    }

    /// The three bytes a channel is assembled from, read in one critical section.
    pub(crate) fn channel_bytes(&self, layout: &ChannelLayout) -> [u8; 3] {
        critical_section::with(|cs| self.payload.borrow_ref(cs).layout_bytes(layout))
    }

    /// Flags byte of the last complete frame.
    pub fn flags(&self) -> SbusFlags {
        critical_section::with(|cs| self.payload.borrow_ref(cs).flags())
    }

    /// Number of frames published so far. Wraps around.
    pub fn frame_count(&self) -> u32 {
        critical_section::with(|cs| self.frames.borrow(cs).get())
    }
}

impl fmt::Debug for SbusContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SbusContext")
            .field("frames", &self.frame_count())
            .finish_non_exhaustive()
    }
}

impl Default for SbusContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_replaces_payload() {
        let ctx = SbusContext::new();
        assert_eq!(ctx.payload(), Payload::new());

        let mut payload = Payload::new();
        payload.set_channel_raw(3, 1234).unwrap();
        payload.set_flags(SbusFlags::default().with_failsafe(true));
        ctx.publish(&payload);

        assert_eq!(ctx.payload(), payload);
        assert!(ctx.flags().failsafe());
        assert_eq!(ctx.frame_count(), 1);

        let layout = ChannelLayout::for_channel(3).unwrap();
        let [b1, b2, b3] = ctx.channel_bytes(&layout);
        assert_eq!(layout.combine(b1, b2, b3), 1234);
    }
}
