//! Consumer-side channel access.

use embedded_hal::digital::InputPin;

use crate::config::{Mode, SbusConfig};
use crate::context::SbusContext;
use crate::frame::{ChannelFrame, SbusFlags, digital_raw, scale_raw};
use crate::hal::{BitTimer, EdgeInterrupt, MillisClock};
use crate::layout::ChannelLayout;
use crate::receiver::SbusReceiver;
use crate::{Error, Result};

/// Reads channels received by a [`SbusReceiver`].
///
/// Runs in normal (non-interrupt) context. All reads are short critical
/// sections over the shared [`SbusContext`]; only
/// [`wait_frame`](Sbus::wait_frame) blocks.
#[derive(Debug)]
pub struct Sbus<'a, E, C> {
    ctx: &'a SbusContext,
    edge: &'a E,
    clock: C,
    mode: Mode,
}

impl<'a, E, C> Sbus<'a, E, C>
where
    E: EdgeInterrupt,
    C: MillisClock,
{
    /// Set up reception on `pin`.
    ///
    /// Programs `timer` for one bit period, selects `pin` as edge source on
    /// `edge` and, in [`Mode::Continuous`], enables the interrupt right away.
    /// Returns the receiver to be moved into the edge interrupt handler and the
    /// consumer handle.
    ///
    /// The interrupt may fire before the receiver has been handed over to the
    /// handler; handlers should just clear the edge in that case.
    ///
    /// # Errors
    ///
    /// [`Error::TimerConfig`] if the timer rejects the bit period.
    pub fn begin<P, T>(
        ctx: &'a SbusContext,
        pin: P,
        mut timer: T,
        edge: &'a E,
        clock: C,
        config: SbusConfig,
    ) -> Result<(SbusReceiver<'a, P, T, E>, Self)>
    where
        P: InputPin,
        T: BitTimer,
    {
        timer.configure(config.bit_period_us).map_err(|_| {
            warn!("sbus: timer rejected {} us bit period", config.bit_period_us);
            Error::TimerConfig
        })?;

        edge.disable();
        edge.arm();
        let receiver = SbusReceiver::new(ctx, pin, timer, edge, config.mode);

        if config.mode == Mode::Continuous {
            edge.enable();
        }

        Ok((
            receiver,
            Self {
                ctx,
                edge,
                clock,
                mode: config.mode,
            },
        ))
    }

    /// Wait for the next complete frame.
    ///
    /// In [`Mode::OnDemand`] this enables the edge interrupt and polls until the
    /// receiver disables it again after a full frame, or until `timeout_ms`
    /// milliseconds have passed. The interrupt stays enabled after a timeout, so
    /// the frame in progress still completes. In [`Mode::Continuous`] it returns
    /// immediately.
    ///
    /// # Errors
    ///
    /// [`Error::Timeout`] if no frame completed in time.
    pub fn wait_frame(&self, timeout_ms: u32) -> Result<()> {
        if self.mode == Mode::Continuous {
            return Ok(());
        }

        self.edge.enable();
        let start = self.clock.millis();
        while self.edge.is_enabled() {
            if self.clock.millis().wrapping_sub(start) >= timeout_ms {
                debug!("sbus: no frame within {} ms", timeout_ms);
                return Err(Error::Timeout {
                    waited_ms: timeout_ms,
                });
            }
        }
        Ok(())
    }

    /// Raw 11-bit value of channel `index` (1..=18).
    ///
    /// Channels 17 and 18 are digital and read as 173 (off) or 1812 (on).
    /// Returns 0 for any other index.
    pub fn channel_raw(&self, index: u8) -> u16 {
        self.try_channel_raw(index).unwrap_or(0)
    }

    /// Like [`channel_raw`](Self::channel_raw), but reports bad indices.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidChannel`] for an index outside 1..=18.
    pub fn try_channel_raw(&self, index: u8) -> Result<u16> {
        match index {
            1..=16 => {
                let layout = ChannelLayout::for_channel(index).ok_or(Error::InvalidChannel(index))?;
                let [b1, b2, b3] = self.ctx.channel_bytes(&layout);
                Ok(layout.combine(b1, b2, b3))
            }
            17 => Ok(digital_raw(self.flags().channel_17())),
            18 => Ok(digital_raw(self.flags().channel_18())),
            _ => Err(Error::InvalidChannel(index)),
        }
    }

    /// Channel `index` rescaled to roughly 988..2012, see [`scale_raw`].
    pub fn channel(&self, index: u8) -> u16 {
        scale_raw(self.channel_raw(index))
    }

    /// Whether the receiver reports lost frames.
    pub fn signal_loss_active(&self) -> bool {
        self.flags().signal_loss()
    }

    /// Whether the receiver is in failsafe.
    pub fn failsafe_active(&self) -> bool {
        self.flags().failsafe()
    }

    /// Flags byte of the last complete frame.
    pub fn flags(&self) -> SbusFlags {
        self.ctx.flags()
    }

    /// All channels of the last complete frame, from one consistent copy.
    pub fn snapshot(&self) -> ChannelFrame {
        self.ctx.payload().decode()
    }

    /// Number of frames received so far. Wraps around.
    pub fn frame_count(&self) -> u32 {
        self.ctx.frame_count()
    }

    /// Reception mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }
}
