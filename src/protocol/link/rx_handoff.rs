//! Interrupt-time producer: copies the frame that just arrived into the
//! receive queue and returns. Never blocks, never allocates.
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, channel::Sender};

use crate::error::HandoffError;
use crate::infra::codec::{self, WireFrame};
use crate::protocol::link::stats::{bump, LinkStats};
use crate::protocol::transport::can_frame::CanFrame;
use crate::protocol::transport::traits::can_controller::CanRxFifo;

/// Handle owned by the receive interrupt.
#[derive(Clone)]
pub struct RxHandoff<'a, const N: usize> {
    queue: Sender<'a, CriticalSectionRawMutex, CanFrame, N>,
    stats: &'a LinkStats,
}

impl<'a, const N: usize> RxHandoff<'a, N> {
    pub(crate) fn new(
        queue: Sender<'a, CriticalSectionRawMutex, CanFrame, N>,
        stats: &'a LinkStats,
    ) -> Self {
        Self { queue, stats }
    }

    /// Body of the "FIFO message pending" interrupt: read exactly one
    /// mailbox and hand it over. An empty FIFO is a spurious interrupt.
    pub fn on_rx_interrupt<F: CanRxFifo>(&self, fifo: &mut F) {
        if let Some(wire) = fifo.read_pending() {
            let _ = self.on_wire_frame(&wire);
        }
    }

    /// Hand over one mailbox read by the caller.
    pub fn on_wire_frame(&self, wire: &WireFrame) -> Result<(), HandoffError> {
        self.on_frame(wire.id, &wire.data, wire.dlc)
    }

    /// Validate and enqueue raw controller values.
    ///
    /// The frame is copied by value; `raw_bytes` may be reused by the
    /// controller as soon as this returns. Drops are counted and logged but
    /// there is nobody to report them to in interrupt context.
    pub fn on_frame(
        &self,
        raw_identifier: u32,
        raw_bytes: &[u8],
        dlc: u8,
    ) -> Result<(), HandoffError> {
        let frame = match codec::decode(raw_identifier, raw_bytes, dlc) {
            Ok(frame) => frame,
            Err(_) => {
                bump(&self.stats.rx_dropped);
                #[cfg(feature = "defmt")]
                defmt::warn!("can rx: dropping frame with dlc {}", dlc);
                return Err(HandoffError::InvalidLength { len: dlc as usize });
            }
        };

        // Waking the classifier is done by the channel; the executor
        // reschedules it on interrupt exit.
        if self.queue.try_send(frame).is_err() {
            bump(&self.stats.rx_dropped);
            #[cfg(feature = "defmt")]
            defmt::warn!("can rx: queue full, frame {:#X} dropped", raw_identifier);
            return Err(HandoffError::QueueFull);
        }

        Ok(())
    }
}
