//! Receive classifier: the single consumer of the receive queue.
//!
//! Every dequeued frame ends up in exactly one of four places:
//!
//! | Condition            | Outcome                                   |
//! |----------------------|-------------------------------------------|
//! | `len > 8`            | discarded, `oversized_frames` + 1         |
//! | error flag           | discarded, `error_frames` + 1             |
//! | remote request flag  | discarded, `remote_frames` + 1            |
//! | otherwise            | address bits + payload handed to router   |
//!
//! Handed-over frames count as `delivered_frames` when the router accepts
//! them and as `refused_frames` when it does not.
//!
//! The checks run in that order: flags are inspected before the address
//! bits are interpreted. Frames reach the router in queue order.
use core::fmt::Write;

use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, channel::Receiver};
use futures_util::{
    future::{select, Either},
    pin_mut, Future,
};

use crate::core::{CAN_EFF_MASK, CAN_MAX_DLC};
use crate::error::RxRejection;
use crate::protocol::link::stats::{bump, LinkStats};
use crate::protocol::transport::can_frame::CanFrame;
use crate::protocol::transport::traits::csp_stack::CanInbound;

/// Decide what happens to `frame`. Returns the address to deliver to: the
/// low 29 bits of the identifier, whatever the frame format.
pub fn classify(frame: &CanFrame) -> Result<u32, RxRejection> {
    if frame.len > CAN_MAX_DLC {
        Err(RxRejection::OversizedFrame { len: frame.len })
    } else if frame.id.is_error() {
        Err(RxRejection::ErrorFrame)
    } else if frame.id.is_remote() {
        Err(RxRejection::RemoteFrame)
    } else {
        Ok(frame.id.0 & CAN_EFF_MASK)
    }
}

/// Consumer runner. Spawn [`RxClassifier::run`] (or `run_until`) as its own task.
pub struct RxClassifier<'a, R, W, const N: usize>
where
    R: CanInbound,
    W: Write,
{
    queue: Receiver<'a, CriticalSectionRawMutex, CanFrame, N>,
    inbound: R,
    diag: W,
    stats: &'a LinkStats,
}

impl<'a, R, W, const N: usize> RxClassifier<'a, R, W, N>
where
    R: CanInbound,
    W: Write,
{
    pub(crate) fn new(
        queue: Receiver<'a, CriticalSectionRawMutex, CanFrame, N>,
        inbound: R,
        diag: W,
        stats: &'a LinkStats,
    ) -> Self {
        Self {
            queue,
            inbound,
            diag,
            stats,
        }
    }

    /// Classify one frame and act on the outcome.
    pub fn process(&mut self, frame: &CanFrame) -> Result<u32, RxRejection> {
        let outcome = classify(frame);
        match outcome {
            Ok(address) => match self.inbound.can_rx(address, frame.payload()) {
                Ok(()) => bump(&self.stats.delivered_frames),
                // The router reports its own drops (no buffer, bad header).
                Err(_err) => {
                    bump(&self.stats.refused_frames);
                    #[cfg(feature = "defmt")]
                    defmt::debug!("can rx: router refused frame from {:#X}", address);
                }
            },
            Err(RxRejection::OversizedFrame { len }) => {
                bump(&self.stats.oversized_frames);
                let _ = writeln!(
                    self.diag,
                    "can rx: frame longer than {} bytes ({})",
                    CAN_MAX_DLC, len
                );
                #[cfg(feature = "defmt")]
                defmt::error!("can rx: oversized frame ({} bytes)", len);
            }
            Err(RxRejection::ErrorFrame) => {
                bump(&self.stats.error_frames);
                let _ = writeln!(self.diag, "can rx: error frame received");
                #[cfg(feature = "defmt")]
                defmt::warn!("can rx: error frame {:#X}", frame.id.0);
            }
            Err(RxRejection::RemoteFrame) => {
                bump(&self.stats.remote_frames);
                let _ = writeln!(self.diag, "can rx: remote transmission request received");
                #[cfg(feature = "defmt")]
                defmt::warn!("can rx: remote request {:#X}", frame.id.0);
            }
        }
        outcome
    }

    /// Wait for the next frame and process it.
    pub async fn step(&mut self) -> Result<u32, RxRejection> {
        let frame = self.queue.receive().await;
        self.process(&frame)
    }

    /// Consume the queue forever.
    pub async fn run(&mut self) -> ! {
        loop {
            let _ = self.step().await;
        }
    }

    /// Consume the queue until `stop` resolves. A frame already dequeued is
    /// always processed before `stop` is looked at again.
    pub async fn run_until<F: Future>(&mut self, stop: F) {
        pin_mut!(stop);
        loop {
            let frame = {
                let next = self.queue.receive();
                pin_mut!(next);
                match select(next, stop.as_mut()).await {
                    Either::Left((frame, _)) => frame,
                    Either::Right(_) => return,
                }
            };
            let _ = self.process(&frame);
        }
    }

    /// Text sink receiving the discard diagnostics.
    pub fn diagnostics(&mut self) -> &mut W {
        &mut self.diag
    }
}
