//! Transmit gate: single-slot admission control in front of the controller.
//!
//! A one-permit token is taken before a frame is handed to the controller
//! and given back by the transmit-complete interrupt. At most one frame is
//! therefore in flight; every other sender waits on the token, without
//! timeout, in arrival order of the executor.
//!
//! # Token life cycle
//!
//! | Path                                         | Token after `send` returns     |
//! |----------------------------------------------|--------------------------------|
//! | `len > 8`                                    | never taken                    |
//! | controller accepted the frame                | held until completion IRQ      |
//! | controller refused it (bus error or busy)    | released by `send` itself      |
//! | error register already set before submission | held ([`GateState::HeldAfterBusError`]) |
//!
//! In the last row the token stays held until a completion interrupt
//! arrives. If the
//! controller never raises one, every later `send` blocks forever. The state
//! is observable through [`TxGate::state`] so that a supervisor can detect
//! it and call [`TxGate::on_tx_complete`] after recovering the controller.
//! The same permanent blocking happens if an accepted frame never completes.
use core::cell::RefCell;
use core::sync::atomic::{AtomicU8, Ordering};

use embassy_sync::{
    blocking_mutex::{raw::CriticalSectionRawMutex, Mutex},
    channel::Channel,
};

use crate::core::CAN_MAX_DLC;
use crate::error::TxError;
use crate::infra::codec;
use crate::protocol::link::stats::{bump, TxStats};
use crate::protocol::transport::can_frame::CanFrame;
use crate::protocol::transport::can_id::CanId;
use crate::protocol::transport::traits::can_controller::CanController;
use crate::protocol::transport::traits::frame_transmitter::FrameTransmitter;

/// Observable state of the admission token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GateState {
    /// Token available (or about to be handed to a waiting sender).
    Idle,
    /// A frame was accepted by the controller; waiting for completion.
    InFlight,
    /// The error register was set before submission; token still held.
    HeldAfterBusError,
}

impl GateState {
    const fn to_raw(self) -> u8 {
        match self {
            GateState::Idle => 0,
            GateState::InFlight => 1,
            GateState::HeldAfterBusError => 2,
        }
    }

    const fn from_raw(raw: u8) -> Self {
        match raw {
            1 => GateState::InFlight,
            2 => GateState::HeldAfterBusError,
            _ => GateState::Idle,
        }
    }
}

enum Submission {
    Accepted,
    PendingError(u32),
    Rejected(TxError),
}

/// Serializes all outbound traffic of one controller.
pub struct TxGate<H: CanController> {
    hw: Mutex<CriticalSectionRawMutex, RefCell<H>>,
    token: Channel<CriticalSectionRawMutex, (), 1>,
    state: AtomicU8,
    stats: TxStats,
}

impl<H: CanController> TxGate<H> {
    /// Wrap a controller. The token starts available.
    pub fn new(hw: H) -> Self {
        let gate = Self {
            hw: Mutex::new(RefCell::new(hw)),
            token: Channel::new(),
            state: AtomicU8::new(GateState::Idle.to_raw()),
            stats: TxStats::new(),
        };
        let _ = gate.token.try_send(());
        gate
    }

    pub fn stats(&self) -> &TxStats {
        &self.stats
    }

    pub fn state(&self) -> GateState {
        GateState::from_raw(self.state.load(Ordering::Acquire))
    }

    /// Send one extended data frame.
    ///
    /// Blocks until the token is available, submits, and returns without
    /// waiting for the frame to leave the mailbox.
    pub async fn send(&self, id: u32, data: &[u8]) -> Result<(), TxError> {
        if data.len() > CAN_MAX_DLC {
            return Err(TxError::InvalidLength { len: data.len() });
        }
        // Copy before waiting: the caller's buffer is not needed past this point.
        let frame = CanFrame::new(CanId::extended(id), data)
            .map_err(|_| TxError::InvalidLength { len: data.len() })?;
        let wire =
            codec::encode(&frame).map_err(|_| TxError::InvalidLength { len: frame.len })?;

        self.token.receive().await;
        self.set_state(GateState::InFlight);

        let submission = self.hw.lock(|cell| {
            let mut hw = cell.borrow_mut();

            let code = hw.error_code();
            if code != 0 {
                hw.reset_error();
                return Submission::PendingError(code);
            }

            match hw.transmit(&wire) {
                Ok(()) => Submission::Accepted,
                Err(_) => {
                    let code = hw.error_code();
                    if code != 0 {
                        hw.reset_error();
                        Submission::Rejected(TxError::BusError { code })
                    } else {
                        Submission::Rejected(TxError::SubmissionFailed)
                    }
                }
            }
        });

        match submission {
            Submission::Accepted => {
                bump(&self.stats.tx_frames);
                Ok(())
            }
            Submission::PendingError(code) => {
                bump(&self.stats.tx_bus_errors);
                self.set_state(GateState::HeldAfterBusError);
                #[cfg(feature = "defmt")]
                defmt::warn!("can tx: bus error {:#X} before submission, token held", code);
                Err(TxError::BusError { code })
            }
            Submission::Rejected(err) => {
                match err {
                    TxError::BusError { .. } => bump(&self.stats.tx_bus_errors),
                    _ => bump(&self.stats.tx_rejected),
                }
                #[cfg(feature = "defmt")]
                defmt::debug!("can tx: submission refused: {:?}", err);
                // No completion interrupt will follow a refused frame.
                self.release();
                Err(err)
            }
        }
    }

    /// Body of the transmit-complete interrupt (success or error).
    /// Unconditionally makes the token available again.
    pub fn on_tx_complete(&self) {
        self.release();
    }

    /// Run `f` with exclusive access to the controller.
    ///
    /// Does not take the token: use it for control operations (start, stop,
    /// error recovery), not to transmit.
    pub fn with_controller<R>(&self, f: impl FnOnce(&mut H) -> R) -> R {
        self.hw.lock(|cell| f(&mut cell.borrow_mut()))
    }

    fn release(&self) {
        self.set_state(GateState::Idle);
        // Giving an already available token is a no-op.
        let _ = self.token.try_send(());
    }

    fn set_state(&self, state: GateState) {
        self.state.store(state.to_raw(), Ordering::Release);
    }
}

impl<H: CanController> FrameTransmitter for TxGate<H> {
    async fn transmit_frame<'a>(&'a self, id: u32, data: &'a [u8]) -> Result<(), TxError> {
        self.send(id, data).await
    }
}
