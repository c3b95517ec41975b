//! Interface adapter: owns the receive queue, the transmit gate, and the
//! counters of one CAN controller, and registers them with the router.
use core::fmt::Write;
use core::sync::atomic::{AtomicBool, Ordering};

use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, channel::Channel};

use crate::config::LinkConfig;
use crate::core::RX_QUEUE_LEN;
use crate::error::BringUpError;
use crate::protocol::link::{
    classifier::RxClassifier,
    rx_handoff::RxHandoff,
    stats::{LinkStats, LinkStatsSnapshot},
    tx_gate::TxGate,
};
use crate::protocol::transport::can_frame::CanFrame;
use crate::protocol::transport::traits::{
    can_controller::CanController,
    csp_stack::{CanInbound, CspStack, InterfaceInfo},
};

/// One CAN interface as seen by the router.
///
/// Construct once (typically into a `StaticCell`), then call
/// [`CanLink::bring_up`]. The returned [`LinkParts`] hold the classifier
/// runner for the executor and the handoff for the receive interrupt.
pub struct CanLink<H: CanController, const N: usize = RX_QUEUE_LEN> {
    config: LinkConfig,
    queue: Channel<CriticalSectionRawMutex, CanFrame, N>,
    gate: TxGate<H>,
    stats: LinkStats,
    up: AtomicBool,
    registered: AtomicBool,
}

/// Handles produced by a successful bring-up.
pub struct LinkParts<'a, R, W, const N: usize>
where
    R: CanInbound,
    W: Write,
{
    /// Queue consumer. Spawn its `run` (or `run_until`) future.
    pub classifier: RxClassifier<'a, R, W, N>,
    /// Queue producer for the receive interrupt.
    pub rx: RxHandoff<'a, N>,
}

impl<H: CanController, const N: usize> CanLink<H, N> {
    /// Allocate the queue and the admission token (available).
    /// Nothing is registered and the controller stays stopped.
    pub fn new(hw: H, config: LinkConfig) -> Self {
        Self {
            config,
            queue: Channel::new(),
            gate: TxGate::new(hw),
            stats: LinkStats::new(),
            up: AtomicBool::new(false),
            registered: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    /// Interface description handed to the router.
    pub fn info(&self) -> InterfaceInfo {
        InterfaceInfo {
            name: self.config.name,
            address: self.config.address,
            netmask: self.config.netmask,
        }
    }

    /// Outbound capability registered with the router.
    pub fn gate(&self) -> &TxGate<H> {
        &self.gate
    }

    pub fn is_up(&self) -> bool {
        self.up.load(Ordering::Acquire)
    }

    /// Body of the transmit-complete interrupt.
    pub fn on_tx_complete(&self) {
        self.gate.on_tx_complete();
    }

    /// Current value of every counter.
    pub fn stats(&self) -> LinkStatsSnapshot {
        LinkStatsSnapshot::capture(&self.stats, self.gate.stats())
    }

    /// Register the interface with `stack`, install a route from the local
    /// address to it (no next hop) and start the controller.
    ///
    /// `inbound` receives every classified data frame; `diag` receives the
    /// discard diagnostics. Succeeds at most once per link: the queue has a
    /// single consumer. A failed bring-up is not retried here; the caller
    /// decides whether to run without the interface or to try again.
    ///
    /// The interface is registered with the stack at most once. If the route
    /// was refused after registration succeeded, a retry only installs the
    /// route; `stack` must be the same stack as in the failed attempt.
    pub fn bring_up<'a, S, R, W>(
        &'a self,
        stack: &S,
        inbound: R,
        diag: W,
    ) -> Result<LinkParts<'a, R, W, N>, BringUpError<S::Error>>
    where
        S: CspStack<'a, TxGate<H>>,
        R: CanInbound,
        W: Write,
    {
        if self
            .up
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(BringUpError::AlreadyBroughtUp);
        }

        if let Err(err) = self.register(stack) {
            self.up.store(false, Ordering::Release);
            #[cfg(feature = "defmt")]
            defmt::error!("can link: bring-up of {} failed", self.config.name);
            return Err(err);
        }

        self.gate.with_controller(|hw| hw.start());

        #[cfg(feature = "defmt")]
        defmt::info!(
            "can link: {} up, address {}, netmask {:#X}",
            self.config.name,
            self.config.address,
            self.config.netmask
        );

        Ok(LinkParts {
            classifier: RxClassifier::new(self.queue.receiver(), inbound, diag, &self.stats),
            rx: RxHandoff::new(self.queue.sender(), &self.stats),
        })
    }

    fn register<'a, S>(&'a self, stack: &S) -> Result<(), BringUpError<S::Error>>
    where
        S: CspStack<'a, TxGate<H>>,
    {
        if !self.registered.load(Ordering::Acquire) {
            stack
                .add_interface(&self.info(), &self.gate)
                .map_err(BringUpError::RegistrationFailed)?;
            self.registered.store(true, Ordering::Release);
        }
        stack
            .set_route(
                self.config.address,
                self.config.route_mask_bits,
                self.config.name,
                None,
            )
            .map_err(BringUpError::RouteFailed)
    }
}
