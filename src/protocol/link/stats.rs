//! Interface counters. Each counter has a single writer (interrupt handler,
//! classifier, or transmit gate) and may be read from anywhere.
use core::sync::atomic::{AtomicU32, Ordering};

/// Receive-side counters.
#[derive(Debug, Default)]
pub struct LinkStats {
    /// Error frames seen by the classifier.
    pub error_frames: AtomicU32,
    /// Remote transmission requests seen by the classifier.
    pub remote_frames: AtomicU32,
    /// Frames the classifier found longer than eight bytes.
    pub oversized_frames: AtomicU32,
    /// Data frames accepted by the router.
    pub delivered_frames: AtomicU32,
    /// Data frames the router's inbound entry refused.
    pub refused_frames: AtomicU32,
    /// Frames dropped in interrupt context (bad length or full queue).
    pub rx_dropped: AtomicU32,
}

impl LinkStats {
    pub const fn new() -> Self {
        Self {
            error_frames: AtomicU32::new(0),
            remote_frames: AtomicU32::new(0),
            oversized_frames: AtomicU32::new(0),
            delivered_frames: AtomicU32::new(0),
            refused_frames: AtomicU32::new(0),
            rx_dropped: AtomicU32::new(0),
        }
    }
}

/// Transmit-side counters, owned by the gate.
#[derive(Debug, Default)]
pub struct TxStats {
    /// Frames accepted by the controller.
    pub tx_frames: AtomicU32,
    /// Transmissions refused because of a flagged bus error.
    pub tx_bus_errors: AtomicU32,
    /// Transmissions refused without a bus error.
    pub tx_rejected: AtomicU32,
}

impl TxStats {
    pub const fn new() -> Self {
        Self {
            tx_frames: AtomicU32::new(0),
            tx_bus_errors: AtomicU32::new(0),
            tx_rejected: AtomicU32::new(0),
        }
    }
}

/// Plain copy of every counter of an interface at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkStatsSnapshot {
    pub error_frames: u32,
    pub remote_frames: u32,
    pub oversized_frames: u32,
    pub delivered_frames: u32,
    pub refused_frames: u32,
    pub rx_dropped: u32,
    pub tx_frames: u32,
    pub tx_bus_errors: u32,
    pub tx_rejected: u32,
}

impl LinkStatsSnapshot {
    pub fn capture(rx: &LinkStats, tx: &TxStats) -> Self {
        Self {
            error_frames: rx.error_frames.load(Ordering::Relaxed),
            remote_frames: rx.remote_frames.load(Ordering::Relaxed),
            oversized_frames: rx.oversized_frames.load(Ordering::Relaxed),
            delivered_frames: rx.delivered_frames.load(Ordering::Relaxed),
            refused_frames: rx.refused_frames.load(Ordering::Relaxed),
            rx_dropped: rx.rx_dropped.load(Ordering::Relaxed),
            tx_frames: tx.tx_frames.load(Ordering::Relaxed),
            tx_bus_errors: tx.tx_bus_errors.load(Ordering::Relaxed),
            tx_rejected: tx.tx_rejected.load(Ordering::Relaxed),
        }
    }
}

#[inline]
pub(crate) fn bump(counter: &AtomicU32) {
    counter.fetch_add(1, Ordering::Relaxed);
}
