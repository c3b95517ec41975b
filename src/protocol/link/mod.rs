//! CAN link layer: interrupt handoff into a bounded queue, classification
//! towards the router, and the single-slot transmit gate.
//!
//! ```text
//! RX IRQ ──► RxHandoff ──► queue ──► RxClassifier ──► CanInbound (router)
//! router ──► TxGate::send ──► codec ──► CanController
//! TX IRQ ──► TxGate::on_tx_complete
//! ```
pub mod classifier;
pub mod interface;
pub mod rx_handoff;
pub mod stats;
pub mod tx_gate;

pub use interface::{CanLink, LinkParts};
