//! `csp-can-link` library: a CAN link layer for a CSP-style packet router in
//! a `no_std` environment. Received frames move from the interrupt handler
//! through a bounded queue to a classifier feeding the router; outbound
//! frames pass a single-slot transmit gate. A minimal connection-oriented
//! service loop runs on top.
#![no_std]
//==================================================================================
/// Constants shared by the link layer and the service loop.
pub mod core;
/// Link and service configuration.
pub mod config;
/// Error taxonomy of the link layer and of the service side.
pub mod error;
/// Frame codec and text diagnostics.
pub mod infra;
/// Transport types, link layer, and service tasks.
pub mod protocol;
//==================================================================================
pub use config::{LinkConfig, ServiceConfig};
pub use protocol::link::{CanLink, LinkParts};
pub use protocol::service::{RouterTask, ServiceLoop, Shutdown};
