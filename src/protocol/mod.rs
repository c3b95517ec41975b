//! Protocol side of the crate: frame and identifier types with the traits
//! at the hardware and router seams, the CAN link layer, and the service
//! tasks running on top of the router.
pub mod link;
pub mod service;
pub mod transport;
