//! Traits at the seams of the link layer: controller hardware, the outbound
//! capability given to the router, and the router/socket API consumed by the
//! interface adapter and the service loop.
pub mod can_controller;
pub mod csp_stack;
pub mod frame_transmitter;
