//! The packet router seen from the CAN link: interface registration and
//! routing on one side, connection-oriented sockets on the other.
//!
//! The router's own routing, fragmentation, and reliability logic sit behind
//! these traits and are not part of this crate.
use embassy_time::Duration;
use futures_util::Future;

use crate::core::Priority;
use crate::protocol::transport::traits::frame_transmitter::FrameTransmitter;

//==================================================================================REGISTRATION
/// Description of the CAN interface handed to the router at bring-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterfaceInfo {
    pub name: &'static str,
    pub address: u16,
    pub netmask: u16,
}

/// Registration side of the router.
///
/// The router keeps the `&'a T` transmitter and calls it for every outbound
/// frame routed through this interface. Takes `&self`: the router is shared
/// with the classifier, which feeds it through [`CanInbound`].
pub trait CspStack<'a, T: FrameTransmitter + 'a> {
    type Error: core::fmt::Debug;

    /// Register the interface and its outbound capability.
    fn add_interface(&self, iface: &InterfaceInfo, tx: &'a T) -> Result<(), Self::Error>;

    /// Install a static route. `mask_bits = None` means every address bit is
    /// significant; `via = None` means no next hop (direct delivery).
    fn set_route(
        &self,
        address: u16,
        mask_bits: Option<u8>,
        iface: &'static str,
        via: Option<u16>,
    ) -> Result<(), Self::Error>;
}

/// Inbound entry point: one classified data frame, address bits only.
pub trait CanInbound {
    type Error: core::fmt::Debug;

    fn can_rx(&self, address: u32, data: &[u8]) -> Result<(), Self::Error>;
}

impl<T: CanInbound + ?Sized> CanInbound for &T {
    type Error = T::Error;

    fn can_rx(&self, address: u32, data: &[u8]) -> Result<(), Self::Error> {
        (**self).can_rx(address, data)
    }
}

//==================================================================================SOCKETS
/// Packet buffer owned by the router.
pub trait CspPacket {
    /// Address of the sending node.
    fn source(&self) -> u16;
    fn payload(&self) -> &[u8];
}

/// An accepted connection.
pub trait CspConnection {
    type Packet: CspPacket;

    /// Next packet, or `None` once `timeout` elapses or the peer closed.
    fn read(&mut self, timeout: Duration) -> impl Future<Output = Option<Self::Packet>> + '_;

    fn source_port(&self) -> u8;

    fn destination_port(&self) -> u8;

    /// Release the connection back to the router.
    fn close(self);
}

/// A listening endpoint.
pub trait CspSocket {
    type Error: core::fmt::Debug;
    type Connection: CspConnection;

    fn bind(&mut self, port: u8) -> Result<(), Self::Error>;

    fn listen(&mut self, backlog: usize) -> Result<(), Self::Error>;

    /// Next incoming connection, or `None` once `timeout` elapses.
    fn accept(&mut self, timeout: Duration) -> impl Future<Output = Option<Self::Connection>> + '_;
}

/// Router services used by the service loop.
pub trait CspServices<P: CspPacket> {
    type Error: core::fmt::Debug;

    /// Built-in handler for the well-known ports (ping, uptime, memfree...).
    /// Takes ownership of the packet.
    fn service_handler(&mut self, packet: P);

    /// Return an unhandled packet to the buffer pool.
    fn buffer_free(&mut self, packet: P);

    /// One-shot send: connect, send `data`, close. No reply expected.
    fn transaction<'a>(
        &'a mut self,
        priority: Priority,
        dest: u16,
        port: u8,
        timeout: Duration,
        data: &'a [u8],
    ) -> impl Future<Output = Result<(), Self::Error>> + 'a;
}

/// Routing engine pump.
pub trait CspRouter {
    /// Process pending work of the routing engine (one pass). Resolves after
    /// at most one internal wait period so callers can observe shutdown.
    fn route_work(&mut self) -> impl Future<Output = ()> + '_;
}
