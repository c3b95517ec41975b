//! Outbound capability handed to the packet router: the router calls it for
//! every CAN frame of a fragmented packet.
use crate::error::TxError;
use futures_util::Future;

/// Contract to put one frame on the bus.
pub trait FrameTransmitter {
    /// Send `data` (at most eight bytes) with the 29-bit identifier `id`.
    ///
    /// Resolves once the controller accepted the frame, not once it has been
    /// seen on the wire. Errors are returned to the caller, who decides
    /// whether to retry.
    fn transmit_frame<'a>(
        &'a self,
        id: u32,
        data: &'a [u8],
    ) -> impl Future<Output = Result<(), TxError>> + 'a;
}
