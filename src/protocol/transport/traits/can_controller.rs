//! Minimal abstraction of a CAN controller as seen by the link layer.
//! Register-level setup (bit timing, filters, interrupt wiring) stays with
//! the board support code.
use crate::infra::codec::WireFrame;

/// Transmit side and error register of the controller, used from thread
/// context under the transmit gate.
pub trait CanController {
    type Error: core::fmt::Debug;

    /// Place one frame in a free TX mailbox. Must not block.
    ///
    /// `Ok` means the controller accepted the frame and will raise a
    /// transmit-complete interrupt once it leaves the mailbox.
    fn transmit(&mut self, frame: &WireFrame) -> Result<(), Self::Error>;

    /// Current content of the error register; zero when healthy.
    fn error_code(&self) -> u32;

    /// Clear the error register.
    fn reset_error(&mut self);

    /// Leave initialization mode and join the bus.
    fn start(&mut self);

    /// Leave the bus.
    fn stop(&mut self);
}

/// Receive FIFO access. Only valid inside the receive interrupt.
pub trait CanRxFifo {
    /// Pop the oldest pending mailbox, if any.
    fn read_pending(&mut self) -> Option<WireFrame>;
}
