//! Error definitions shared across library modules.
//! Each type models one failure scenario of the link layer (codec, receive
//! handoff, classification, transmission) or of the service side
//! (bring-up, socket setup).
use thiserror_no_std::Error;

//==================================================================================CODEC_ERROR
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Errors raised while mapping between wire and in-memory frames.
pub enum CodecError {
    /// The data length code exceeds eight bytes, or fewer bytes than announced
    /// were supplied.
    #[error("Invalid data length: {len}")]
    InvalidLength { len: usize },
}

//==================================================================================TX_ERROR
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Errors returned synchronously to the caller of the transmit gate.
pub enum TxError {
    /// More than eight data bytes were supplied. Hardware was not touched.
    #[error("Invalid data length: {len}")]
    InvalidLength { len: usize },
    /// The controller error register was non-zero. It has been cleared.
    #[error("CAN bus error: {code:#X}")]
    BusError { code: u32 },
    /// The controller refused the frame without flagging a bus error
    /// (typically: every TX mailbox busy).
    #[error("Submission refused by the controller")]
    SubmissionFailed,
}

//==================================================================================RX_ERRORS
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Reasons for which the classifier discards a received frame.
pub enum RxRejection {
    /// Length above eight bytes slipped through the handoff.
    #[error("Oversized frame: {len} bytes")]
    OversizedFrame { len: usize },
    /// Identifier carries the error flag.
    #[error("Error frame")]
    ErrorFrame,
    /// Identifier carries the remote transmission request flag.
    #[error("Remote transmission request")]
    RemoteFrame,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Interrupt-time drops. Never propagated past the interrupt handler.
pub enum HandoffError {
    /// The controller reported a data length code above eight.
    #[error("Invalid data length: {len}")]
    InvalidLength { len: usize },
    /// The receive queue had no free slot.
    #[error("Receive queue full")]
    QueueFull,
}

//==================================================================================BRING_UP_ERROR
#[derive(Error, Debug)]
/// Interface bring-up failures. Not retried.
pub enum BringUpError<E: core::fmt::Debug> {
    /// The stack refused the interface.
    #[error("Interface registration failed: {0:?}")]
    RegistrationFailed(E),
    /// The stack refused the host route to the local address.
    #[error("Route registration failed: {0:?}")]
    RouteFailed(E),
    /// The interface was already registered; its queue has a consumer.
    #[error("Interface already brought up")]
    AlreadyBroughtUp,
}

//==================================================================================SERVICE_ERROR
#[derive(Error, Debug)]
/// The service loop could not open its listening endpoint.
pub enum ServiceError<E: core::fmt::Debug> {
    #[error("Bind failed: {0:?}")]
    Bind(E),
    #[error("Listen failed: {0:?}")]
    Listen(E),
}
