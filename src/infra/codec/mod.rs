//! Frame codec: maps the register-level view of a CAN frame (raw identifier,
//! eight-byte mailbox, data length code) to the [`CanFrame`] record used by
//! the link layer, and back.
//!
//! Decoding is the only place where a length coming from hardware is
//! trusted; everything downstream relies on `len <= 8`.
use crate::core::CAN_MAX_DLC;
use crate::error::CodecError;
use crate::protocol::transport::{can_frame::CanFrame, can_id::CanId};

pub mod hex;

//==================================================================================WIRE_FRAME
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Frame as read from or written to a controller mailbox.
pub struct WireFrame {
    /// Identifier including the extended/remote/error flag bits.
    pub id: u32,
    /// Mailbox contents. Bytes past `dlc` are unspecified on receive.
    pub data: [u8; CAN_MAX_DLC],
    /// Data length code as reported by (or handed to) the controller.
    pub dlc: u8,
}

impl WireFrame {
    /// Decode this mailbox into a [`CanFrame`].
    pub fn decode(&self) -> Result<CanFrame, CodecError> {
        decode(self.id, &self.data, self.dlc)
    }
}

//==================================================================================DECODE
/// Build a [`CanFrame`] from raw controller values.
///
/// Rejects a data length code above eight, and a byte slice shorter than
/// the announced length. Bytes past `dlc` are not copied.
pub fn decode(raw_identifier: u32, raw_bytes: &[u8], dlc: u8) -> Result<CanFrame, CodecError> {
    let len = dlc as usize;
    if len > CAN_MAX_DLC || raw_bytes.len() < len {
        return Err(CodecError::InvalidLength { len });
    }

    let mut data = [0u8; CAN_MAX_DLC];
    data[..len].copy_from_slice(&raw_bytes[..len]);

    Ok(CanFrame {
        id: CanId(raw_identifier),
        data,
        len,
    })
}

//==================================================================================ENCODE
/// Produce the mailbox representation of a frame.
///
/// Callers validate `len <= 8` beforehand; a longer frame is reported as
/// [`CodecError::InvalidLength`] rather than truncated.
pub fn encode(frame: &CanFrame) -> Result<WireFrame, CodecError> {
    if frame.len > CAN_MAX_DLC {
        return Err(CodecError::InvalidLength { len: frame.len });
    }

    let mut data = [0u8; CAN_MAX_DLC];
    data[..frame.len].copy_from_slice(&frame.data[..frame.len]);

    Ok(WireFrame {
        id: frame.id.0,
        data,
        dlc: frame.len as u8,
    })
}

//==================================================================================TESTS
#[cfg(test)]
#[path = "tests.rs"]
mod tests;
