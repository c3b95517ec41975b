//! In-memory representation of a classic CAN frame.
use crate::core::CAN_MAX_DLC;
use crate::error::CodecError;
use crate::protocol::transport::can_id::CanId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// CAN frame as it travels between the interrupt handler, the classifier,
/// and the transmit gate. Always copied by value.
pub struct CanFrame {
    /// Identifier including the flag bits.
    pub id: CanId,
    /// Payload buffer. Bytes past `len` are zero.
    pub data: [u8; CAN_MAX_DLC],
    /// Number of valid payload bytes (Data Length Code, 0 to 8).
    pub len: usize,
}

impl CanFrame {
    /// Build a frame from a payload slice.
    pub fn new(id: CanId, payload: &[u8]) -> Result<Self, CodecError> {
        if payload.len() > CAN_MAX_DLC {
            return Err(CodecError::InvalidLength { len: payload.len() });
        }
        let mut data = [0u8; CAN_MAX_DLC];
        data[..payload.len()].copy_from_slice(payload);
        Ok(Self {
            id,
            data,
            len: payload.len(),
        })
    }

    /// Valid payload bytes.
    ///
    /// Clamped to eight bytes so a frame carrying an inconsistent length
    /// never panics when read.
    pub fn payload(&self) -> &[u8] {
        &self.data[..self.len.min(CAN_MAX_DLC)]
    }

    /// Convert any HAL frame implementing [`embedded_can::Frame`].
    pub fn from_frame<F: embedded_can::Frame>(frame: &F) -> Result<Self, CodecError> {
        let mut id = CanId::from(frame.id());
        if frame.is_remote_frame() {
            id = id.with_remote();
            if frame.dlc() > CAN_MAX_DLC {
                return Err(CodecError::InvalidLength { len: frame.dlc() });
            }
            return Ok(Self {
                id,
                data: [0; CAN_MAX_DLC],
                len: frame.dlc(),
            });
        }
        Self::new(id, frame.data())
    }
}

impl embedded_can::Frame for CanFrame {
    fn new(id: impl Into<embedded_can::Id>, data: &[u8]) -> Option<Self> {
        CanFrame::new(CanId::from(id.into()), data).ok()
    }

    fn new_remote(id: impl Into<embedded_can::Id>, dlc: usize) -> Option<Self> {
        if dlc > CAN_MAX_DLC {
            return None;
        }
        Some(Self {
            id: CanId::from(id.into()).with_remote(),
            data: [0; CAN_MAX_DLC],
            len: dlc,
        })
    }

    fn is_extended(&self) -> bool {
        self.id.is_extended()
    }

    fn is_remote_frame(&self) -> bool {
        self.id.is_remote()
    }

    fn id(&self) -> embedded_can::Id {
        self.id.into()
    }

    fn dlc(&self) -> usize {
        self.len
    }

    fn data(&self) -> &[u8] {
        if self.id.is_remote() {
            &[]
        } else {
            self.payload()
        }
    }
}
