//! Raw CAN identifier as exchanged with the router: the address bits plus
//! the three high flag bits (extended format, remote request, error frame).
use crate::core::{CAN_EFF_FLAG, CAN_EFF_MASK, CAN_ERR_FLAG, CAN_RTR_FLAG, CAN_SFF_MASK};

//==================================================================================CAN_ID
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Encapsulates a flagged CAN identifier and exposes accessors for the
/// frame kind and the address bits.
pub struct CanId(pub u32);

impl CanId {
    // Constructors
    /// Extended (29-bit) data frame identifier. Bits above 29 are discarded.
    pub const fn extended(address: u32) -> Self {
        CanId(CAN_EFF_FLAG | (address & CAN_EFF_MASK))
    }

    /// Standard (11-bit) data frame identifier. Bits above 11 are discarded.
    pub const fn standard(address: u16) -> Self {
        CanId(address as u32 & CAN_SFF_MASK)
    }

    /// Same identifier with the remote transmission request flag set.
    pub const fn with_remote(self) -> Self {
        CanId(self.0 | CAN_RTR_FLAG)
    }

    /// Same identifier with the error flag set.
    pub const fn with_error(self) -> Self {
        CanId(self.0 | CAN_ERR_FLAG)
    }

    // Getters
    pub fn is_extended(&self) -> bool {
        self.0 & CAN_EFF_FLAG != 0
    }

    pub fn is_remote(&self) -> bool {
        self.0 & CAN_RTR_FLAG != 0
    }

    pub fn is_error(&self) -> bool {
        self.0 & CAN_ERR_FLAG != 0
    }

    /// Address bits with every flag stripped.
    ///
    /// Only meaningful once the error and remote flags have been checked.
    pub fn address(&self) -> u32 {
        if self.is_extended() {
            self.0 & CAN_EFF_MASK
        } else {
            self.0 & CAN_SFF_MASK
        }
    }
}

impl From<embedded_can::Id> for CanId {
    fn from(id: embedded_can::Id) -> Self {
        match id {
            embedded_can::Id::Standard(sid) => CanId::standard(sid.as_raw()),
            embedded_can::Id::Extended(eid) => CanId::extended(eid.as_raw()),
        }
    }
}

impl From<CanId> for embedded_can::Id {
    fn from(id: CanId) -> Self {
        if id.is_extended() {
            embedded_can::ExtendedId::new(id.address())
                .map(embedded_can::Id::Extended)
                .unwrap_or(embedded_can::Id::Extended(embedded_can::ExtendedId::ZERO))
        } else {
            embedded_can::StandardId::new(id.address() as u16)
                .map(embedded_can::Id::Standard)
                .unwrap_or(embedded_can::Id::Standard(embedded_can::StandardId::ZERO))
        }
    }
}
