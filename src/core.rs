//! Constants shared by the link layer, the service loop, and the firmware
//! glue: CAN identifier flag layout, queue sizing, and the default CSP
//! addressing plan of a node.

//==================================================================================CAN
/// Maximum payload of a classic CAN frame (ISO 11898-1).
pub const CAN_MAX_DLC: usize = 8;

/// Extended frame format flag (bit 31 of the raw identifier).
pub const CAN_EFF_FLAG: u32 = 0x8000_0000;
/// Remote transmission request flag (bit 30).
pub const CAN_RTR_FLAG: u32 = 0x4000_0000;
/// Error frame flag (bit 29).
pub const CAN_ERR_FLAG: u32 = 0x2000_0000;

/// Valid identifier bits of a standard (11-bit) frame.
pub const CAN_SFF_MASK: u32 = 0x0000_07FF;
/// Valid identifier bits of an extended (29-bit) frame.
pub const CAN_EFF_MASK: u32 = 0x1FFF_FFFF;

//==================================================================================QUEUES
/// Capacity of the interrupt-to-classifier receive queue.
///
/// At 1 Mbit/s a full burst of extended frames arrives roughly every 130 µs,
/// so 256 entries cover ~33 ms of classifier starvation before frames drop.
pub const RX_QUEUE_LEN: usize = 256;

//==================================================================================CSP
/// Default local node address.
pub const LOCAL_NODE_ID: u16 = 10;
/// Default reachability mask of the local interface.
pub const CSP_NETMASK: u16 = 0xFFF0;
/// Broadcast destination used by the startup announcement.
pub const CSP_BROADCAST_ADDR: u16 = 0x3FFF;
/// Port the startup announcement is sent to.
pub const BCAST_PORT: u8 = 10;

/// Wildcard port: a socket bound to it receives every incoming connection.
pub const CSP_ANY: u8 = 255;

/// Highest port served by the stack's built-in service handler
/// (CMP, ping, process list, memfree, reboot, buffer free, uptime).
pub const CSP_UPTIME: u8 = 6;

/// Message priorities understood by the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Priority {
    Critical = 0,
    High = 1,
    Normal = 2,
    Low = 3,
}

impl Priority {
    /// Two-bit wire value.
    pub fn bits(self) -> u8 {
        self as u8
    }
}
