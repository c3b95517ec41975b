//! Link and service configuration.
//!
//! Both structures start from the defaults of a single-controller node and
//! are adjusted with fluent setters:
//!
//! ```rust
//! use csp_can_link::config::{LinkConfig, ServiceConfig};
//! use embassy_time::Duration;
//!
//! let link = LinkConfig::new().name("CAN2").address(12).netmask(0xFF00);
//! let service = ServiceConfig::new().accept_timeout(Duration::from_millis(500));
//! assert_eq!(link.address, 12);
//! assert_eq!(service.backlog, 10);
//! ```
use embassy_time::Duration;

use crate::core::{
    Priority, BCAST_PORT, CSP_ANY, CSP_BROADCAST_ADDR, CSP_NETMASK, CSP_UPTIME, LOCAL_NODE_ID,
};

/// Payload of the startup announcement.
pub const DEFAULT_ANNOUNCEMENT: &[u8] = b"hi bcast\n";

//==================================================================================LINK_CONFIG
#[derive(Debug, Clone, PartialEq, Eq)]
/// Identity of the CAN interface inside the packet router.
pub struct LinkConfig {
    /// Interface name shown in routing tables and packet traces.
    pub name: &'static str,
    /// Local node address.
    pub address: u16,
    /// Reachability mask of the interface.
    pub netmask: u16,
    /// Width of the route installed for the local address.
    /// `None` installs a host route (every address bit significant).
    pub route_mask_bits: Option<u8>,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            name: "CAN1",
            address: LOCAL_NODE_ID,
            netmask: CSP_NETMASK,
            route_mask_bits: None,
        }
    }
}

impl LinkConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    pub fn address(mut self, address: u16) -> Self {
        self.address = address;
        self
    }

    pub fn netmask(mut self, netmask: u16) -> Self {
        self.netmask = netmask;
        self
    }

    /// Install a network route of `bits` significant bits instead of a host route.
    pub fn route_mask_bits(mut self, bits: u8) -> Self {
        self.route_mask_bits = Some(bits);
        self
    }
}

//==================================================================================SERVICE_CONFIG
#[derive(Debug, Clone, PartialEq, Eq)]
/// Parameters of the request/response service loop.
pub struct ServiceConfig {
    /// Port the listening socket binds to. [`CSP_ANY`] accepts everything.
    pub bind_port: u8,
    /// Number of pending connections the stack may queue.
    pub backlog: usize,
    /// Maximum wait for an incoming connection before retrying.
    pub accept_timeout: Duration,
    /// Maximum wait for the next packet of an open connection.
    pub read_timeout: Duration,
    /// Highest destination port handed to the built-in service handler.
    pub well_known_max_port: u8,
    /// Startup announcement; `None` disables it.
    pub announcement: Option<&'static [u8]>,
    /// Destination of the announcement.
    pub announcement_dest: u16,
    /// Port of the announcement.
    pub announcement_port: u8,
    /// Priority of the announcement.
    pub announcement_priority: Priority,
    /// Timeout handed to the stack's transaction helper.
    pub announcement_timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_port: CSP_ANY,
            backlog: 10,
            accept_timeout: Duration::from_millis(1000),
            read_timeout: Duration::from_millis(100),
            well_known_max_port: CSP_UPTIME,
            announcement: Some(DEFAULT_ANNOUNCEMENT),
            announcement_dest: CSP_BROADCAST_ADDR,
            announcement_port: BCAST_PORT,
            announcement_priority: Priority::Normal,
            announcement_timeout: Duration::from_millis(1000),
        }
    }
}

impl ServiceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind_port(mut self, port: u8) -> Self {
        self.bind_port = port;
        self
    }

    pub fn backlog(mut self, backlog: usize) -> Self {
        self.backlog = backlog;
        self
    }

    pub fn accept_timeout(mut self, timeout: Duration) -> Self {
        self.accept_timeout = timeout;
        self
    }

    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn well_known_max_port(mut self, port: u8) -> Self {
        self.well_known_max_port = port;
        self
    }

    /// Replace the announcement payload.
    pub fn announcement(mut self, payload: &'static [u8]) -> Self {
        self.announcement = Some(payload);
        self
    }

    /// Skip the startup announcement.
    pub fn without_announcement(mut self) -> Self {
        self.announcement = None;
        self
    }

    pub fn announcement_target(mut self, dest: u16, port: u8) -> Self {
        self.announcement_dest = dest;
        self.announcement_port = port;
        self
    }
}
