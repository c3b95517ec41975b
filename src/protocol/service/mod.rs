//! Request/response service on top of the router's connection sockets.
//!
//! The loop announces the node once, binds a listening socket, then cycles
//! through accept (with timeout), read (with timeout) and close. Packets
//! addressed to a well-known port go to the router's built-in handler;
//! packets for any other port are traced and released.
//!
//! Timeouts are not errors: an accept timeout retries, a read timeout ends
//! the connection. They are also the points where a [`Shutdown`] is observed.
use core::convert::Infallible;
use core::fmt::Write;

use crate::config::ServiceConfig;
use crate::error::ServiceError;
use crate::protocol::transport::traits::csp_stack::{
    CspConnection, CspPacket, CspServices, CspSocket,
};

pub mod router;
pub mod shutdown;

pub use router::RouterTask;
pub use shutdown::Shutdown;

/// Packet type delivered by the connections of socket `S`.
pub type PacketOf<S> = <<S as CspSocket>::Connection as CspConnection>::Packet;

/// Where a received packet went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Dispatch {
    /// Handed to the router's built-in service handler.
    WellKnown,
    /// Traced on the diagnostic sink and released.
    Application,
}

pub struct ServiceLoop<S, V, W>
where
    S: CspSocket,
    V: CspServices<PacketOf<S>>,
    W: Write,
{
    socket: S,
    services: V,
    diag: W,
    config: ServiceConfig,
}

impl<S, V, W> ServiceLoop<S, V, W>
where
    S: CspSocket,
    V: CspServices<PacketOf<S>>,
    W: Write,
{
    pub fn new(socket: S, services: V, diag: W, config: ServiceConfig) -> Self {
        Self {
            socket,
            services,
            diag,
            config,
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Send the startup announcement, if one is configured.
    ///
    /// Fire-and-forget from the loop's point of view: [`ServiceLoop::run`]
    /// ignores the result.
    pub async fn announce(&mut self) -> Result<(), V::Error> {
        let Some(payload) = self.config.announcement else {
            return Ok(());
        };
        let result = self
            .services
            .transaction(
                self.config.announcement_priority,
                self.config.announcement_dest,
                self.config.announcement_port,
                self.config.announcement_timeout,
                payload,
            )
            .await;

        if result.is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "csp service: announcement to {} port {} failed",
                self.config.announcement_dest,
                self.config.announcement_port
            );
        }
        result
    }

    /// Bind and listen.
    pub fn open(&mut self) -> Result<(), ServiceError<S::Error>> {
        self.socket
            .bind(self.config.bind_port)
            .map_err(ServiceError::Bind)?;
        self.socket
            .listen(self.config.backlog)
            .map_err(ServiceError::Listen)?;

        #[cfg(feature = "defmt")]
        defmt::info!(
            "csp service: listening on port {}, backlog {}",
            self.config.bind_port,
            self.config.backlog
        );
        Ok(())
    }

    /// Announce, then open the listening socket.
    pub async fn start(&mut self) -> Result<(), ServiceError<S::Error>> {
        let _ = self.announce().await;
        self.open()
    }

    /// Wait for one connection and serve it to the end.
    ///
    /// Returns `None` when the accept timed out, otherwise the number of
    /// packets read from the connection.
    pub async fn poll_accept(&mut self, shutdown: Option<&Shutdown>) -> Option<usize> {
        let conn = self.socket.accept(self.config.accept_timeout).await?;
        Some(self.serve(conn, shutdown).await)
    }

    /// Read packets until the connection goes quiet, then close it.
    pub async fn serve(&mut self, mut conn: S::Connection, shutdown: Option<&Shutdown>) -> usize {
        let mut served = 0;
        while let Some(packet) = conn.read(self.config.read_timeout).await {
            self.dispatch(conn.destination_port(), conn.source_port(), packet);
            served += 1;
            if shutdown.is_some_and(Shutdown::is_triggered) {
                break;
            }
        }
        conn.close();
        served
    }

    /// Route one packet by its destination port.
    pub fn dispatch(&mut self, dport: u8, sport: u8, packet: PacketOf<S>) -> Dispatch {
        if dport > self.config.well_known_max_port {
            let _ = writeln!(
                self.diag,
                "CSP packet received: dport {}, sport {}, src {}, len {}",
                dport,
                sport,
                packet.source(),
                packet.payload().len()
            );
            self.services.buffer_free(packet);
            Dispatch::Application
        } else {
            self.services.service_handler(packet);
            Dispatch::WellKnown
        }
    }

    /// Serve forever. Returns only if the socket cannot be opened.
    pub async fn run(&mut self) -> Result<Infallible, ServiceError<S::Error>> {
        self.start().await?;
        loop {
            let _ = self.poll_accept(None).await;
        }
    }

    /// Serve until `shutdown` is observed at an accept or read checkpoint.
    /// A connection being served is closed before returning.
    pub async fn run_until(&mut self, shutdown: &Shutdown) -> Result<(), ServiceError<S::Error>> {
        self.start().await?;
        while !shutdown.is_triggered() {
            let _ = self.poll_accept(Some(shutdown)).await;
        }
        #[cfg(feature = "defmt")]
        defmt::info!("csp service: stopped");
        Ok(())
    }

    /// Text sink receiving the application packet traces.
    pub fn diagnostics(&mut self) -> &mut W {
        &mut self.diag
    }

    pub fn services(&mut self) -> &mut V {
        &mut self.services
    }

    pub fn socket(&mut self) -> &mut S {
        &mut self.socket
    }
}
