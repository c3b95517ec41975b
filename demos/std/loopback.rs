//! # Loopback Example
//!
//! Runs the whole link on the host with an in-memory controller whose
//! transmit mailbox loops back into its receive FIFO:
//! - Bring up the interface against a toy router
//! - Send frames through the transmit gate
//! - Feed them back through the receive interrupt and the classifier
//! - Trace the received payloads with the packet diagnostics
//!
//! ```bash
//! cargo run --example loopback
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use csp_can_link::{
    config::LinkConfig,
    infra::{
        codec::WireFrame,
        diag::{Diagnostics, PacketId},
    },
    protocol::{
        link::CanLink,
        service::Shutdown,
        transport::traits::{
            can_controller::{CanController, CanRxFifo},
            csp_stack::{CanInbound, CspStack, InterfaceInfo},
            frame_transmitter::FrameTransmitter,
        },
    },
};

/// Bus shared by the controller (TX side) and the FIFO (RX side).
type Bus = Arc<Mutex<VecDeque<WireFrame>>>;

struct LoopbackController {
    bus: Bus,
}

impl CanController for LoopbackController {
    type Error = ();

    fn transmit(&mut self, frame: &WireFrame) -> Result<(), Self::Error> {
        self.bus.lock().map_err(|_| ())?.push_back(*frame);
        Ok(())
    }

    fn error_code(&self) -> u32 {
        0
    }

    fn reset_error(&mut self) {}

    fn start(&mut self) {
        println!("   controller started");
    }

    fn stop(&mut self) {}
}

struct LoopbackFifo {
    bus: Bus,
}

impl CanRxFifo for LoopbackFifo {
    fn read_pending(&mut self) -> Option<WireFrame> {
        self.bus.lock().ok()?.pop_front()
    }
}

/// Router stand-in: prints registrations and traces every inbound frame.
struct ToyRouter {
    diag: Mutex<Diagnostics<String>>,
}

impl<'a, T: FrameTransmitter + 'a> CspStack<'a, T> for ToyRouter {
    type Error = ();

    fn add_interface(&self, iface: &InterfaceInfo, _tx: &'a T) -> Result<(), Self::Error> {
        println!(
            "   interface {} address {} netmask 0x{:04X}",
            iface.name, iface.address, iface.netmask
        );
        Ok(())
    }

    fn set_route(
        &self,
        address: u16,
        mask_bits: Option<u8>,
        iface: &'static str,
        _via: Option<u16>,
    ) -> Result<(), Self::Error> {
        println!("   route {}/{:?} via {}", address, mask_bits, iface);
        Ok(())
    }
}

impl CanInbound for ToyRouter {
    type Error = ();

    fn can_rx(&self, address: u32, data: &[u8]) -> Result<(), Self::Error> {
        let id = PacketId {
            src: address as u16,
            dst: 10,
            ..PacketId::default()
        };
        self.diag.lock().map_err(|_| ())?.input_hook("CAN1", &id, data);
        Ok(())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    println!("=== csp-can-link Loopback ===\n");

    // ======================================================================
    // 1. Bring up the interface
    // ======================================================================
    println!("1. Bringing up CAN1");

    let bus: Bus = Arc::new(Mutex::new(VecDeque::new()));
    let link: CanLink<LoopbackController> =
        CanLink::new(LoopbackController { bus: bus.clone() }, LinkConfig::new());
    let router = ToyRouter {
        diag: Mutex::new(Diagnostics::new(String::new())),
    };

    let parts = match link.bring_up(&router, &router, String::new()) {
        Ok(parts) => parts,
        Err(e) => {
            eprintln!("   bring-up failed: {:?}", e);
            return;
        }
    };
    let mut classifier = parts.classifier;
    let rx = parts.rx;
    println!();

    // ======================================================================
    // 2. Send, loop back, classify
    // ======================================================================
    println!("2. Sending three frames");

    let shutdown = Shutdown::new();
    let mut fifo = LoopbackFifo { bus };

    let traffic = async {
        let frames: [(u32, &[u8]); 3] = [
            (2, &b"ping"[..]),
            // Nine bytes: refused before reaching the controller.
            (3, &b"hello CSP"[..]),
            (4, &[0x00, 0xFF][..]),
        ];
        for (id, data) in frames {
            match link.gate().transmit_frame(id, data).await {
                Ok(()) => {
                    // Transmit-complete interrupt, then receive interrupt.
                    link.on_tx_complete();
                    rx.on_rx_interrupt(&mut fifo);
                }
                Err(e) => eprintln!("   frame {} refused: {}", id, e),
            }
            tokio::task::yield_now().await;
        }
        shutdown.trigger();
    };

    tokio::join!(classifier.run_until(shutdown.wait()), traffic);

    // ======================================================================
    // 3. Results
    // ======================================================================
    println!("3. Router trace\n");
    if let Ok(mut diag) = router.diag.lock() {
        print!("{}", diag.sink());
    }

    let stats = link.stats();
    println!(
        "\n   tx {} / delivered {} / dropped {}",
        stats.tx_frames, stats.delivered_frames, stats.rx_dropped
    );
}
