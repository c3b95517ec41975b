/// Test doubles for the controller, the receive FIFO, the router, and its
/// socket API.
use csp_can_link::{
    core::Priority,
    infra::codec::WireFrame,
    protocol::{
        service::Shutdown,
        transport::traits::{
            can_controller::{CanController, CanRxFifo},
            csp_stack::{
                CanInbound, CspConnection, CspPacket, CspRouter, CspServices, CspSocket, CspStack,
                InterfaceInfo,
            },
            frame_transmitter::FrameTransmitter,
        },
    },
};
use embassy_time::Duration;
use std::collections::VecDeque;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

//==================================================================================CONTROLLER
#[derive(Debug, Default)]
#[allow(dead_code)]
/// Observable state of [`MockController`].
pub struct ControllerState {
    /// Frames accepted for transmission, in submission order.
    pub transmitted: Vec<WireFrame>,
    /// Error register.
    pub error_code: u32,
    /// Refuse every submission.
    pub refuse: bool,
    /// Error code latched when a submission is refused.
    pub error_on_refuse: u32,
    /// Accepted frames not yet confirmed by [`MockController::complete_one`].
    pub in_flight: usize,
    /// Highest value `in_flight` ever reached.
    pub max_in_flight: usize,
    pub started: bool,
}

#[derive(Clone, Default)]
#[allow(dead_code)]
/// Controller whose state stays inspectable after it moved into a link.
pub struct MockController {
    pub state: Arc<Mutex<ControllerState>>,
}

#[allow(dead_code)]
impl MockController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transmitted(&self) -> Vec<WireFrame> {
        self.state.lock().unwrap().transmitted.clone()
    }

    pub fn set_error_code(&self, code: u32) {
        self.state.lock().unwrap().error_code = code;
    }

    pub fn refuse(&self, error_on_refuse: u32) {
        let mut state = self.state.lock().unwrap();
        state.refuse = true;
        state.error_on_refuse = error_on_refuse;
    }

    /// Simulate the mailbox draining one frame. Returns `false` when
    /// nothing was in flight.
    pub fn complete_one(&self) -> bool {
        let mut state = self.state.lock().unwrap();
        if state.in_flight == 0 {
            return false;
        }
        state.in_flight -= 1;
        true
    }

    pub fn max_in_flight(&self) -> usize {
        self.state.lock().unwrap().max_in_flight
    }

    pub fn started(&self) -> bool {
        self.state.lock().unwrap().started
    }
}

impl CanController for MockController {
    type Error = ();

    fn transmit(&mut self, frame: &WireFrame) -> Result<(), Self::Error> {
        let mut state = self.state.lock().unwrap();
        if state.refuse {
            state.error_code = state.error_on_refuse;
            return Err(());
        }
        state.transmitted.push(*frame);
        state.in_flight += 1;
        state.max_in_flight = state.max_in_flight.max(state.in_flight);
        Ok(())
    }

    fn error_code(&self) -> u32 {
        self.state.lock().unwrap().error_code
    }

    fn reset_error(&mut self) {
        self.state.lock().unwrap().error_code = 0;
    }

    fn start(&mut self) {
        self.state.lock().unwrap().started = true;
    }

    fn stop(&mut self) {
        self.state.lock().unwrap().started = false;
    }
}

#[derive(Default)]
#[allow(dead_code)]
/// Receive FIFO filled by the test before "raising" the interrupt.
pub struct MockFifo {
    pub pending: VecDeque<WireFrame>,
}

#[allow(dead_code)]
impl MockFifo {
    pub fn push(&mut self, id: u32, payload: &[u8]) {
        let mut data = [0u8; 8];
        data[..payload.len()].copy_from_slice(payload);
        self.pending.push_back(WireFrame {
            id,
            data,
            dlc: payload.len() as u8,
        });
    }
}

impl CanRxFifo for MockFifo {
    fn read_pending(&mut self) -> Option<WireFrame> {
        self.pending.pop_front()
    }
}

//==================================================================================STACK
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(dead_code)]
pub struct Route {
    pub address: u16,
    pub mask_bits: Option<u8>,
    pub iface: &'static str,
    pub via: Option<u16>,
}

#[allow(dead_code)]
/// Router double: records registrations and inbound frames, and keeps the
/// registered transmitter so tests can route outbound frames through it.
pub struct MockStack<'a, T> {
    pub interfaces: Mutex<Vec<InterfaceInfo>>,
    pub routes: Mutex<Vec<Route>>,
    pub delivered: Mutex<Vec<(u32, Vec<u8>)>>,
    pub fail_register: bool,
    pub fail_route: bool,
    pub refuse_inbound: bool,
    tx: Mutex<Option<&'a T>>,
}

#[allow(dead_code)]
impl<'a, T: FrameTransmitter> MockStack<'a, T> {
    pub fn new() -> Self {
        Self {
            interfaces: Mutex::new(Vec::new()),
            routes: Mutex::new(Vec::new()),
            delivered: Mutex::new(Vec::new()),
            fail_register: false,
            fail_route: false,
            refuse_inbound: false,
            tx: Mutex::new(None),
        }
    }

    pub fn delivered(&self) -> Vec<(u32, Vec<u8>)> {
        self.delivered.lock().unwrap().clone()
    }

    /// Outbound path of the router: hand one frame to the registered interface.
    pub async fn route_out(&self, id: u32, data: &[u8]) -> Option<Result<(), csp_can_link::error::TxError>> {
        let tx = *self.tx.lock().unwrap();
        match tx {
            Some(tx) => Some(tx.transmit_frame(id, data).await),
            None => None,
        }
    }
}

impl<'a, T: FrameTransmitter + 'a> CspStack<'a, T> for MockStack<'a, T> {
    type Error = &'static str;

    fn add_interface(&self, iface: &InterfaceInfo, tx: &'a T) -> Result<(), Self::Error> {
        if self.fail_register {
            return Err("interface table full");
        }
        self.interfaces.lock().unwrap().push(*iface);
        *self.tx.lock().unwrap() = Some(tx);
        Ok(())
    }

    fn set_route(
        &self,
        address: u16,
        mask_bits: Option<u8>,
        iface: &'static str,
        via: Option<u16>,
    ) -> Result<(), Self::Error> {
        if self.fail_route {
            return Err("routing table full");
        }
        self.routes.lock().unwrap().push(Route {
            address,
            mask_bits,
            iface,
            via,
        });
        Ok(())
    }
}

impl<'a, T> CanInbound for MockStack<'a, T> {
    type Error = ();

    fn can_rx(&self, address: u32, data: &[u8]) -> Result<(), Self::Error> {
        if self.refuse_inbound {
            return Err(());
        }
        self.delivered.lock().unwrap().push((address, data.to_vec()));
        Ok(())
    }
}

//==================================================================================SOCKETS
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(dead_code)]
pub struct MockPacket {
    pub src: u16,
    pub payload: Vec<u8>,
}

impl CspPacket for MockPacket {
    fn source(&self) -> u16 {
        self.src
    }

    fn payload(&self) -> &[u8] {
        &self.payload
    }
}

#[allow(dead_code)]
pub struct MockConnection {
    pub packets: VecDeque<MockPacket>,
    pub sport: u8,
    pub dport: u8,
    pub closed: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl MockConnection {
    pub fn new(sport: u8, dport: u8, packets: Vec<MockPacket>, closed: &Arc<AtomicUsize>) -> Self {
        Self {
            packets: packets.into(),
            sport,
            dport,
            closed: closed.clone(),
        }
    }
}

impl CspConnection for MockConnection {
    type Packet = MockPacket;

    async fn read(&mut self, _timeout: Duration) -> Option<Self::Packet> {
        // An empty queue stands for the read timeout.
        self.packets.pop_front()
    }

    fn source_port(&self) -> u8 {
        self.sport
    }

    fn destination_port(&self) -> u8 {
        self.dport
    }

    fn close(self) {
        self.closed.fetch_add(1, Ordering::SeqCst);
    }
}

#[allow(dead_code)]
/// Listening socket replaying a script of accept results. Once the script
/// is exhausted it triggers `shutdown` and keeps timing out.
pub struct MockSocket {
    pub script: VecDeque<Option<MockConnection>>,
    pub accept_calls: usize,
    pub accept_timeouts: Vec<Duration>,
    pub bound: Option<u8>,
    pub backlog: Option<usize>,
    pub fail_bind: bool,
    pub shutdown: Arc<Shutdown>,
}

#[allow(dead_code)]
impl MockSocket {
    pub fn new(script: Vec<Option<MockConnection>>, shutdown: &Arc<Shutdown>) -> Self {
        Self {
            script: script.into(),
            accept_calls: 0,
            accept_timeouts: Vec::new(),
            bound: None,
            backlog: None,
            fail_bind: false,
            shutdown: shutdown.clone(),
        }
    }
}

impl CspSocket for MockSocket {
    type Error = ();
    type Connection = MockConnection;

    fn bind(&mut self, port: u8) -> Result<(), Self::Error> {
        if self.fail_bind {
            return Err(());
        }
        self.bound = Some(port);
        Ok(())
    }

    fn listen(&mut self, backlog: usize) -> Result<(), Self::Error> {
        self.backlog = Some(backlog);
        Ok(())
    }

    async fn accept(&mut self, timeout: Duration) -> Option<Self::Connection> {
        self.accept_calls += 1;
        self.accept_timeouts.push(timeout);
        tokio::task::yield_now().await;
        match self.script.pop_front() {
            Some(result) => result,
            None => {
                self.shutdown.trigger();
                None
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(dead_code)]
pub struct Transaction {
    pub priority: Priority,
    pub dest: u16,
    pub port: u8,
    pub timeout: Duration,
    pub data: Vec<u8>,
}

#[derive(Default)]
#[allow(dead_code)]
pub struct MockServices {
    pub handled: Vec<MockPacket>,
    pub freed: Vec<MockPacket>,
    pub transactions: Vec<Transaction>,
    pub fail_transaction: bool,
}

impl CspServices<MockPacket> for MockServices {
    type Error = ();

    fn service_handler(&mut self, packet: MockPacket) {
        self.handled.push(packet);
    }

    fn buffer_free(&mut self, packet: MockPacket) {
        self.freed.push(packet);
    }

    async fn transaction<'a>(
        &'a mut self,
        priority: Priority,
        dest: u16,
        port: u8,
        timeout: Duration,
        data: &'a [u8],
    ) -> Result<(), Self::Error> {
        self.transactions.push(Transaction {
            priority,
            dest,
            port,
            timeout,
            data: data.to_vec(),
        });
        if self.fail_transaction {
            Err(())
        } else {
            Ok(())
        }
    }
}

#[allow(dead_code)]
/// Routing engine counting its passes; triggers `shutdown` after `stop_after`.
pub struct MockRouter {
    pub passes: usize,
    pub stop_after: usize,
    pub shutdown: Arc<Shutdown>,
}

impl CspRouter for MockRouter {
    async fn route_work(&mut self) {
        tokio::task::yield_now().await;
        self.passes += 1;
        if self.passes >= self.stop_after {
            self.shutdown.trigger();
        }
    }
}

#[allow(dead_code)]
pub fn packet(src: u16, payload: &[u8]) -> MockPacket {
    MockPacket {
        src,
        payload: payload.to_vec(),
    }
}
