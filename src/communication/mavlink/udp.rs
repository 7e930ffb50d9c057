//! MAVLink over UDP
//!
//! The link owns a reader thread that receives datagrams, decodes every frame
//! and routes the messages the pipeline uses into one bounded inbox per
//! [`MessageKind`]. A full inbox drops its oldest message, so a slow consumer
//! always sees recent telemetry.
//!
//! The peer is either configured up front or learned from the first datagram
//! received, the way a ground station finds its vehicle.

use std::io;
use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicU8, Ordering};
use std::sync::{Arc, OnceLock};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError, TrySendError};
use mavlink::common::MavMessage;
use mavlink::MavHeader;
use waypoint_pilot_core::link::{LinkMessage, MessageKind, VehicleCommand};

use super::codec;
use crate::communication::{LinkError, VehicleLink};
use crate::config::LinkConfig;
use crate::{log_debug, log_info, log_warn};

/// Receive buffer; a datagram may carry several frames
const RECV_BUFFER_LEN: usize = 4 * codec::MAX_FRAME_LEN;

/// Counters kept by the reader thread
#[derive(Debug, Default)]
struct LinkCounters {
    datagrams: AtomicU64,
    messages: AtomicU64,
    undecodable: AtomicU64,
    dropped: AtomicU64,
}

/// Point-in-time copy of the link counters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LinkStats {
    /// Datagrams received
    pub datagrams: u64,
    /// Messages routed to an inbox
    pub messages: u64,
    /// Datagrams with no decodable frame
    pub undecodable: u64,
    /// Messages evicted from a full inbox
    pub dropped: u64,
}

struct Inbox {
    tx: Sender<LinkMessage>,
    rx: Receiver<LinkMessage>,
}

impl Inbox {
    fn new(capacity: usize) -> Self {
        let (tx, rx) = crossbeam_channel::bounded(capacity.max(1));
        Self { tx, rx }
    }

    /// Queue a message, evicting the oldest when full. Returns true on eviction.
    fn deliver(&self, msg: LinkMessage) -> bool {
        match self.tx.try_send(msg) {
            Ok(()) => false,
            Err(TrySendError::Full(msg)) => {
                let _ = self.rx.try_recv();
                let _ = self.tx.try_send(msg);
                true
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

/// State shared between the link handle and its reader thread
struct Shared {
    peer: OnceLock<SocketAddr>,
    closed: AtomicBool,
    counters: LinkCounters,
}

/// MAVLink UDP connection to one vehicle
pub struct UdpMavlinkLink {
    socket: UdpSocket,
    shared: Arc<Shared>,
    inbox: [Receiver<LinkMessage>; 3],
    system_id: u8,
    component_id: u8,
    target_system: u8,
    target_component: u8,
    sequence: AtomicU8,
    reader: Option<JoinHandle<()>>,
}

impl UdpMavlinkLink {
    /// Bind the socket and start the reader thread.
    pub fn open(config: &LinkConfig) -> Result<Self, LinkError> {
        let socket = UdpSocket::bind(config.bind.as_str())?;
        let read_timeout = Duration::from_millis(config.read_timeout_ms.max(1));
        socket.set_read_timeout(Some(read_timeout))?;

        let shared = Arc::new(Shared {
            peer: OnceLock::new(),
            closed: AtomicBool::new(false),
            counters: LinkCounters::default(),
        });
        if let Some(peer) = &config.peer {
            let addr = resolve(peer)?;
            let _ = shared.peer.set(addr);
        }

        let inboxes = MessageKind::ALL.map(|_| Inbox::new(config.inbox_capacity));
        let inbox = [
            inboxes[0].rx.clone(),
            inboxes[1].rx.clone(),
            inboxes[2].rx.clone(),
        ];

        let reader_socket = socket.try_clone()?;
        let reader_shared = Arc::clone(&shared);
        let reader = thread::Builder::new()
            .name("mavlink-reader".into())
            .spawn(move || run_reader(reader_socket, reader_shared, inboxes))?;

        let local = socket.local_addr()?;
        match shared.peer.get() {
            Some(peer) => log_info!("MAVLink link bound to {}, vehicle at {}", local, peer),
            None => log_info!("MAVLink link bound to {}, waiting for vehicle", local),
        }

        Ok(Self {
            socket,
            shared,
            inbox,
            system_id: config.system_id,
            component_id: config.component_id,
            target_system: config.target_system,
            target_component: config.target_component,
            sequence: AtomicU8::new(0),
            reader: Some(reader),
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Configured or discovered vehicle address
    pub fn peer_addr(&self) -> Option<SocketAddr> {
        self.shared.peer.get().copied()
    }

    pub fn stats(&self) -> LinkStats {
        let c = &self.shared.counters;
        LinkStats {
            datagrams: c.datagrams.load(Ordering::Relaxed),
            messages: c.messages.load(Ordering::Relaxed),
            undecodable: c.undecodable.load(Ordering::Relaxed),
            dropped: c.dropped.load(Ordering::Relaxed),
        }
    }

    /// Stop the reader thread. Pending inbox messages stay readable; once they
    /// are consumed `recv` returns [`LinkError::Closed`].
    pub fn close(&self) {
        self.shared.closed.store(true, Ordering::Release);
    }

    fn send_message(&self, msg: &MavMessage) -> Result<(), LinkError> {
        let addr = self.peer_addr().ok_or(LinkError::PeerUnknown)?;
        let header = MavHeader {
            system_id: self.system_id,
            component_id: self.component_id,
            sequence: self.sequence.fetch_add(1, Ordering::Relaxed),
        };
        let frame = codec::write_frame(header, msg)?;
        self.socket.send_to(&frame, addr)?;
        Ok(())
    }
}

impl VehicleLink for UdpMavlinkLink {
    fn recv(
        &self,
        kind: MessageKind,
        timeout: Duration,
    ) -> Result<Option<LinkMessage>, LinkError> {
        let rx = &self.inbox[kind.index()];
        if timeout.is_zero() {
            return match rx.try_recv() {
                Ok(msg) => Ok(Some(msg)),
                Err(TryRecvError::Empty) => Ok(None),
                Err(TryRecvError::Disconnected) => Err(LinkError::Closed),
            };
        }
        match rx.recv_timeout(timeout) {
            Ok(msg) => Ok(Some(msg)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(LinkError::Closed),
        }
    }

    fn send_command(&self, command: &VehicleCommand) -> Result<(), LinkError> {
        let msg = codec::encode_command(command, self.target_system, self.target_component);
        self.send_message(&msg)
    }

    fn send_heartbeat(&self) -> Result<(), LinkError> {
        self.send_message(&codec::build_gcs_heartbeat())
    }
}

impl Drop for UdpMavlinkLink {
    fn drop(&mut self) {
        self.close();
        if let Some(reader) = self.reader.take() {
            let _ = reader.join();
        }
        log_debug!("MAVLink link closed: {:?}", self.stats());
    }
}

fn resolve(addr: &str) -> Result<SocketAddr, LinkError> {
    addr.to_socket_addrs()?.next().ok_or_else(|| {
        LinkError::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("no address for '{addr}'"),
        ))
    })
}

fn run_reader(socket: UdpSocket, shared: Arc<Shared>, inboxes: [Inbox; 3]) {
    let mut buf = vec![0u8; RECV_BUFFER_LEN];
    let counters = &shared.counters;

    while !shared.closed.load(Ordering::Acquire) {
        let (len, from) = match socket.recv_from(&mut buf) {
            Ok(received) => received,
            Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) => {
                continue;
            }
            Err(e) => {
                log_warn!("MAVLink receive failed: {}", e);
                thread::sleep(Duration::from_millis(10));
                continue;
            }
        };
        counters.datagrams.fetch_add(1, Ordering::Relaxed);
        if shared.peer.set(from).is_ok() {
            log_info!("Vehicle discovered at {}", from);
        }

        let frames = codec::parse_datagram(&buf[..len]);
        if frames.is_empty() {
            counters.undecodable.fetch_add(1, Ordering::Relaxed);
            continue;
        }
        for (_, frame) in frames {
            let Some(msg) = codec::decode(&frame) else {
                continue;
            };
            if inboxes[msg.kind().index()].deliver(msg) {
                counters.dropped.fetch_add(1, Ordering::Relaxed);
            }
            counters.messages.fetch_add(1, Ordering::Relaxed);
        }
    }
}
