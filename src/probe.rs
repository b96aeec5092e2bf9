use std::net::Ipv4Addr;
use std::time::Duration;

use crate::clock;
use crate::error::ProbeError;
use crate::icmp::{build_echo_request, EchoSocket, IcmpEchoPacket, Ipv4Datagram, RawIcmpSocket};

// Room for a maximal IPv4 header (60 bytes) plus an echo packet, with slack.
const RECV_BUFFER_SIZE: usize = 1024;

/// How a probe that did not fail ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    Success { elapsed_ms: u64 },
    Timeout,
}

/// A validated probe target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Destination {
    pub addr: Ipv4Addr,
    pub timeout_ms: u64,
}

impl Destination {
    pub fn parse(address: &str, timeout_ms: u64) -> Result<Self, ProbeError> {
        if address.is_empty() {
            return Err(ProbeError::EmptyAddress);
        }
        if timeout_ms == 0 {
            return Err(ProbeError::ZeroTimeout);
        }

        let addr: Ipv4Addr = address
            .parse()
            .map_err(|_| ProbeError::InvalidAddress(address.to_string()))?;

        if address == "255.255.255.255" || u32::from(addr) == u32::MAX {
            return Err(ProbeError::BroadcastAddress);
        }

        Ok(Self { addr, timeout_ms })
    }
}

/// Sends one echo request to `address` and waits up to `timeout_ms` for the reply.
///
/// Input is checked before any socket is opened. The socket lives only for
/// this call and is closed on every return path.
pub fn probe(address: &str, timeout_ms: u64) -> Result<ProbeOutcome, ProbeError> {
    let destination = Destination::parse(address, timeout_ms)?;
    let socket = RawIcmpSocket::new().map_err(ProbeError::SocketCreation)?;
    let packet = build_echo_request();
    probe_with(&socket, &destination, &packet)
}

/// Runs the send and wait steps of a probe over an already opened socket.
pub fn probe_with<S: EchoSocket>(
    socket: &S,
    destination: &Destination,
    packet: &IcmpEchoPacket,
) -> Result<ProbeOutcome, ProbeError> {
    let timeout_ms = destination.timeout_ms;
    let bytes = packet.to_bytes();

    let start = clock::now_ms();
    log::debug!(
        "Sending ICMP echo to {}: {} bytes, id={:#06x}",
        destination.addr,
        bytes.len(),
        packet.identifier
    );
    let written = socket.send_to(&bytes, destination.addr).map_err(ProbeError::Send)?;
    if written == 0 {
        return Err(ProbeError::NothingSent);
    }

    let mut buffer = [0u8; RECV_BUFFER_SIZE];
    let mut remaining_ms = timeout_ms;

    loop {
        let received = socket
            .recv_within(&mut buffer, Duration::from_millis(remaining_ms))
            .map_err(ProbeError::Receive)?;

        let Some((len, source)) = received else {
            log::debug!("No reply from {} within {}ms", destination.addr, timeout_ms);
            return Ok(ProbeOutcome::Timeout);
        };

        // A reply that shows up after the deadline still counts as a timeout.
        let elapsed_ms = clock::now_ms().saturating_sub(start);
        if elapsed_ms > timeout_ms {
            log::debug!("Deadline passed while reading ({}ms > {}ms)", elapsed_ms, timeout_ms);
            return Ok(ProbeOutcome::Timeout);
        }
        remaining_ms = timeout_ms - elapsed_ms;

        let Some(datagram) = Ipv4Datagram::parse(&buffer[..len.min(RECV_BUFFER_SIZE)]) else {
            log::trace!("Dropping {}-byte datagram from {}: too short", len, source);
            continue;
        };

        if source == destination.addr && datagram.is_echo_reply() && datagram.identifier() == packet.identifier {
            log::debug!("Echo reply from {} after {}ms", source, elapsed_ms);
            return Ok(ProbeOutcome::Success { elapsed_ms });
        }

        log::trace!(
            "Ignoring ICMP type {} id={:#06x} seq={:?} from {}",
            datagram.icmp_type(),
            datagram.identifier(),
            datagram.sequence(),
            source
        );
    }
}
