use byteorder::{BigEndian, ByteOrder, ReadBytesExt};
use rand::Rng;
use std::io::{Cursor, Read};

use crate::icmp::checksum::{checksum, ones_complement_sum};

pub const ICMP_ECHO_REQUEST: u8 = 8;
pub const ICMP_ECHO_REPLY: u8 = 0;

pub const ICMP_HEADER_SIZE: usize = 8;
pub const PAYLOAD_SIZE: usize = 64;
pub const PACKET_SIZE: usize = ICMP_HEADER_SIZE + PAYLOAD_SIZE;

const IPV4_MIN_HEADER_SIZE: usize = 20;
// type(1) + code(1) + checksum(2) + identifier(2)
const IDENTIFIER_END: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IcmpEchoPacket {
    pub icmp_type: u8,
    pub code: u8,
    pub checksum: u16,
    pub identifier: u16,
    pub sequence: u16,
    pub payload: [u8; PAYLOAD_SIZE],
}

impl IcmpEchoPacket {
    /// Echo request with sequence 0 and a zeroed payload, checksum filled in.
    pub fn new_echo_request(identifier: u16) -> Self {
        let mut packet = Self {
            icmp_type: ICMP_ECHO_REQUEST,
            code: 0,
            checksum: 0,
            identifier,
            sequence: 0,
            payload: [0; PAYLOAD_SIZE],
        };

        packet.calculate_checksum();
        packet
    }

    pub fn from_bytes(data: &[u8]) -> anyhow::Result<Self> {
        if data.len() < PACKET_SIZE {
            return Err(anyhow::anyhow!(
                "ICMP echo packet too short: {} bytes, need {}",
                data.len(),
                PACKET_SIZE
            ));
        }

        let mut cursor = Cursor::new(data);
        let icmp_type = cursor.read_u8()?;
        let code = cursor.read_u8()?;
        let checksum = cursor.read_u16::<BigEndian>()?;
        let identifier = cursor.read_u16::<BigEndian>()?;
        let sequence = cursor.read_u16::<BigEndian>()?;

        let mut payload = [0u8; PAYLOAD_SIZE];
        cursor.read_exact(&mut payload)?;

        Ok(Self {
            icmp_type,
            code,
            checksum,
            identifier,
            sequence,
            payload,
        })
    }

    pub fn to_bytes(&self) -> [u8; PACKET_SIZE] {
        let mut bytes = [0u8; PACKET_SIZE];
        bytes[0] = self.icmp_type;
        bytes[1] = self.code;
        BigEndian::write_u16(&mut bytes[2..4], self.checksum);
        BigEndian::write_u16(&mut bytes[4..6], self.identifier);
        BigEndian::write_u16(&mut bytes[6..8], self.sequence);
        bytes[ICMP_HEADER_SIZE..].copy_from_slice(&self.payload);
        bytes
    }

    pub fn calculate_checksum(&mut self) {
        self.checksum = 0;
        let bytes = self.to_bytes();
        self.checksum = checksum(&bytes);
    }

    pub fn verify_checksum(&self) -> bool {
        ones_complement_sum(&self.to_bytes()) == 0xFFFF
    }
}

/// Generate a random identifier for ICMP packets.
///
/// `thread_rng` is seeded from the OS once per thread, so back-to-back probes
/// do not repeat identifiers the way a clock-seeded generator would.
pub fn generate_identifier() -> u16 {
    rand::thread_rng().gen_range(1..=u16::MAX)
}

/// Builds a fresh echo request with a random identifier.
pub fn build_echo_request() -> IcmpEchoPacket {
    IcmpEchoPacket::new_echo_request(generate_identifier())
}

/// A datagram as read from a raw ICMPv4 socket: IPv4 header, then ICMP.
#[derive(Debug, Clone, Copy)]
pub struct Ipv4Datagram<'a> {
    icmp: &'a [u8],
}

impl<'a> Ipv4Datagram<'a> {
    /// Returns `None` when the read is too short to hold an ICMP identifier.
    pub fn parse(data: &'a [u8]) -> Option<Self> {
        let header_len = match data.first() {
            Some(first) if first >> 4 == 4 => usize::from(first & 0x0F) * 4,
            _ => IPV4_MIN_HEADER_SIZE,
        };
        let header_len = header_len.max(IPV4_MIN_HEADER_SIZE);

        let icmp = data.get(header_len..)?;
        if icmp.len() < IDENTIFIER_END {
            return None;
        }
        Some(Self { icmp })
    }

    pub fn icmp_type(&self) -> u8 {
        self.icmp[0]
    }

    pub fn identifier(&self) -> u16 {
        BigEndian::read_u16(&self.icmp[4..IDENTIFIER_END])
    }

    pub fn sequence(&self) -> Option<u16> {
        match self.icmp.get(6..8) {
            Some(&[hi, lo]) => Some(u16::from_be_bytes([hi, lo])),
            _ => None,
        }
    }

    pub fn is_echo_reply(&self) -> bool {
        self.icmp_type() == ICMP_ECHO_REPLY
    }
}
