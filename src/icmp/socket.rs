use socket2::{Domain, Protocol, SockAddr, Socket, Type};
use std::io;
use std::mem::MaybeUninit;
use std::net::{Ipv4Addr, SocketAddrV4};
use std::time::Duration;

/// The two socket operations a probe needs.
pub trait EchoSocket {
    fn send_to(&self, buf: &[u8], target: Ipv4Addr) -> io::Result<usize>;

    /// Reads one datagram, waiting at most `wait` for it to arrive.
    ///
    /// Returns `Ok(None)` when the wait passes with nothing to read.
    fn recv_within(&self, buf: &mut [u8], wait: Duration) -> io::Result<Option<(usize, Ipv4Addr)>>;
}

/// A raw ICMPv4 socket. Reads include the IPv4 header.
///
/// The descriptor is closed when the value is dropped.
pub struct RawIcmpSocket {
    socket: Socket,
}

impl RawIcmpSocket {
    pub fn new() -> io::Result<Self> {
        let socket = Socket::new(Domain::IPV4, Type::RAW, Some(Protocol::ICMPV4))?;
        socket.set_nonblocking(false)?;
        log::debug!("opened raw ICMPv4 socket");
        Ok(Self { socket })
    }
}

impl EchoSocket for RawIcmpSocket {
    fn send_to(&self, buf: &[u8], target: Ipv4Addr) -> io::Result<usize> {
        let addr = SockAddr::from(SocketAddrV4::new(target, 0));
        self.socket.send_to(buf, &addr)
    }

    fn recv_within(&self, buf: &mut [u8], wait: Duration) -> io::Result<Option<(usize, Ipv4Addr)>> {
        // A zero read timeout is rejected by the OS and would mean "block forever" anyway.
        if wait.is_zero() {
            return Ok(None);
        }
        self.socket.set_read_timeout(Some(wait))?;

        // SAFETY: socket2 never writes uninitialised bytes into the buffer, so
        // handing it initialised memory typed as `MaybeUninit<u8>` is sound.
        let uninit = unsafe { &mut *(buf as *mut [u8] as *mut [MaybeUninit<u8>]) };

        match self.socket.recv_from(uninit) {
            Ok((len, addr)) => {
                let source = addr.as_socket_ipv4().map(|a| *a.ip()).ok_or_else(|| {
                    io::Error::new(io::ErrorKind::InvalidData, "datagram from a non-IPv4 address")
                })?;
                Ok(Some((len, source)))
            }
            Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Whether this process may open raw ICMP sockets.
pub fn raw_sockets_available() -> bool {
    RawIcmpSocket::new().is_ok()
}
