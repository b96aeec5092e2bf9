use std::io;
use thiserror::Error;

/// Coarse classification of a failed probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad arguments; nothing touched the network.
    Input,
    /// The raw socket could not be opened, usually for lack of privilege.
    Resource,
    /// The send or a receive failed.
    Transport,
}

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("empty target address")]
    EmptyAddress,
    #[error("timeout must be greater than 0")]
    ZeroTimeout,
    #[error("invalid IPv4 address: {0}")]
    InvalidAddress(String),
    #[error("the IP address is broadcast")]
    BroadcastAddress,
    #[error("failed to create raw socket: {0}. Root or CAP_NET_RAW may be required")]
    SocketCreation(#[source] io::Error),
    #[error("error sending packet: {0}")]
    Send(#[source] io::Error),
    #[error("error sending packet: no bytes written")]
    NothingSent,
    #[error("receive error: {0}")]
    Receive(#[source] io::Error),
}

impl ProbeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProbeError::EmptyAddress
            | ProbeError::ZeroTimeout
            | ProbeError::InvalidAddress(_)
            | ProbeError::BroadcastAddress => ErrorKind::Input,
            ProbeError::SocketCreation(_) => ErrorKind::Resource,
            ProbeError::Send(_) | ProbeError::NothingSent | ProbeError::Receive(_) => ErrorKind::Transport,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(ProbeError::EmptyAddress.kind(), ErrorKind::Input);
        assert_eq!(ProbeError::BroadcastAddress.kind(), ErrorKind::Input);
        let denied = io::Error::from(io::ErrorKind::PermissionDenied);
        assert_eq!(ProbeError::SocketCreation(denied).kind(), ErrorKind::Resource);
        assert_eq!(ProbeError::NothingSent.kind(), ErrorKind::Transport);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ProbeError::InvalidAddress("10.0.0".into()).to_string(),
            "invalid IPv4 address: 10.0.0"
        );
        let err = ProbeError::Receive(io::Error::new(io::ErrorKind::Other, "boom"));
        assert_eq!(err.to_string(), "receive error: boom");
    }
}
