//! Single-shot ICMP echo probing over a raw IPv4 socket.
//!
//! [`probe()`] sends one echo request and waits for the matching reply, never
//! longer than the given timeout in total, however much unrelated ICMP
//! traffic arrives in between.

pub mod clock;
pub mod error;
pub mod icmp;
pub mod probe;

pub use error::{ErrorKind, ProbeError};
pub use probe::{probe, probe_with, Destination, ProbeOutcome};
