pub mod checksum;
pub mod packet;
pub mod socket;

pub use checksum::*;
pub use packet::*;
pub use socket::*;
