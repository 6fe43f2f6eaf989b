//! Where range replies come from.
//!
//! `RangeSource` is the only seam between the decoder and the outside world:
//! send one request to a named device, get back a buffer plus the length the
//! driver reported. The ioctl source talks to the kernel; the file and memory
//! sources replay captured or scripted replies.

mod file;
#[cfg(target_os = "linux")]
mod ioctl;
mod memory;

pub use file::FileRangeSource;
#[cfg(target_os = "linux")]
pub use ioctl::IoctlRangeSource;
pub use memory::MemoryRangeSource;

use std::io;

use thiserror::Error;

/// Wireless Extensions request code for "get range info".
pub const SIOCGIWRANGE: u32 = 0x8B0B;

/// Raw reply to a range request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeReply {
    /// Reply buffer, `capacity` bytes long; unused bytes are zero.
    pub data: Vec<u8>,
    /// Length the driver claims to have written.
    pub reported_len: usize,
}

pub trait RangeSource {
    /// Issue `request` to `device` with a reply buffer of `capacity` bytes.
    fn query(
        &mut self,
        device: &str,
        request: u32,
        capacity: usize,
    ) -> Result<RangeReply, TransportError>;
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid device name {name:?}: {reason}")]
    InvalidDevice { name: String, reason: &'static str },
    #[error("range queries are not supported on this platform")]
    Unsupported,
}

impl TransportError {
    /// The `std::io::ErrorKind` this failure maps to.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            TransportError::Io(err) => err.kind(),
            TransportError::InvalidDevice { .. } => io::ErrorKind::InvalidInput,
            TransportError::Unsupported => io::ErrorKind::Unsupported,
        }
    }
}

/// Size `data` to exactly `capacity` bytes, zero-filling any shortfall.
pub(crate) fn fit_to_capacity(mut data: Vec<u8>, capacity: usize) -> Vec<u8> {
    data.resize(capacity, 0);
    data
}
