use std::io;

use thiserror::Error;

use crate::range::{KERNEL, RangeProfile, RangeRecord, decode_range};
use crate::transport::{RangeSource, SIOCGIWRANGE, TransportError};

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("range query failed: {0}")]
    Transport(#[from] TransportError),
}

impl QueryError {
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            QueryError::Transport(err) => err.kind(),
        }
    }
}

/// Fetch and decode the range record of `device`.
///
/// One transport query, one decode. Transport failures are returned as-is;
/// nothing is decoded when the query fails.
pub fn query_range<S: RangeSource + ?Sized>(
    source: &mut S,
    profile: &RangeProfile,
    device: &str,
) -> Result<RangeRecord, QueryError> {
    let reply = source.query(device, SIOCGIWRANGE, profile.buffer_len())?;
    Ok(decode_range(profile, &reply.data, reply.reported_len))
}

/// Maximum link quality (`max_qual.qual`) advertised by `device`.
///
/// # Examples
/// ```
/// use iwrange_core::range::{KERNEL, layout};
/// use iwrange_core::{MemoryRangeSource, max_quality};
///
/// let mut raw = vec![0u8; 400];
/// raw[layout::WE_VERSION_COMPILED_OFFSET] = 20;
/// raw[layout::MAX_QUAL_RANGE.start] = 70;
/// let mut source = MemoryRangeSource::new().with_reply("wlan0", raw, 400);
///
/// assert_eq!(max_quality(&mut source, &KERNEL, "wlan0")?, 70);
/// # Ok::<(), iwrange_core::QueryError>(())
/// ```
pub fn max_quality<S: RangeSource + ?Sized>(
    source: &mut S,
    profile: &RangeProfile,
    device: &str,
) -> Result<u8, QueryError> {
    Ok(query_range(source, profile, device)?.max_qual().qual)
}

/// [`query_range`] against the running kernel.
#[cfg(target_os = "linux")]
pub fn query_device_range(profile: &RangeProfile, device: &str) -> Result<RangeRecord, QueryError> {
    let mut source = crate::transport::IoctlRangeSource::new();
    query_range(&mut source, profile, device)
}

#[cfg(not(target_os = "linux"))]
pub fn query_device_range(profile: &RangeProfile, device: &str) -> Result<RangeRecord, QueryError> {
    tracing::debug!(device, profile = profile.name, "no range transport on this platform");
    Err(TransportError::Unsupported.into())
}

/// [`max_quality`] against the running kernel with the default profile.
pub fn max_quality_for_device(device: &str) -> Result<u8, QueryError> {
    Ok(query_device_range(&KERNEL, device)?.max_qual().qual)
}
