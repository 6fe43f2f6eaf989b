use std::ffi::c_void;
use std::io;
use std::os::fd::{AsRawFd, FromRawFd, OwnedFd};

use super::{RangeReply, RangeSource, TransportError};

const IFNAMSIZ: usize = libc::IFNAMSIZ;

/// `struct iw_point`.
#[repr(C)]
#[derive(Clone, Copy)]
struct IwPoint {
    pointer: *mut c_void,
    length: u16,
    flags: u16,
}

/// The parts of `union iwreq_data` we use; `sockaddr` pins the union size.
#[repr(C)]
#[derive(Clone, Copy)]
union IwReqData {
    data: IwPoint,
    #[allow(dead_code)]
    addr: libc::sockaddr,
}

/// `struct iwreq`.
#[repr(C)]
struct IwReq {
    ifr_name: [libc::c_char; IFNAMSIZ],
    u: IwReqData,
}

/// Queries the kernel through `ioctl(2)` on a datagram socket.
#[derive(Debug, Default, Clone, Copy)]
pub struct IoctlRangeSource;

impl IoctlRangeSource {
    pub fn new() -> Self {
        Self
    }
}

impl RangeSource for IoctlRangeSource {
    fn query(
        &mut self,
        device: &str,
        request: u32,
        capacity: usize,
    ) -> Result<RangeReply, TransportError> {
        let ifr_name = device_name(device)?;
        let length = u16::try_from(capacity).unwrap_or(u16::MAX);
        let mut data = vec![0u8; usize::from(length)];
        let socket = open_socket()?;

        let mut req = IwReq {
            ifr_name,
            u: IwReqData {
                data: IwPoint {
                    pointer: data.as_mut_ptr().cast(),
                    length,
                    flags: 0,
                },
            },
        };
        // SAFETY: `req` is a valid iwreq whose data pointer refers to `data`,
        // which outlives the call and is `length` bytes long.
        let rc = unsafe { libc::ioctl(socket.as_raw_fd(), request as _, &mut req as *mut IwReq) };
        if rc < 0 {
            let err = io::Error::last_os_error();
            tracing::debug!(device, %err, "range ioctl failed");
            return Err(err.into());
        }

        // SAFETY: the kernel writes the reply length back into the iw_point
        // member it was given.
        let reported_len = usize::from(unsafe { req.u.data.length });
        tracing::debug!(device, reported_len, "range ioctl succeeded");
        Ok(RangeReply { data, reported_len })
    }
}

fn open_socket() -> Result<OwnedFd, TransportError> {
    // SAFETY: socket(2) with constant arguments has no memory-safety
    // preconditions.
    let fd = unsafe { libc::socket(libc::AF_INET, libc::SOCK_DGRAM | libc::SOCK_CLOEXEC, 0) };
    if fd < 0 {
        return Err(io::Error::last_os_error().into());
    }
    // SAFETY: `fd` was just returned by socket(2) and is owned by nobody else.
    Ok(unsafe { OwnedFd::from_raw_fd(fd) })
}

/// NUL-padded interface name for `ifr_name`.
fn device_name(device: &str) -> Result<[libc::c_char; IFNAMSIZ], TransportError> {
    let invalid = |reason| TransportError::InvalidDevice {
        name: device.to_string(),
        reason,
    };
    if device.is_empty() {
        return Err(invalid("empty name"));
    }
    if device.bytes().any(|b| b == 0) {
        return Err(invalid("contains a NUL byte"));
    }
    if device.len() >= IFNAMSIZ {
        return Err(invalid("longer than 15 bytes"));
    }

    let mut name = [0 as libc::c_char; IFNAMSIZ];
    for (dst, src) in name.iter_mut().zip(device.bytes()) {
        *dst = src as libc::c_char;
    }
    Ok(name)
}
