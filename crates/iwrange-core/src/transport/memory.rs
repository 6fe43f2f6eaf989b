use std::collections::HashMap;
use std::io;

use super::{RangeReply, RangeSource, TransportError, fit_to_capacity};

/// Scripted range source for tests: fixed replies or failures per device.
///
/// Unknown devices fail with `NotFound`, like `ENODEV` from the kernel.
#[derive(Debug, Default)]
pub struct MemoryRangeSource {
    replies: HashMap<String, Result<RangeReply, io::ErrorKind>>,
    queries: Vec<String>,
}

impl MemoryRangeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reply(mut self, device: &str, data: Vec<u8>, reported_len: usize) -> Self {
        self.replies.insert(
            device.to_string(),
            Ok(RangeReply { data, reported_len }),
        );
        self
    }

    pub fn with_error(mut self, device: &str, kind: io::ErrorKind) -> Self {
        self.replies.insert(device.to_string(), Err(kind));
        self
    }

    /// Devices queried so far, in order.
    pub fn queries(&self) -> &[String] {
        &self.queries
    }
}

impl RangeSource for MemoryRangeSource {
    fn query(
        &mut self,
        device: &str,
        _request: u32,
        capacity: usize,
    ) -> Result<RangeReply, TransportError> {
        self.queries.push(device.to_string());
        match self.replies.get(device) {
            Some(Ok(reply)) => Ok(RangeReply {
                data: fit_to_capacity(reply.data.clone(), capacity),
                reported_len: reply.reported_len,
            }),
            Some(Err(kind)) => Err(io::Error::from(*kind).into()),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such device: {device}"),
            )
            .into()),
        }
    }
}
