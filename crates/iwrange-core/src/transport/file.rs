use std::fs;
use std::path::{Path, PathBuf};

use super::{RangeReply, RangeSource, TransportError, fit_to_capacity};

/// Replays a raw range reply captured to disk.
///
/// The device name is ignored. Unless overridden, the reported length is the
/// file size, as if the driver had written the whole dump.
#[derive(Debug, Clone)]
pub struct FileRangeSource {
    path: PathBuf,
    reported_len: Option<usize>,
}

impl FileRangeSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            reported_len: None,
        }
    }

    pub fn with_reported_len(mut self, reported_len: usize) -> Self {
        self.reported_len = Some(reported_len);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RangeSource for FileRangeSource {
    fn query(
        &mut self,
        device: &str,
        _request: u32,
        capacity: usize,
    ) -> Result<RangeReply, TransportError> {
        let data = fs::read(&self.path)?;
        let reported_len = self.reported_len.unwrap_or(data.len());
        tracing::debug!(
            path = %self.path.display(),
            device,
            file_len = data.len(),
            reported_len,
            "replaying range reply"
        );
        Ok(RangeReply {
            data: fit_to_capacity(data, capacity),
            reported_len,
        })
    }
}
