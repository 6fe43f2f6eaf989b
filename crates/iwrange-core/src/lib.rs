//! iwrange core library: Wireless Extensions range queries.
//!
//! A `SIOCGIWRANGE` reply is a `struct iw_range` in whichever layout the
//! driver was compiled against. This crate fetches the reply through a
//! `RangeSource`, decodes it into the canonical layout (`range`), and derives
//! the quality ceiling callers use to normalise link quality readings.
//! Decoding is byte-oriented and side-effect free; all I/O lives in
//! `transport`.
//!
//! Invariants:
//! - Every decode yields a fully defined canonical record; fields the source
//!   revision did not carry read as zero.
//! - Replies shorter than 300 bytes are treated as WE-9.
//! - The only failure of a query is the transport's.
//!
//! # Examples
//! ```no_run
//! use iwrange_core::max_quality_for_device;
//!
//! let max = max_quality_for_device("wlan0")?;
//! println!("quality ceiling: {max}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

mod quality;
pub mod range;
pub mod transport;

pub use quality::{
    QueryError, max_quality, max_quality_for_device, query_device_range, query_range,
};
use range::{ExtendedCapabilities, Frequency, Quality, RangeRecord, Regime};
pub use transport::{
    FileRangeSource, MemoryRangeSource, RangeReply, RangeSource, TransportError,
};
#[cfg(target_os = "linux")]
pub use transport::IoctlRangeSource;

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;
/// Default timestamp used when no generation time is supplied.
pub const DEFAULT_GENERATED_AT: &str = "1970-01-01T00:00:00Z";

/// A `(min, max)` pair from the range record.
///
/// # Examples
/// ```
/// use iwrange_core::Bounds;
///
/// let rts = Bounds::from((0, 2347));
/// assert_eq!(rts.max, 2347);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: i32,
    pub max: i32,
}

impl From<(i32, i32)> for Bounds {
    fn from((min, max): (i32, i32)) -> Self {
        Self { min, max }
    }
}

/// Serializable view of a decoded range record.
///
/// Lists are cut to the counts the record reports, clamped to the canonical
/// capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeSummary {
    /// Layout profile the record was decoded with.
    pub profile: String,
    /// WE revision of the reply.
    pub revision: u8,
    pub regime: Regime,
    /// Whether the revision was guessed from a short reply.
    pub revision_inferred: bool,
    /// Length the driver reported.
    pub reported_len: usize,
    pub throughput: u32,
    pub sensitivity: i32,
    pub max_qual: Quality,
    pub avg_qual: Quality,
    pub bitrates: Vec<i32>,
    pub rts: Bounds,
    pub frag: Bounds,
    pub pm_period: Bounds,
    pub pm_timeout: Bounds,
    pub pm_capa: u16,
    pub encoding_sizes: Vec<u16>,
    pub max_encoding_tokens: u8,
    pub txpower_capa: u16,
    pub txpower: Vec<i32>,
    pub we_version_compiled: u8,
    pub we_version_source: u8,
    pub retry: Bounds,
    pub retry_lifetime: Bounds,
    pub num_channels: u16,
    pub frequencies: Vec<Frequency>,
    pub enc_capa: u32,
    /// wireless-tools tail, present only for profiles that carry it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extended: Option<ExtendedCapabilities>,
}

impl RangeSummary {
    pub fn from_record(record: &RangeRecord) -> Self {
        let revision = record.revision();
        Self {
            profile: record.profile().name.to_string(),
            revision: revision.tag,
            regime: revision.regime(),
            revision_inferred: revision.inferred,
            reported_len: record.reported_len(),
            throughput: record.throughput(),
            sensitivity: record.sensitivity(),
            max_qual: record.max_qual(),
            avg_qual: record.avg_qual(),
            bitrates: record.bitrates(),
            rts: record.rts().into(),
            frag: record.frag().into(),
            pm_period: record.pm_period().into(),
            pm_timeout: record.pm_timeout().into(),
            pm_capa: record.pm_capa(),
            encoding_sizes: record.encoding_sizes(),
            max_encoding_tokens: record.max_encoding_tokens(),
            txpower_capa: record.txpower_capa(),
            txpower: record.txpower(),
            we_version_compiled: record.we_version_compiled(),
            we_version_source: record.we_version_source(),
            retry: record.retry().into(),
            retry_lifetime: record.retry_lifetime().into(),
            num_channels: record.num_channels(),
            frequencies: record.frequencies(),
            enc_capa: record.enc_capa(),
            extended: record.extended(),
        }
    }
}

/// Tool metadata embedded in reports.
///
/// # Examples
/// ```
/// use iwrange_core::ToolInfo;
///
/// let tool = ToolInfo {
///     name: "iwrange".to_string(),
///     version: "0.1.0".to_string(),
/// };
/// assert_eq!(tool.name, "iwrange");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInfo {
    /// Tool name (e.g., "iwrange").
    pub name: String,
    /// Tool version (semver).
    pub version: String,
}

/// Versioned JSON report for one device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeReport {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    pub tool: ToolInfo,
    /// RFC3339 timestamp of report generation.
    pub generated_at: String,
    /// Device name, or the dump path for offline decodes.
    pub device: String,
    pub range: RangeSummary,
}

/// Build a report for `record`.
///
/// # Examples
/// ```
/// use iwrange_core::range::{KERNEL, decode_range};
/// use iwrange_core::make_report;
///
/// let record = decode_range(&KERNEL, &[0u8; 64], 64);
/// let report = make_report("wlan0", &record, None);
/// assert_eq!(report.report_version, iwrange_core::REPORT_VERSION);
/// assert_eq!(report.generated_at, iwrange_core::DEFAULT_GENERATED_AT);
/// assert!(report.range.revision_inferred);
/// ```
pub fn make_report(
    device: &str,
    record: &RangeRecord,
    generated_at: Option<OffsetDateTime>,
) -> RangeReport {
    RangeReport {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "iwrange".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        generated_at: generated_at
            .and_then(|dt| dt.format(&Rfc3339).ok())
            .unwrap_or_else(|| DEFAULT_GENERATED_AT.to_string()),
        device: device.to_string(),
        range: RangeSummary::from_record(record),
    }
}
