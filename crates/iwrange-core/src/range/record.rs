use serde::{Deserialize, Serialize};

use super::layout;
use super::profile::RangeProfile;
use super::reader::RangeReader;

/// Which family of layouts a revision tag belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Regime {
    /// WE-9 to WE-15: `struct iw15_range`.
    Legacy,
    /// WE-16 and later: canonical layout.
    Current,
}

/// WE revision a reply was decoded as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructuralRevision {
    pub tag: u8,
    /// True when the tag was guessed from a short reply instead of read.
    pub inferred: bool,
}

impl StructuralRevision {
    pub fn regime(&self) -> Regime {
        if self.tag > layout::LAST_LEGACY_REVISION {
            Regime::Current
        } else {
            Regime::Legacy
        }
    }
}

/// `struct iw_quality`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quality {
    pub qual: u8,
    pub level: u8,
    pub noise: u8,
    pub updated: u8,
}

/// `struct iw_freq`: a frequency is `m * 10^e`, or a channel when `e == 0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frequency {
    pub m: i32,
    pub e: i16,
    pub i: u8,
    pub flags: u8,
}

/// Power-saving, modulation and bitrate capabilities present only in the
/// wireless-tools layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendedCapabilities {
    pub min_pms: i32,
    pub max_pms: i32,
    pub pms_flags: u16,
    pub modul_capa: i32,
    pub bitrate_capa: u32,
}

/// Canonical range record produced by every decode.
///
/// Holds exactly `profile.canonical_size` bytes in the current layout; every
/// byte was either copied from the reply or zero-filled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeRecord {
    bytes: Box<[u8]>,
    revision: StructuralRevision,
    reported_len: usize,
    profile: RangeProfile,
}

impl RangeRecord {
    pub(crate) fn new(
        bytes: Box<[u8]>,
        revision: StructuralRevision,
        reported_len: usize,
        profile: RangeProfile,
    ) -> Self {
        debug_assert_eq!(bytes.len(), profile.canonical_size);
        Self {
            bytes,
            revision,
            reported_len,
            profile,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Revision of the reply this record was decoded from.
    pub fn revision(&self) -> StructuralRevision {
        self.revision
    }

    /// Length the driver reported for its reply.
    pub fn reported_len(&self) -> usize {
        self.reported_len
    }

    pub fn profile(&self) -> &RangeProfile {
        &self.profile
    }

    fn reader(&self) -> RangeReader<'_> {
        RangeReader::new(&self.bytes)
    }

    pub fn throughput(&self) -> u32 {
        self.reader().read_u32_ne(layout::THROUGHPUT_RANGE)
    }

    pub fn min_nwid(&self) -> u32 {
        self.reader().read_u32_ne(layout::MIN_NWID_RANGE)
    }

    pub fn max_nwid(&self) -> u32 {
        self.reader().read_u32_ne(layout::MAX_NWID_RANGE)
    }

    pub fn sensitivity(&self) -> i32 {
        self.reader().read_i32_ne(layout::SENSITIVITY_RANGE)
    }

    /// Quality ceiling; `max_qual().qual` is the value callers normalize
    /// link quality against.
    pub fn max_qual(&self) -> Quality {
        self.reader().read_quality(layout::MAX_QUAL_RANGE)
    }

    pub fn avg_qual(&self) -> Quality {
        self.reader().read_quality(layout::AVG_QUAL_RANGE)
    }

    pub fn num_bitrates(&self) -> u8 {
        self.reader().read_u8(layout::NUM_BITRATES_OFFSET)
    }

    pub fn bitrates(&self) -> Vec<i32> {
        self.reader().read_i32_list(
            layout::BITRATE_OFFSET,
            self.num_bitrates() as usize,
            layout::MAX_BITRATES,
        )
    }

    pub fn rts(&self) -> (i32, i32) {
        let reader = self.reader();
        (
            reader.read_i32_ne(layout::MIN_RTS_RANGE),
            reader.read_i32_ne(layout::MAX_RTS_RANGE),
        )
    }

    pub fn frag(&self) -> (i32, i32) {
        let reader = self.reader();
        (
            reader.read_i32_ne(layout::MIN_FRAG_RANGE),
            reader.read_i32_ne(layout::MAX_FRAG_RANGE),
        )
    }

    /// Power management period bounds.
    pub fn pm_period(&self) -> (i32, i32) {
        let reader = self.reader();
        (
            reader.read_i32_ne(layout::MIN_PMP_RANGE),
            reader.read_i32_ne(layout::MAX_PMP_RANGE),
        )
    }

    /// Power management timeout bounds.
    pub fn pm_timeout(&self) -> (i32, i32) {
        let reader = self.reader();
        (
            reader.read_i32_ne(layout::MIN_PMT_RANGE),
            reader.read_i32_ne(layout::MAX_PMT_RANGE),
        )
    }

    pub fn pmp_flags(&self) -> u16 {
        self.reader().read_u16_ne(layout::PMP_FLAGS_RANGE)
    }

    pub fn pmt_flags(&self) -> u16 {
        self.reader().read_u16_ne(layout::PMT_FLAGS_RANGE)
    }

    pub fn pm_capa(&self) -> u16 {
        self.reader().read_u16_ne(layout::PM_CAPA_RANGE)
    }

    pub fn encoding_sizes(&self) -> Vec<u16> {
        let reader = self.reader();
        reader.read_u16_list(
            layout::ENCODING_SIZE_OFFSET,
            reader.read_u8(layout::NUM_ENCODING_SIZES_OFFSET) as usize,
            layout::MAX_ENCODING_SIZES,
        )
    }

    pub fn max_encoding_tokens(&self) -> u8 {
        self.reader().read_u8(layout::MAX_ENCODING_TOKENS_OFFSET)
    }

    /// Always zero for legacy replies.
    pub fn encoding_login_index(&self) -> u8 {
        self.reader().read_u8(layout::ENCODING_LOGIN_INDEX_OFFSET)
    }

    pub fn txpower_capa(&self) -> u16 {
        self.reader().read_u16_ne(layout::TXPOWER_CAPA_RANGE)
    }

    pub fn txpower(&self) -> Vec<i32> {
        let reader = self.reader();
        reader.read_i32_list(
            layout::TXPOWER_OFFSET,
            reader.read_u8(layout::NUM_TXPOWER_OFFSET) as usize,
            layout::MAX_TXPOWER,
        )
    }

    pub fn we_version_compiled(&self) -> u8 {
        self.reader().read_u8(layout::WE_VERSION_COMPILED_OFFSET)
    }

    pub fn we_version_source(&self) -> u8 {
        self.reader().read_u8(layout::WE_VERSION_SOURCE_OFFSET)
    }

    pub fn retry_capa(&self) -> u16 {
        self.reader().read_u16_ne(layout::RETRY_CAPA_RANGE)
    }

    pub fn retry_flags(&self) -> u16 {
        self.reader().read_u16_ne(layout::RETRY_FLAGS_RANGE)
    }

    pub fn r_time_flags(&self) -> u16 {
        self.reader().read_u16_ne(layout::R_TIME_FLAGS_RANGE)
    }

    pub fn retry(&self) -> (i32, i32) {
        let reader = self.reader();
        (
            reader.read_i32_ne(layout::MIN_RETRY_RANGE),
            reader.read_i32_ne(layout::MAX_RETRY_RANGE),
        )
    }

    pub fn retry_lifetime(&self) -> (i32, i32) {
        let reader = self.reader();
        (
            reader.read_i32_ne(layout::MIN_R_TIME_RANGE),
            reader.read_i32_ne(layout::MAX_R_TIME_RANGE),
        )
    }

    pub fn num_channels(&self) -> u16 {
        self.reader().read_u16_ne(layout::NUM_CHANNELS_RANGE)
    }

    pub fn num_frequency(&self) -> u8 {
        self.reader().read_u8(layout::NUM_FREQUENCY_OFFSET)
    }

    pub fn frequencies(&self) -> Vec<Frequency> {
        self.reader().read_frequency_list(
            layout::FREQ_OFFSET,
            self.num_frequency() as usize,
            layout::MAX_FREQUENCIES,
        )
    }

    pub fn enc_capa(&self) -> u32 {
        self.reader().read_u32_ne(layout::ENC_CAPA_RANGE)
    }

    /// The wireless-tools tail, when the profile carries one.
    pub fn extended(&self) -> Option<ExtendedCapabilities> {
        if !self.profile.has_extended_tail() {
            return None;
        }
        let reader = self.reader();
        Some(ExtendedCapabilities {
            min_pms: reader.read_i32_ne(layout::MIN_PMS_RANGE),
            max_pms: reader.read_i32_ne(layout::MAX_PMS_RANGE),
            pms_flags: reader.read_u16_ne(layout::PMS_FLAGS_RANGE),
            modul_capa: reader.read_i32_ne(layout::MODUL_CAPA_RANGE),
            bitrate_capa: reader.read_u32_ne(layout::BITRATE_CAPA_RANGE),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::profile::{KERNEL, WIRELESS_TOOLS};

    fn record(bytes: Vec<u8>, profile: RangeProfile) -> RangeRecord {
        let revision = StructuralRevision {
            tag: 22,
            inferred: false,
        };
        RangeRecord::new(bytes.into_boxed_slice(), revision, profile.canonical_size, profile)
    }

    #[test]
    fn regime_boundary_is_fifteen() {
        let legacy = StructuralRevision {
            tag: 15,
            inferred: false,
        };
        let current = StructuralRevision {
            tag: 16,
            inferred: false,
        };
        assert_eq!(legacy.regime(), Regime::Legacy);
        assert_eq!(current.regime(), Regime::Current);
    }

    #[test]
    fn list_accessors_follow_counts() {
        let mut bytes = vec![0u8; KERNEL.canonical_size];
        bytes[layout::NUM_BITRATES_OFFSET] = 2;
        bytes[layout::BITRATE_OFFSET..layout::BITRATE_OFFSET + 4]
            .copy_from_slice(&1_000_000i32.to_ne_bytes());
        bytes[layout::BITRATE_OFFSET + 4..layout::BITRATE_OFFSET + 8]
            .copy_from_slice(&2_000_000i32.to_ne_bytes());
        bytes[layout::NUM_TXPOWER_OFFSET] = 1;
        bytes[layout::TXPOWER_OFFSET..layout::TXPOWER_OFFSET + 4]
            .copy_from_slice(&20i32.to_ne_bytes());
        bytes[layout::NUM_FREQUENCY_OFFSET] = 1;
        bytes[layout::FREQ_OFFSET..layout::FREQ_OFFSET + 4].copy_from_slice(&2412i32.to_ne_bytes());

        let record = record(bytes, KERNEL);
        assert_eq!(record.bitrates(), vec![1_000_000, 2_000_000]);
        assert_eq!(record.txpower(), vec![20]);
        assert_eq!(record.frequencies().len(), 1);
        assert_eq!(record.frequencies()[0].m, 2412);
        assert!(record.encoding_sizes().is_empty());
    }

    #[test]
    fn oversized_counts_are_clamped() {
        let mut bytes = vec![0u8; KERNEL.canonical_size];
        bytes[layout::NUM_BITRATES_OFFSET] = 0xff;
        bytes[layout::NUM_FREQUENCY_OFFSET] = 0xff;
        let record = record(bytes, KERNEL);
        assert_eq!(record.bitrates().len(), layout::MAX_BITRATES);
        assert_eq!(record.frequencies().len(), layout::MAX_FREQUENCIES);
    }

    #[test]
    fn extended_tail_depends_on_profile() {
        let kernel = record(vec![0u8; KERNEL.canonical_size], KERNEL);
        assert!(kernel.extended().is_none());

        let mut bytes = vec![0u8; WIRELESS_TOOLS.canonical_size];
        bytes[layout::BITRATE_CAPA_RANGE].copy_from_slice(&3u32.to_ne_bytes());
        let tools = record(bytes, WIRELESS_TOOLS);
        assert_eq!(tools.extended().map(|ext| ext.bitrate_capa), Some(3));
    }
}
