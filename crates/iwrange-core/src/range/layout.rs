use std::ops::Range;

// Canonical `struct iw_range` (WE-16 and later, Linux UAPI as of WE-22).
// All fields are native-endian; offsets assume natural 4-byte alignment.

pub const THROUGHPUT_RANGE: Range<usize> = 0..4;
pub const MIN_NWID_RANGE: Range<usize> = 4..8;
pub const MAX_NWID_RANGE: Range<usize> = 8..12;
pub const EVENT_CAPA_RANGE: Range<usize> = 16..40;

pub const SENSITIVITY_RANGE: Range<usize> = 40..44;
pub const MAX_QUAL_RANGE: Range<usize> = 44..48;
pub const AVG_QUAL_RANGE: Range<usize> = 48..52;

pub const NUM_BITRATES_OFFSET: usize = 52;
pub const BITRATE_OFFSET: usize = 56;
pub const MAX_BITRATES: usize = 32;

pub const MIN_RTS_RANGE: Range<usize> = 184..188;
pub const MAX_RTS_RANGE: Range<usize> = 188..192;
pub const MIN_FRAG_RANGE: Range<usize> = 192..196;
pub const MAX_FRAG_RANGE: Range<usize> = 196..200;
pub const MIN_PMP_RANGE: Range<usize> = 200..204;
pub const MAX_PMP_RANGE: Range<usize> = 204..208;
pub const MIN_PMT_RANGE: Range<usize> = 208..212;
pub const MAX_PMT_RANGE: Range<usize> = 212..216;
pub const PMP_FLAGS_RANGE: Range<usize> = 216..218;
pub const PMT_FLAGS_RANGE: Range<usize> = 218..220;
pub const PM_CAPA_RANGE: Range<usize> = 220..222;

pub const ENCODING_SIZE_OFFSET: usize = 222;
pub const MAX_ENCODING_SIZES: usize = 8;
pub const NUM_ENCODING_SIZES_OFFSET: usize = 238;
pub const MAX_ENCODING_TOKENS_OFFSET: usize = 239;
pub const ENCODING_LOGIN_INDEX_OFFSET: usize = 240;

pub const TXPOWER_CAPA_RANGE: Range<usize> = 242..244;
pub const NUM_TXPOWER_OFFSET: usize = 244;
pub const TXPOWER_OFFSET: usize = 248;
pub const MAX_TXPOWER: usize = 8;

pub const WE_VERSION_COMPILED_OFFSET: usize = 280;
pub const WE_VERSION_SOURCE_OFFSET: usize = 281;

pub const RETRY_CAPA_RANGE: Range<usize> = 282..284;
pub const RETRY_FLAGS_RANGE: Range<usize> = 284..286;
pub const R_TIME_FLAGS_RANGE: Range<usize> = 286..288;
pub const MIN_RETRY_RANGE: Range<usize> = 288..292;
pub const MAX_RETRY_RANGE: Range<usize> = 292..296;
pub const MIN_R_TIME_RANGE: Range<usize> = 296..300;
pub const MAX_R_TIME_RANGE: Range<usize> = 300..304;

pub const NUM_CHANNELS_RANGE: Range<usize> = 304..306;
pub const NUM_FREQUENCY_OFFSET: usize = 306;
pub const FREQ_OFFSET: usize = 308;
pub const MAX_FREQUENCIES: usize = 32;

pub const ENC_CAPA_RANGE: Range<usize> = 564..568;

/// Size of the kernel UAPI structure.
pub const KERNEL_SIZE: usize = 568;

// Tail appended by the wireless-tools copy of `wireless.h`.
pub const MIN_PMS_RANGE: Range<usize> = 568..572;
pub const MAX_PMS_RANGE: Range<usize> = 572..576;
pub const PMS_FLAGS_RANGE: Range<usize> = 576..578;
pub const MODUL_CAPA_RANGE: Range<usize> = 580..584;
pub const BITRATE_CAPA_RANGE: Range<usize> = 584..588;

pub const EXTENDED_SIZE: usize = 588;

pub const QUALITY_LEN: usize = 4;
pub const FREQ_LEN: usize = 8;

/// Replies shorter than this carry no trustworthy version byte.
pub const LEGACY_LENGTH_THRESHOLD: usize = 300;
pub const GUESSED_REVISION: u8 = 9;
pub const OLDEST_KNOWN_REVISION: u8 = 9;
pub const LAST_LEGACY_REVISION: u8 = 15;

/// `struct iw15_range`, filled by drivers built against WE-9 to WE-15.
pub mod legacy {
    use std::ops::Range;

    pub const NUM_CHANNELS_RANGE: Range<usize> = 12..14;
    pub const NUM_FREQUENCY_OFFSET: usize = 14;
    pub const FREQ_OFFSET: usize = 16;
    pub const MAX_FREQUENCIES: usize = 16;

    pub const SENSITIVITY_RANGE: Range<usize> = 144..148;
    pub const MAX_QUAL_RANGE: Range<usize> = 148..152;

    pub const NUM_BITRATES_OFFSET: usize = 152;
    pub const BITRATE_OFFSET: usize = 156;
    pub const MAX_BITRATES: usize = 8;

    pub const MIN_RTS_RANGE: Range<usize> = 188..192;
    pub const TXPOWER_CAPA_RANGE: Range<usize> = 244..246;
    pub const NUM_TXPOWER_OFFSET: usize = 246;
    pub const TXPOWER_OFFSET: usize = 248;

    pub const WE_VERSION_COMPILED_OFFSET: usize = 280;
    pub const MAX_R_TIME_RANGE: Range<usize> = 300..304;
    pub const AVG_QUAL_RANGE: Range<usize> = 304..308;

    pub const SIZE: usize = 308;
}

/// One positional move from the legacy layout into the canonical one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldGroup {
    pub name: &'static str,
    pub src: usize,
    pub len: usize,
    pub dst: usize,
}

impl FieldGroup {
    /// Group spanning `src_start..src_end` in the legacy layout.
    const fn span(name: &'static str, src_start: usize, src_end: usize, dst: usize) -> Self {
        Self {
            name,
            src: src_start,
            len: src_end - src_start,
            dst,
        }
    }

    pub fn src_range(&self) -> Range<usize> {
        self.src..self.src + self.len
    }

    pub fn dst_range(&self) -> Range<usize> {
        self.dst..self.dst + self.len
    }
}

/// Legacy-to-canonical remap table, applied in order.
///
/// Each group ends where the next legacy field group starts, so the table
/// covers `0..legacy::SIZE` exactly once.
pub const LEGACY_REMAP: [FieldGroup; 8] = [
    FieldGroup::span("head", 0, legacy::NUM_CHANNELS_RANGE.start, 0),
    FieldGroup::span(
        "frequencies",
        legacy::NUM_CHANNELS_RANGE.start,
        legacy::SENSITIVITY_RANGE.start,
        NUM_CHANNELS_RANGE.start,
    ),
    FieldGroup::span(
        "sensitivity",
        legacy::SENSITIVITY_RANGE.start,
        legacy::NUM_BITRATES_OFFSET,
        SENSITIVITY_RANGE.start,
    ),
    FieldGroup::span(
        "bitrates",
        legacy::NUM_BITRATES_OFFSET,
        legacy::MIN_RTS_RANGE.start,
        NUM_BITRATES_OFFSET,
    ),
    FieldGroup::span(
        "rts-through-encoding",
        legacy::MIN_RTS_RANGE.start,
        legacy::TXPOWER_CAPA_RANGE.start,
        MIN_RTS_RANGE.start,
    ),
    FieldGroup::span(
        "txpower-capa",
        legacy::TXPOWER_CAPA_RANGE.start,
        legacy::TXPOWER_OFFSET,
        TXPOWER_CAPA_RANGE.start,
    ),
    FieldGroup::span(
        "txpower-through-retry",
        legacy::TXPOWER_OFFSET,
        legacy::AVG_QUAL_RANGE.start,
        TXPOWER_OFFSET,
    ),
    FieldGroup::span(
        "avg-qual",
        legacy::AVG_QUAL_RANGE.start,
        legacy::AVG_QUAL_RANGE.end,
        AVG_QUAL_RANGE.start,
    ),
];
