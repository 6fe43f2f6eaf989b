use std::io;

use iwrange_core::range::layout::{self, legacy};
use iwrange_core::range::{KERNEL, Regime, WIRELESS_TOOLS, decode_range};
use iwrange_core::{MemoryRangeSource, QueryError, TransportError, max_quality, query_range};

/// Deterministic filler so every byte of a reply is distinguishable.
fn noise(seed: u64, len: usize) -> Vec<u8> {
    let mut state = seed | 1;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state >> 24) as u8
        })
        .collect()
}

fn tagged(seed: u64, len: usize, tag: u8) -> Vec<u8> {
    let mut raw = noise(seed, len);
    raw[layout::WE_VERSION_COMPILED_OFFSET] = tag;
    raw
}

#[test]
fn current_revisions_copy_canonical_prefix_verbatim() {
    for (seed, tag) in (1u64..).zip(16u8..=40) {
        let raw = tagged(seed, KERNEL.buffer_len(), tag);
        let record = decode_range(&KERNEL, &raw, 300 + seed as usize);
        assert_eq!(record.revision().regime(), Regime::Current);
        assert_eq!(record.as_bytes(), &raw[..KERNEL.canonical_size], "tag {tag}");
    }
}

#[test]
fn current_revisions_discard_trailing_bytes() {
    let raw = tagged(99, WIRELESS_TOOLS.buffer_len(), 22);
    let record = decode_range(&KERNEL, &raw, 568);
    assert_eq!(record.as_bytes().len(), KERNEL.canonical_size);
}

#[test]
fn legacy_revisions_zero_everything_outside_groups() {
    for (seed, tag) in (7u64..).zip(0u8..=15) {
        let raw = tagged(seed, KERNEL.buffer_len(), tag);
        let record = decode_range(&KERNEL, &raw, 308);
        let bytes = record.as_bytes();
        for (offset, byte) in bytes.iter().enumerate() {
            let covered = layout::LEGACY_REMAP
                .iter()
                .any(|group| group.dst_range().contains(&offset));
            if !covered {
                assert_eq!(*byte, 0, "offset {offset} not zero for tag {tag}");
            }
        }
    }
}

#[test]
fn legacy_revisions_move_each_group_into_place() {
    for (seed, tag) in (31u64..).zip(9u8..=15) {
        let raw = tagged(seed, KERNEL.buffer_len(), tag);
        let record = decode_range(&KERNEL, &raw, 308);
        for group in &layout::LEGACY_REMAP {
            assert_eq!(
                &record.as_bytes()[group.dst_range()],
                &raw[group.src_range()],
                "group {} for tag {tag}",
                group.name
            );
        }
    }
}

#[test]
fn short_replies_take_legacy_path_whatever_the_version_byte() {
    for reported_len in [0usize, 1, 100, 250, 299] {
        let raw = tagged(reported_len as u64 + 3, KERNEL.buffer_len(), 22);
        let record = decode_range(&KERNEL, &raw, reported_len);
        assert!(record.revision().inferred);
        assert_eq!(record.revision().tag, 9);
        assert_eq!(record.revision().regime(), Regime::Legacy);
        assert_eq!(
            &record.as_bytes()[layout::SENSITIVITY_RANGE],
            &raw[legacy::SENSITIVITY_RANGE]
        );
    }
}

#[test]
fn decoding_is_repeatable() {
    for tag in [9u8, 15, 16, 22] {
        let raw = tagged(tag as u64, KERNEL.buffer_len(), tag);
        let first = decode_range(&KERNEL, &raw, 400);
        let second = decode_range(&KERNEL, &raw, 400);
        assert_eq!(first.as_bytes(), second.as_bytes());
        assert_eq!(first, second);
    }
}

#[test]
fn current_reply_reports_max_quality_seventy() {
    let mut raw = vec![0u8; 400];
    raw[layout::WE_VERSION_COMPILED_OFFSET] = 20;
    raw[layout::MAX_QUAL_RANGE.start] = 70;
    let mut source = MemoryRangeSource::new().with_reply("wlan0", raw, 400);

    assert_eq!(max_quality(&mut source, &KERNEL, "wlan0").unwrap(), 70);
}

#[test]
fn legacy_reply_moves_sensitivity_and_zeroes_new_fields() {
    let mut raw = noise(12, 350);
    raw[legacy::WE_VERSION_COMPILED_OFFSET] = 12;
    raw[legacy::SENSITIVITY_RANGE].copy_from_slice(&(-80i32).to_ne_bytes());
    let mut source = MemoryRangeSource::new().with_reply("wlan0", raw, 350);

    let record = query_range(&mut source, &KERNEL, "wlan0").unwrap();
    assert_eq!(record.revision().tag, 12);
    assert_eq!(record.sensitivity(), -80);

    let bytes = record.as_bytes();
    assert!(bytes[12..layout::SENSITIVITY_RANGE.start].iter().all(|&b| b == 0));
    assert_eq!(record.encoding_login_index(), 0);
    assert!(bytes[layout::NUM_BITRATES_OFFSET + 36..layout::MIN_RTS_RANGE.start]
        .iter()
        .all(|&b| b == 0));
    assert!(bytes[layout::FREQ_OFFSET + legacy::MAX_FREQUENCIES * layout::FREQ_LEN..]
        .iter()
        .all(|&b| b == 0));
    assert_eq!(record.enc_capa(), 0);
}

#[test]
fn hundred_byte_reply_decodes_as_legacy() {
    let mut raw = vec![0u8; 100];
    raw[..12].copy_from_slice(&noise(5, 12));
    let mut source = MemoryRangeSource::new().with_reply("wlan0", raw.clone(), 100);

    let record = query_range(&mut source, &KERNEL, "wlan0").unwrap();
    assert_eq!(record.revision().regime(), Regime::Legacy);
    assert!(record.revision().inferred);
    assert_eq!(record.we_version_compiled(), 9);
    assert_eq!(&record.as_bytes()[..12], &raw[..12]);
}

#[test]
fn missing_device_surfaces_transport_error() {
    let mut source = MemoryRangeSource::new();
    let err = max_quality(&mut source, &KERNEL, "wlan7").unwrap_err();

    assert!(matches!(err, QueryError::Transport(TransportError::Io(_))));
    assert_eq!(err.kind(), io::ErrorKind::NotFound);
    assert_eq!(source.queries(), ["wlan7".to_string()]);
}

#[test]
fn legacy_lists_are_readable_after_remap() {
    let mut raw = vec![0u8; legacy::SIZE];
    raw[legacy::WE_VERSION_COMPILED_OFFSET] = 13;
    raw[legacy::NUM_BITRATES_OFFSET] = 2;
    raw[legacy::BITRATE_OFFSET..legacy::BITRATE_OFFSET + 4]
        .copy_from_slice(&1_000_000i32.to_ne_bytes());
    raw[legacy::BITRATE_OFFSET + 4..legacy::BITRATE_OFFSET + 8]
        .copy_from_slice(&11_000_000i32.to_ne_bytes());
    raw[legacy::NUM_TXPOWER_OFFSET] = 1;
    raw[legacy::TXPOWER_OFFSET..legacy::TXPOWER_OFFSET + 4].copy_from_slice(&15i32.to_ne_bytes());
    raw[legacy::NUM_FREQUENCY_OFFSET] = 1;
    raw[legacy::FREQ_OFFSET..legacy::FREQ_OFFSET + 4].copy_from_slice(&2437i32.to_ne_bytes());
    raw[legacy::MAX_R_TIME_RANGE].copy_from_slice(&500i32.to_ne_bytes());

    let record = decode_range(&KERNEL, &raw, legacy::SIZE);
    assert_eq!(record.bitrates(), vec![1_000_000, 11_000_000]);
    assert_eq!(record.txpower(), vec![15]);
    assert_eq!(record.frequencies()[0].m, 2437);
    assert_eq!(record.retry_lifetime().1, 500);
    assert_eq!(record.we_version_compiled(), 13);
}
