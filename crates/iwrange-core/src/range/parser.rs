use super::error::RangeError;
use super::layout::{self, FieldGroup};
use super::profile::RangeProfile;
use super::reader::RangeReader;
use super::record::{RangeRecord, Regime, StructuralRevision};

/// Work out which WE revision filled `raw`.
///
/// Replies shorter than [`layout::LEGACY_LENGTH_THRESHOLD`] are too small to
/// carry a reliable version byte and are assumed to be WE-9; anything else
/// reports its revision in the canonical `we_version_compiled` slot.
pub fn detect_revision(raw: &[u8], reported_len: usize) -> StructuralRevision {
    if reported_len < layout::LEGACY_LENGTH_THRESHOLD {
        return StructuralRevision {
            tag: layout::GUESSED_REVISION,
            inferred: true,
        };
    }
    StructuralRevision {
        tag: RangeReader::new(raw).read_u8(layout::WE_VERSION_COMPILED_OFFSET),
        inferred: false,
    }
}

/// Decode a raw `SIOCGIWRANGE` reply into the canonical layout of `profile`.
///
/// `raw` is zero-extended (or cut) to the profile's reply buffer size first,
/// so any slice is accepted. Current-layout replies are copied verbatim;
/// legacy replies are zero-filled and then remapped group by group through
/// [`layout::LEGACY_REMAP`].
///
/// # Examples
/// ```
/// use iwrange_core::range::{KERNEL, Regime, decode_range, layout};
///
/// let mut raw = vec![0u8; KERNEL.buffer_len()];
/// raw[layout::WE_VERSION_COMPILED_OFFSET] = 22;
/// raw[layout::MAX_QUAL_RANGE.start] = 70;
///
/// let record = decode_range(&KERNEL, &raw, 568);
/// assert_eq!(record.revision().regime(), Regime::Current);
/// assert_eq!(record.max_qual().qual, 70);
/// ```
pub fn decode_range(profile: &RangeProfile, raw: &[u8], reported_len: usize) -> RangeRecord {
    let mut work = vec![0u8; profile.buffer_len()];
    RangeReader::new(raw).copy_to(0, &mut work);

    let revision = detect_revision(&work, reported_len);
    if revision.inferred {
        if let Some(version) = work.get_mut(layout::WE_VERSION_COMPILED_OFFSET) {
            *version = revision.tag;
        }
    }

    let bytes = match revision.regime() {
        Regime::Current => {
            work.truncate(profile.canonical_size);
            work.into_boxed_slice()
        }
        Regime::Legacy => remap_legacy(&work, profile.canonical_size),
    };
    tracing::debug!(
        profile = profile.name,
        revision = revision.tag,
        inferred = revision.inferred,
        reported_len,
        regime = ?revision.regime(),
        "decoded range reply"
    );

    RangeRecord::new(bytes, revision, reported_len, *profile)
}

/// Move a `struct iw15_range` into a zeroed canonical record.
pub fn remap_legacy(raw: &[u8], canonical_size: usize) -> Box<[u8]> {
    let reader = RangeReader::new(raw);
    let mut out = vec![0u8; canonical_size];
    for group in &layout::LEGACY_REMAP {
        apply_group(&reader, group, &mut out);
    }
    out.into_boxed_slice()
}

fn apply_group(reader: &RangeReader<'_>, group: &FieldGroup, dst: &mut [u8]) {
    match dst.get_mut(group.dst_range()) {
        Some(target) => reader.copy_to(group.src, target),
        None => tracing::warn!(group = group.name, "canonical record too small for group"),
    }
}

/// Flag replies whose length or revision does not fit either known layout.
///
/// Decoding accepts anything; callers that would rather fail than act on a
/// likely misdecode run this afterwards.
pub fn check_plausibility(record: &RangeRecord) -> Result<(), RangeError> {
    let revision = record.revision();
    let reported = record.reported_len();
    let capacity = record.profile().buffer_len();

    let result = if reported == 0 {
        Err(RangeError::EmptyReply)
    } else if reported > capacity {
        Err(RangeError::Oversized { reported, capacity })
    } else if !revision.inferred && revision.tag < layout::OLDEST_KNOWN_REVISION {
        Err(RangeError::UnknownRevision { tag: revision.tag })
    } else if revision.regime() == Regime::Legacy && reported > layout::legacy::SIZE {
        Err(RangeError::ImplausibleLength {
            tag: revision.tag,
            reported,
            max: layout::legacy::SIZE,
        })
    } else {
        Ok(())
    };

    if let Err(err) = &result {
        tracing::warn!(%err, "implausible range reply");
    }
    result
}
