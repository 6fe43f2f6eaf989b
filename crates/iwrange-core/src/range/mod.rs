//! `SIOCGIWRANGE` reply decoding.
//!
//! A driver fills the reply with whichever `struct iw_range` it was built
//! against. Revisions WE-16 and later share the canonical layout and are
//! copied as-is; WE-9 to WE-15 replies use `struct iw15_range`, whose field
//! groups are moved into place through a fixed remap table. Replies shorter
//! than 300 bytes carry no usable version byte and are treated as WE-9.
//!
//! - `layout`: canonical and legacy offsets plus the remap table
//! - `profile`: compiled-in canonical sizes per target platform
//! - `reader`: native-endian, zero-extending byte access
//! - `record`: the canonical record and its typed accessors
//! - `parser`: revision detection, decoding and the plausibility check
//!
//! Decoding is pure and never fails. A reply from an unanticipated layout
//! decodes into a well-formed but wrong record; `check_plausibility` catches
//! the cases that can be recognised from length and revision alone.

pub mod error;
pub mod layout;
pub mod parser;
pub mod profile;
pub mod reader;
pub mod record;

pub use error::RangeError;
pub use parser::{check_plausibility, decode_range, detect_revision, remap_legacy};
pub use profile::{KERNEL, PROFILES, RangeProfile, WIRELESS_TOOLS};
pub use record::{ExtendedCapabilities, Frequency, Quality, RangeRecord, Regime, StructuralRevision};
