use thiserror::Error;

/// Reasons a decoded range reply is unlikely to be what the driver meant.
///
/// Decoding never produces these; they come from the opt-in plausibility
/// check only.
///
/// # Examples
/// ```
/// use iwrange_core::range::RangeError;
///
/// let err = RangeError::UnknownRevision { tag: 3 };
/// assert!(err.to_string().contains("unknown WE revision"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("empty range reply")]
    EmptyReply,
    #[error("reply of {reported} bytes exceeds the {capacity} byte buffer")]
    Oversized { reported: usize, capacity: usize },
    #[error("unknown WE revision {tag}")]
    UnknownRevision { tag: u8 },
    #[error("implausible reply length {reported} for WE revision {tag} (expected at most {max})")]
    ImplausibleLength { tag: u8, reported: usize, max: usize },
}
