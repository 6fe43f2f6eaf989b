use std::ops::Range;

use super::layout;
use super::record::{Frequency, Quality};

/// Native-endian field access over a range buffer.
///
/// Reads past the end of the buffer yield zero bytes, the same as a reply
/// buffer that was zeroed before the driver filled it. Nothing here can fail.
pub struct RangeReader<'a> {
    payload: &'a [u8],
}

impl<'a> RangeReader<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self { payload }
    }

    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// Copy `dst.len()` bytes starting at `offset`, zero-filling whatever the
    /// payload does not cover.
    pub fn copy_to(&self, offset: usize, dst: &mut [u8]) {
        let start = offset.min(self.payload.len());
        let end = offset.saturating_add(dst.len()).min(self.payload.len());
        let available = &self.payload[start..end];
        dst[..available.len()].copy_from_slice(available);
        dst[available.len()..].fill(0);
    }

    pub fn read_array<const N: usize>(&self, offset: usize) -> [u8; N] {
        let mut out = [0u8; N];
        self.copy_to(offset, &mut out);
        out
    }

    pub fn read_u8(&self, offset: usize) -> u8 {
        self.payload.get(offset).copied().unwrap_or(0)
    }

    pub fn read_u16_ne(&self, range: Range<usize>) -> u16 {
        debug_assert_eq!(range.len(), 2);
        u16::from_ne_bytes(self.read_array(range.start))
    }

    pub fn read_u32_ne(&self, range: Range<usize>) -> u32 {
        debug_assert_eq!(range.len(), 4);
        u32::from_ne_bytes(self.read_array(range.start))
    }

    pub fn read_i32_ne(&self, range: Range<usize>) -> i32 {
        debug_assert_eq!(range.len(), 4);
        i32::from_ne_bytes(self.read_array(range.start))
    }

    pub fn read_quality(&self, range: Range<usize>) -> Quality {
        debug_assert_eq!(range.len(), layout::QUALITY_LEN);
        let [qual, level, noise, updated] = self.read_array(range.start);
        Quality {
            qual,
            level,
            noise,
            updated,
        }
    }

    pub fn read_frequency(&self, offset: usize) -> Frequency {
        let [m0, m1, m2, m3, e0, e1, i, flags] = self.read_array(offset);
        Frequency {
            m: i32::from_ne_bytes([m0, m1, m2, m3]),
            e: i16::from_ne_bytes([e0, e1]),
            i,
            flags,
        }
    }

    /// Read `count` consecutive `i32` values, clamped to `capacity`.
    pub fn read_i32_list(&self, offset: usize, count: usize, capacity: usize) -> Vec<i32> {
        (0..count.min(capacity))
            .map(|idx| {
                let start = offset + idx * 4;
                self.read_i32_ne(start..start + 4)
            })
            .collect()
    }

    /// Read `count` consecutive `u16` values, clamped to `capacity`.
    pub fn read_u16_list(&self, offset: usize, count: usize, capacity: usize) -> Vec<u16> {
        (0..count.min(capacity))
            .map(|idx| {
                let start = offset + idx * 2;
                self.read_u16_ne(start..start + 2)
            })
            .collect()
    }

    pub fn read_frequency_list(&self, offset: usize, count: usize, capacity: usize) -> Vec<Frequency> {
        (0..count.min(capacity))
            .map(|idx| self.read_frequency(offset + idx * layout::FREQ_LEN))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::RangeReader;

    #[test]
    fn copy_to_zero_fills_past_end() {
        let payload = [1u8, 2, 3];
        let reader = RangeReader::new(&payload);
        let mut dst = [0xffu8; 5];
        reader.copy_to(1, &mut dst);
        assert_eq!(dst, [2, 3, 0, 0, 0]);
    }

    #[test]
    fn copy_to_offset_beyond_payload() {
        let payload = [1u8, 2, 3];
        let reader = RangeReader::new(&payload);
        let mut dst = [0xffu8; 2];
        reader.copy_to(10, &mut dst);
        assert_eq!(dst, [0, 0]);
    }

    #[test]
    fn read_native_endian_values() {
        let mut payload = vec![0u8; 12];
        payload[0..4].copy_from_slice(&(-80i32).to_ne_bytes());
        payload[4..6].copy_from_slice(&0x1234u16.to_ne_bytes());
        payload[8..12].copy_from_slice(&54_000_000u32.to_ne_bytes());
        let reader = RangeReader::new(&payload);
        assert_eq!(reader.read_i32_ne(0..4), -80);
        assert_eq!(reader.read_u16_ne(4..6), 0x1234);
        assert_eq!(reader.read_u32_ne(8..12), 54_000_000);
    }

    #[test]
    fn read_quality_fields_in_order() {
        let payload = [70u8, 0xa6, 0x9c, 0x0f];
        let quality = RangeReader::new(&payload).read_quality(0..4);
        assert_eq!(quality.qual, 70);
        assert_eq!(quality.level, 0xa6);
        assert_eq!(quality.noise, 0x9c);
        assert_eq!(quality.updated, 0x0f);
    }

    #[test]
    fn read_frequency_entry() {
        let mut payload = vec![0u8; 8];
        payload[0..4].copy_from_slice(&2412i32.to_ne_bytes());
        payload[4..6].copy_from_slice(&6i16.to_ne_bytes());
        payload[6] = 1;
        let freq = RangeReader::new(&payload).read_frequency(0);
        assert_eq!(freq.m, 2412);
        assert_eq!(freq.e, 6);
        assert_eq!(freq.i, 1);
        assert_eq!(freq.flags, 0);
    }

    #[test]
    fn lists_are_clamped_to_capacity() {
        let payload: Vec<u8> = (1..=4i32).flat_map(|v| v.to_ne_bytes()).collect();
        let reader = RangeReader::new(&payload);
        assert_eq!(reader.read_i32_list(0, 200, 3), vec![1, 2, 3]);
        assert_eq!(reader.read_i32_list(0, 2, 8), vec![1, 2]);
        assert!(reader.read_u16_list(0, 0, 8).is_empty());
    }

    #[test]
    fn out_of_range_reads_are_zero() {
        let reader = RangeReader::new(&[]);
        assert!(reader.is_empty());
        assert_eq!(reader.read_u8(5), 0);
        assert_eq!(reader.read_i32_ne(100..104), 0);
    }
}
