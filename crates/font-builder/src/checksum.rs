//! sfnt checksums
//!
//! `FontBuilder` writes the table checksums and `checkSumAdjustment`; these
//! helpers recompute them for verification.

use write_fonts::types::Tag;

/// The whole font, `checkSumAdjustment` included, sums to this value.
pub const CHECKSUM_MAGIC: u32 = 0xB1B0_AFBA;

/// Offset of `checkSumAdjustment` within the `head` table
pub(crate) const ADJUSTMENT_OFFSET: usize = 8;

pub(crate) const HEAD: Tag = Tag::new(b"head");

/// Wrapping sum of big-endian `u32` words, zero-padding the final word.
pub fn table_checksum(data: &[u8]) -> u32 {
    data.chunks(4).fold(0u32, |sum, chunk| {
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        sum.wrapping_add(u32::from_be_bytes(word))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_checksum() {
        assert_eq!(table_checksum(b"ABCD"), 0x4142_4344);
        assert_eq!(table_checksum(b""), 0);
        // Trailing bytes are padded with zeros.
        assert_eq!(table_checksum(b"ABCDE"), 0x4142_4344 + 0x4500_0000);
        assert_eq!(table_checksum(&[0xFF; 8]), 0xFFFF_FFFE);
    }
}
