use read_fonts::FontRef;

use crate::{
    CHECKSUM_MAGIC, ChecksumError,
    checksum::{ADJUSTMENT_OFFSET, HEAD, table_checksum},
};

/// Recompute every table checksum and the whole-file checksum adjustment.
///
/// Returns the first mismatch found, in directory order.
pub fn verify_checksums(font: &[u8]) -> Result<(), ChecksumError> {
    let font_ref = FontRef::new(font)?;
    let mut stored_adjustment = None;

    for record in font_ref.table_directory.table_records() {
        let tag = record.tag();
        let start = record.offset() as usize;
        let data = start
            .checked_add(record.length() as usize)
            .and_then(|end| font.get(start..end))
            .ok_or(ChecksumError::Truncated(tag))?;

        let actual = if tag == HEAD {
            let mut head = data.to_vec();
            let field = head
                .get_mut(ADJUSTMENT_OFFSET..ADJUSTMENT_OFFSET + 4)
                .ok_or(ChecksumError::Truncated(tag))?;
            let mut stored = [0u8; 4];
            stored.copy_from_slice(field);
            field.fill(0);
            stored_adjustment = Some(u32::from_be_bytes(stored));
            table_checksum(&head)
        } else {
            table_checksum(data)
        };

        if actual != record.checksum() {
            return Err(ChecksumError::Table { tag, expected: record.checksum(), actual });
        }
    }

    let stored = stored_adjustment.ok_or(ChecksumError::MissingTable(HEAD))?;
    let expected = CHECKSUM_MAGIC.wrapping_sub(table_checksum(font).wrapping_sub(stored));
    if stored != expected {
        return Err(ChecksumError::Adjustment { expected, actual: stored });
    }
    Ok(())
}
