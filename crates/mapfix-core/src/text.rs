//! Text position utilities for byte offset and line:column conversions.
//!
//! ## Coordinate Conventions
//!
//! - Lines and columns are **1-indexed** (matching editor conventions)
//! - Byte offsets are **0-indexed**
//! - Columns count bytes, which is appropriate for ASCII-dominated source
//!   and for interfacing with byte-offset-based systems

/// Convert a byte offset to 1-indexed line and column.
///
/// # Arguments
///
/// * `content` - The source content as bytes
/// * `offset` - The byte offset (0-indexed)
///
/// # Returns
///
/// A `(line, col)` tuple where both are 1-indexed.
/// If `offset` exceeds content length, returns position at end of content.
pub fn byte_offset_to_position(content: &[u8], offset: u64) -> (u32, u32) {
    let offset = (offset as usize).min(content.len());
    let mut line = 1u32;
    let mut col = 1u32;

    for &byte in &content[..offset] {
        if byte == b'\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }

    (line, col)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_zero_is_line_one_col_one() {
        assert_eq!(byte_offset_to_position(b"hello", 0), (1, 1));
    }

    #[test]
    fn offset_within_first_line() {
        assert_eq!(byte_offset_to_position(b"hello", 3), (1, 4));
    }

    #[test]
    fn offset_after_newline() {
        assert_eq!(byte_offset_to_position(b"ab\ncd", 3), (2, 1));
        assert_eq!(byte_offset_to_position(b"ab\ncd", 4), (2, 2));
    }

    #[test]
    fn offset_past_end_clamps() {
        assert_eq!(byte_offset_to_position(b"ab", 100), (1, 3));
    }

    #[test]
    fn empty_content() {
        assert_eq!(byte_offset_to_position(b"", 0), (1, 1));
    }
}
