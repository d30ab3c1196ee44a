// Page slicing: fixed-size aligned views over a flat buffer.
//
// A "page" is the unit of diff granularity. Buffers handled by this crate
// are always an exact multiple of the page size, so every present page has
// exactly `page_size` bytes; an index past the buffer's extent yields a
// missing page (`None`), never a short or zero-filled one.

/// Default page size used by [`diff`](crate::diff()) when no options are given.
pub const DEFAULT_PAGE_SIZE: usize = 512;

/// Return the page at `page_index`, or `None` if the index lies beyond the
/// buffer's extent.
///
/// The caller must have validated that `buf.len()` is a multiple of
/// `page_size`; present pages are then always full-length.
pub fn page(buf: &[u8], page_size: usize, page_index: usize) -> Option<&[u8]> {
    let page_offset = page_index.checked_mul(page_size)?;
    if page_offset >= buf.len() {
        return None;
    }
    Some(&buf[page_offset..page_offset + page_size])
}

/// Number of pages spanned by a buffer of `len` bytes.
///
/// `len` must already be page-aligned, making `div_ceil` and exact division
/// coincide; the alignment precondition is asserted rather than papered
/// over by rounding.
pub fn page_count(len: usize, page_size: usize) -> usize {
    debug_assert_eq!(len % page_size, 0, "length must be page-aligned");
    len.div_ceil(page_size)
}
