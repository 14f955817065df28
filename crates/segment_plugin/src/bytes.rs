//! Bulk byte-view primitive for mesh staging.
//!
//! All reinterpretation of typed buffers as raw mesh bytes goes through this
//! one function, instead of repeated ad-hoc pointer casts at every staging
//! site.

/// View a slice of plain-old-data elements as raw bytes.
///
/// The caller picks `T`; the bound is `Copy` plus the (checked-by-test)
/// expectation that `T` has no padding bytes. The two types routed through
/// here, `Segment` and `u32`, are both padding-free `repr(C)` layouts.
#[inline]
pub fn as_bytes<T: Copy>(slice: &[T]) -> &[u8] {
  let len = std::mem::size_of_val(slice);
  // Safety: the slice is a live allocation of `len` bytes and u8 has
  // alignment 1; `T: Copy` rules out drop-sensitive payloads.
  unsafe { std::slice::from_raw_parts(slice.as_ptr().cast::<u8>(), len) }
}

/// Copy a slice of elements into an owned byte vector.
pub fn to_byte_vec<T: Copy>(slice: &[T]) -> Vec<u8> {
  as_bytes(slice).to_vec()
}
