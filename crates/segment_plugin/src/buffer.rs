//! Growable segment buffer - the client-facing geometry storage of a batch.
//!
//! The buffer itself is a plain owned sequence. Safe hand-off to background
//! work happens one level up: a `Batch` keeps its buffer inside an `Arc`, and
//! mutable access is only granted while no task holds a snapshot (see
//! `Batch::segments_mut`).

use glam::Vec3;

use crate::types::Segment;

/// Contiguous, growable list of line segments.
#[derive(Clone, Debug, Default)]
pub struct SegmentBuffer {
  segments: Vec<Segment>,
}

impl SegmentBuffer {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      segments: Vec::with_capacity(capacity),
    }
  }

  /// Grow or shrink to `new_len` segments.
  ///
  /// Growing fills new elements with `Segment::ZERO`; callers are expected
  /// to overwrite them before the next frame, but a forgotten element is a
  /// degenerate zero-length line rather than garbage memory.
  pub fn resize(&mut self, new_len: usize) {
    self.segments.resize(new_len, Segment::ZERO);
  }

  /// Write one segment. Panics when `index >= len`.
  #[inline]
  pub fn set(&mut self, index: usize, segment: Segment) {
    self.segments[index] = segment;
  }

  /// Write one segment from raw endpoints.
  #[inline]
  pub fn set_endpoints(&mut self, index: usize, start: Vec3, end: Vec3) {
    self.segments[index] = Segment::new(start, end);
  }

  /// Read one segment. Panics when `index >= len`.
  #[inline]
  pub fn get(&self, index: usize) -> Segment {
    self.segments[index]
  }

  pub fn push(&mut self, segment: Segment) {
    self.segments.push(segment);
  }

  pub fn clear(&mut self) {
    self.segments.clear();
  }

  pub fn len(&self) -> usize {
    self.segments.len()
  }

  pub fn is_empty(&self) -> bool {
    self.segments.is_empty()
  }

  /// Number of mesh vertices this buffer expands to (two per segment).
  pub fn vertex_count(&self) -> usize {
    self.segments.len() * 2
  }

  /// Flat read-only view, suitable for bounds/mesh-fill computation.
  pub fn as_slice(&self) -> &[Segment] {
    &self.segments
  }

  /// Flat mutable view.
  pub fn as_mut_slice(&mut self) -> &mut [Segment] {
    &mut self.segments
  }
}

#[cfg(test)]
#[path = "buffer_test.rs"]
mod buffer_test;
