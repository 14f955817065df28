//! Core data types for segment batching.

use glam::Vec3;

/// One line primitive: a directed pair of 3D endpoints.
///
/// `repr(C)` with no padding, so a `&[Segment]` reinterprets directly as the
/// vertex region of a line-list mesh (two position vertices per segment).
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Segment {
  /// Start endpoint.
  pub start: Vec3,

  /// End endpoint.
  pub end: Vec3,
}

impl Segment {
  pub const ZERO: Segment = Segment {
    start: Vec3::ZERO,
    end: Vec3::ZERO,
  };

  pub fn new(start: Vec3, end: Vec3) -> Self {
    Self { start, end }
  }
}

/// Axis-aligned bounding box.
///
/// The empty state is inverted infinite extents, never a zero-sized box at
/// the origin: a degenerate box at origin would silently corrupt any
/// bounding-volume union computed downstream.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinMaxAABB {
  pub min: Vec3,
  pub max: Vec3,
}

impl MinMaxAABB {
  /// Sentinel empty AABB (inverted extents, ready for encapsulation).
  pub const EMPTY: MinMaxAABB = MinMaxAABB {
    min: Vec3::INFINITY,
    max: Vec3::NEG_INFINITY,
  };

  /// Create AABB from min/max corners.
  pub fn new(min: Vec3, max: Vec3) -> Self {
    Self { min, max }
  }

  /// Expand AABB to include a point.
  #[inline]
  pub fn encapsulate(&mut self, point: Vec3) {
    self.min = self.min.min(point);
    self.max = self.max.max(point);
  }

  /// True for the sentinel state (no point was ever encapsulated).
  pub fn is_empty(&self) -> bool {
    self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
  }

  /// Check if AABB is valid (min <= max on all axes).
  pub fn is_valid(&self) -> bool {
    !self.is_empty()
  }
}

impl Default for MinMaxAABB {
  fn default() -> Self {
    Self::EMPTY
  }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
