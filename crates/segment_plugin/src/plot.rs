//! Plotting helpers - turn shapes into segment runs.
//!
//! Every helper writes into a `SegmentBuffer` at a caller-held cursor and
//! advances it, growing the buffer on demand. Chaining calls against the same
//! cursor composes shapes into one batch:
//!
//! ```ignore
//! let mut cursor = 0;
//! plot::circle(buffer, &mut cursor, 1.0, Vec3::ZERO, Quat::IDENTITY, 32);
//! plot::arrow(buffer, &mut cursor, Vec3::ZERO, Vec3::Y);
//! buffer.resize(cursor); // drop stale tail segments from earlier frames
//! ```

use std::f32::consts::PI;

use glam::{Quat, Vec3};

use crate::buffer::SegmentBuffer;
use crate::types::Segment;

/// Ratio of arrow-head length to shaft length.
const ARROW_HEAD_SCALE: f32 = 0.06;
/// Half-angle of the arrow head.
const ARROW_HEAD_ANGLE: f32 = PI / 14.0;

fn reserve(buffer: &mut SegmentBuffer, cursor: usize, count: usize) {
  let required = cursor + count;
  if buffer.len() < required {
    buffer.resize(required);
  }
}

/// Write a single segment.
pub fn line(buffer: &mut SegmentBuffer, cursor: &mut usize, start: Vec3, end: Vec3) {
  reserve(buffer, *cursor, 1);
  buffer.set_endpoints(*cursor, start, end);
  *cursor += 1;
}

/// Connect consecutive points: `n` points yield `n - 1` segments.
pub fn polyline(buffer: &mut SegmentBuffer, cursor: &mut usize, points: &[Vec3]) {
  let count = points.len().saturating_sub(1);
  reserve(buffer, *cursor, count);
  for window in points.windows(2) {
    buffer.set_endpoints(*cursor, window[0], window[1]);
    *cursor += 1;
  }
}

/// Evenly dashed line: `num_dashes` dashes with equal gaps, the first dash
/// anchored at `start` and the last ending exactly at `end`.
pub fn dashed_line(
  buffer: &mut SegmentBuffer,
  cursor: &mut usize,
  start: Vec3,
  end: Vec3,
  num_dashes: usize,
) {
  reserve(buffer, *cursor, num_dashes);
  let steps = (num_dashes * 2).saturating_sub(1).max(1) as f32;
  for i in (0..num_dashes * 2).step_by(2) {
    buffer.set_endpoints(
      *cursor,
      start.lerp(end, i as f32 / steps),
      start.lerp(end, (i + 1) as f32 / steps),
    );
    *cursor += 1;
  }
}

/// Arrow from `start` to `end`: one shaft plus a closed three-segment head
/// in the local XY plane.
pub fn arrow(buffer: &mut SegmentBuffer, cursor: &mut usize, start: Vec3, end: Vec3) {
  reserve(buffer, *cursor, 4);

  let back = (start - end) * ARROW_HEAD_SCALE;
  let left = end + Quat::from_rotation_z(ARROW_HEAD_ANGLE) * back;
  let right = end + Quat::from_rotation_z(-ARROW_HEAD_ANGLE) * back;

  buffer.set_endpoints(*cursor, start, end);
  buffer.set_endpoints(*cursor + 1, end, left);
  buffer.set_endpoints(*cursor + 2, left, right);
  buffer.set_endpoints(*cursor + 3, right, end);
  *cursor += 4;
}

/// Closed ellipse in the local XY plane, approximated with `num_segments`
/// chords.
pub fn ellipse(
  buffer: &mut SegmentBuffer,
  cursor: &mut usize,
  rx: f32,
  ry: f32,
  pos: Vec3,
  rot: Quat,
  num_segments: usize,
) {
  reserve(buffer, *cursor, num_segments);
  let theta = (2.0 * PI) / num_segments as f32;
  for i in 0..num_segments {
    let f0 = theta * i as f32;
    let f1 = theta * (i + 1) as f32;
    let v0 = rot * Vec3::new(f0.cos() * rx, f0.sin() * ry, 0.0);
    let v1 = rot * Vec3::new(f1.cos() * rx, f1.sin() * ry, 0.0);
    buffer.set(*cursor, Segment::new(pos + v0, pos + v1));
    *cursor += 1;
  }
}

/// Closed circle in the local XY plane.
pub fn circle(
  buffer: &mut SegmentBuffer,
  cursor: &mut usize,
  radius: f32,
  pos: Vec3,
  rot: Quat,
  num_segments: usize,
) {
  ellipse(buffer, cursor, radius, radius, pos, rot, num_segments);
}

/// The twelve edges of an oriented box centred on `pos`.
pub fn box_edges(
  buffer: &mut SegmentBuffer,
  cursor: &mut usize,
  size: Vec3,
  pos: Vec3,
  rot: Quat,
) {
  reserve(buffer, *cursor, 12);

  let half = size * 0.5;
  let corner = |x: f32, y: f32, z: f32| pos + rot * Vec3::new(half.x * x, half.y * y, half.z * z);
  let bottom = [
    corner(1.0, -1.0, -1.0),
    corner(-1.0, -1.0, -1.0),
    corner(-1.0, -1.0, 1.0),
    corner(1.0, -1.0, 1.0),
  ];
  let top = [
    corner(1.0, 1.0, -1.0),
    corner(-1.0, 1.0, -1.0),
    corner(-1.0, 1.0, 1.0),
    corner(1.0, 1.0, 1.0),
  ];

  for i in 0..4 {
    let next = (i + 1) % 4;
    buffer.set_endpoints(*cursor + i, bottom[i], bottom[next]);
    buffer.set_endpoints(*cursor + 4 + i, top[i], top[next]);
    buffer.set_endpoints(*cursor + 8 + i, bottom[i], top[i]);
  }
  *cursor += 12;
}

/// Axis-aligned-in-local-space cube with edge length `a`.
pub fn cube(buffer: &mut SegmentBuffer, cursor: &mut usize, a: f32, pos: Vec3, rot: Quat) {
  box_edges(buffer, cursor, Vec3::splat(a), pos, rot);
}

#[cfg(test)]
#[path = "plot_test.rs"]
mod plot_test;
