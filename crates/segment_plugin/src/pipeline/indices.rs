//! Shared ascending index sequence.
//!
//! Line-list meshes index their vertices with `0, 1, 2, ...`, identical for
//! every batch; generating that run once per frame (sized to the largest
//! batch) instead of once per batch removes N-1 redundant generations. The
//! sequence only ever grows, so most frames reuse the previous allocation
//! untouched.

use std::sync::Arc;

use rayon::prelude::*;

/// Reusable `0..n` index run, snapshotted by every mesh-fill task.
pub struct SharedIndexBuffer {
  indices: Arc<Vec<u32>>,
  rebuilds: usize,
}

impl SharedIndexBuffer {
  pub fn new() -> Self {
    Self {
      indices: Arc::new(Vec::new()),
      rebuilds: 0,
    }
  }

  /// Grow the sequence to cover at least `min_len` vertices.
  ///
  /// Growth rounds up to a power of two so steadily growing scenes trigger
  /// only logarithmically many rebuilds. The rebuild itself is a rayon
  /// parallel fill.
  pub fn ensure(&mut self, min_len: usize) {
    if self.indices.len() >= min_len || min_len == 0 {
      return;
    }
    let new_len = min_len.next_power_of_two();
    let run: Vec<u32> = (0..new_len as u32).into_par_iter().collect();
    self.indices = Arc::new(run);
    self.rebuilds += 1;
    log::debug!("shared index buffer grown to {new_len}");
  }

  /// Read-only snapshot for this frame's fill tasks. The `Arc` keeps the
  /// run alive even if a later frame grows the buffer while a slow task is
  /// still reading the old one.
  pub fn snapshot(&self) -> Arc<Vec<u32>> {
    Arc::clone(&self.indices)
  }

  pub fn len(&self) -> usize {
    self.indices.len()
  }

  pub fn is_empty(&self) -> bool {
    self.indices.is_empty()
  }

  /// How many times the sequence was (re)generated.
  pub fn rebuilds(&self) -> usize {
    self.rebuilds
  }
}

impl Default for SharedIndexBuffer {
  fn default() -> Self {
    Self::new()
  }
}
