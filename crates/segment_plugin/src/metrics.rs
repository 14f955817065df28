//! Frame statistics for the batching pipeline.
//!
//! Feature-gated and runtime-toggled to ensure zero overhead when disabled.
//!
//! # Usage
//!
//! ```ignore
//! use segment_plugin::metrics::COLLECT_METRICS;
//!
//! // Compile with --features metrics
//! // Runtime toggle:
//! COLLECT_METRICS.store(false, Ordering::Relaxed);
//!
//! println!("avg frame: {:.1}us", world.metrics.frame_timings.average());
//! ```

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};

/// Runtime toggle for metrics collection.
pub static COLLECT_METRICS: AtomicBool = AtomicBool::new(true);

/// Check if metrics collection is enabled at runtime.
#[inline]
pub fn is_enabled() -> bool {
  COLLECT_METRICS.load(Ordering::Relaxed)
}

/// Rolling window for storing recent values (e.g., timing history).
#[derive(Debug, Clone)]
pub struct RollingWindow<T> {
  buffer: VecDeque<T>,
  capacity: usize,
}

impl<T> RollingWindow<T> {
  pub fn new(capacity: usize) -> Self {
    Self {
      buffer: VecDeque::with_capacity(capacity),
      capacity,
    }
  }

  /// Push a new value, evicting the oldest if at capacity.
  pub fn push(&mut self, value: T) {
    if self.buffer.len() >= self.capacity {
      self.buffer.pop_front();
    }
    self.buffer.push_back(value);
  }

  pub fn len(&self) -> usize {
    self.buffer.len()
  }

  pub fn is_empty(&self) -> bool {
    self.buffer.is_empty()
  }

  pub fn clear(&mut self) {
    self.buffer.clear();
  }

  /// Iterate over values (oldest to newest).
  pub fn iter(&self) -> impl Iterator<Item = &T> {
    self.buffer.iter()
  }

  /// Get the most recent value.
  pub fn last(&self) -> Option<&T> {
    self.buffer.back()
  }
}

impl RollingWindow<u64> {
  /// Compute the average of all values.
  pub fn average(&self) -> f64 {
    if self.buffer.is_empty() {
      0.0
    } else {
      self.buffer.iter().sum::<u64>() as f64 / self.buffer.len() as f64
    }
  }

  /// Get min and max values.
  pub fn min_max(&self) -> Option<(u64, u64)> {
    let min = *self.buffer.iter().min()?;
    let max = *self.buffer.iter().max()?;
    Some((min, max))
  }
}

impl Default for RollingWindow<u64> {
  fn default() -> Self {
    Self::new(128) // ~2 seconds at 60fps
  }
}

/// World-level statistics updated once per frame.
#[derive(Debug, Clone, Default)]
pub struct PipelineMetrics {
  /// Batches registered after the last dispose sweep.
  pub live_batches: usize,
  /// Bounds + mesh-fill pairs scheduled last frame.
  pub scheduled_updates: usize,
  /// Total frames driven this session.
  pub total_frames: u64,
  /// Last full frame (both stages) in microseconds.
  pub last_frame_us: u64,
  /// Rolling window of frame times in microseconds.
  pub frame_timings: RollingWindow<u64>,
}

impl PipelineMetrics {
  pub fn new() -> Self {
    Self::default()
  }

  /// Reset everything except the cumulative frame counter.
  pub fn reset(&mut self) {
    self.live_batches = 0;
    self.scheduled_updates = 0;
    self.last_frame_us = 0;
    self.frame_timings.clear();
  }

  pub fn record_frame(&mut self, live_batches: usize, scheduled: usize, frame_us: u64) {
    if !is_enabled() {
      return;
    }
    self.live_batches = live_batches;
    self.scheduled_updates = scheduled;
    self.total_frames += 1;
    self.last_frame_us = frame_us;
    self.frame_timings.push(frame_us);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_rolling_window_evicts_oldest() {
    let mut window = RollingWindow::new(3);
    for value in [1u64, 2, 3, 4] {
      window.push(value);
    }
    assert_eq!(window.len(), 3);
    assert_eq!(window.iter().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
    assert_eq!(window.last(), Some(&4));
  }

  #[test]
  fn test_rolling_window_statistics() {
    let mut window = RollingWindow::new(8);
    assert_eq!(window.average(), 0.0);
    assert_eq!(window.min_max(), None);

    for value in [10u64, 20, 30] {
      window.push(value);
    }
    assert_eq!(window.average(), 20.0);
    assert_eq!(window.min_max(), Some((10, 30)));
  }

  #[test]
  fn test_record_frame_updates_counters() {
    let mut metrics = PipelineMetrics::new();
    metrics.record_frame(2, 2, 1500);
    metrics.record_frame(3, 3, 500);

    assert_eq!(metrics.live_batches, 3);
    assert_eq!(metrics.total_frames, 2);
    assert_eq!(metrics.last_frame_us, 500);
    assert_eq!(metrics.frame_timings.len(), 2);
  }

  #[test]
  fn test_reset_keeps_cumulative_frame_count() {
    let mut metrics = PipelineMetrics::new();
    metrics.record_frame(1, 1, 100);
    metrics.reset();

    assert_eq!(metrics.total_frames, 1);
    assert_eq!(metrics.live_batches, 0);
    assert!(metrics.frame_timings.is_empty());
  }
}
