//! SegmentWorld - explicit context owning the whole batching pipeline.
//!
//! One world owns the render device handle, the batch registry, the task
//! executor, the shared index run, and the frame-scoped pending set. Worlds
//! are plain values: construct as many as needed (one per host scene, one
//! per test) and drop them for clean shutdown - there is no process-global
//! state.
//!
//! # Usage
//!
//! ```ignore
//! let mut world = SegmentWorld::new(device);
//! let batch = world.create_batch(material);
//!
//! // Every frame:
//! let segments = world.edit(batch)?;
//! segments.resize(count);
//! segments.set_endpoints(0, start, end);
//! world.update();
//!
//! // Every camera event:
//! world.draw(&camera);
//! ```

use web_time::Instant;

use crate::batch::{Batch, BatchId};
use crate::buffer::SegmentBuffer;
use crate::device::{MaterialHandle, RenderDevice};
use crate::error::BatchError;
use crate::executor::TaskExecutor;
#[cfg(feature = "metrics")]
use crate::metrics::PipelineMetrics;
use crate::pipeline::indices::SharedIndexBuffer;
use crate::pipeline::types::PendingUpdate;
use crate::pipeline::{draw_batches, run_initialization, run_presentation};
use crate::registry::BatchRegistry;

pub struct SegmentWorld<R: RenderDevice> {
  device: R,
  registry: BatchRegistry,
  executor: TaskExecutor,
  indices: SharedIndexBuffer,
  pending: Vec<PendingUpdate>,
  #[cfg(feature = "metrics")]
  pub metrics: PipelineMetrics,
}

impl<R: RenderDevice> SegmentWorld<R> {
  pub fn new(device: R) -> Self {
    Self {
      device,
      registry: BatchRegistry::new(),
      executor: TaskExecutor::new(),
      indices: SharedIndexBuffer::new(),
      pending: Vec::new(),
      #[cfg(feature = "metrics")]
      metrics: PipelineMetrics::default(),
    }
  }

  // ===========================================================================
  // Batch lifecycle
  // ===========================================================================

  /// Create an empty batch: clones the material, allocates an empty dynamic
  /// mesh, registers the batch. Its dependency handle starts complete.
  pub fn create_batch(&mut self, material: MaterialHandle) -> BatchId {
    let material_copy = self.device.clone_material(material);
    let mesh = self.device.create_mesh();
    let batch = Batch::new(mesh, material_copy);
    let id = batch.id();
    self.registry.add(batch);
    log::debug!("created batch {id:?}");
    id
  }

  /// Deferred destroy: resources are freed at the next initialization sweep,
  /// after the batch's outstanding work completes. Idempotent.
  pub fn request_dispose(&mut self, id: BatchId) -> Result<(), BatchError> {
    self
      .registry
      .get_mut(id)
      .ok_or(BatchError::UnknownBatch(id))?
      .request_dispose()
  }

  /// Immediate destroy: blocks until the batch's outstanding work completes,
  /// then frees its resources and unregisters it.
  pub fn dispose_now(&mut self, id: BatchId) -> Result<(), BatchError> {
    let index = self
      .registry
      .index_of(id)
      .ok_or(BatchError::UnknownBatch(id))?;

    let dep = self.registry.batch_at(index).dependency().clone();
    self.executor.discard_dependency(&dep);
    // This frame's pending artifacts for the batch were just discarded with
    // the dependency; drop their entries so presentation does not report
    // them missing.
    self.pending.retain(|update| update.batch != id);

    let mut batch = self.registry.remove_at(index);
    batch.dispose(&mut self.device);
    Ok(())
  }

  /// Join every batch's outstanding work, dispose everything, leave the
  /// registry empty. Subsystem-teardown path.
  pub fn destroy_all(&mut self) {
    self.pending.clear();
    for i in (0..self.registry.len()).rev() {
      let dep = self.registry.batch_at(i).dependency().clone();
      self.executor.discard_dependency(&dep);
      let mut batch = self.registry.remove_at(i);
      batch.dispose(&mut self.device);
    }
    debug_assert!(self.registry.is_empty());
  }

  // ===========================================================================
  // Buffer access
  // ===========================================================================

  /// Mutable segment access. Fails while a scheduled task still holds a
  /// snapshot of the buffer (i.e. between `run_initialization` and
  /// `run_presentation`) and after disposal.
  pub fn edit(&mut self, id: BatchId) -> Result<&mut SegmentBuffer, BatchError> {
    self
      .registry
      .get_mut(id)
      .ok_or(BatchError::UnknownBatch(id))?
      .segments_mut()
  }

  /// Read-only segment view. Safe at any time: in-flight tasks only read.
  pub fn segments(&self, id: BatchId) -> Result<&SegmentBuffer, BatchError> {
    Ok(
      self
        .registry
        .get(id)
        .ok_or(BatchError::UnknownBatch(id))?
        .segments(),
    )
  }

  pub fn len(&self, id: BatchId) -> Result<usize, BatchError> {
    Ok(self.segments(id)?.len())
  }

  pub fn batch(&self, id: BatchId) -> Result<&Batch, BatchError> {
    self.registry.get(id).ok_or(BatchError::UnknownBatch(id))
  }

  pub fn contains(&self, id: BatchId) -> bool {
    self.registry.get(id).is_some()
  }

  pub fn batch_count(&self) -> usize {
    self.registry.len()
  }

  /// Ids of every batch still registered, in insertion order.
  pub fn batch_ids(&self) -> Vec<BatchId> {
    self.registry.ids()
  }

  // ===========================================================================
  // Frame driver
  // ===========================================================================

  /// Run the initialization stage: dispose sweep, dependency join, shared
  /// index precompute, per-batch work scheduling.
  pub fn run_initialization(&mut self) {
    // Back-to-back initialization without presentation orphans the previous
    // pending set; reclaim it so results cannot accumulate in the executor.
    for update in std::mem::take(&mut self.pending) {
      self.executor.discard(update.bounds_task);
      self.executor.discard(update.fill_task);
    }

    self.pending = run_initialization(
      &mut self.registry,
      &mut self.executor,
      &mut self.indices,
      &mut self.device,
    );
  }

  /// Run the presentation stage: join this frame's tasks and commit bounds
  /// plus staged mesh data onto the live meshes.
  pub fn run_presentation(&mut self) {
    let pending = std::mem::take(&mut self.pending);
    run_presentation(&mut self.registry, &mut self.executor, &mut self.device, pending);
  }

  /// One full frame: initialization then presentation, in order.
  pub fn update(&mut self) {
    let start = Instant::now();

    self.run_initialization();
    #[cfg(feature = "metrics")]
    let scheduled = self.pending.len();
    self.run_presentation();

    let elapsed_us = start.elapsed().as_micros() as u64;
    log::trace!("frame update took {elapsed_us}us");
    #[cfg(feature = "metrics")]
    self
      .metrics
      .record_frame(self.registry.len(), scheduled, elapsed_us);
  }

  /// Submit one draw call per live batch for this camera event.
  pub fn draw(&mut self, camera: &R::Camera) {
    draw_batches(&self.registry, &mut self.device, camera);
  }

  pub fn device(&self) -> &R {
    &self.device
  }

  pub fn device_mut(&mut self) -> &mut R {
    &mut self.device
  }

  /// True while any batch's outstanding work is incomplete.
  pub fn is_busy(&mut self) -> bool {
    let deps: Vec<_> = self
      .registry
      .iter()
      .map(|batch| batch.dependency().clone())
      .collect();
    deps
      .iter()
      .any(|dep| !self.executor.dependency_complete(dep))
  }
}

impl<R: RenderDevice> Drop for SegmentWorld<R> {
  fn drop(&mut self) {
    self.destroy_all();
  }
}

#[cfg(test)]
#[path = "world_test.rs"]
mod world_test;
