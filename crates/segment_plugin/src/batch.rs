//! Batch - the unit of GPU submission.
//!
//! A batch owns one segment buffer, one mesh, one material clone, and the
//! dependency handle of the most recent asynchronous work scheduled against
//! its buffer. The buffer lives in an `Arc`: scheduling clones the `Arc`
//! into the worker task, and mutable access is only granted while the batch
//! holds the sole reference. Resizing a buffer that a task still reads is
//! therefore not a documented crash but an unrepresentable state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::buffer::SegmentBuffer;
use crate::device::{MaterialHandle, MeshHandle, RenderDevice};
use crate::error::BatchError;
use crate::executor::{Dependency, TaskId};

/// Opaque batch identifier, unique within the process lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BatchId(u64);

impl BatchId {
  pub(crate) fn next() -> Self {
    static COUNTER: AtomicU64 = AtomicU64::new(1);
    Self(COUNTER.fetch_add(1, Ordering::Relaxed))
  }

  pub fn raw(&self) -> u64 {
    self.0
  }
}

/// Batch lifecycle. The dispose track can be entered at any point but always
/// passes through a full dependency join before `Disposed` is reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BatchState {
  /// Normal operation: buffer mutable between frames, work schedulable.
  Live,

  /// Deferred destroy requested; resources are freed at the next
  /// initialization-stage sweep, after the outstanding work completes.
  DisposeRequested,

  /// Terminal. Mesh and material have been destroyed exactly once.
  Disposed,
}

pub struct Batch {
  id: BatchId,
  buffer: Arc<SegmentBuffer>,
  mesh: MeshHandle,
  material: MaterialHandle,
  dependency: Dependency,
  state: BatchState,
}

impl Batch {
  /// Created with an empty buffer and an already-complete dependency.
  pub(crate) fn new(mesh: MeshHandle, material: MaterialHandle) -> Self {
    Self {
      id: BatchId::next(),
      buffer: Arc::new(SegmentBuffer::new()),
      mesh,
      material,
      dependency: Dependency::default(),
      state: BatchState::Live,
    }
  }

  pub fn id(&self) -> BatchId {
    self.id
  }

  pub fn mesh(&self) -> MeshHandle {
    self.mesh
  }

  pub fn material(&self) -> MaterialHandle {
    self.material
  }

  pub fn state(&self) -> BatchState {
    self.state
  }

  pub fn is_disposed(&self) -> bool {
    self.state == BatchState::Disposed
  }

  /// Read-only segment view. Shared reads are always safe: in-flight tasks
  /// only ever read the buffer.
  pub fn segments(&self) -> &SegmentBuffer {
    &self.buffer
  }

  pub fn len(&self) -> usize {
    self.buffer.len()
  }

  pub fn is_empty(&self) -> bool {
    self.buffer.is_empty()
  }

  /// Mutable segment access, granted only when no scheduled task still holds
  /// a snapshot of the buffer.
  pub fn segments_mut(&mut self) -> Result<&mut SegmentBuffer, BatchError> {
    if self.state == BatchState::Disposed {
      return Err(BatchError::UseAfterDispose(self.id));
    }
    let id = self.id;
    Arc::get_mut(&mut self.buffer).ok_or(BatchError::BufferInFlight(id))
  }

  /// Snapshot the buffer for a worker task. The clone keeps the buffer alive
  /// and blocks `segments_mut` until the task drops it.
  pub(crate) fn share_buffer(&self) -> Arc<SegmentBuffer> {
    Arc::clone(&self.buffer)
  }

  pub fn dependency(&self) -> &Dependency {
    &self.dependency
  }

  /// OR a freshly scheduled task into the outstanding-work handle.
  pub(crate) fn push_dependency(&mut self, task: TaskId) {
    self.dependency.push(task);
  }

  /// Reset the handle after a full join proved it complete.
  pub(crate) fn clear_dependency(&mut self) {
    self.dependency = Dependency::default();
  }

  /// Deferred destroy: flags the batch for the next initialization sweep.
  /// Idempotent; never blocks; legal while work is outstanding.
  pub fn request_dispose(&mut self) -> Result<(), BatchError> {
    match self.state {
      BatchState::Disposed => Err(BatchError::UseAfterDispose(self.id)),
      BatchState::Live | BatchState::DisposeRequested => {
        self.state = BatchState::DisposeRequested;
        Ok(())
      }
    }
  }

  /// Free mesh and material exactly once. The caller must have joined the
  /// dependency handle first.
  pub(crate) fn dispose<R: RenderDevice>(&mut self, device: &mut R) {
    if self.state == BatchState::Disposed {
      return;
    }
    device.destroy_mesh(self.mesh);
    device.destroy_material(self.material);
    self.state = BatchState::Disposed;
    log::debug!("disposed batch {:?}", self.id);
  }
}

#[cfg(test)]
#[path = "batch_test.rs"]
mod batch_test;
