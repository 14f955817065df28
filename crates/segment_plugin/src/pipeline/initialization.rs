//! Initialization stage: dispose sweep, dependency join, work scheduling.
//!
//! Once per frame this turns every live batch's buffer contents into pending
//! computed artifacts (bounds + staged mesh data) without blocking longer
//! than the single dependency join, and without ever reading a buffer a
//! previous task still holds.

use std::sync::Arc;

use crate::batch::BatchState;
use crate::bytes;
use crate::device::RenderDevice;
use crate::executor::TaskExecutor;
use crate::registry::BatchRegistry;
use crate::types::{MinMaxAABB, Segment};

use super::indices::SharedIndexBuffer;
use super::types::{MeshTopology, PendingUpdate, StagedMeshData, SubMeshDescriptor};

/// Component-wise min/max over every segment endpoint.
///
/// Zero segments yield the sentinel empty box, never a zero-sized box at the
/// origin.
pub fn segment_bounds(segments: &[Segment]) -> MinMaxAABB {
  let mut combined = MinMaxAABB::EMPTY;
  for segment in segments.iter().rev() {
    combined.encapsulate(segment.start);
    combined.encapsulate(segment.end);
  }
  combined
}

/// Build the staged line-list payload for one buffer snapshot.
///
/// Vertices are the raw segment bytes (two positions per segment); indices
/// are a prefix of the frame's shared ascending run.
pub fn build_staged_data(segments: &[Segment], shared_indices: &Arc<Vec<u32>>) -> StagedMeshData {
  let vertex_count = segments.len() * 2;
  let index_count = vertex_count;
  debug_assert!(shared_indices.len() >= index_count);

  StagedMeshData {
    vertex_bytes: bytes::to_byte_vec(segments),
    index_bytes: bytes::to_byte_vec(&shared_indices[..index_count]),
    vertex_count: vertex_count as u32,
    index_count: index_count as u32,
    submesh: SubMeshDescriptor {
      index_start: 0,
      index_count: index_count as u32,
      topology: MeshTopology::Lines,
    },
  }
}

/// Run the initialization stage for one frame.
///
/// Returns the frame's pending set; the presentation stage consumes it
/// exactly once.
#[cfg_attr(
  feature = "tracing",
  tracing::instrument(skip_all, name = "pipeline::run_initialization")
)]
pub fn run_initialization<R: RenderDevice>(
  registry: &mut BatchRegistry,
  executor: &mut TaskExecutor,
  indices: &mut SharedIndexBuffer,
  device: &mut R,
) -> Vec<PendingUpdate> {
  // 1. Deferred-dispose sweep. The only point where deferred disposal is
  // fulfilled: joining first guarantees no task still touches the batch's
  // resources when they are freed. Reverse order keeps removal stable.
  for i in (0..registry.len()).rev() {
    if registry.batch_at(i).state() != BatchState::DisposeRequested {
      continue;
    }
    let dep = registry.batch_at(i).dependency().clone();
    executor.discard_dependency(&dep);
    let mut batch = registry.remove_at(i);
    batch.dispose(device);
  }

  // 2. Dependency join: the single global sync barrier per frame. After
  // this, no asynchronous reader of any buffer is still running, so every
  // buffer may be resized or read by the client next frame.
  for batch in registry.iter_mut() {
    let dep = batch.dependency().clone();
    executor.wait_dependency(&dep);
    batch.clear_dependency();
  }

  // 3. Shared index precompute, sized to the largest batch this frame.
  let max_vertices = registry
    .iter()
    .map(|batch| batch.segments().vertex_count())
    .max()
    .unwrap_or(0);
  indices.ensure(max_vertices);

  // 4. Per-batch scheduling. Bounds and fill read the same immutable
  // snapshot and write disjoint outputs, so they may run concurrently with
  // each other; both are OR'd into the batch's new dependency handle.
  let mut pending = Vec::with_capacity(registry.len());
  for batch in registry.iter_mut() {
    let buffer = batch.share_buffer();
    let bounds_task = executor.spawn(move || segment_bounds(buffer.as_slice()));

    let buffer = batch.share_buffer();
    let shared = indices.snapshot();
    let fill_task = executor.spawn(move || build_staged_data(buffer.as_slice(), &shared));

    batch.push_dependency(bounds_task);
    batch.push_dependency(fill_task);

    pending.push(PendingUpdate {
      batch: batch.id(),
      bounds_task,
      fill_task,
    });
  }

  log::trace!("initialization scheduled {} batch updates", pending.len());
  pending
}

#[cfg(test)]
#[path = "initialization_test.rs"]
mod initialization_test;
