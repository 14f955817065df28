//! Presentation stage: commit pending artifacts to the live meshes, draw.
//!
//! Strictly ordered after the initialization stage that produced the pending
//! set. Mesh objects are only touched from the orchestrating thread, so both
//! commit steps join their tasks before calling into the device.
//!
//! A single failed batch (panicked worker, result missing) keeps its stale
//! geometry for a frame and is logged; it never aborts the pass for the
//! remaining batches.

use glam::Mat4;

use crate::device::RenderDevice;
use crate::executor::TaskExecutor;
use crate::registry::BatchRegistry;
use crate::types::MinMaxAABB;

use super::types::{PendingUpdate, StagedMeshData};

/// Commit every pending artifact onto its batch's mesh.
#[cfg_attr(
  feature = "tracing",
  tracing::instrument(skip_all, name = "pipeline::run_presentation")
)]
pub fn run_presentation<R: RenderDevice>(
  registry: &mut BatchRegistry,
  executor: &mut TaskExecutor,
  device: &mut R,
  pending: Vec<PendingUpdate>,
) {
  // 1. Bounds first: join all bounds tasks, push each box onto its mesh.
  for update in &pending {
    executor.wait(update.bounds_task);
    let Some(batch) = registry.get(update.batch) else {
      // Disposed between the stages; drop the orphaned artifact.
      executor.discard(update.bounds_task);
      continue;
    };
    match executor.take::<MinMaxAABB>(update.bounds_task) {
      Some(bounds) => device.set_mesh_bounds(batch.mesh(), bounds),
      None => log::warn!(
        "bounds task for batch {:?} produced no result; keeping stale bounds",
        update.batch
      ),
    }
  }

  // 2. Mesh data: join fill tasks, swap each mesh's buffers for the staged
  // payload.
  for update in &pending {
    executor.wait(update.fill_task);
    let Some(batch) = registry.get(update.batch) else {
      executor.discard(update.fill_task);
      continue;
    };
    match executor.take::<StagedMeshData>(update.fill_task) {
      Some(data) => device.apply_mesh_data(batch.mesh(), data),
      None => log::warn!(
        "mesh-fill task for batch {:?} produced no result; keeping stale geometry",
        update.batch
      ),
    }
  }

  // 3. The pending set was moved in and dies here: a frame with nothing
  // newly scheduled commits nothing.
}

/// Submit one draw call per live batch for this camera event.
///
/// Iteration is reverse registry order (last registered drawn first); draws
/// are depth-independent line primitives, so ordering has no correctness
/// impact.
pub fn draw_batches<R: RenderDevice>(
  registry: &BatchRegistry,
  device: &mut R,
  camera: &R::Camera,
) {
  for batch in registry.iter().rev() {
    device.submit_draw(batch.mesh(), batch.material(), Mat4::IDENTITY, camera);
  }
}

#[cfg(test)]
#[path = "presentation_test.rs"]
mod presentation_test;
