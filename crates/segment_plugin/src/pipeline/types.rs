//! Pipeline I/O types for the per-frame mesh synchronization.
//!
//! ```text
//!                    SEGMENT BATCH FRAME PIPELINE
//!                    ============================
//!
//!  client (between frames)
//!  ┌───────────────────────────────┐
//!  │ batch.segments_mut()?         │  mutable only while no task holds
//!  │   .resize(n) / .set(i, seg)   │  a buffer snapshot
//!  └──────────────┬────────────────┘
//!                 ▼
//!  ┌─────────────────────────────────────────────────────────────────┐
//!  │ INITIALIZATION STAGE (per frame)                                │
//!  │ 1. deferred-dispose sweep (join → free → unregister)            │
//!  │ 2. dependency join (single global sync barrier)                 │
//!  │ 3. shared index precompute (one ascending u32 run, max-sized)   │
//!  │ 4. per batch: spawn bounds task + mesh-fill task                │
//!  │    new dependency = OR(bounds, fill)                            │
//!  │ output: Vec<PendingUpdate>                                      │
//!  └──────────────┬──────────────────────────────────────────────────┘
//!                 │ PendingUpdate[]  (frame-scoped side table)
//!                 ▼
//!  ┌─────────────────────────────────────────────────────────────────┐
//!  │ PRESENTATION STAGE (per frame, after initialization)            │
//!  │ 1. wait bounds tasks → RenderDevice::set_mesh_bounds            │
//!  │ 2. wait fill tasks   → RenderDevice::apply_mesh_data            │
//!  │ per camera event: submit_draw per live batch                    │
//!  └─────────────────────────────────────────────────────────────────┘
//! ```

use crate::batch::BatchId;
use crate::executor::TaskId;

/// Primitive topology of a staged submesh. Exactly one kind of drawable
/// exists in this plugin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeshTopology {
  /// Independent line list: every consecutive index pair is one segment.
  Lines,
}

/// Submesh descriptor for the staged payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubMeshDescriptor {
  pub index_start: u32,
  pub index_count: u32,
  pub topology: MeshTopology,
}

/// Byte-level mesh payload, populated off the main thread and atomically
/// swapped into the live mesh object by the presentation stage.
///
/// Vertex region: position-only `[f32; 3]`, two vertices per segment.
/// Index region: `u32` prefix of the frame's shared ascending sequence.
#[derive(Clone)]
pub struct StagedMeshData {
  pub vertex_bytes: Vec<u8>,
  pub index_bytes: Vec<u8>,
  pub vertex_count: u32,
  pub index_count: u32,
  pub submesh: SubMeshDescriptor,
}

impl std::fmt::Debug for StagedMeshData {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("StagedMeshData")
      .field("vertex_count", &self.vertex_count)
      .field("index_count", &self.index_count)
      .field("submesh", &self.submesh)
      .finish()
  }
}

/// One batch's pending artifacts for this frame: the two task handles whose
/// results the presentation stage consumes exactly once.
///
/// Kept outside the batch on purpose - the registry may mutate between the
/// stages (dispose_now), and the pending set records the presentation scope
/// as it was at scheduling time.
#[derive(Clone, Copy, Debug)]
pub struct PendingUpdate {
  pub batch: BatchId,
  pub bounds_task: TaskId,
  pub fill_task: TaskId,
}
