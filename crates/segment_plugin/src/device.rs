//! Host-renderer seam.
//!
//! The plugin never talks to a GPU itself; it produces staged mesh payloads
//! and bounds, and hands them to whatever renderer hosts it through the
//! `RenderDevice` trait. Engine bridges implement the trait; tests use the
//! recording double in `pipeline::test_utils`.

use glam::Mat4;

use crate::pipeline::types::StagedMeshData;
use crate::types::MinMaxAABB;

/// Opaque handle to a host mesh resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MeshHandle(u64);

impl MeshHandle {
  pub fn from_raw(raw: u64) -> Self {
    Self(raw)
  }

  pub fn raw(&self) -> u64 {
    self.0
  }
}

/// Opaque handle to a host material resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MaterialHandle(u64);

impl MaterialHandle {
  pub fn from_raw(raw: u64) -> Self {
    Self(raw)
  }

  pub fn raw(&self) -> u64 {
    self.0
  }
}

/// Renderer-side operations consumed by the pipeline.
///
/// Mesh objects are not safe to mutate from worker threads in the host
/// renderer model, so every method here is called from the orchestrating
/// thread only; the worker threads stop at producing `StagedMeshData`.
pub trait RenderDevice {
  /// Host camera/render-event context passed through to draw submission.
  type Camera;

  /// Allocate an empty dynamic mesh with the fixed position-only line-list
  /// layout.
  fn create_mesh(&mut self) -> MeshHandle;

  /// Atomically swap the mesh's GPU buffers for the staged payload and mark
  /// it for upload.
  fn apply_mesh_data(&mut self, mesh: MeshHandle, data: StagedMeshData);

  /// Replace the mesh's bounding volume.
  fn set_mesh_bounds(&mut self, mesh: MeshHandle, bounds: MinMaxAABB);

  /// Destroy the mesh resource. Called exactly once per mesh.
  fn destroy_mesh(&mut self, mesh: MeshHandle);

  /// Clone a material so a batch can own its instance (per-batch shader
  /// parameters stay isolated).
  fn clone_material(&mut self, material: MaterialHandle) -> MaterialHandle;

  /// Destroy a material clone. Called exactly once per clone.
  fn destroy_material(&mut self, material: MaterialHandle);

  /// Submit one draw for this camera event.
  fn submit_draw(
    &mut self,
    mesh: MeshHandle,
    material: MaterialHandle,
    transform: Mat4,
    camera: &Self::Camera,
  );
}
