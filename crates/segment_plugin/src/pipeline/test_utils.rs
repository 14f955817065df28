//! Test utilities for pipeline tests.
//!
//! Provides a recording render device so tests can assert exactly which
//! host-renderer calls the pipeline made (and, for destroys, that each
//! happened exactly once).

use std::collections::{HashMap, HashSet};

use glam::{Mat4, Vec3};

use crate::device::{MaterialHandle, MeshHandle, RenderDevice};
use crate::types::{MinMaxAABB, Segment};

use super::types::StagedMeshData;

/// In-memory render device double.
///
/// Destroying a resource twice, or touching one that was never created
/// (or already destroyed), panics: the tests lean on that to verify the
/// exactly-once disposal contract.
#[derive(Default)]
pub struct RecordingDevice {
  next_handle: u64,
  live_meshes: HashSet<MeshHandle>,
  live_materials: HashSet<MaterialHandle>,
  /// Latest committed payload per mesh.
  pub mesh_data: HashMap<MeshHandle, StagedMeshData>,
  /// Latest committed bounds per mesh.
  pub bounds: HashMap<MeshHandle, MinMaxAABB>,
  pub apply_calls: usize,
  pub bounds_calls: usize,
  pub mesh_destroys: usize,
  pub material_destroys: usize,
  pub draws: Vec<(MeshHandle, MaterialHandle)>,
}

impl RecordingDevice {
  pub fn new() -> Self {
    Self::default()
  }

  fn next(&mut self) -> u64 {
    self.next_handle += 1;
    self.next_handle
  }

  /// Register a root material for tests to clone from.
  pub fn make_material(&mut self) -> MaterialHandle {
    let handle = MaterialHandle::from_raw(self.next());
    self.live_materials.insert(handle);
    handle
  }

  pub fn live_mesh_count(&self) -> usize {
    self.live_meshes.len()
  }

  pub fn live_material_count(&self) -> usize {
    self.live_materials.len()
  }
}

impl RenderDevice for RecordingDevice {
  type Camera = ();

  fn create_mesh(&mut self) -> MeshHandle {
    let handle = MeshHandle::from_raw(self.next());
    self.live_meshes.insert(handle);
    handle
  }

  fn apply_mesh_data(&mut self, mesh: MeshHandle, data: StagedMeshData) {
    assert!(self.live_meshes.contains(&mesh), "apply to dead mesh");
    self.apply_calls += 1;
    self.mesh_data.insert(mesh, data);
  }

  fn set_mesh_bounds(&mut self, mesh: MeshHandle, bounds: MinMaxAABB) {
    assert!(self.live_meshes.contains(&mesh), "bounds on dead mesh");
    self.bounds_calls += 1;
    self.bounds.insert(mesh, bounds);
  }

  fn destroy_mesh(&mut self, mesh: MeshHandle) {
    assert!(self.live_meshes.remove(&mesh), "double mesh destroy");
    self.mesh_destroys += 1;
  }

  fn clone_material(&mut self, material: MaterialHandle) -> MaterialHandle {
    assert!(self.live_materials.contains(&material), "clone dead material");
    let handle = MaterialHandle::from_raw(self.next());
    self.live_materials.insert(handle);
    handle
  }

  fn destroy_material(&mut self, material: MaterialHandle) {
    assert!(
      self.live_materials.remove(&material),
      "double material destroy"
    );
    self.material_destroys += 1;
  }

  fn submit_draw(
    &mut self,
    mesh: MeshHandle,
    material: MaterialHandle,
    _transform: Mat4,
    _camera: &Self::Camera,
  ) {
    self.draws.push((mesh, material));
  }
}

/// Three unit-axis segments rooted at the origin.
pub fn axis_segments() -> [Segment; 3] {
  [
    Segment::new(Vec3::ZERO, Vec3::X),
    Segment::new(Vec3::ZERO, Vec3::Y),
    Segment::new(Vec3::ZERO, Vec3::Z),
  ]
}
