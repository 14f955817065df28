use glam::Vec3;

use crate::batch::Batch;
use crate::device::RenderDevice;
use crate::executor::TaskExecutor;
use crate::registry::BatchRegistry;
use crate::types::{MinMaxAABB, Segment};

use super::super::indices::SharedIndexBuffer;
use super::super::initialization::run_initialization;
use super::super::test_utils::{axis_segments, RecordingDevice};
use super::super::types::{PendingUpdate, StagedMeshData};
use super::{draw_batches, run_presentation};

fn add_batch(device: &mut RecordingDevice, registry: &mut BatchRegistry, segments: &[Segment]) {
  let root = device.make_material();
  let material = device.clone_material(root);
  let mesh = device.create_mesh();
  let mut batch = Batch::new(mesh, material);
  for &segment in segments {
    batch.segments_mut().unwrap().push(segment);
  }
  registry.add(batch);
}

#[test]
fn commits_bounds_and_mesh_data() {
  let mut device = RecordingDevice::new();
  let mut registry = BatchRegistry::new();
  let mut executor = TaskExecutor::new();
  let mut indices = SharedIndexBuffer::new();
  add_batch(&mut device, &mut registry, &axis_segments());

  let pending = run_initialization(&mut registry, &mut executor, &mut indices, &mut device);
  run_presentation(&mut registry, &mut executor, &mut device, pending);

  assert_eq!(device.bounds_calls, 1);
  assert_eq!(device.apply_calls, 1);

  let mesh = registry.batch_at(0).mesh();
  let bounds = device.bounds[&mesh];
  assert_eq!(bounds.min, Vec3::ZERO);
  assert_eq!(bounds.max, Vec3::ONE);

  let data = &device.mesh_data[&mesh];
  assert_eq!(data.vertex_count, 6);
  assert_eq!(data.index_count, 6);
}

#[test]
fn empty_pending_set_commits_nothing() {
  let mut device = RecordingDevice::new();
  let mut registry = BatchRegistry::new();
  let mut executor = TaskExecutor::new();
  add_batch(&mut device, &mut registry, &axis_segments());

  run_presentation(&mut registry, &mut executor, &mut device, Vec::new());

  assert_eq!(device.bounds_calls, 0);
  assert_eq!(device.apply_calls, 0);
}

#[test]
fn orphaned_artifacts_are_discarded_without_device_calls() {
  let mut device = RecordingDevice::new();
  let mut registry = BatchRegistry::new();
  let mut executor = TaskExecutor::new();
  let mut indices = SharedIndexBuffer::new();
  add_batch(&mut device, &mut registry, &axis_segments());

  let pending = run_initialization(&mut registry, &mut executor, &mut indices, &mut device);

  // Batch disappears between the stages (the dispose_now path).
  let dep = registry.batch_at(0).dependency().clone();
  executor.discard_dependency(&dep);
  let mut batch = registry.remove_at(0);
  batch.dispose(&mut device);

  run_presentation(&mut registry, &mut executor, &mut device, pending);

  assert_eq!(device.bounds_calls, 0);
  assert_eq!(device.apply_calls, 0);
  assert_eq!(executor.pending_count(), 0);
}

#[test]
fn panicked_worker_keeps_stale_geometry() {
  let mut device = RecordingDevice::new();
  let mut registry = BatchRegistry::new();
  let mut executor = TaskExecutor::new();
  add_batch(&mut device, &mut registry, &axis_segments());
  let id = registry.batch_at(0).id();

  // Hand-built pending entry whose workers both fail.
  let bounds_task = executor.spawn(|| -> MinMaxAABB { panic!("worker failure") });
  let fill_task = executor.spawn(|| -> StagedMeshData { panic!("worker failure") });
  registry.batch_at_mut(0).push_dependency(bounds_task);
  registry.batch_at_mut(0).push_dependency(fill_task);

  let pending = vec![PendingUpdate {
    batch: id,
    bounds_task,
    fill_task,
  }];
  // Must not panic or hang; the mesh just keeps whatever it had.
  run_presentation(&mut registry, &mut executor, &mut device, pending);

  assert_eq!(device.bounds_calls, 0);
  assert_eq!(device.apply_calls, 0);
  assert_eq!(registry.len(), 1);
}

#[test]
fn draws_every_live_batch_in_reverse_registry_order() {
  let mut device = RecordingDevice::new();
  let mut registry = BatchRegistry::new();
  add_batch(&mut device, &mut registry, &axis_segments());
  add_batch(&mut device, &mut registry, &axis_segments());

  let first = registry.batch_at(0);
  let second = registry.batch_at(1);
  let expected = vec![
    (second.mesh(), second.material()),
    (first.mesh(), first.material()),
  ];

  draw_batches(&registry, &mut device, &());
  assert_eq!(device.draws, expected);
}
