use crate::batch::Batch;
use crate::device::RenderDevice;
use crate::pipeline::test_utils::RecordingDevice;

use super::BatchRegistry;

fn make_batch(device: &mut RecordingDevice) -> Batch {
  let root = device.make_material();
  let material = device.clone_material(root);
  let mesh = device.create_mesh();
  Batch::new(mesh, material)
}

#[test]
fn starts_empty() {
  let registry = BatchRegistry::new();
  assert!(registry.is_empty());
  assert_eq!(registry.len(), 0);
  assert!(registry.ids().is_empty());
}

#[test]
fn add_and_lookup() {
  let mut device = RecordingDevice::new();
  let mut registry = BatchRegistry::new();

  let a = make_batch(&mut device);
  let b = make_batch(&mut device);
  let (id_a, id_b) = (a.id(), b.id());
  registry.add(a);
  registry.add(b);

  assert_eq!(registry.len(), 2);
  assert_eq!(registry.index_of(id_a), Some(0));
  assert_eq!(registry.index_of(id_b), Some(1));
  assert_eq!(registry.get(id_b).map(|batch| batch.id()), Some(id_b));
  assert_eq!(registry.get_mut(id_a).map(|batch| batch.id()), Some(id_a));
  assert_eq!(registry.ids(), vec![id_a, id_b]);
}

#[test]
fn unknown_id_yields_none() {
  let mut device = RecordingDevice::new();
  let mut registry = BatchRegistry::new();

  let kept = make_batch(&mut device);
  let stray = make_batch(&mut device);
  let stray_id = stray.id();
  registry.add(kept);

  assert_eq!(registry.index_of(stray_id), None);
  assert!(registry.get(stray_id).is_none());
  drop(stray);
}

#[test]
fn remove_at_preserves_insertion_order() {
  let mut device = RecordingDevice::new();
  let mut registry = BatchRegistry::new();

  let ids: Vec<_> = (0..4)
    .map(|_| {
      let batch = make_batch(&mut device);
      let id = batch.id();
      registry.add(batch);
      id
    })
    .collect();

  let removed = registry.remove_at(1);
  assert_eq!(removed.id(), ids[1]);
  assert_eq!(registry.ids(), vec![ids[0], ids[2], ids[3]]);
}

#[test]
fn reverse_sweep_can_remove_every_element() {
  let mut device = RecordingDevice::new();
  let mut registry = BatchRegistry::new();
  for _ in 0..3 {
    let batch = make_batch(&mut device);
    registry.add(batch);
  }

  for i in (0..registry.len()).rev() {
    registry.remove_at(i);
  }
  assert!(registry.is_empty());
}

#[test]
fn iter_is_double_ended() {
  let mut device = RecordingDevice::new();
  let mut registry = BatchRegistry::new();
  let a = make_batch(&mut device);
  let b = make_batch(&mut device);
  let (id_a, id_b) = (a.id(), b.id());
  registry.add(a);
  registry.add(b);

  let reversed: Vec<_> = registry.iter().rev().map(|batch| batch.id()).collect();
  assert_eq!(reversed, vec![id_b, id_a]);
}
