//! Headless demo: drives the segment pipeline against a logging render
//! device for a fixed number of frames.
//!
//! Run with `RUST_LOG=info cargo run -p segment_demo` (use `debug` to see
//! batch lifecycle events, `trace` for per-frame timing).

use glam::{Mat4, Quat, Vec3};

use segment_plugin::{
  plot, MaterialHandle, MeshHandle, MinMaxAABB, RenderDevice, SegmentWorld, StagedMeshData,
};

const FRAMES: u32 = 60;

/// Render device that logs every call instead of talking to a GPU.
#[derive(Default)]
struct LoggingDevice {
  next_handle: u64,
  draws: u64,
}

impl LoggingDevice {
  fn next(&mut self) -> u64 {
    self.next_handle += 1;
    self.next_handle
  }
}

impl RenderDevice for LoggingDevice {
  type Camera = ();

  fn create_mesh(&mut self) -> MeshHandle {
    let handle = MeshHandle::from_raw(self.next());
    log::info!("create_mesh -> {}", handle.raw());
    handle
  }

  fn apply_mesh_data(&mut self, mesh: MeshHandle, data: StagedMeshData) {
    log::debug!(
      "apply_mesh_data mesh={} vertices={} indices={}",
      mesh.raw(),
      data.vertex_count,
      data.index_count
    );
  }

  fn set_mesh_bounds(&mut self, mesh: MeshHandle, bounds: MinMaxAABB) {
    log::debug!(
      "set_mesh_bounds mesh={} min={:?} max={:?}",
      mesh.raw(),
      bounds.min,
      bounds.max
    );
  }

  fn destroy_mesh(&mut self, mesh: MeshHandle) {
    log::info!("destroy_mesh {}", mesh.raw());
  }

  fn clone_material(&mut self, material: MaterialHandle) -> MaterialHandle {
    let handle = MaterialHandle::from_raw(self.next());
    log::info!("clone_material {} -> {}", material.raw(), handle.raw());
    handle
  }

  fn destroy_material(&mut self, material: MaterialHandle) {
    log::info!("destroy_material {}", material.raw());
  }

  fn submit_draw(
    &mut self,
    _mesh: MeshHandle,
    _material: MaterialHandle,
    _transform: Mat4,
    _camera: &Self::Camera,
  ) {
    self.draws += 1;
  }
}

fn main() {
  env_logger::init();

  let mut world = SegmentWorld::new(LoggingDevice::default());
  let line_material = MaterialHandle::from_raw(1);

  // One batch with the three transform axes, one with a plotted scene.
  let axes = world.create_batch(line_material);
  let scene = world.create_batch(line_material);

  for frame in 0..FRAMES {
    let t = frame as f32 / FRAMES as f32;
    let rotation = Quat::from_rotation_y(t * std::f32::consts::TAU);

    // The axes batch rewrites the same three segments every frame.
    if let Ok(buffer) = world.edit(axes) {
      buffer.resize(3);
      buffer.set_endpoints(0, Vec3::ZERO, rotation * Vec3::X);
      buffer.set_endpoints(1, Vec3::ZERO, rotation * Vec3::Y);
      buffer.set_endpoints(2, Vec3::ZERO, rotation * Vec3::Z);
    }

    // The scene batch re-plots a spinning wireframe composition.
    if let Ok(buffer) = world.edit(scene) {
      let mut cursor = 0;
      plot::circle(buffer, &mut cursor, 2.0, Vec3::ZERO, rotation, 64);
      plot::cube(buffer, &mut cursor, 1.0, Vec3::new(3.0, 0.0, 0.0), rotation);
      plot::dashed_line(buffer, &mut cursor, Vec3::ZERO, Vec3::new(3.0, 0.0, 0.0), 8);
      plot::arrow(buffer, &mut cursor, Vec3::new(0.0, -2.0, 0.0), Vec3::new(0.0, 2.0, 0.0));
      buffer.resize(cursor);
    }

    world.update();
    world.draw(&());

    // Half-way through, retire the axes batch; the frame after this one
    // fulfills the request and frees its mesh and material.
    if frame == FRAMES / 2 {
      if let Err(err) = world.request_dispose(axes) {
        log::error!("dispose request failed: {err}");
      }
    }
  }

  log::info!(
    "done: {} frames, {} draw submissions, {} batches live at exit",
    FRAMES,
    world.device().draws,
    world.batch_count()
  );
  world.destroy_all();
}
