//! Per-frame mesh-synchronization pipeline.
//!
//! Two stages, strictly ordered within a frame:
//!
//! 1. **Initialization**: fulfill deferred disposals, join last frame's
//!    outstanding work (the single global sync barrier), regenerate the
//!    shared index run if the largest batch grew, then schedule this frame's
//!    bounds + mesh-fill tasks against buffer snapshots.
//! 2. **Presentation**: join the scheduled tasks and commit their artifacts
//!    onto the live mesh objects from the orchestrating thread, then submit
//!    draws per camera event.
//!
//! Between presentation and the next initialization the client owns every
//! buffer again and may resize or rewrite it freely.

pub mod types;

// Stage implementations
pub mod indices;
pub mod initialization;
pub mod presentation;

// Test utilities
#[cfg(test)]
pub mod test_utils;

// Re-exports
pub use indices::SharedIndexBuffer;
pub use initialization::{build_staged_data, run_initialization, segment_bounds};
pub use presentation::{draw_batches, run_presentation};
pub use types::{MeshTopology, PendingUpdate, StagedMeshData, SubMeshDescriptor};
