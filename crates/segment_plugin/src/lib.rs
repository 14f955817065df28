//! segment_plugin - Framework/engine independent batched 3D line rendering
//!
//! This crate groups line segments into batches, each backed by one growable
//! buffer, one dynamic mesh, and one material copy, and synchronizes buffer
//! contents into mesh data once per frame through an asynchronous two-stage
//! pipeline (initialization schedules bounds + mesh-fill work on background
//! threads; presentation commits the artifacts and submits draws).
//!
//! # Features
//!
//! - **Safe concurrent hand-off**: buffers snapshot into worker tasks via
//!   `Arc`; mutable access while work is in flight is a recoverable error,
//!   not a crash
//! - **Shared index sequence**: one ascending index run per frame, sized to
//!   the largest batch, reused by every mesh fill
//! - **Deferred and immediate disposal**: both join outstanding work before
//!   freeing anything, exactly once
//! - **Engine seam**: the `RenderDevice` trait is the only contact point
//!   with the host renderer
//!
//! # Example
//!
//! ```ignore
//! use segment_plugin::{plot, SegmentWorld};
//!
//! let mut world = SegmentWorld::new(device);
//! let batch = world.create_batch(material);
//!
//! let buffer = world.edit(batch)?;
//! let mut cursor = 0;
//! plot::circle(buffer, &mut cursor, 1.0, Vec3::ZERO, Quat::IDENTITY, 64);
//! buffer.resize(cursor);
//!
//! world.update();       // once per frame
//! world.draw(&camera);  // once per camera event
//! ```

pub mod types;

// Re-export commonly used items
pub use types::{MinMaxAABB, Segment};

// Byte-view primitive for staging vertex/index data
pub mod bytes;

// Client-facing geometry storage
pub mod buffer;
pub use buffer::SegmentBuffer;

// Batch lifecycle and registry
pub mod batch;
pub mod registry;
pub use batch::{Batch, BatchId, BatchState};
pub use registry::BatchRegistry;

// Error taxonomy
pub mod error;
pub use error::BatchError;

// Task executor on rayon's pool
pub mod executor;
pub use executor::{Dependency, TaskExecutor, TaskId};

// Engine seam
pub mod device;
pub use device::{MaterialHandle, MeshHandle, RenderDevice};

// Per-frame mesh-synchronization pipeline
pub mod pipeline;
pub use pipeline::{MeshTopology, StagedMeshData, SubMeshDescriptor};

// World context - multi-world support
pub mod world;
pub use world::SegmentWorld;

// Shape plotting helpers
pub mod plot;

// Frame statistics (compile with --features metrics)
#[cfg(feature = "metrics")]
pub mod metrics;
