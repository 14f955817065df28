//! Error taxonomy for batch operations.
//!
//! The source of truth for what used to be "undefined behaviour if misused":
//! every misuse that previously crashed is a recoverable error here.

use thiserror::Error;

use crate::batch::BatchId;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BatchError {
  /// The id does not name a batch in this world (never created here, or
  /// already terminally disposed and removed).
  #[error("unknown batch {0:?}")]
  UnknownBatch(BatchId),

  /// Operation on a batch after its terminal disposal.
  #[error("batch {0:?} was already disposed")]
  UseAfterDispose(BatchId),

  /// Mutable buffer access while an asynchronous task still holds a snapshot
  /// of it. Run the frame (or wait the batch's dependency) first.
  #[error("segment buffer of batch {0:?} is referenced by in-flight work")]
  BufferInFlight(BatchId),
}
