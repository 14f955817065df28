//! Registry of all non-terminal batches of one world.
//!
//! Insertion-ordered; removal traverses from the highest index downward so
//! erase-while-iterating never skips an element.

use crate::batch::{Batch, BatchId};

#[derive(Default)]
pub struct BatchRegistry {
  batches: Vec<Batch>,
}

impl BatchRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// A batch enters the registry at creation and leaves only at terminal
  /// disposal. Ids are unique, so duplicates cannot occur.
  pub fn add(&mut self, batch: Batch) {
    debug_assert!(self.index_of(batch.id()).is_none());
    self.batches.push(batch);
  }

  pub fn len(&self) -> usize {
    self.batches.len()
  }

  pub fn is_empty(&self) -> bool {
    self.batches.is_empty()
  }

  pub fn index_of(&self, id: BatchId) -> Option<usize> {
    self.batches.iter().position(|batch| batch.id() == id)
  }

  pub fn get(&self, id: BatchId) -> Option<&Batch> {
    self.batches.iter().find(|batch| batch.id() == id)
  }

  pub fn get_mut(&mut self, id: BatchId) -> Option<&mut Batch> {
    self.batches.iter_mut().find(|batch| batch.id() == id)
  }

  pub fn batch_at(&self, index: usize) -> &Batch {
    &self.batches[index]
  }

  pub fn batch_at_mut(&mut self, index: usize) -> &mut Batch {
    &mut self.batches[index]
  }

  /// Remove by index. Callers sweeping the registry iterate in reverse.
  pub fn remove_at(&mut self, index: usize) -> Batch {
    self.batches.remove(index)
  }

  pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Batch> {
    self.batches.iter()
  }

  pub fn iter_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut Batch> {
    self.batches.iter_mut()
  }

  pub fn ids(&self) -> Vec<BatchId> {
    self.batches.iter().map(|batch| batch.id()).collect()
  }
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;
