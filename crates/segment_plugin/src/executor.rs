//! Task executor and dependency handles, built on rayon.
//!
//! Workers run on rayon's pool and report completion over a crossbeam
//! channel; the orchestrating thread drains that channel when it checks,
//! waits on, or collects task results. All blocking joins are unconditional
//! waits - the scheduled work is bounded, so a slow frame degrades into a
//! hitch rather than a hang.
//!
//! # Usage
//!
//! ```ignore
//! let mut executor = TaskExecutor::new();
//!
//! let task = executor.spawn(move || expensive_computation());
//!
//! executor.wait(task);
//! let result: MyResult = executor.take(task).unwrap();
//! ```
//!
//! The executor is single-consumer by design: spawning and result collection
//! both happen on the thread driving the frame.

use std::any::Any;
use std::collections::{HashMap, HashSet};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam_channel::{unbounded, Receiver, Sender};
use smallvec::SmallVec;

/// Unique identifier for a spawned task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

impl TaskId {
  fn next() -> Self {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    Self(COUNTER.fetch_add(1, Ordering::Relaxed))
  }
}

/// Type-erased task outcome.
enum TaskPayload {
  Done(Box<dyn Any + Send>),
  /// The worker panicked; the frame must survive it (the batch simply keeps
  /// its stale geometry).
  Panicked,
}

/// Completion token for the most recent work scheduled against a resource.
///
/// Handles combine (OR): waiting on the combined handle waits for every
/// task it accumulated. The default handle is already complete.
#[derive(Clone, Debug, Default)]
pub struct Dependency {
  tasks: SmallVec<[TaskId; 4]>,
}

impl Dependency {
  pub fn from_task(task: TaskId) -> Self {
    let mut dep = Self::default();
    dep.push(task);
    dep
  }

  /// OR another task into this handle.
  pub fn push(&mut self, task: TaskId) {
    self.tasks.push(task);
  }

  /// OR another handle into this one.
  pub fn combine(&mut self, other: &Dependency) {
    self.tasks.extend_from_slice(&other.tasks);
  }

  pub fn is_empty(&self) -> bool {
    self.tasks.is_empty()
  }

  pub fn tasks(&self) -> &[TaskId] {
    &self.tasks
  }
}

/// Single-consumer task executor on rayon's thread pool.
pub struct TaskExecutor {
  sender: Sender<(TaskId, TaskPayload)>,
  receiver: Receiver<(TaskId, TaskPayload)>,
  /// Completed payloads not yet taken or discarded.
  ready: HashMap<TaskId, TaskPayload>,
  /// Spawned tasks whose completion has not been observed yet.
  pending: HashSet<TaskId>,
}

impl TaskExecutor {
  pub fn new() -> Self {
    let (sender, receiver) = unbounded();
    Self {
      sender,
      receiver,
      ready: HashMap::new(),
      pending: HashSet::new(),
    }
  }

  /// Spawn a task on rayon's pool (non-blocking).
  ///
  /// A panicking task is contained: it completes with an empty payload
  /// instead of poisoning the executor or wedging a later join.
  pub fn spawn<F, T>(&mut self, work: F) -> TaskId
  where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
  {
    let task_id = TaskId::next();
    self.pending.insert(task_id);

    let sender = self.sender.clone();
    rayon::spawn(move || {
      let payload = match catch_unwind(AssertUnwindSafe(work)) {
        Ok(value) => TaskPayload::Done(Box::new(value)),
        Err(_) => TaskPayload::Panicked,
      };
      // Receiver lives as long as the executor; a send failure means the
      // executor itself is gone and the result is moot.
      let _ = sender.send((task_id, payload));
    });

    task_id
  }

  /// Move every already-delivered completion into the ready map.
  fn drain(&mut self) {
    while let Ok((task_id, payload)) = self.receiver.try_recv() {
      self.pending.remove(&task_id);
      if matches!(payload, TaskPayload::Panicked) {
        log::warn!("background task {task_id:?} panicked");
      }
      self.ready.insert(task_id, payload);
    }
  }

  /// Non-blocking completion check.
  pub fn is_complete(&mut self, task: TaskId) -> bool {
    self.drain();
    !self.pending.contains(&task)
  }

  /// Block the calling thread until `task` has completed.
  pub fn wait(&mut self, task: TaskId) {
    self.drain();
    while self.pending.contains(&task) {
      match self.receiver.recv() {
        Ok((task_id, payload)) => {
          self.pending.remove(&task_id);
          if matches!(payload, TaskPayload::Panicked) {
            log::warn!("background task {task_id:?} panicked");
          }
          self.ready.insert(task_id, payload);
        }
        // Unreachable while the executor holds a sender clone.
        Err(_) => break,
      }
    }
  }

  /// Block until every task of `dep` has completed.
  pub fn wait_dependency(&mut self, dep: &Dependency) {
    for &task in dep.tasks() {
      self.wait(task);
    }
  }

  /// Non-blocking check of a combined handle.
  pub fn dependency_complete(&mut self, dep: &Dependency) -> bool {
    dep.tasks().iter().all(|&task| {
      self.drain();
      !self.pending.contains(&task)
    })
  }

  /// Collect a completed task's result (non-blocking, consumes it).
  ///
  /// Returns `None` while the task is still running, if it panicked, if the
  /// result was already taken, or if `T` does not match the payload.
  pub fn take<T: 'static>(&mut self, task: TaskId) -> Option<T> {
    self.drain();
    match self.ready.remove(&task)? {
      TaskPayload::Done(payload) => payload.downcast::<T>().ok().map(|boxed| *boxed),
      TaskPayload::Panicked => None,
    }
  }

  /// Wait for a task and drop its result.
  pub fn discard(&mut self, task: TaskId) {
    self.wait(task);
    self.ready.remove(&task);
  }

  /// Wait for every task of a handle and drop all results.
  pub fn discard_dependency(&mut self, dep: &Dependency) {
    for &task in dep.tasks() {
      self.discard(task);
    }
  }

  /// Number of tasks spawned and not yet observed complete.
  pub fn pending_count(&mut self) -> usize {
    self.drain();
    self.pending.len()
  }

  /// Worker threads in rayon's pool.
  pub fn num_threads(&self) -> usize {
    rayon::current_num_threads()
  }
}

impl Default for TaskExecutor {
  fn default() -> Self {
    Self::new()
  }
}

// =============================================================================
// Tests
// =============================================================================
