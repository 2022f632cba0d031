use std::cell::{Cell, RefCell};

use crate::task::Task;

use super::error::StorageError;
use super::Storage;

/// In-memory storage, mostly useful for tests and dry runs.
///
/// Keeps a copy of the last saved collection and counts saves.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    tasks: RefCell<Vec<Task>>,
    saves: Cell<usize>,
}

impl MemoryStorage {
    /// Creates an empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a storage that already holds `tasks`.
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: RefCell::new(tasks),
            saves: Cell::new(0),
        }
    }

    /// Returns a copy of the currently stored collection.
    pub fn snapshot(&self) -> Vec<Task> {
        self.tasks.borrow().clone()
    }

    /// Number of times `save` has been called.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl Storage for MemoryStorage {
    fn load(&self) -> Result<Vec<Task>, StorageError> {
        Ok(self.tasks.borrow().clone())
    }

    fn save(&self, tasks: &[Task]) -> Result<(), StorageError> {
        *self.tasks.borrow_mut() = tasks.to_vec();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
