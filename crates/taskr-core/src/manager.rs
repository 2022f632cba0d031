use std::fmt::Write;

use thiserror::Error;
use tracing::{info, warn};

use crate::storage::{Storage, StorageError};
use crate::task::{Task, TaskError};

const LIST_HEADER: &str = "--- Current Tasks ---";
const LIST_FOOTER: &str = "---------------------";
const LIST_EMPTY: &str = "No tasks available.";

/// Manages the task collection.
///
/// Holds every task in memory and writes the whole collection back to
/// storage after each change.
pub struct TaskManager<S: Storage> {
    storage: S,
    tasks: Vec<Task>,
    next_id: u64,
}

impl<S: Storage> TaskManager<S> {
    /// Creates a new TaskManager, loading existing tasks from `storage`.
    pub fn new(storage: S) -> Result<Self, ManagerError> {
        let tasks = storage.load()?;
        let next_id = match tasks.iter().map(|t| t.id).max() {
            Some(max) => max.checked_add(1).ok_or(ManagerError::IdsExhausted)?,
            None => 1,
        };
        info!("Loaded {} tasks. Next ID: {}", tasks.len(), next_id);

        Ok(Self {
            storage,
            tasks,
            next_id,
        })
    }

    /// Creates a task with the next free id and persists the collection.
    ///
    /// An empty `due_date` counts as no due date. Fails without touching
    /// the collection if `priority` is not a recognised priority or no id
    /// is left after this one.
    pub fn add(
        &mut self,
        description: &str,
        due_date: Option<&str>,
        priority: &str,
    ) -> Result<Task, ManagerError> {
        let due_date = due_date.filter(|d| !d.is_empty()).map(str::to_string);
        let task = Task::new(self.next_id, description, due_date, priority)?;
        let following = self.next_id.checked_add(1).ok_or(ManagerError::IdsExhausted)?;

        self.tasks.push(task.clone());
        self.next_id = following;
        self.storage.save(&self.tasks)?;

        info!(
            "Task '{}' added with priority '{}'.",
            task.description, task.priority
        );
        Ok(task)
    }

    /// Returns all tasks, highest priority first, then by id.
    pub fn list(&self) -> Vec<&Task> {
        let mut sorted: Vec<&Task> = self.tasks.iter().collect();
        sorted.sort_by_key(|t| (t.priority.rank(), t.id));
        sorted
    }

    /// Renders the sorted task list between a header and footer banner.
    pub fn render_list(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", LIST_HEADER);

        if self.tasks.is_empty() {
            let _ = writeln!(out, "{}", LIST_EMPTY);
            return out;
        }

        for task in self.list() {
            let _ = writeln!(out, "{}", task);
        }
        let _ = writeln!(out, "{}", LIST_FOOTER);
        out
    }

    /// Gets a task by ID.
    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Marks a task as completed and persists the collection.
    ///
    /// Returns `false` if no task has the given id.
    pub fn mark_completed(&mut self, id: u64) -> Result<bool, ManagerError> {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => task.mark_completed(),
            None => {
                warn!("Task {} not found.", id);
                return Ok(false);
            }
        }

        self.storage.save(&self.tasks)?;
        Ok(true)
    }

    /// All tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// The id the next added task will receive.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// The storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }
}

/// Errors that can occur in TaskManager operations.
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Task error: {0}")]
    Task(#[from] TaskError),

    #[error("No task ids left: the highest stored id is {}", u64::MAX)]
    IdsExhausted,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::priority::Priority;
    use crate::storage::MemoryStorage;

    fn task(id: u64, priority: &str) -> Task {
        Task::new(id, format!("task {id}"), None, priority).unwrap()
    }

    #[test]
    fn test_next_id_follows_max_loaded_id() {
        let storage = MemoryStorage::with_tasks(vec![
            task(2, "low"),
            task(5, "low"),
            task(3, "low"),
        ]);
        let mut manager = TaskManager::new(storage).unwrap();
        assert_eq!(manager.next_id(), 6);

        let added = manager.add("next", None, "medium").unwrap();
        assert_eq!(added.id, 6);
        assert_eq!(manager.next_id(), 7);
    }

    #[test]
    fn test_largest_id_leaves_no_next_id() {
        let storage = MemoryStorage::with_tasks(vec![task(u64::MAX, "high")]);
        let err = TaskManager::new(storage).err().unwrap();
        assert!(matches!(err, ManagerError::IdsExhausted));
    }

    #[test]
    fn test_add_refuses_last_id() {
        let storage = MemoryStorage::with_tasks(vec![task(u64::MAX - 1, "low")]);
        let mut manager = TaskManager::new(storage).unwrap();
        assert_eq!(manager.next_id(), u64::MAX);

        let err = manager.add("one too many", None, "low").unwrap_err();
        assert!(matches!(err, ManagerError::IdsExhausted));
        assert_eq!(manager.tasks().len(), 1);
        assert_eq!(manager.next_id(), u64::MAX);
        assert_eq!(manager.storage().save_count(), 0);
    }

    #[test]
    fn test_add_saves_after_each_mutation() {
        let mut manager = TaskManager::new(MemoryStorage::new()).unwrap();
        manager.add("A", None, "high").unwrap();
        manager.add("B", Some("2024-08-15"), "").unwrap();

        let storage = manager.storage();
        assert_eq!(storage.save_count(), 2);
        assert_eq!(storage.snapshot(), manager.tasks());
        assert_eq!(manager.tasks()[1].priority, Priority::Medium);
    }

    #[test]
    fn test_invalid_priority_leaves_state_untouched() {
        let mut manager = TaskManager::new(MemoryStorage::new()).unwrap();
        let err = manager.add("A", None, "urgent").unwrap_err();

        assert!(matches!(err, ManagerError::Task(TaskError::InvalidPriority(_))));
        assert!(manager.tasks().is_empty());
        assert_eq!(manager.next_id(), 1);
        assert_eq!(manager.storage().save_count(), 0);
    }

    #[test]
    fn test_mark_completed_unknown_id_does_not_save() {
        let mut manager = TaskManager::new(MemoryStorage::new()).unwrap();
        assert!(!manager.mark_completed(42).unwrap());
        assert_eq!(manager.storage().save_count(), 0);
    }
}
