mod error;
mod file;
mod memory;

pub use error::StorageError;
pub use file::{format_record, parse_record, FileStorage, RecordError};
pub use memory::MemoryStorage;

use crate::task::Task;

/// Trait for task storage backends.
///
/// A backend persists the whole collection at once: `save` replaces
/// whatever was stored before, and `load` returns it in the saved order.
pub trait Storage {
    /// Loads every stored task.
    ///
    /// A backend with nothing stored yet returns an empty collection
    /// rather than an error.
    fn load(&self) -> Result<Vec<Task>, StorageError>;

    /// Replaces the stored collection with `tasks`.
    fn save(&self, tasks: &[Task]) -> Result<(), StorageError>;
}
