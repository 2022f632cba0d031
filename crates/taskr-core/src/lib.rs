//! Core library for taskr.
//!
//! Tasks live in memory inside a [`TaskManager`], which writes the whole
//! collection through a [`Storage`] backend after every change.

pub mod config;
pub mod manager;
pub mod priority;
pub mod storage;
pub mod task;

pub use config::{Config, ConfigError, StorageConfig};
pub use manager::{ManagerError, TaskManager};
pub use priority::Priority;
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
pub use task::{Task, TaskError};
