use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::num::ParseIntError;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::StorageConfig;
use crate::priority::Priority;
use crate::task::Task;

use super::error::StorageError;
use super::Storage;

const DELIMITER: char = ',';
const TRUE_LITERAL: &str = "True";
const FALSE_LITERAL: &str = "False";
const NONE_LITERAL: &str = "None";

/// File-based storage implementation.
///
/// Keeps every task in one plain text file, one record per line:
/// ```text
/// <id>,<description>,<due date or empty>,<True|False>,<priority>
/// ```
/// Fields are split on commas with no quoting. Older files without the
/// trailing priority field are still read; their tasks get `medium`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Creates a FileStorage backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a FileStorage using the configured task file.
    pub fn with_config(config: &StorageConfig) -> Self {
        Self::new(config.file_path())
    }

    /// Returns the path of the task file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the directory holding the task file.
    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }

    /// Ensures the directory holding the task file exists.
    fn ensure_parent_dir(&self) -> Result<&Path, StorageError> {
        let dir = self.parent_dir();
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| StorageError::io(dir, e))?;
        }
        Ok(dir)
    }
}

impl Storage for FileStorage {
    fn load(&self) -> Result<Vec<Task>, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(
                    "No existing task file '{}' found. Starting fresh.",
                    self.path.display()
                );
                return Ok(Vec::new());
            }
            Err(e) => return Err(StorageError::io(&self.path, e)),
        };

        let mut tasks = Vec::new();
        for (index, line) in content.lines().enumerate() {
            match parse_record(line) {
                Ok(Some(task)) => tasks.push(task),
                Ok(None) => {
                    warn!(
                        "Skipping malformed record at {}:{}",
                        self.path.display(),
                        index + 1
                    );
                }
                Err(RecordError::InvalidId { value, source }) => {
                    return Err(StorageError::InvalidId {
                        path: self.path.clone(),
                        line: index + 1,
                        value,
                        source,
                    });
                }
            }
        }

        Ok(tasks)
    }

    fn save(&self, tasks: &[Task]) -> Result<(), StorageError> {
        let dir = self.ensure_parent_dir()?;

        // An unpersisted temp file is deleted on drop.
        let mut temp = NamedTempFile::new_in(dir).map_err(|e| StorageError::io(dir, e))?;
        {
            let mut writer = BufWriter::new(&mut temp);
            for task in tasks {
                writeln!(writer, "{}", format_record(task))
                    .map_err(|e| StorageError::io(&self.path, e))?;
            }
            writer.flush().map_err(|e| StorageError::io(&self.path, e))?;
        }
        temp.persist(&self.path)
            .map_err(|e| StorageError::io(&self.path, e.error))?;

        info!("Tasks saved to {}", self.path.display());
        Ok(())
    }
}

/// Errors raised while decoding a single record.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("invalid task id {value:?}: {source}")]
    InvalidId {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

/// Decodes one line of a task file.
///
/// Returns `Ok(None)` for lines that do not have exactly four or five
/// fields. A non-numeric id is an error. An unrecognised priority reads
/// back as `medium`.
pub fn parse_record(line: &str) -> Result<Option<Task>, RecordError> {
    let parts: Vec<&str> = line.split(DELIMITER).collect();
    if parts.len() != 4 && parts.len() != 5 {
        return Ok(None);
    }

    let id = parts[0]
        .trim()
        .parse::<u64>()
        .map_err(|source| RecordError::InvalidId {
            value: parts[0].to_string(),
            source,
        })?;

    let due_date = match parts[2] {
        "" | NONE_LITERAL => None,
        due => Some(due.to_string()),
    };

    let priority = parts
        .get(4)
        .copied()
        .map(Priority::parse_lenient)
        .unwrap_or_default();

    Ok(Some(Task {
        id,
        description: parts[1].to_string(),
        due_date,
        completed: parts[3] == TRUE_LITERAL,
        priority,
    }))
}

/// Encodes a task as one line of a task file, without the newline.
pub fn format_record(task: &Task) -> String {
    format!(
        "{id}{d}{desc}{d}{due}{d}{done}{d}{priority}",
        d = DELIMITER,
        id = task.id,
        desc = task.description,
        due = task.due_date.as_deref().unwrap_or(""),
        done = if task.completed { TRUE_LITERAL } else { FALSE_LITERAL },
        priority = task.priority.as_str(),
    )
}
