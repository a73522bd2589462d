use crate::error::AppError;
use crate::model::Task;
use log::{debug, warn};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tempfile::NamedTempFile;

/// The task collection persisted as one JSON array in one file.
///
/// Every read and write goes through the whole file. The mutex only
/// serializes callers inside this process; other processes are not locked out.
#[derive(Debug)]
pub struct TaskStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl TaskStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the store, reporting unreadable or malformed files as errors.
    pub fn load_strict(&self) -> Result<Vec<Task>, AppError> {
        let _guard = self.guard();
        self.read_tasks()
    }

    /// Reads the store, treating any failure as an empty collection.
    pub fn load(&self) -> Vec<Task> {
        let _guard = self.guard();
        self.read_tasks_or_empty()
    }

    pub fn save(&self, tasks: &[Task]) -> Result<(), AppError> {
        let _guard = self.guard();
        self.write_tasks(tasks)
    }

    /// Load, hand the collection to `apply`, and save only if `apply` succeeds.
    pub fn update<T, F>(&self, apply: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut Vec<Task>) -> Result<T, AppError>,
    {
        let _guard = self.guard();
        let mut tasks = self.read_tasks_or_empty();
        let value = apply(&mut tasks)?;
        self.write_tasks(&tasks)?;
        Ok(value)
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        // The guarded state lives on disk, so a poisoned lock carries nothing stale.
        self.lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn read_tasks(&self) -> Result<Vec<Task>, AppError> {
        if !self.path.exists() {
            debug!("task store {} does not exist yet", self.path.display());
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path)
            .map_err(|err| AppError::io(format!("{}: {}", self.path.display(), err)))?;
        serde_json::from_str(&content).map_err(|err| {
            AppError::invalid_data(format!("invalid JSON in {}: {}", self.path.display(), err))
        })
    }

    fn read_tasks_or_empty(&self) -> Vec<Task> {
        match self.read_tasks() {
            Ok(tasks) => tasks,
            Err(err) => {
                warn!(
                    "task store {} is unreadable, treating it as empty: {}",
                    self.path.display(),
                    err
                );
                Vec::new()
            }
        }
    }

    fn write_tasks(&self, tasks: &[Task]) -> Result<(), AppError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)
            .map_err(|err| AppError::io(format!("{}: {}", dir.display(), err)))?;

        let content = serde_json::to_string_pretty(tasks)
            .map_err(|err| AppError::invalid_data(err.to_string()))?;

        let io_err = |err: std::io::Error| AppError::io(format!("{}: {}", self.path.display(), err));
        let mut staged = NamedTempFile::new_in(dir).map_err(io_err)?;
        staged.write_all(content.as_bytes()).map_err(io_err)?;
        staged.as_file().sync_all().map_err(io_err)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            staged
                .as_file()
                .set_permissions(permissions)
                .map_err(io_err)?;
        }

        staged
            .persist(&self.path)
            .map_err(|err| io_err(err.error))?;
        debug!("wrote {} task(s) to {}", tasks.len(), self.path.display());

        Ok(())
    }
}
