use crate::config::{Config, resolve_store_path};
use crate::duplicate::is_duplicate;
use crate::error::AppError;
use crate::messages::{MessageKey, Messages};
use crate::model::{RECURRENCE_PLACEHOLDER, Task, TaskStatus};
use crate::storage::TaskStore;
use crate::validate::{
    PriorityInput, ValidationError, format_due_date, parse_due_date, resolve_priority,
    validate_title,
};
use log::info;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use uuid::Uuid;

#[derive(Debug)]
pub struct TaskManager {
    store: TaskStore,
    messages: Messages,
}

impl TaskManager {
    pub fn new(store: TaskStore, messages: Messages) -> Self {
        Self { store, messages }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            TaskStore::new(resolve_store_path(config)),
            Messages::from_config(config),
        )
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    /// Validate the input, reject duplicates, then append the new task to the store.
    ///
    /// Nothing is written unless every step succeeds. A failed save is
    /// returned as [`AppError::Io`] and leaves the previous file in place.
    pub fn create_task<'a, P>(
        &self,
        title: &str,
        description: &str,
        due_date: &str,
        priority: P,
        is_recurring: bool,
    ) -> Result<Task, AppError>
    where
        P: Into<PriorityInput<'a>>,
    {
        if !validate_title(title) {
            return Err(self.reject(ValidationError::TitleRequired));
        }
        let due_date = parse_due_date(due_date).map_err(|err| self.reject(err))?;
        let priority = resolve_priority(priority.into()).map_err(|err| self.reject(err))?;
        let due_date = format_due_date(due_date)?;

        let task = self.store.update(|tasks| {
            if is_duplicate(tasks, title, &due_date) {
                return Err(AppError::duplicate_task(
                    self.messages
                        .render(MessageKey::DuplicateTask, &[("title", title)]),
                ));
            }

            let now = OffsetDateTime::now_utc()
                .format(&Rfc3339)
                .map_err(|err| AppError::invalid_data(err.to_string()))?;

            let task = Task {
                id: Uuid::new_v4().to_string(),
                title: title.to_string(),
                description: description.to_string(),
                due_date: due_date.clone(),
                priority,
                status: TaskStatus::NotCompleted,
                created_at: now.clone(),
                last_updated_at: now,
                is_recurring,
                recurrence_pattern: is_recurring.then(|| RECURRENCE_PLACEHOLDER.to_string()),
            };
            tasks.push(task.clone());
            Ok(task)
        });

        let task = task.map_err(|err| match err {
            AppError::Io(reason) => AppError::io(
                self.messages
                    .render(MessageKey::SaveFailed, &[("reason", reason.as_str())]),
            ),
            other => other,
        })?;

        info!(
            "created task {} due {} in {}",
            task.id,
            task.due_date,
            self.store.path().display()
        );
        Ok(task)
    }

    fn reject(&self, err: ValidationError) -> AppError {
        err.into_app_error(&self.messages)
    }
}
