pub mod config;
pub mod duplicate;
pub mod error;
pub mod messages;
pub mod model;
pub mod storage;
pub mod task_api;
pub mod validate;

pub use error::AppError;
pub use model::{Priority, Task, TaskStatus};
pub use task_api::TaskManager;

#[cfg(test)]
mod tests {
    use crate::error::AppError;
    use crate::model::{Priority, Task, TaskStatus};

    #[test]
    fn task_has_required_fields() {
        let task = Task {
            id: "task-1".to_string(),
            title: "demo".to_string(),
            description: "details".to_string(),
            due_date: "2025-07-20".to_string(),
            priority: Priority::Low,
            status: TaskStatus::NotCompleted,
            created_at: "2025-07-01T00:00:00Z".to_string(),
            last_updated_at: "2025-07-01T00:00:00Z".to_string(),
            is_recurring: false,
            recurrence_pattern: None,
        };

        assert_eq!(task.id, "task-1");
        assert_eq!(task.title, "demo");
        assert_eq!(task.due_date, "2025-07-20");
        assert_eq!(task.priority, Priority::Low);
        assert_eq!(task.status, TaskStatus::NotCompleted);
        assert_eq!(task.created_at, task.last_updated_at);
        assert!(!task.is_recurring);
        assert_eq!(task.recurrence_pattern, None);
    }

    #[test]
    fn app_error_exposes_code() {
        let err = AppError::invalid_input("missing title");
        assert_eq!(err.code(), "invalid_input");
        assert_eq!(err.field(), None);

        let err = AppError::invalid_field("due_date", "bad date");
        assert_eq!(err.field(), Some("due_date"));
        assert_eq!(err.to_string(), "invalid_input - bad date");

        let err = AppError::duplicate_task("exists");
        assert_eq!(err.code(), "duplicate_task");
        assert_eq!(AppError::io("disk").code(), "io_error");
    }
}
