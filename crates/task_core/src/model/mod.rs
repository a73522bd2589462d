mod task;

pub use task::{Priority, RECURRENCE_PLACEHOLDER, Task, TaskStatus};
