use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Value stored in `recurrence_pattern` for recurring tasks. Nothing reads it back.
pub const RECURRENCE_PLACEHOLDER: &str = "Undetermined";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    pub due_date: String,
    pub priority: Priority,
    pub status: TaskStatus,
    pub created_at: String,
    pub last_updated_at: String,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence_pattern: Option<String>,
}

// Older stores write a missing description as `null`.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    #[serde(alias = "Thấp")]
    Low,
    #[serde(alias = "Trung bình")]
    Medium,
    #[serde(alias = "Cao")]
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Label used by stores written before the English labels.
    pub fn legacy_label(self) -> &'static str {
        match self {
            Self::Low => "Thấp",
            Self::Medium => "Trung bình",
            Self::High => "Cao",
        }
    }

    /// Case-insensitive match against both label sets.
    pub fn from_label(raw: &str) -> Option<Self> {
        let wanted = raw.trim().to_lowercase();
        if wanted.is_empty() {
            return None;
        }

        Self::ALL.into_iter().find(|level| {
            level.label().to_lowercase() == wanted || level.legacy_label().to_lowercase() == wanted
        })
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "Not completed", alias = "Chưa hoàn thành")]
    NotCompleted,
}

impl TaskStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::NotCompleted => "Not completed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Priority, Task, TaskStatus};

    fn sample_task() -> Task {
        Task {
            id: "task-1".to_string(),
            title: "Buy book".to_string(),
            description: "Software Engineering book".to_string(),
            due_date: "2025-07-20".to_string(),
            priority: Priority::High,
            status: TaskStatus::NotCompleted,
            created_at: "2025-07-01T08:00:00Z".to_string(),
            last_updated_at: "2025-07-01T08:00:00Z".to_string(),
            is_recurring: false,
            recurrence_pattern: None,
        }
    }

    #[test]
    fn serializes_display_labels_and_omits_empty_pattern() {
        let value = serde_json::to_value(sample_task()).unwrap();

        assert_eq!(value["priority"], "High");
        assert_eq!(value["status"], "Not completed");
        assert_eq!(value["is_recurring"], false);
        assert!(value.get("recurrence_pattern").is_none());
    }

    #[test]
    fn deserializes_legacy_labels() {
        let content = serde_json::json!({
            "id": "legacy-1",
            "title": "Mua sách",
            "description": "",
            "due_date": "2025-07-20",
            "priority": "Trung bình",
            "status": "Chưa hoàn thành",
            "created_at": "2025-07-01T08:00:00",
            "last_updated_at": "2025-07-01T08:00:00",
            "is_recurring": true,
            "recurrence_pattern": "Chưa xác định"
        });

        let task: Task = serde_json::from_value(content).unwrap();

        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.status, TaskStatus::NotCompleted);
        assert_eq!(task.recurrence_pattern.as_deref(), Some("Chưa xác định"));
    }

    #[test]
    fn null_or_missing_description_reads_as_empty() {
        let mut content = serde_json::json!({
            "id": "legacy-2",
            "title": "Tập thể dục",
            "description": null,
            "due_date": "2025-07-21",
            "priority": "Thấp",
            "status": "Chưa hoàn thành",
            "created_at": "2025-07-01T08:00:00",
            "last_updated_at": "2025-07-01T08:00:00",
            "is_recurring": false,
            "recurrence_pattern": null
        });

        let task: Task = serde_json::from_value(content.clone()).unwrap();
        assert_eq!(task.description, "");
        assert_eq!(task.recurrence_pattern, None);

        content.as_object_mut().unwrap().remove("description");
        let task: Task = serde_json::from_value(content).unwrap();
        assert_eq!(task.description, "");
    }

    #[test]
    fn from_label_ignores_case_and_padding() {
        assert_eq!(Priority::from_label("high"), Some(Priority::High));
        assert_eq!(Priority::from_label(" MEDIUM "), Some(Priority::Medium));
        assert_eq!(Priority::from_label("thấp"), Some(Priority::Low));
        assert_eq!(Priority::from_label("TRUNG BÌNH"), Some(Priority::Medium));
        assert_eq!(Priority::from_label("urgent"), None);
        assert_eq!(Priority::from_label("   "), None);
    }
}
