//! User-facing text for task creation.
//!
//! Every message has a built-in template per [`Locale`]. A config file can
//! replace any template through its `messages` table, keyed by
//! [`MessageKey::as_str`]. Templates use `{name}` placeholders.

use crate::config::Config;
use log::warn;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    En,
    Vi,
}

impl Locale {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Some(Self::En),
            "vi" | "vietnamese" => Some(Self::Vi),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    TitleRequired,
    DueDateRequired,
    DueDateInvalid,
    PriorityInvalid,
    DuplicateTask,
    TaskCreated,
    SaveFailed,
}

impl MessageKey {
    pub const ALL: [MessageKey; 7] = [
        MessageKey::TitleRequired,
        MessageKey::DueDateRequired,
        MessageKey::DueDateInvalid,
        MessageKey::PriorityInvalid,
        MessageKey::DuplicateTask,
        MessageKey::TaskCreated,
        MessageKey::SaveFailed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::TitleRequired => "title_required",
            Self::DueDateRequired => "due_date_required",
            Self::DueDateInvalid => "due_date_invalid",
            Self::PriorityInvalid => "priority_invalid",
            Self::DuplicateTask => "duplicate_task",
            Self::TaskCreated => "task_created",
            Self::SaveFailed => "save_failed",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == name)
    }

    fn template(self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::En, Self::TitleRequired) => "Title must not be empty.",
            (Locale::En, Self::DueDateRequired) => "Due date must not be empty.",
            (Locale::En, Self::DueDateInvalid) => {
                "Invalid due date. Please use the YYYY-MM-DD format."
            }
            (Locale::En, Self::PriorityInvalid) => "Invalid priority: {priority}",
            (Locale::En, Self::DuplicateTask) => {
                "Task '{title}' already exists with the same due date."
            }
            (Locale::En, Self::TaskCreated) => "Added new task with ID: {id}",
            (Locale::En, Self::SaveFailed) => "Could not write the task store: {reason}",
            (Locale::Vi, Self::TitleRequired) => "Tiêu đề không được để trống.",
            (Locale::Vi, Self::DueDateRequired) => "Ngày đến hạn không được để trống.",
            (Locale::Vi, Self::DueDateInvalid) => {
                "Ngày đến hạn không hợp lệ. Vui lòng sử dụng định dạng YYYY-MM-DD."
            }
            (Locale::Vi, Self::PriorityInvalid) => "Mức độ ưu tiên không hợp lệ: {priority}",
            (Locale::Vi, Self::DuplicateTask) => {
                "Nhiệm vụ '{title}' đã tồn tại với cùng ngày đến hạn."
            }
            (Locale::Vi, Self::TaskCreated) => "Đã thêm nhiệm vụ mới thành công với ID: {id}",
            (Locale::Vi, Self::SaveFailed) => "Lỗi khi ghi vào file database: {reason}",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Messages {
    locale: Locale,
    overrides: HashMap<String, String>,
}

impl Messages {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            overrides: HashMap::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let locale = match config.locale.as_deref() {
            Some(raw) => Locale::parse(raw).unwrap_or_else(|| {
                warn!("unknown locale '{raw}', falling back to English messages");
                Locale::En
            }),
            None => Locale::En,
        };

        let mut messages = Self::new(locale);
        for (name, template) in &config.messages {
            if MessageKey::from_name(name).is_none() {
                warn!("ignoring override for unknown message key '{name}'");
                continue;
            }
            messages.overrides.insert(name.clone(), template.clone());
        }
        messages
    }

    pub fn with_override<T: Into<String>>(mut self, key: MessageKey, template: T) -> Self {
        self.overrides
            .insert(key.as_str().to_string(), template.into());
        self
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn render(&self, key: MessageKey, args: &[(&str, &str)]) -> String {
        let template = self
            .overrides
            .get(key.as_str())
            .map(String::as_str)
            .unwrap_or_else(|| key.template(self.locale));

        let mut rendered = template.to_string();
        for (name, value) in args {
            rendered = rendered.replace(&format!("{{{name}}}"), value);
        }
        rendered
    }
}
