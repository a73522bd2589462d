use crate::error::AppError;
use crate::messages::{Locale, MessageKey, Messages};
use crate::model::Priority;
use std::str::FromStr;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

const DUE_DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    TitleRequired,
    DueDateRequired,
    DueDateInvalid,
    PriorityInvalid(String),
}

impl ValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::TitleRequired => "title",
            Self::DueDateRequired | Self::DueDateInvalid => "due_date",
            Self::PriorityInvalid(_) => "priority",
        }
    }

    pub fn into_app_error(self, messages: &Messages) -> AppError {
        let message = match &self {
            Self::TitleRequired => messages.render(MessageKey::TitleRequired, &[]),
            Self::DueDateRequired => messages.render(MessageKey::DueDateRequired, &[]),
            Self::DueDateInvalid => messages.render(MessageKey::DueDateInvalid, &[]),
            Self::PriorityInvalid(raw) => {
                messages.render(MessageKey::PriorityInvalid, &[("priority", raw.as_str())])
            }
        };
        AppError::invalid_field(self.field(), message)
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        err.into_app_error(&Messages::new(Locale::En))
    }
}

/// Priority as it reaches the boundary: raw text from a user, or already typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityInput<'a> {
    Raw(&'a str),
    Level(Priority),
}

impl<'a> From<&'a str> for PriorityInput<'a> {
    fn from(raw: &'a str) -> Self {
        Self::Raw(raw)
    }
}

impl<'a> From<&'a String> for PriorityInput<'a> {
    fn from(raw: &'a String) -> Self {
        Self::Raw(raw.as_str())
    }
}

impl From<Priority> for PriorityInput<'_> {
    fn from(level: Priority) -> Self {
        Self::Level(level)
    }
}

impl FromStr for Priority {
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Ok(resolve_priority(PriorityInput::Raw(raw))?)
    }
}

pub fn validate_title(title: &str) -> bool {
    !title.trim().is_empty()
}

pub fn parse_due_date(text: &str) -> Result<Date, ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::DueDateRequired);
    }

    Date::parse(text, DUE_DATE_FORMAT).map_err(|_| ValidationError::DueDateInvalid)
}

pub fn format_due_date(date: Date) -> Result<String, AppError> {
    date.format(DUE_DATE_FORMAT)
        .map_err(|err| AppError::invalid_data(err.to_string()))
}

pub fn resolve_priority(input: PriorityInput<'_>) -> Result<Priority, ValidationError> {
    match input {
        PriorityInput::Level(level) => Ok(level),
        PriorityInput::Raw(raw) => Priority::from_label(raw)
            .ok_or_else(|| ValidationError::PriorityInvalid(raw.to_string())),
    }
}
