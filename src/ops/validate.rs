use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::model::task::{Task, TaskDraft};

pub const TITLE_MIN_CHARS: usize = 3;
pub const TITLE_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// Field-level validation error, surfaced in the form. Nothing here ever
/// reaches the task store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("a title is required")]
    TitleRequired,
    #[error("the title must be at least 3 characters")]
    TitleTooShort,
    #[error("the title cannot exceed 100 characters")]
    TitleTooLong,
    #[error("the description cannot exceed 500 characters")]
    DescriptionTooLong,
    #[error("another task already uses this title")]
    DuplicateTitle,
    #[error("the due date must be YYYY-MM-DD")]
    InvalidDueDate,
}

/// Validate a draft against the live collection before it may reach the
/// store. `editing_id` excludes the task being edited from the duplicate
/// check.
pub fn validate_draft(
    draft: &TaskDraft,
    tasks: &[Task],
    editing_id: Option<&str>,
) -> Result<(), ValidationError> {
    let title = draft.title.trim();
    if title.is_empty() {
        return Err(ValidationError::TitleRequired);
    }
    let title_chars = title.chars().count();
    if title_chars < TITLE_MIN_CHARS {
        return Err(ValidationError::TitleTooShort);
    }
    if title_chars > TITLE_MAX_CHARS {
        return Err(ValidationError::TitleTooLong);
    }

    if let Some(description) = &draft.description
        && description.chars().count() > DESCRIPTION_MAX_CHARS
    {
        return Err(ValidationError::DescriptionTooLong);
    }

    let lowered = title.to_lowercase();
    let duplicate = tasks
        .iter()
        .any(|t| t.title.to_lowercase() == lowered && Some(t.id.as_str()) != editing_id);
    if duplicate {
        return Err(ValidationError::DuplicateTitle);
    }

    Ok(())
}

/// Parse the form's due-date field: blank means no due date, anything else
/// must be `YYYY-MM-DD` (stored as midnight UTC).
pub fn parse_due_date(input: &str) -> Result<Option<DateTime<Utc>>, ValidationError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDueDate)?;
    Ok(Some(DateTime::from_naive_utc_and_offset(
        date.and_time(NaiveTime::MIN),
        Utc,
    )))
}
