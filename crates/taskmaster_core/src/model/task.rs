use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;

const RECORD_FIELD_COUNT: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Work,
    Personal,
    Urgent,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Self::Work => "Work",
            Self::Personal => "Personal",
            Self::Urgent => "Urgent",
        }
    }

    /// Decode a stored label. Unrecognized labels fall back to `Urgent`,
    /// matching files written by older versions of the format.
    pub fn parse_label(text: &str) -> Self {
        match text {
            "Work" => Self::Work,
            "Personal" => Self::Personal,
            _ => Self::Urgent,
        }
    }

    /// Map a raw menu choice code. Anything outside 1-3 is rejected.
    pub fn from_choice(code: u32) -> Result<Self, AppError> {
        match code {
            1 => Ok(Self::Work),
            2 => Ok(Self::Personal),
            3 => Ok(Self::Urgent),
            other => Err(AppError::invalid_input(format!(
                "category choice must be 1-3, got {other}"
            ))),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Unrecognized labels fall back to `High`.
    pub fn parse_label(text: &str) -> Self {
        match text {
            "Low" => Self::Low,
            "Medium" => Self::Medium,
            _ => Self::High,
        }
    }

    pub fn from_choice(code: u32) -> Result<Self, AppError> {
        match code {
            1 => Ok(Self::Low),
            2 => Ok(Self::Medium),
            3 => Ok(Self::High),
            other => Err(AppError::invalid_input(format!(
                "priority choice must be 1-3, got {other}"
            ))),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl Status {
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }

    /// Unrecognized labels fall back to `Completed`.
    pub fn parse_label(text: &str) -> Self {
        match text {
            "Pending" => Self::Pending,
            "In Progress" => Self::InProgress,
            _ => Self::Completed,
        }
    }

    pub fn from_choice(code: u32) -> Result<Self, AppError> {
        match code {
            1 => Ok(Self::Pending),
            2 => Ok(Self::InProgress),
            3 => Ok(Self::Completed),
            other => Err(AppError::invalid_input(format!(
                "status choice must be 1-3, got {other}"
            ))),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Structural check only: length 10 with dashes at offsets 4 and 7.
/// Calendar validity is out of scope for the record format.
pub fn due_date_is_valid(date: &str) -> bool {
    let bytes = date.as_bytes();
    bytes.len() == 10 && bytes[4] == b'-' && bytes[7] == b'-'
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub priority: Priority,
    pub due_date: String,
    pub status: Status,
}

impl Task {
    /// Serialize into the flat-file line:
    /// `id|title|description|category|priority|dueDate|status`.
    ///
    /// Titles and descriptions must not contain `|`; the format has no
    /// escaping and a stray delimiter misaligns the fields on read.
    pub fn to_record_line(&self) -> String {
        format!(
            "{}|{}|{}|{}|{}|{}|{}",
            self.id,
            self.title,
            self.description,
            self.category,
            self.priority,
            self.due_date,
            self.status
        )
    }

    /// Parse a flat-file line. The line must carry exactly 7 fields and an
    /// integer id; enum fields decode with their label fallbacks.
    pub fn from_record_line(line: &str) -> Result<Self, AppError> {
        let fields: Vec<&str> = line.split('|').collect();
        if fields.len() != RECORD_FIELD_COUNT {
            return Err(AppError::invalid_data(format!(
                "task record must have {RECORD_FIELD_COUNT} fields, got {}",
                fields.len()
            )));
        }

        let id = fields[0]
            .trim()
            .parse::<u64>()
            .map_err(|_| AppError::invalid_data(format!("invalid task id '{}'", fields[0])))?;

        Ok(Self {
            id,
            title: fields[1].to_string(),
            description: fields[2].to_string(),
            category: Category::parse_label(fields[3]),
            priority: Priority::parse_label(fields[4]),
            due_date: fields[5].to_string(),
            status: Status::parse_label(fields[6]),
        })
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ID: {}", self.id)?;
        writeln!(f, "Title: {}", self.title)?;
        writeln!(f, "Description: {}", self.description)?;
        writeln!(f, "Category: {}", self.category)?;
        writeln!(f, "Priority: {}", self.priority)?;
        writeln!(f, "Due Date: {}", self.due_date)?;
        write!(f, "Status: {}", self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::{Category, Priority, Status, Task, due_date_is_valid};

    fn sample_task() -> Task {
        Task {
            id: 7,
            title: "Finish report".to_string(),
            description: "Quarterly financials".to_string(),
            category: Category::Work,
            priority: Priority::High,
            due_date: "2025-05-15".to_string(),
            status: Status::InProgress,
        }
    }

    #[test]
    fn labels_round_trip_for_canonical_values() {
        for category in [Category::Work, Category::Personal, Category::Urgent] {
            assert_eq!(Category::parse_label(category.label()), category);
        }
        for priority in [Priority::Low, Priority::Medium, Priority::High] {
            assert_eq!(Priority::parse_label(priority.label()), priority);
        }
        for status in [Status::Pending, Status::InProgress, Status::Completed] {
            assert_eq!(Status::parse_label(status.label()), status);
        }
    }

    #[test]
    fn unknown_labels_use_fallbacks() {
        assert_eq!(Category::parse_label("Chores"), Category::Urgent);
        assert_eq!(Priority::parse_label("Critical"), Priority::High);
        assert_eq!(Status::parse_label("Blocked"), Status::Completed);
    }

    #[test]
    fn from_choice_accepts_one_through_three() {
        assert_eq!(Category::from_choice(1).unwrap(), Category::Work);
        assert_eq!(Category::from_choice(3).unwrap(), Category::Urgent);
        assert_eq!(Priority::from_choice(2).unwrap(), Priority::Medium);
        assert_eq!(Status::from_choice(2).unwrap(), Status::InProgress);
    }

    #[test]
    fn from_choice_rejects_out_of_range_codes() {
        for code in [0, 4, 99] {
            assert_eq!(Category::from_choice(code).unwrap_err().code(), "invalid_input");
            assert_eq!(Priority::from_choice(code).unwrap_err().code(), "invalid_input");
            assert_eq!(Status::from_choice(code).unwrap_err().code(), "invalid_input");
        }
    }

    #[test]
    fn due_date_validation_is_structural() {
        assert!(due_date_is_valid("2025-01-01"));
        assert!(!due_date_is_valid("2025-1-1"));
        assert!(!due_date_is_valid("20250101"));
        assert!(!due_date_is_valid("2025/01/01"));
        // Only the shape matters, not the calendar.
        assert!(due_date_is_valid("9999-99-99"));
    }

    #[test]
    fn record_line_round_trip_preserves_all_fields() {
        let task = sample_task();
        let line = task.to_record_line();
        assert_eq!(
            line,
            "7|Finish report|Quarterly financials|Work|High|2025-05-15|In Progress"
        );

        let parsed = Task::from_record_line(&line).unwrap();
        assert_eq!(parsed, task);
    }

    #[test]
    fn record_line_allows_empty_text_fields() {
        let line = "3|||Personal|Low|2025-01-01|Pending";
        let parsed = Task::from_record_line(line).unwrap();

        assert_eq!(parsed.id, 3);
        assert!(parsed.title.is_empty());
        assert!(parsed.description.is_empty());
        assert_eq!(parsed.category, Category::Personal);
    }

    #[test]
    fn record_line_rejects_wrong_field_count() {
        let err = Task::from_record_line("1|only|five|fields|here").unwrap_err();
        assert_eq!(err.code(), "invalid_data");

        let err = Task::from_record_line("1|a|b|Work|Low|2025-01-01|Pending|extra").unwrap_err();
        assert_eq!(err.code(), "invalid_data");
    }

    #[test]
    fn record_line_rejects_non_integer_id() {
        let err = Task::from_record_line("abc|a|b|Work|Low|2025-01-01|Pending").unwrap_err();
        assert_eq!(err.code(), "invalid_data");
    }

    #[test]
    fn display_renders_multiline_details() {
        let rendered = sample_task().to_string();
        assert!(rendered.starts_with("ID: 7\n"));
        assert!(rendered.contains("Title: Finish report\n"));
        assert!(rendered.contains("Category: Work\n"));
        assert!(rendered.ends_with("Status: In Progress"));
    }
}
