pub mod error;
pub mod model;
pub mod storage;
pub mod store;

#[cfg(test)]
mod tests {
    use crate::error::AppError;
    use crate::model::{Category, Priority, Status, Task};

    #[test]
    fn task_has_required_fields() {
        let task = Task {
            id: 1,
            title: "demo".to_string(),
            description: "details".to_string(),
            category: Category::Work,
            priority: Priority::Low,
            due_date: "2025-01-01".to_string(),
            status: Status::Pending,
        };

        assert_eq!(task.id, 1);
        assert_eq!(task.title, "demo");
        assert_eq!(task.description, "details");
        assert_eq!(task.category, Category::Work);
        assert_eq!(task.priority, Priority::Low);
        assert_eq!(task.due_date, "2025-01-01");
        assert_eq!(task.status, Status::Pending);
    }

    #[test]
    fn app_error_exposes_code() {
        let err = AppError::not_found("no task with id 9");
        assert_eq!(err.code(), "not_found");
    }
}
