use crate::error::AppError;
use crate::model::{Category, Priority, Status, Task, due_date_is_valid};
use crate::storage::line_store;
use std::path::Path;

/// Field overrides for [`TaskStore::edit`]. `None` keeps the current value;
/// the interactive layer maps empty inputs and `0` choice codes to `None`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TaskEdit {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
    pub due_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    pub task: Task,
    /// Set when a new due date failed structural validation and the
    /// previous value was kept. A warning for the caller, not an error.
    pub due_date_rejected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskFilter {
    Category(Category),
    Priority(Priority),
    Status(Status),
}

/// The in-memory authoritative task collection for one session.
///
/// Insertion order is the enumeration order for listing and filtering.
/// Ids are allocated from a monotonic counter and never reused within a
/// session, even after deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: u64,
}

impl TaskStore {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
        }
    }

    /// Create a task from raw menu inputs. Choice codes outside 1-3 and
    /// malformed due dates are rejected outright; a new task always starts
    /// `Pending` regardless of caller input.
    pub fn create(
        &mut self,
        category_choice: u32,
        priority_choice: u32,
        title: &str,
        description: &str,
        due_date: &str,
    ) -> Result<Task, AppError> {
        let category = Category::from_choice(category_choice)?;
        let priority = Priority::from_choice(priority_choice)?;
        if !due_date_is_valid(due_date) {
            return Err(AppError::invalid_input(format!(
                "due date must be YYYY-MM-DD, got '{due_date}'"
            )));
        }

        let task = Task {
            id: self.next_id,
            title: title.to_string(),
            description: description.to_string(),
            category,
            priority,
            due_date: due_date.to_string(),
            status: Status::Pending,
        };
        self.next_id += 1;
        self.tasks.push(task.clone());

        Ok(task)
    }

    pub fn find(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Apply the provided overrides to one task. An invalid new due date is
    /// not applied; the outcome reports it so the caller can warn.
    pub fn edit(&mut self, id: u64, edit: &TaskEdit) -> Result<EditOutcome, AppError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or_else(|| AppError::not_found(format!("no task with id {id}")))?;

        if let Some(title) = edit.title.as_deref() {
            task.title = title.to_string();
        }
        if let Some(description) = edit.description.as_deref() {
            task.description = description.to_string();
        }
        if let Some(category) = edit.category {
            task.category = category;
        }
        if let Some(priority) = edit.priority {
            task.priority = priority;
        }
        if let Some(status) = edit.status {
            task.status = status;
        }

        let mut due_date_rejected = false;
        if let Some(due_date) = edit.due_date.as_deref() {
            if due_date_is_valid(due_date) {
                task.due_date = due_date.to_string();
            } else {
                due_date_rejected = true;
            }
        }

        Ok(EditOutcome {
            task: task.clone(),
            due_date_rejected,
        })
    }

    /// Remove the task with the given id. Returns whether anything was
    /// removed; the id stays retired either way.
    pub fn delete(&mut self, id: u64) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        self.tasks.len() != before
    }

    pub fn filter(&self, filter: TaskFilter) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|task| match filter {
                TaskFilter::Category(category) => task.category == category,
                TaskFilter::Priority(priority) => task.priority == priority,
                TaskFilter::Status(status) => task.status == status,
            })
            .cloned()
            .collect()
    }

    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Replace the whole collection, typically after a load. The id counter
    /// restarts above the highest id present so later creates never collide.
    /// Duplicate ids inside `tasks` are accepted as-is.
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.next_id = tasks.iter().map(|task| task.id).max().unwrap_or(0) + 1;
        self.tasks = tasks;
    }

    pub fn save_to(&self, path: &Path) -> Result<(), AppError> {
        line_store::save_tasks(path, &self.tasks)
    }

    /// Load and replace. The file is parsed in full before any state
    /// changes; a malformed line leaves the store untouched.
    pub fn load_from(&mut self, path: &Path) -> Result<usize, AppError> {
        let tasks = line_store::load_tasks(path)?;
        let count = tasks.len();
        self.replace_all(tasks);
        Ok(count)
    }
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}
