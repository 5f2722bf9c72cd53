mod task;

pub use task::{Category, Priority, Status, Task, due_date_is_valid};
