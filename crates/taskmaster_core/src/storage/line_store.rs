use crate::error::AppError;
use crate::model::Task;
use std::path::{Path, PathBuf};

const STORE_FILE_NAME: &str = "tasks.txt";

/// Default on-disk location for the CLI's working set.
/// `TASKMASTER_STORE_PATH` overrides the platform default.
pub fn store_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var("TASKMASTER_STORE_PATH")
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| AppError::invalid_data("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata)
            .join("taskmaster")
            .join(STORE_FILE_NAME))
    } else {
        let home = std::env::var("HOME").map_err(|_| AppError::invalid_data("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("taskmaster")
            .join(STORE_FILE_NAME))
    }
}

/// Write one record line per task, in the given order, overwriting the
/// destination. Parent directories are created as needed.
pub fn save_tasks(path: &Path, tasks: &[Task]) -> Result<(), AppError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .map_err(|err| AppError::io(format!("{}: {}", parent.display(), err)))?;
    }

    let mut content = String::new();
    for task in tasks {
        content.push_str(&task.to_record_line());
        content.push('\n');
    }

    std::fs::write(path, content).map_err(|err| AppError::io(format!("{}: {}", path.display(), err)))
}

/// Read every record line from the file, skipping blank lines. Any
/// malformed line fails the whole load; callers only replace their state
/// on success.
pub fn load_tasks(path: &Path) -> Result<Vec<Task>, AppError> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| AppError::io(format!("{}: {}", path.display(), err)))?;

    let mut tasks = Vec::new();
    for line in content.lines() {
        if line.trim().is_empty() {
            continue;
        }
        tasks.push(Task::from_record_line(line)?);
    }

    Ok(tasks)
}
