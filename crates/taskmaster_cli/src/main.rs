use clap::{CommandFactory, Parser};
use std::io::{self, BufRead};
use std::path::PathBuf;
use tabled::{Table, Tabled};
use taskmaster_cli::cli::{Cli, Command, FilterCommand};
use taskmaster_core::error::AppError;
use taskmaster_core::model::{Category, Priority, Status, Task};
use taskmaster_core::storage::line_store;
use taskmaster_core::store::{TaskEdit, TaskFilter, TaskStore};

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: &'static str,
    #[tabled(rename = "Priority")]
    priority: &'static str,
    #[tabled(rename = "Due Date")]
    due_date: String,
    #[tabled(rename = "Status")]
    status: &'static str,
}

impl From<&Task> for TaskRow {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            description: task.description.clone(),
            category: task.category.label(),
            priority: task.priority.label(),
            due_date: task.due_date.clone(),
            status: task.status.label(),
        }
    }
}

fn print_tasks_plain(tasks: &[Task], empty_message: &str) {
    if tasks.is_empty() {
        println!("{empty_message}");
        return;
    }
    let table = Table::new(tasks.iter().map(TaskRow::from));
    println!("{table}");
}

fn print_tasks_json(tasks: &[Task]) -> Result<(), AppError> {
    let payload =
        serde_json::to_string(tasks).map_err(|err| AppError::invalid_data(err.to_string()))?;
    println!("{payload}");
    Ok(())
}

fn print_task_json(task: &Task) -> Result<(), AppError> {
    let payload =
        serde_json::to_string(task).map_err(|err| AppError::invalid_data(err.to_string()))?;
    println!("{payload}");
    Ok(())
}

/// Filter values arrive as labels; unlike the file codec, unknown labels
/// are rejected here instead of falling back.
fn parse_filter(filter: &FilterCommand) -> Result<TaskFilter, AppError> {
    match filter {
        FilterCommand::Category { value } => match value.to_ascii_lowercase().as_str() {
            "work" => Ok(TaskFilter::Category(Category::Work)),
            "personal" => Ok(TaskFilter::Category(Category::Personal)),
            "urgent" => Ok(TaskFilter::Category(Category::Urgent)),
            other => Err(AppError::invalid_input(format!(
                "unknown category '{other}' (expected Work, Personal, or Urgent)"
            ))),
        },
        FilterCommand::Priority { value } => match value.to_ascii_lowercase().as_str() {
            "low" => Ok(TaskFilter::Priority(Priority::Low)),
            "medium" => Ok(TaskFilter::Priority(Priority::Medium)),
            "high" => Ok(TaskFilter::Priority(Priority::High)),
            other => Err(AppError::invalid_input(format!(
                "unknown priority '{other}' (expected Low, Medium, or High)"
            ))),
        },
        FilterCommand::Status { value } => match value.to_ascii_lowercase().as_str() {
            "pending" => Ok(TaskFilter::Status(Status::Pending)),
            "in progress" | "in-progress" | "inprogress" => {
                Ok(TaskFilter::Status(Status::InProgress))
            }
            "completed" => Ok(TaskFilter::Status(Status::Completed)),
            other => Err(AppError::invalid_input(format!(
                "unknown status '{other}' (expected Pending, In Progress, or Completed)"
            ))),
        },
    }
}

fn optional_choice<T>(
    value: Option<u32>,
    from_choice: fn(u32) -> Result<T, AppError>,
) -> Result<Option<T>, AppError> {
    match value {
        None | Some(0) => Ok(None),
        Some(code) => from_choice(code).map(Some),
    }
}

fn optional_text(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::invalid_input(message)
}

fn split_command_line(line: &str) -> Result<Vec<String>, AppError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escape = false;

    for ch in line.chars() {
        if escape {
            if ch != '"' && ch != '\\' {
                current.push('\\');
            }
            current.push(ch);
            escape = false;
            continue;
        }

        if in_quotes && ch == '\\' {
            escape = true;
            continue;
        }

        if ch == '"' {
            in_quotes = !in_quotes;
            continue;
        }

        if ch.is_whitespace() && !in_quotes {
            if !current.is_empty() {
                args.push(current.clone());
                current.clear();
            }
            continue;
        }

        current.push(ch);
    }

    if in_quotes {
        return Err(AppError::invalid_input("unterminated quote in command"));
    }

    if !current.is_empty() {
        args.push(current);
    }

    Ok(args)
}

fn print_help() {
    let mut cmd = Cli::command();
    let help = cmd.render_help();
    println!("{help}");
}

fn resolve_store_target(path: Option<PathBuf>) -> Result<PathBuf, AppError> {
    match path {
        Some(path) => Ok(path),
        None => line_store::store_path(),
    }
}

/// Run one command against the store. Returns whether the store was
/// mutated, so one-shot mode knows when to persist.
fn run_command(command: Command, json: bool, store: &mut TaskStore) -> Result<bool, AppError> {
    match command {
        Command::Add {
            title,
            description,
            category,
            priority,
            due,
        } => {
            let task = store.create(category, priority, &title, &description, &due)?;
            if json {
                print_task_json(&task)?;
            } else {
                println!("Created task: {} (id {})", task.title, task.id);
            }
            Ok(true)
        }
        Command::List => {
            if json {
                print_tasks_json(store.list())?;
            } else {
                print_tasks_plain(store.list(), "No tasks available.");
            }
            Ok(false)
        }
        Command::Show { id } => {
            let task = store
                .find(id)
                .ok_or_else(|| AppError::not_found(format!("no task with id {id}")))?;
            if json {
                print_task_json(task)?;
            } else {
                println!("{task}");
            }
            Ok(false)
        }
        Command::Edit {
            id,
            title,
            description,
            category,
            priority,
            status,
            due,
        } => {
            let edit = TaskEdit {
                title: optional_text(title),
                description: optional_text(description),
                category: optional_choice(category, Category::from_choice)?,
                priority: optional_choice(priority, Priority::from_choice)?,
                status: optional_choice(status, Status::from_choice)?,
                due_date: optional_text(due),
            };

            let outcome = store.edit(id, &edit)?;
            if outcome.due_date_rejected {
                eprintln!("WARNING: invalid due date format, keeping current value");
            }
            if json {
                print_task_json(&outcome.task)?;
            } else {
                println!("Updated task: {} (id {})", outcome.task.title, outcome.task.id);
            }
            Ok(true)
        }
        Command::Delete { id } => {
            let removed = store.find(id).cloned();
            if !store.delete(id) {
                return Err(AppError::not_found(format!("no task with id {id}")));
            }
            match removed {
                Some(task) if json => print_task_json(&task)?,
                Some(task) => println!("Deleted task: {} (id {})", task.title, task.id),
                None => {}
            }
            Ok(true)
        }
        Command::Filter { filter } => {
            let tasks = store.filter(parse_filter(&filter)?);
            if json {
                print_tasks_json(&tasks)?;
            } else {
                print_tasks_plain(&tasks, "No tasks match the criteria.");
            }
            Ok(false)
        }
        Command::Save { path } => {
            let dest = resolve_store_target(path)?;
            store.save_to(&dest)?;
            if !json {
                println!("Saved {} tasks to {}", store.len(), dest.display());
            }
            Ok(false)
        }
        Command::Load { path } => {
            let source = resolve_store_target(path)?;
            let count = store.load_from(&source)?;
            if !json {
                println!("Loaded {count} tasks from {}", source.display());
            }
            Ok(true)
        }
    }
}

/// One-shot mode: the working store is read from disk, mutated, and
/// written back, so each invocation sees the previous one's results.
fn run_one_shot(cli: Cli) -> Result<(), AppError> {
    let path = line_store::store_path()?;
    let mut store = TaskStore::new();
    if path.exists() {
        store.load_from(&path)?;
    }

    let changed = run_command(cli.command, cli.json, &mut store)?;
    if changed {
        store.save_to(&path)?;
    }

    Ok(())
}

/// Interactive mode: the store lives in memory for the whole session and
/// only `save`/`load` touch disk, like the original menu program.
fn run_interactive() -> Result<(), AppError> {
    let mut store = TaskStore::new();
    let mut input = String::new();
    let stdin = io::stdin();
    let mut stdin_lock = stdin.lock();

    println!("Welcome to TaskMaster! Type 'help' for commands, 'exit' to quit.");

    loop {
        input.clear();
        let bytes = stdin_lock
            .read_line(&mut input)
            .map_err(|err| AppError::io(err.to_string()))?;

        if bytes == 0 {
            break;
        }

        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        if line == "help" || line == "?" {
            print_help();
            continue;
        }

        let args = match split_command_line(line) {
            Ok(args) => args,
            Err(err) => {
                eprintln!("ERROR: {err}");
                continue;
            }
        };

        if args.is_empty() {
            continue;
        }

        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push("taskmaster".to_string());
        argv.extend(args);

        let cli = match Cli::try_parse_from(argv) {
            Ok(cli) => cli,
            Err(err) => {
                eprintln!("ERROR: {}", normalize_parse_error(err));
                continue;
            }
        };

        if let Err(err) = run_command(cli.command, cli.json, &mut store) {
            eprintln!("ERROR: {err}");
        }
    }

    Ok(())
}

fn main() {
    let mut args = std::env::args_os();
    args.next();
    if args.next().is_none() {
        if let Err(err) = run_interactive() {
            eprintln!("ERROR: {err}");
            std::process::exit(1);
        }
        return;
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Let clap handle --help/--version rendering and exit codes.
            err.exit();
        }
    };

    if let Err(err) = run_one_shot(cli) {
        eprintln!("ERROR: {err}");
        std::process::exit(1);
    }
}
