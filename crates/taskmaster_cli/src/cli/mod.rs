use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "taskmaster", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new task
    ///
    /// Example: taskmaster add "Finish report" -c 1 -p 3 --due 2025-05-15
    Add {
        title: String,
        /// Task description
        #[arg(short, long, default_value = "")]
        description: String,
        /// Category choice: 1 Work, 2 Personal, 3 Urgent
        #[arg(short, long)]
        category: u32,
        /// Priority choice: 1 Low, 2 Medium, 3 High
        #[arg(short, long)]
        priority: u32,
        /// Due date in YYYY-MM-DD form
        #[arg(long)]
        due: String,
    },
    /// List all tasks in creation order
    List,
    /// Show the details of one task
    ///
    /// Example: taskmaster show 1
    Show {
        id: u64,
    },
    /// Edit a task; omitted fields keep their current value
    ///
    /// Choice flags accept 0 to keep the current value, matching the
    /// interactive prompts.
    ///
    /// Example: taskmaster edit 1 --title "Buy organic milk" --status 2
    Edit {
        id: u64,
        /// New title (empty keeps current)
        #[arg(long)]
        title: Option<String>,
        /// New description (empty keeps current)
        #[arg(long)]
        description: Option<String>,
        /// Category choice: 1 Work, 2 Personal, 3 Urgent (0 keeps current)
        #[arg(long)]
        category: Option<u32>,
        /// Priority choice: 1 Low, 2 Medium, 3 High (0 keeps current)
        #[arg(long)]
        priority: Option<u32>,
        /// Status choice: 1 Pending, 2 In Progress, 3 Completed (0 keeps current)
        #[arg(long)]
        status: Option<u32>,
        /// New due date; an invalid date keeps the current value with a warning
        #[arg(long)]
        due: Option<String>,
    },
    /// Delete a task
    ///
    /// Example: taskmaster delete 1
    Delete {
        id: u64,
    },
    /// Filter tasks by category, priority, or status
    Filter {
        #[command(subcommand)]
        filter: FilterCommand,
    },
    /// Save tasks to a file (defaults to the working store)
    ///
    /// Example: taskmaster save backup.txt
    Save {
        path: Option<PathBuf>,
    },
    /// Load tasks from a file, replacing the current list
    ///
    /// Example: taskmaster load backup.txt
    Load {
        path: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum FilterCommand {
    /// Filter by category label (Work, Personal, Urgent)
    ///
    /// Example: taskmaster filter category Work
    Category { value: String },
    /// Filter by priority label (Low, Medium, High)
    ///
    /// Example: taskmaster filter priority High
    Priority { value: String },
    /// Filter by status label (Pending, "In Progress", Completed)
    ///
    /// Example: taskmaster filter status Pending
    Status { value: String },
}
