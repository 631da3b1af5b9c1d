//! Command-line argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Taskboard - projects and dated tasks kept in a local store.
#[derive(Parser, Debug)]
#[command(name = "taskboard")]
#[command(author, version, about = "Manage projects and dated tasks in a local store", long_about = None)]
pub struct Cli {
    /// SQLite database holding the board. Without it the session is in-memory.
    #[arg(long = "db", global = true, env = "TASKBOARD_DB")]
    pub db_path: Option<PathBuf>,

    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long, global = true, env = "TASKBOARD_LOG_DIR")]
    pub log_dir: Option<String>,

    /// Log level (trace|debug|info|warn|error). Defaults per build mode.
    #[arg(long, global = true, env = "TASKBOARD_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Print JSON instead of human-readable text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List projects with their task counts
    Projects,

    /// Create an empty project
    AddProject {
        /// Project name
        name: String,
    },

    /// Show the tasks of one project
    Tasks {
        /// Project index as shown by `projects`
        project: usize,
    },

    /// Add a task to a project
    AddTask {
        /// Project index as shown by `projects`
        project: usize,

        /// Task title
        title: String,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        /// Longer description
        #[arg(long, default_value = "")]
        description: String,

        /// Priority label
        #[arg(long, default_value = "low")]
        priority: String,
    },

    /// Delete a task by position
    DeleteTask {
        /// Project index as shown by `projects`
        project: usize,

        /// Task index as shown by `tasks`
        task: usize,
    },

    /// Print the core library version
    Version,
}
