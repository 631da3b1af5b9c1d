//! Taskboard command-line front end.
//!
//! # Responsibility
//! - Translate one command-line intent into one store mutation.
//! - Render store state after the mutation, as text or JSON.

mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use log::error;
use serde_json::json;
use std::process::ExitCode;
use taskboard_core::{
    core_version, default_log_level, init_logging, KvStore, MemoryKvStore, Project,
    SqliteKvStore, Store, StoreError, StoreResult, StoredProject,
};

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    }

    if let Commands::Version = cli.command {
        print_version();
        return ExitCode::SUCCESS;
    }

    let result = match cli.db_path.as_deref() {
        Some(path) => SqliteKvStore::open(path)
            .map_err(StoreError::from)
            .and_then(|storage| run(storage, &cli.command, cli.json)),
        None => run(MemoryKvStore::new(), &cli.command, cli.json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_command module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run<K: KvStore>(storage: K, command: &Commands, as_json: bool) -> StoreResult<()> {
    let mut store = Store::open(storage)?;
    match command {
        Commands::Projects => print_projects(store.projects(), as_json),
        Commands::AddProject { name } => {
            store.add_project(name)?;
            print_projects(store.projects(), as_json);
        }
        Commands::Tasks { project } => {
            store.select_project(*project)?;
            print_selected(&store, as_json);
        }
        Commands::AddTask {
            project,
            title,
            date,
            description,
            priority,
        } => {
            store.select_project(*project)?;
            store.add_task_to_selected(title, description, date, priority)?;
            print_selected(&store, as_json);
        }
        Commands::DeleteTask { project, task } => {
            store.select_project(*project)?;
            store.delete_task(*task)?;
            print_selected(&store, as_json);
        }
        Commands::Version => print_version(),
    }
    Ok(())
}

fn print_version() {
    println!("taskboard_core {}", core_version());
}

fn print_projects(projects: &[Project], as_json: bool) {
    if as_json {
        let items: Vec<_> = projects
            .iter()
            .enumerate()
            .map(|(index, project)| {
                json!({
                    "index": index,
                    "name": project.name(),
                    "task_count": project.task_count(),
                })
            })
            .collect();
        println!("{}", json!({ "projects": items }));
        return;
    }

    for (index, project) in projects.iter().enumerate() {
        let noun = if project.task_count() == 1 { "task" } else { "tasks" };
        println!(
            "{index}\t{}\t{} {noun}",
            project.name(),
            project.task_count()
        );
    }
}

fn print_selected<K: KvStore>(store: &Store<K>, as_json: bool) {
    let Some(project) = store.selected_project() else {
        return;
    };

    if as_json {
        println!("{}", json!(StoredProject::from(project)));
        return;
    }

    println!("Project: {}", project.name());
    for (index, task) in project.tasks().iter().enumerate() {
        println!("[{index}] {}", task.title());
        if !task.description().is_empty() {
            println!("    {}", task.description());
        }
        println!("    Due: {}", task.due_date());
        println!("    Priority: {}", task.priority());
    }
}
