use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::WrapErr;
use taskr_core::{Config, FileStorage, Storage, TaskManager};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "taskr", version)]
#[command(about = "Personal task tracker backed by a plain text file", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Task file to use instead of the configured one
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new task
    Add {
        /// What needs doing
        #[arg(required = true)]
        description: Vec<String>,
        /// Due date, stored as written
        #[arg(long)]
        due: Option<String>,
        /// low, medium or high
        #[arg(long, default_value = "medium")]
        priority: String,
    },
    /// List tasks, highest priority first
    List {
        /// Print the tasks as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a single task
    Show { id: u64 },
    /// Mark a task as completed
    Complete { id: u64 },
    /// Run the built-in walkthrough against the task file
    Demo,
    /// Print the effective configuration
    Config,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_tracing();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)
            .wrap_err_with(|| format!("loading config from {}", path.display()))?,
        None => Config::load()?,
    };
    if let Some(file) = &cli.file {
        config.storage.file = file.to_string_lossy().into_owned();
    }

    let open = || TaskManager::new(FileStorage::with_config(&config.storage));

    match cli.command {
        Commands::Add {
            description,
            due,
            priority,
        } => {
            let task = open()?.add(&description.join(" "), due.as_deref(), &priority)?;
            println!("{}", task);
        }
        Commands::List { json } => {
            let manager = open()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&manager.list())?);
            } else {
                print!("{}", manager.render_list());
            }
        }
        Commands::Show { id } => match open()?.get(id) {
            Some(task) => println!("{}", task),
            None => println!("Task {} not found.", id),
        },
        Commands::Complete { id } => {
            open()?.mark_completed(id)?;
        }
        Commands::Demo => run_demo(&mut open()?)?,
        Commands::Config => print!("{}", config.to_toml()),
    }

    Ok(())
}

/// Notices go to stderr without timestamps so they read like plain messages.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("taskr=info,taskr_core=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

/// Lists, adds three tasks, completes task 1, listing after each step.
fn run_demo<S: Storage>(manager: &mut TaskManager<S>) -> color_eyre::Result<()> {
    println!("{}", manager.render_list());

    manager.add("Review SOLID Principles", Some("2024-08-10"), "high")?;
    manager.add("Prepare for Final Exam", Some("2024-08-15"), "medium")?;
    manager.add("Refill water", None, "low")?;
    println!("{}", manager.render_list());

    manager.mark_completed(1)?;
    println!("{}", manager.render_list());

    Ok(())
}
