use clap::{Args, Subcommand};
use pomotask_core::task::{filter_tasks, sort_by_created, sort_by_priority, task_stats};
use pomotask_core::{NewTask, Priority, Task, TaskFilter, TaskPatch, TaskStore, TasksClient};

#[derive(Args)]
pub struct TaskCmd {
    /// Base URL of a remote task API; defaults to the local store
    #[arg(long, global = true)]
    api: Option<String>,

    #[command(subcommand)]
    action: TaskAction,
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task
    Add {
        title: String,
        /// high, medium or low
        #[arg(long)]
        priority: Option<Priority>,
    },
    /// List tasks
    List {
        /// all, active or completed
        #[arg(long, default_value = "all")]
        filter: TaskFilter,
        /// Order by priority instead of newest-first
        #[arg(long)]
        by_priority: bool,
        /// Print raw JSON
        #[arg(long)]
        json: bool,
    },
    /// Mark a task as completed
    Done { id: String },
    /// Edit a task's fields
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        priority: Option<Priority>,
        #[arg(long)]
        completed: Option<bool>,
    },
    /// Delete a task
    Rm { id: String },
    /// Print task statistics
    Stats,
}

/// Local file store or remote API, behind the same four operations.
enum Backend {
    Local(TaskStore),
    Remote(TasksClient, tokio::runtime::Runtime),
}

impl Backend {
    fn open(api: Option<String>) -> Result<Self, Box<dyn std::error::Error>> {
        match api {
            Some(url) => Ok(Backend::Remote(
                TasksClient::new(&url)?,
                tokio::runtime::Runtime::new()?,
            )),
            None => Ok(Backend::Local(TaskStore::open()?)),
        }
    }

    fn list(&self) -> Result<Vec<Task>, Box<dyn std::error::Error>> {
        match self {
            Backend::Local(store) => Ok(store.list().to_vec()),
            Backend::Remote(client, rt) => Ok(rt.block_on(client.fetch_tasks())?),
        }
    }

    fn create(&mut self, new_task: NewTask) -> Result<Task, Box<dyn std::error::Error>> {
        match self {
            Backend::Local(store) => Ok(store.create(new_task)?),
            Backend::Remote(client, rt) => Ok(rt.block_on(client.create_task(&new_task))?),
        }
    }

    fn update(&mut self, id: &str, patch: &TaskPatch) -> Result<Task, Box<dyn std::error::Error>> {
        match self {
            Backend::Local(store) => Ok(store.update(id, patch)?),
            Backend::Remote(client, rt) => Ok(rt.block_on(client.update_task(id, patch))?),
        }
    }

    fn delete(&mut self, id: &str) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            Backend::Local(store) => Ok(store.delete(id)?),
            Backend::Remote(client, rt) => Ok(rt.block_on(client.delete_task(id))?),
        }
    }
}

fn print_task(task: &Task) {
    let mark = if task.completed { "x" } else { " " };
    let priority = task
        .priority
        .map(|p| format!(" [{p}]"))
        .unwrap_or_default();
    println!("[{mark}]{priority} {}  ({})", task.title, task.id);
}

pub fn run(cmd: TaskCmd) -> Result<(), Box<dyn std::error::Error>> {
    let mut backend = Backend::open(cmd.api)?;

    match cmd.action {
        TaskAction::Add { title, priority } => {
            let mut new_task = NewTask::new(title);
            new_task.priority = priority;
            let task = backend.create(new_task)?;
            println!("Task created: {}", task.id);
        }
        TaskAction::List {
            filter,
            by_priority,
            json,
        } => {
            let tasks = backend.list()?;
            let tasks = filter_tasks(&tasks, filter);
            let tasks = if by_priority {
                sort_by_priority(&tasks)
            } else {
                sort_by_created(&tasks)
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else {
                for task in &tasks {
                    print_task(task);
                }
            }
        }
        TaskAction::Done { id } => {
            let patch = TaskPatch {
                completed: Some(true),
                ..TaskPatch::default()
            };
            let task = backend.update(&id, &patch)?;
            println!("Task completed: {}", task.title);
        }
        TaskAction::Edit {
            id,
            title,
            priority,
            completed,
        } => {
            let patch = TaskPatch {
                title,
                completed,
                priority,
            };
            let task = backend.update(&id, &patch)?;
            print_task(&task);
        }
        TaskAction::Rm { id } => {
            backend.delete(&id)?;
            println!("Task deleted: {id}");
        }
        TaskAction::Stats => {
            let tasks = backend.list()?;
            println!("{}", serde_json::to_string_pretty(&task_stats(&tasks))?);
        }
    }

    Ok(())
}
