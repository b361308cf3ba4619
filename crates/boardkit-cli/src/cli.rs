use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "boardkit")]
#[command(about = "Edit kanban boards embedded in a page document", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the page JSON file (or set BOARDKIT_PAGE env var)
    #[arg(value_name = "PAGE_FILE", env = "BOARDKIT_PAGE")]
    pub page_file: Option<PathBuf>,

    /// Base URL of the component-data service
    #[arg(long, env = "BOARDKIT_REMOTE_URL", global = true)]
    pub remote_url: Option<String>,

    /// Directory of local component-data snapshots
    #[arg(long, env = "BOARDKIT_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Page document operations
    Page(PageCommand),
    /// Board operations
    Board(BoardCommand),
    /// Column operations
    Column(ColumnCommand),
    /// Task operations
    Task(TaskCommand),
    /// Apply a drag-end event to a board
    Drag {
        /// Board component id
        #[arg(long)]
        id: String,
        /// Event JSON: {"source": {...}, "destination": {...} | null}
        #[arg(long)]
        event: String,
    },
    /// Style bag operations
    Style(BagCommand),
    /// Props bag operations
    Props(BagCommand),
    /// Todo list operations
    Todo(TodoCommand),
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args)]
pub struct PageCommand {
    #[command(subcommand)]
    pub action: PageAction,
}

#[derive(Subcommand)]
pub enum PageAction {
    /// Create an empty page file
    Init,
    /// Print the component tree
    Show,
}

#[derive(Args)]
pub struct BoardCommand {
    #[command(subcommand)]
    pub action: BoardAction,
}

#[derive(Subcommand)]
pub enum BoardAction {
    /// Add a kanban component to the page
    Create {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        /// Initial column titles, comma separated
        #[arg(long, value_delimiter = ',')]
        columns: Vec<String>,
    },
    /// Show columns, tasks, resolved style and summary
    Show {
        #[arg(long)]
        id: String,
    },
}

#[derive(Args)]
pub struct ColumnCommand {
    #[command(subcommand)]
    pub action: ColumnAction,
}

#[derive(Subcommand)]
pub enum ColumnAction {
    /// Append a new column
    Create {
        #[arg(long)]
        board: String,
        #[arg(long)]
        title: String,
        /// Explicit column id (generated when omitted)
        #[arg(long)]
        id: Option<String>,
    },
    /// Delete a column and its tasks
    Delete {
        #[arg(long)]
        board: String,
        #[arg(long)]
        id: String,
    },
    /// Change a column's title or background color
    Rename {
        #[arg(long)]
        board: String,
        #[arg(long)]
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long, conflicts_with = "clear_color")]
        background_color: Option<String>,
        #[arg(long)]
        clear_color: bool,
    },
    /// Replace the column display order
    Reorder {
        #[arg(long)]
        board: String,
        /// Column ids in display order, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        order: Vec<String>,
    },
    /// List columns with task counts
    List {
        #[arg(long)]
        board: String,
    },
}

#[derive(Args)]
pub struct TaskCommand {
    #[command(subcommand)]
    pub action: TaskAction,
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Append a task to a column
    Add(TaskAddArgs),
    /// Merge a JSON patch into a task
    Update {
        #[arg(long)]
        board: String,
        #[arg(long)]
        id: Uuid,
        /// e.g. {"title": "New", "color": null}
        #[arg(long)]
        patch: String,
    },
    /// Move a task to a column position
    Move {
        #[arg(long)]
        board: String,
        #[arg(long)]
        id: Uuid,
        /// Destination column id
        #[arg(long)]
        to: String,
        /// Destination index (end of column when omitted)
        #[arg(long)]
        index: Option<usize>,
    },
    /// Flip a task's completed flag
    Toggle {
        #[arg(long)]
        board: String,
        #[arg(long)]
        id: Uuid,
    },
    /// Remove a task
    Remove {
        #[arg(long)]
        board: String,
        #[arg(long)]
        id: Uuid,
    },
    /// List tasks, optionally for one column
    List {
        #[arg(long)]
        board: String,
        #[arg(long)]
        column: Option<String>,
    },
    /// Durations and linked todo progress for a task
    Metrics {
        #[arg(long)]
        board: String,
        #[arg(long)]
        id: Uuid,
    },
}

#[derive(Args)]
pub struct TaskAddArgs {
    #[arg(long)]
    pub board: String,
    #[arg(long)]
    pub column: String,
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub color: Option<String>,
}

#[derive(Args)]
pub struct BagCommand {
    #[command(subcommand)]
    pub action: BagAction,
}

#[derive(Subcommand)]
pub enum BagAction {
    /// Shallow-merge a JSON object into a component's bag
    Set {
        /// Component id
        #[arg(long)]
        id: String,
        #[arg(long)]
        patch: String,
    },
}

#[derive(Args)]
pub struct TodoCommand {
    #[command(subcommand)]
    pub action: TodoAction,
}

#[derive(Subcommand)]
pub enum TodoAction {
    /// Add a todo list component to the page
    Create {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
    },
    /// Append an item to a todo list
    Add {
        #[arg(long)]
        id: String,
        #[arg(long)]
        text: String,
    },
    /// Flip an item's completed flag
    Toggle {
        #[arg(long)]
        id: String,
        #[arg(long)]
        item: String,
    },
}
