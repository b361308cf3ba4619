use crate::{Board, Column, Task};
use boardkit_core::BoardResult;
use chrono::{DateTime, Utc};

pub mod column_commands;
pub mod task_commands;

pub use column_commands::*;
pub use task_commands::*;

/// A structural mutation of a board.
/// Commands carry intent; the controller runs them and commits the result.
pub trait Command: Send + Sync {
    fn execute(&self, context: &mut CommandContext) -> BoardResult<CommandOutcome>;

    /// Human-readable description of what this command does
    fn description(&self) -> String;
}

pub struct CommandContext<'a> {
    pub board: &'a mut Board,
    pub now: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    Column(Column),
    Task(Task),
    Reordered,
    /// Nothing changed; no patch or persistence follows.
    Unchanged,
}

impl CommandOutcome {
    pub fn is_change(&self) -> bool {
        !matches!(self, CommandOutcome::Unchanged)
    }

    pub fn into_task(self) -> Option<Task> {
        match self {
            CommandOutcome::Task(task) => Some(task),
            _ => None,
        }
    }

    pub fn into_column(self) -> Option<Column> {
        match self {
            CommandOutcome::Column(column) => Some(column),
            _ => None,
        }
    }
}
