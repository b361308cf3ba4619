use super::{Command, CommandContext, CommandOutcome};
use crate::drag::{apply_drag_end, DragEndEvent};
use crate::{ColumnId, NewTask, TaskId, TaskUpdate};
use boardkit_core::BoardResult;

/// Append a task to the end of a column
pub struct AddTask {
    pub column_id: ColumnId,
    pub draft: NewTask,
}

impl Command for AddTask {
    fn execute(&self, context: &mut CommandContext) -> BoardResult<CommandOutcome> {
        let task = context
            .board
            .add_task(&self.column_id, self.draft.clone(), context.now)?;
        Ok(CommandOutcome::Task(task))
    }

    fn description(&self) -> String {
        format!("Add task '{}' to column {}", self.draft.title, self.column_id)
    }
}

/// Edit task fields in place
pub struct UpdateTask {
    pub task_id: TaskId,
    pub updates: TaskUpdate,
}

impl Command for UpdateTask {
    fn execute(&self, context: &mut CommandContext) -> BoardResult<CommandOutcome> {
        let task = context
            .board
            .update_task(self.task_id, self.updates.clone())?;
        Ok(CommandOutcome::Task(task))
    }

    fn description(&self) -> String {
        format!("Update task {}", self.task_id)
    }
}

pub struct ToggleComplete {
    pub task_id: TaskId,
}

impl Command for ToggleComplete {
    fn execute(&self, context: &mut CommandContext) -> BoardResult<CommandOutcome> {
        let task = context.board.toggle_complete(self.task_id)?;
        Ok(CommandOutcome::Task(task))
    }

    fn description(&self) -> String {
        format!("Toggle completion of task {}", self.task_id)
    }
}

/// Move a task to a position in another (or the same) column
pub struct MoveTask {
    pub task_id: TaskId,
    pub from_column_id: ColumnId,
    pub to_column_id: ColumnId,
    pub to_index: usize,
}

impl Command for MoveTask {
    fn execute(&self, context: &mut CommandContext) -> BoardResult<CommandOutcome> {
        let task = context.board.move_task(
            self.task_id,
            &self.from_column_id,
            &self.to_column_id,
            self.to_index,
            context.now,
        )?;
        Ok(CommandOutcome::Task(task))
    }

    fn description(&self) -> String {
        format!(
            "Move task {} from {} to {} at {}",
            self.task_id, self.from_column_id, self.to_column_id, self.to_index
        )
    }
}

/// Remove a task from its column permanently
pub struct RemoveTask {
    pub task_id: TaskId,
}

impl Command for RemoveTask {
    fn execute(&self, context: &mut CommandContext) -> BoardResult<CommandOutcome> {
        let task = context.board.remove_task(self.task_id)?;
        Ok(CommandOutcome::Task(task))
    }

    fn description(&self) -> String {
        format!("Remove task {}", self.task_id)
    }
}

/// Apply a drop from the drag layer
pub struct ApplyDrag {
    pub event: DragEndEvent,
}

impl Command for ApplyDrag {
    fn execute(&self, context: &mut CommandContext) -> BoardResult<CommandOutcome> {
        Ok(apply_drag_end(context.board, &self.event, context.now)
            .map(CommandOutcome::Task)
            .unwrap_or(CommandOutcome::Unchanged))
    }

    fn description(&self) -> String {
        match &self.event.destination {
            Some(dest) => format!(
                "Drop {}[{}] on {}[{}]",
                self.event.source.droppable_id,
                self.event.source.index,
                dest.droppable_id,
                dest.index
            ),
            None => format!(
                "Cancelled drag from {}[{}]",
                self.event.source.droppable_id, self.event.source.index
            ),
        }
    }
}
