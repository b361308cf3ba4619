//! Board container: owns the board, runs commands and commits results.
//!
//! Everything the board needs from the outside (time, the owning container's
//! commit callback, persistence) is handed in at construction.

use crate::bag::{apply_patch, Bag, NodePatch, UpdateSink};
use crate::board::Board;
use crate::column::{Column, ColumnId, ColumnUpdate};
use crate::commands::{
    AddTask, ApplyDrag, Command, CommandContext, CommandOutcome, CreateColumn, DeleteColumn,
    MoveTask, RemoveTask, ReorderColumns, ToggleComplete, UpdateColumn, UpdateTask,
};
use crate::drag::DragEndEvent;
use crate::snapshot::ComponentData;
use crate::task::{NewTask, Task, TaskId, TaskUpdate};
use boardkit_core::{BoardError, BoardResult};
use chrono::{DateTime, Utc};

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Fire-and-forget hand-off of snapshots to the persistence layer.
#[cfg_attr(test, mockall::automock)]
pub trait PersistHandle: Send + Sync {
    fn queue(&self, data: ComponentData);
}

pub struct BoardController<C: Clock = SystemClock> {
    board: Board,
    props: Bag,
    clock: C,
    sink: Box<dyn UpdateSink>,
    persist: Option<Box<dyn PersistHandle>>,
}

impl<C: Clock> BoardController<C> {
    /// `props` is the node's current props bag; emitted patches are merged
    /// over it so non-structural keys survive.
    pub fn new(board: Board, props: Bag, clock: C, sink: Box<dyn UpdateSink>) -> Self {
        Self {
            board,
            props,
            clock,
            sink,
            persist: None,
        }
    }

    pub fn with_persistence(mut self, persist: Box<dyn PersistHandle>) -> Self {
        self.persist = Some(persist);
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn props(&self) -> &Bag {
        &self.props
    }

    pub fn execute(&mut self, command: Box<dyn Command>) -> BoardResult<CommandOutcome> {
        tracing::debug!(
            "Executing on {}: {}",
            self.board.component_id,
            command.description()
        );

        let mut context = CommandContext {
            board: &mut self.board,
            now: self.clock.now(),
        };
        let outcome = command.execute(&mut context)?;

        if outcome.is_change() {
            self.commit()?;
        }
        Ok(outcome)
    }

    fn commit(&mut self) -> BoardResult<()> {
        let structural = self.board.to_props_patch()?;
        self.props = apply_patch(&self.props, &structural);
        self.sink
            .on_update(&self.board.component_id, NodePatch::props(self.props.clone()));

        if let Some(persist) = &self.persist {
            tracing::debug!("Queueing snapshot for {}", self.board.component_id);
            persist.queue(ComponentData::from_board(&self.board));
        }
        Ok(())
    }

    pub fn create_column(&mut self, title: String) -> BoardResult<Column> {
        self.execute(Box::new(CreateColumn { id: None, title }))?
            .into_column()
            .ok_or_else(|| BoardError::Internal("create column returned no column".into()))
    }

    pub fn update_column(
        &mut self,
        column_id: ColumnId,
        updates: ColumnUpdate,
    ) -> BoardResult<Column> {
        self.execute(Box::new(UpdateColumn { column_id, updates }))?
            .into_column()
            .ok_or_else(|| BoardError::Internal("update column returned no column".into()))
    }

    pub fn delete_column(&mut self, column_id: ColumnId) -> BoardResult<Column> {
        self.execute(Box::new(DeleteColumn { column_id }))?
            .into_column()
            .ok_or_else(|| BoardError::Internal("delete column returned no column".into()))
    }

    pub fn reorder_columns(&mut self, order: Vec<ColumnId>) -> BoardResult<()> {
        self.execute(Box::new(ReorderColumns { order }))?;
        Ok(())
    }

    pub fn add_task(&mut self, column_id: ColumnId, draft: NewTask) -> BoardResult<Task> {
        self.run_task(Box::new(AddTask { column_id, draft }))
    }

    pub fn update_task(&mut self, task_id: TaskId, updates: TaskUpdate) -> BoardResult<Task> {
        self.run_task(Box::new(UpdateTask { task_id, updates }))
    }

    pub fn toggle_complete(&mut self, task_id: TaskId) -> BoardResult<Task> {
        self.run_task(Box::new(ToggleComplete { task_id }))
    }

    pub fn move_task(
        &mut self,
        task_id: TaskId,
        from_column_id: ColumnId,
        to_column_id: ColumnId,
        to_index: usize,
    ) -> BoardResult<Task> {
        self.run_task(Box::new(MoveTask {
            task_id,
            from_column_id,
            to_column_id,
            to_index,
        }))
    }

    pub fn remove_task(&mut self, task_id: TaskId) -> BoardResult<Task> {
        self.run_task(Box::new(RemoveTask { task_id }))
    }

    /// Apply a drop. `Ok(None)` when the drop changed nothing.
    pub fn on_drag_end(&mut self, event: DragEndEvent) -> BoardResult<Option<Task>> {
        Ok(self.execute(Box::new(ApplyDrag { event }))?.into_task())
    }

    fn run_task(&mut self, command: Box<dyn Command>) -> BoardResult<Task> {
        let description = command.description();
        self.execute(command)?
            .into_task()
            .ok_or_else(|| BoardError::Internal(format!("{} returned no task", description)))
    }
}
