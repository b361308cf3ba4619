use crate::bag::Bag;
use crate::column::{Column, ColumnHeader, ColumnId, ColumnUpdate};
use crate::task::{NewTask, Task, TaskId, TaskUpdate};
use boardkit_core::{BoardError, BoardResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoardMode {
    #[default]
    Edit,
    /// Rendered read-only; drags are ignored.
    View,
}

/// A kanban component instance.
///
/// Owns its columns in display order; each column owns its tasks in order.
/// A task's `column_id` always names the column holding it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub component_id: String,
    pub name: String,
    pub columns: Vec<Column>,
    #[serde(default)]
    pub mode: BoardMode,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSummary {
    pub id: ColumnId,
    pub title: String,
    pub task_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSummary {
    pub columns: Vec<ColumnSummary>,
    pub total_tasks: usize,
}

impl Board {
    pub fn new(component_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            component_id: component_id.into(),
            name: name.into(),
            columns: Vec::new(),
            mode: BoardMode::Edit,
        }
    }

    /// Build a board from a node's props bag.
    ///
    /// Layout: `{columns: [{id, title, backgroundColor}], tasks: [...], viewOnly}`.
    pub fn from_props(
        component_id: impl Into<String>,
        name: impl Into<String>,
        props: &Bag,
    ) -> BoardResult<Self> {
        let mut board = Self::new(component_id, name);

        let headers: Vec<ColumnHeader> = parse_field(props, "columns")?;
        let mut seen = HashSet::new();
        for header in headers {
            if seen.insert(header.id.clone()) {
                board.columns.push(Column::from_header(header));
            } else {
                tracing::warn!(
                    "Ignoring duplicate column {} on board {}",
                    header.id,
                    board.component_id
                );
            }
        }

        let tasks: Vec<Task> = parse_field(props, "tasks")?;
        board.hydrate(tasks);

        if props.get("viewOnly").and_then(Value::as_bool) == Some(true) {
            board.mode = BoardMode::View;
        }
        Ok(board)
    }

    /// Structural props: column headers plus the flattened task list.
    pub fn to_props_patch(&self) -> BoardResult<Bag> {
        let headers: Vec<ColumnHeader> = self.columns.iter().map(Column::header).collect();
        let mut patch = Bag::new();
        patch.insert(
            "columns".to_string(),
            serde_json::to_value(headers).map_err(|e| BoardError::Serialization(e.to_string()))?,
        );
        patch.insert(
            "tasks".to_string(),
            serde_json::to_value(self.flatten_tasks())
                .map_err(|e| BoardError::Serialization(e.to_string()))?,
        );
        Ok(patch)
    }

    /// Replace every column's tasks, partitioning by `column_id`.
    ///
    /// Input order is kept within each column. Tasks naming a column that no
    /// longer exists are dropped, as are repeats of an id already placed.
    pub fn hydrate(&mut self, tasks: Vec<Task>) {
        for column in &mut self.columns {
            column.tasks.clear();
        }
        let mut seen = HashSet::new();
        for task in tasks {
            if !seen.insert(task.id) {
                tracing::warn!(
                    "Dropping duplicate task {} on board {}",
                    task.id,
                    self.component_id
                );
                continue;
            }
            match self.columns.iter_mut().find(|c| c.id == task.column_id) {
                Some(column) => column.tasks.push(task),
                None => tracing::warn!(
                    "Dropping task {} for missing column {} on board {}",
                    task.id,
                    task.column_id,
                    self.component_id
                ),
            }
        }
    }

    /// Every task, in column order then in-column order.
    pub fn flatten_tasks(&self) -> Vec<Task> {
        self.columns
            .iter()
            .flat_map(|c| c.tasks.iter().cloned())
            .collect()
    }

    pub fn task_count(&self) -> usize {
        self.columns.iter().map(|c| c.tasks.len()).sum()
    }

    pub fn column(&self, column_id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    pub fn column_index(&self, column_id: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.id == column_id)
    }

    fn require_column_index(&self, column_id: &str) -> BoardResult<usize> {
        self.column_index(column_id)
            .ok_or_else(|| BoardError::not_found(format!("Column {}", column_id)))
    }

    /// `(column index, task index)` of a task.
    pub fn locate_task(&self, task_id: TaskId) -> Option<(usize, usize)> {
        self.columns
            .iter()
            .enumerate()
            .find_map(|(ci, c)| c.position_of(task_id).map(|ti| (ci, ti)))
    }

    pub fn find_task(&self, task_id: TaskId) -> Option<&Task> {
        self.locate_task(task_id)
            .map(|(ci, ti)| &self.columns[ci].tasks[ti])
    }

    fn find_task_mut(&mut self, task_id: TaskId) -> BoardResult<&mut Task> {
        let (ci, ti) = self
            .locate_task(task_id)
            .ok_or_else(|| BoardError::not_found(format!("Task {}", task_id)))?;
        Ok(&mut self.columns[ci].tasks[ti])
    }

    pub fn create_column(&mut self, title: String) -> Column {
        let column = Column::new(title);
        self.columns.push(column.clone());
        column
    }

    /// Append a column with a caller-chosen id.
    pub fn create_column_with_id(&mut self, id: String, title: String) -> BoardResult<Column> {
        if self.column_index(&id).is_some() {
            return Err(BoardError::Validation(format!(
                "Column {} already exists",
                id
            )));
        }
        let column = Column::with_id(id, title);
        self.columns.push(column.clone());
        Ok(column)
    }

    pub fn update_column(&mut self, column_id: &str, updates: ColumnUpdate) -> BoardResult<Column> {
        let idx = self.require_column_index(column_id)?;
        let column = &mut self.columns[idx];
        column.update(updates);
        Ok(column.clone())
    }

    /// Remove a column together with its tasks.
    pub fn delete_column(&mut self, column_id: &str) -> BoardResult<Column> {
        let idx = self.require_column_index(column_id)?;
        Ok(self.columns.remove(idx))
    }

    /// Replace the display order.
    ///
    /// Ids are taken in the given order; unknown or repeated ids are skipped
    /// and columns left out keep their relative order at the end.
    pub fn reorder_columns(&mut self, order: &[ColumnId]) {
        let mut remaining = std::mem::take(&mut self.columns);
        for id in order {
            if let Some(pos) = remaining.iter().position(|c| &c.id == id) {
                self.columns.push(remaining.remove(pos));
            } else {
                tracing::debug!("Skipping unknown column {} in reorder", id);
            }
        }
        self.columns.extend(remaining);
    }

    pub fn add_task(
        &mut self,
        column_id: &str,
        draft: NewTask,
        now: DateTime<Utc>,
    ) -> BoardResult<Task> {
        let idx = self.require_column_index(column_id)?;
        let column = &mut self.columns[idx];
        let task = Task::new(column.id.clone(), draft, now);
        column.tasks.push(task.clone());
        Ok(task)
    }

    pub fn update_task(&mut self, task_id: TaskId, updates: TaskUpdate) -> BoardResult<Task> {
        let task = self.find_task_mut(task_id)?;
        task.update(updates);
        Ok(task.clone())
    }

    pub fn toggle_complete(&mut self, task_id: TaskId) -> BoardResult<Task> {
        let task = self.find_task_mut(task_id)?;
        task.toggle_complete();
        Ok(task.clone())
    }

    pub fn remove_task(&mut self, task_id: TaskId) -> BoardResult<Task> {
        let (ci, ti) = self
            .locate_task(task_id)
            .ok_or_else(|| BoardError::not_found(format!("Task {}", task_id)))?;
        Ok(self.columns[ci].tasks.remove(ti))
    }

    /// Move a task from `from` to `to` at `to_index`, clamped to `[0, len]`.
    ///
    /// Stamps `moved_at` even when `from == to`.
    pub fn move_task(
        &mut self,
        task_id: TaskId,
        from: &str,
        to: &str,
        to_index: usize,
        now: DateTime<Utc>,
    ) -> BoardResult<Task> {
        let from_idx = self.require_column_index(from)?;
        let to_idx = self.require_column_index(to)?;
        let source_index = self.columns[from_idx]
            .position_of(task_id)
            .ok_or_else(|| BoardError::not_found(format!("Task {} in column {}", task_id, from)))?;
        Ok(self.move_at(from_idx, source_index, to_idx, to_index, now))
    }

    /// Index-based move; `dest_index` is interpreted after removal.
    ///
    /// Callers guarantee both column indices and `source_index` are in range.
    pub(crate) fn move_at(
        &mut self,
        from_idx: usize,
        source_index: usize,
        to_idx: usize,
        dest_index: usize,
        now: DateTime<Utc>,
    ) -> Task {
        let mut task = self.columns[from_idx].tasks.remove(source_index);
        let destination = &mut self.columns[to_idx];
        task.relocate(destination.id.clone(), now);
        let moved = task.clone();
        destination.insert_clamped(dest_index, task);
        moved
    }

    pub fn summary(&self) -> BoardSummary {
        BoardSummary {
            columns: self
                .columns
                .iter()
                .map(|c| ColumnSummary {
                    id: c.id.clone(),
                    title: c.title.clone(),
                    task_count: c.tasks.len(),
                })
                .collect(),
            total_tasks: self.task_count(),
        }
    }
}

fn parse_field<T: serde::de::DeserializeOwned>(props: &Bag, key: &str) -> BoardResult<Vec<T>> {
    match props.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value) => serde_json::from_value(value.clone())
            .map_err(|e| BoardError::Serialization(format!("props.{}: {}", key, e))),
    }
}
