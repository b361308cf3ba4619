use crate::bag::Bag;
use crate::column::ColumnId;
use crate::field_update::FieldUpdate;
use boardkit_core::{BoardError, BoardResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

pub type TaskId = Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub column_id: ColumnId,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moved_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Id of a `TODO` component elsewhere in the page. Never owned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_todo_list: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtasks: Option<Value>,
    #[serde(default)]
    pub completed: bool,
}

/// Fields a caller supplies when adding a task.
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub color: Option<String>,
}

impl NewTask {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

impl Task {
    pub fn new(column_id: ColumnId, draft: NewTask, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: draft.title,
            description: draft.description,
            color: draft.color,
            column_id,
            created_at: now,
            moved_at: Some(now),
            completed_at: None,
            linked_todo_list: None,
            subtasks: None,
            completed: false,
        }
    }

    /// Apply an edit. Location fields are owned by moves.
    pub fn update(&mut self, updates: TaskUpdate) {
        if let Some(title) = updates.title {
            self.title = title;
        }
        updates.description.apply_to(&mut self.description);
        updates.color.apply_to(&mut self.color);
        updates.completed_at.apply_to(&mut self.completed_at);
        updates.linked_todo_list.apply_to(&mut self.linked_todo_list);
        updates.subtasks.apply_to(&mut self.subtasks);
        if let Some(completed) = updates.completed {
            self.completed = completed;
        }
    }

    pub fn relocate(&mut self, column_id: ColumnId, now: DateTime<Utc>) {
        self.column_id = column_id;
        self.moved_at = Some(now);
    }

    pub fn toggle_complete(&mut self) {
        self.completed = !self.completed;
    }

    /// Start of the current stay in the column.
    pub fn entered_column_at(&self) -> DateTime<Utc> {
        self.moved_at.unwrap_or(self.created_at)
    }
}

/// Partial task edit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: FieldUpdate<String>,
    pub color: FieldUpdate<String>,
    pub completed_at: FieldUpdate<DateTime<Utc>>,
    pub linked_todo_list: FieldUpdate<String>,
    pub subtasks: FieldUpdate<Value>,
    pub completed: Option<bool>,
}

const LOCATION_KEYS: &[&str] = &["id", "columnId", "createdAt", "movedAt"];

impl TaskUpdate {
    /// Parse a camelCase JSON patch. `null` clears an optional field.
    pub fn from_bag(patch: &Bag) -> BoardResult<Self> {
        let mut update = TaskUpdate::default();
        for (key, value) in patch {
            match key.as_str() {
                "title" => {
                    update.title = Some(expect_string(key, value)?);
                }
                "description" => update.description = optional_string(key, value)?,
                "color" => update.color = optional_string(key, value)?,
                "linkedTodoList" => update.linked_todo_list = optional_string(key, value)?,
                "completedAt" => {
                    update.completed_at = match value {
                        Value::Null => FieldUpdate::Clear,
                        other => {
                            let raw = expect_string(key, other)?;
                            let parsed = DateTime::parse_from_rfc3339(&raw).map_err(|e| {
                                BoardError::Validation(format!("completedAt: {}", e))
                            })?;
                            FieldUpdate::Set(parsed.with_timezone(&Utc))
                        }
                    }
                }
                "subtasks" => update.subtasks = FieldUpdate::from_json(Some(value)),
                "completed" => {
                    update.completed = Some(value.as_bool().ok_or_else(|| {
                        BoardError::Validation("completed must be a boolean".into())
                    })?);
                }
                k if LOCATION_KEYS.contains(&k) => {
                    return Err(BoardError::Validation(format!(
                        "{} cannot be changed by an edit",
                        k
                    )));
                }
                other => {
                    return Err(BoardError::Validation(format!(
                        "Unknown task field: {}",
                        other
                    )));
                }
            }
        }
        Ok(update)
    }
}

fn expect_string(key: &str, value: &Value) -> BoardResult<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| BoardError::Validation(format!("{} must be a string", key)))
}

fn optional_string(key: &str, value: &Value) -> BoardResult<FieldUpdate<String>> {
    match value {
        Value::Null => Ok(FieldUpdate::Clear),
        other => expect_string(key, other).map(FieldUpdate::Set),
    }
}
