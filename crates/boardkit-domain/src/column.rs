use crate::field_update::FieldUpdate;
use crate::task::{Task, TaskId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type ColumnId = String;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// Column configuration as stored in a board's props, without tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnHeader {
    pub id: ColumnId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ColumnUpdate {
    pub title: Option<String>,
    pub background_color: FieldUpdate<String>,
}

impl Column {
    pub fn new(title: String) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), title)
    }

    pub fn with_id(id: impl Into<ColumnId>, title: String) -> Self {
        Self {
            id: id.into(),
            title,
            background_color: None,
            tasks: Vec::new(),
        }
    }

    pub fn from_header(header: ColumnHeader) -> Self {
        Self {
            id: header.id,
            title: header.title,
            background_color: header.background_color,
            tasks: Vec::new(),
        }
    }

    pub fn header(&self) -> ColumnHeader {
        ColumnHeader {
            id: self.id.clone(),
            title: self.title.clone(),
            background_color: self.background_color.clone(),
        }
    }

    pub fn update(&mut self, updates: ColumnUpdate) {
        if let Some(title) = updates.title {
            self.title = title;
        }
        updates.background_color.apply_to(&mut self.background_color);
    }

    pub fn position_of(&self, task_id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == task_id)
    }

    /// Insert at `index`, clamped to the end of the column.
    pub fn insert_clamped(&mut self, index: usize, task: Task) -> usize {
        let index = index.min(self.tasks.len());
        self.tasks.insert(index, task);
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::NewTask;
    use chrono::Utc;

    #[test]
    fn test_new_columns_get_unique_ids() {
        let a = Column::new("To Do".into());
        let b = Column::new("To Do".into());
        assert_ne!(a.id, b.id);
        assert!(a.tasks.is_empty());
    }

    #[test]
    fn test_insert_clamped() {
        let mut column = Column::with_id("col1", "To Do".into());
        let now = Utc::now();
        let first = Task::new("col1".into(), NewTask::titled("first"), now);
        let second = Task::new("col1".into(), NewTask::titled("second"), now);

        assert_eq!(column.insert_clamped(10, first), 0);
        assert_eq!(column.insert_clamped(0, second.clone()), 0);
        assert_eq!(column.position_of(second.id), Some(0));
    }

    #[test]
    fn test_header_round_trip_drops_tasks() {
        let mut column = Column::with_id("c", "Done".into());
        column.background_color = Some("#eee".into());
        column
            .tasks
            .push(Task::new("c".into(), NewTask::titled("t"), Utc::now()));

        let rebuilt = Column::from_header(column.header());
        assert_eq!(rebuilt.background_color.as_deref(), Some("#eee"));
        assert!(rebuilt.tasks.is_empty());
    }

    #[test]
    fn test_update_clears_background() {
        let mut column = Column::with_id("c", "Done".into());
        column.background_color = Some("#eee".into());
        column.update(ColumnUpdate {
            title: Some("Shipped".into()),
            background_color: FieldUpdate::Clear,
        });
        assert_eq!(column.title, "Shipped");
        assert!(column.background_color.is_none());
    }
}
