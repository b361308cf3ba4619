use crate::board::Board;
use crate::task::Task;
use serde::{Deserialize, Serialize};

pub const KANBAN_COMPONENT_TYPE: &str = "KANBAN";

/// Flat snapshot replicated to the component-data store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentData {
    pub component_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub component_type: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl ComponentData {
    pub fn from_board(board: &Board) -> Self {
        Self {
            component_id: board.component_id.clone(),
            name: board.name.clone(),
            component_type: KANBAN_COMPONENT_TYPE.to_string(),
            tasks: board.flatten_tasks(),
        }
    }
}

/// Response body of a component-data lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDataEnvelope {
    pub data: StoredTasks,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StoredTasks {
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl ComponentDataEnvelope {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self {
            data: StoredTasks { tasks },
        }
    }

    pub fn into_tasks(self) -> Vec<Task> {
        self.data.tasks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::NewTask;
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn test_from_board_flattens() {
        let mut board = Board::new("kanban-7", "Roadmap");
        board
            .create_column_with_id("col1".into(), "To Do".into())
            .unwrap();
        board
            .add_task("col1", NewTask::titled("a"), Utc::now())
            .unwrap();

        let data = ComponentData::from_board(&board);
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["componentId"], "kanban-7");
        assert_eq!(json["type"], "KANBAN");
        assert_eq!(json["tasks"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_envelope_parses_response_shape() {
        let envelope: ComponentDataEnvelope = serde_json::from_value(json!({
            "data": {"tasks": [{
                "id": "7d3c5e3a-1111-4b7e-9a52-1f2f7c6a0b2d",
                "title": "stored",
                "columnId": "col1",
                "createdAt": "2024-01-01T00:00:00Z"
            }]}
        }))
        .unwrap();
        assert_eq!(envelope.into_tasks()[0].title, "stored");
    }

    #[test]
    fn test_envelope_without_tasks() {
        let envelope: ComponentDataEnvelope =
            serde_json::from_value(json!({"data": {}})).unwrap();
        assert!(envelope.into_tasks().is_empty());
    }
}
