//! Drop handling for drag-library style events.

use crate::board::{Board, BoardMode};
use crate::task::Task;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraggableLocation {
    pub droppable_id: String,
    pub index: usize,
}

/// Payload delivered when a drag ends. `destination` is `None` when the drop
/// was cancelled or landed outside any column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragEndEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draggable_id: Option<String>,
    pub source: DraggableLocation,
    #[serde(default)]
    pub destination: Option<DraggableLocation>,
}

impl DragEndEvent {
    pub fn new(source: (&str, usize), destination: Option<(&str, usize)>) -> Self {
        let location = |(id, index): (&str, usize)| DraggableLocation {
            droppable_id: id.to_string(),
            index,
        };
        Self {
            draggable_id: None,
            source: location(source),
            destination: destination.map(location),
        }
    }
}

/// Apply a drop, returning the moved task.
///
/// Cancelled drops, view-only boards and events referencing unknown columns
/// or indices yield `None` and leave the board untouched. The destination
/// index is read after the card has left its source and is clamped to the
/// end of the column.
pub fn apply_drag_end(board: &mut Board, event: &DragEndEvent, now: DateTime<Utc>) -> Option<Task> {
    let destination = event.destination.as_ref()?;
    if board.mode == BoardMode::View {
        tracing::debug!("Ignoring drop on view-only board {}", board.component_id);
        return None;
    }

    let (Some(from_idx), Some(to_idx)) = (
        board.column_index(&event.source.droppable_id),
        board.column_index(&destination.droppable_id),
    ) else {
        tracing::debug!(
            "Ignoring drop between unknown columns {} -> {}",
            event.source.droppable_id,
            destination.droppable_id
        );
        return None;
    };

    if event.source.index >= board.columns[from_idx].tasks.len() {
        tracing::debug!(
            "Ignoring drop with source index {} past end of column {}",
            event.source.index,
            event.source.droppable_id
        );
        return None;
    }

    Some(board.move_at(from_idx, event.source.index, to_idx, destination.index, now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{NewTask, TaskId};
    use chrono::Duration;
    use serde_json::json;

    fn board() -> (Board, Vec<TaskId>) {
        let mut board = Board::new("kanban-1", "Board");
        for id in ["col1", "col2", "col3"] {
            board
                .create_column_with_id(id.to_string(), id.to_string())
                .unwrap();
        }
        let now = Utc::now();
        let ids = ["a", "b", "c"]
            .iter()
            .map(|t| board.add_task("col1", NewTask::titled(*t), now).unwrap().id)
            .collect();
        (board, ids)
    }

    fn column_ids(board: &Board, idx: usize) -> Vec<TaskId> {
        board.columns[idx].tasks.iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_cancelled_drop_is_noop() {
        let (mut board, _) = board();
        let before = board.clone();
        let event = DragEndEvent::new(("col1", 0), None);
        assert!(apply_drag_end(&mut board, &event, Utc::now()).is_none());
        assert_eq!(board, before);
    }

    #[test]
    fn test_view_only_is_noop() {
        let (mut board, _) = board();
        board.mode = BoardMode::View;
        let before = board.clone();
        let event = DragEndEvent::new(("col1", 0), Some(("col2", 0)));
        assert!(apply_drag_end(&mut board, &event, Utc::now()).is_none());
        assert_eq!(board, before);
    }

    #[test]
    fn test_cross_column_drop() {
        let (mut board, ids) = board();
        let now = Utc::now() + Duration::minutes(1);
        let event = DragEndEvent::new(("col1", 1), Some(("col3", 0)));

        let moved = apply_drag_end(&mut board, &event, now).unwrap();
        assert_eq!(moved.id, ids[1]);
        assert_eq!(moved.column_id, "col3");
        assert_eq!(moved.moved_at, Some(now));
        assert_eq!(column_ids(&board, 0), vec![ids[0], ids[2]]);
        assert_eq!(column_ids(&board, 2), vec![ids[1]]);
    }

    #[test]
    fn test_same_column_uses_post_removal_index() {
        let (mut board, ids) = board();
        let event = DragEndEvent::new(("col1", 0), Some(("col1", 2)));
        apply_drag_end(&mut board, &event, Utc::now()).unwrap();
        assert_eq!(column_ids(&board, 0), vec![ids[1], ids[2], ids[0]]);
    }

    #[test]
    fn test_same_position_drop_still_stamps() {
        let (mut board, ids) = board();
        let later = Utc::now() + Duration::hours(1);
        let event = DragEndEvent::new(("col1", 1), Some(("col1", 1)));
        let moved = apply_drag_end(&mut board, &event, later).unwrap();
        assert_eq!(moved.moved_at, Some(later));
        assert_eq!(column_ids(&board, 0), ids);
    }

    #[test]
    fn test_index_beyond_end_appends() {
        let (mut board, ids) = board();
        let event = DragEndEvent::new(("col1", 0), Some(("col2", 42)));
        apply_drag_end(&mut board, &event, Utc::now()).unwrap();
        let event = DragEndEvent::new(("col1", 0), Some(("col2", 42)));
        apply_drag_end(&mut board, &event, Utc::now()).unwrap();
        assert_eq!(column_ids(&board, 1), vec![ids[0], ids[1]]);
    }

    #[test]
    fn test_malformed_events_are_ignored() {
        let (mut board, _) = board();
        let before = board.clone();
        let unknown = DragEndEvent::new(("colX", 0), Some(("col2", 0)));
        let out_of_range = DragEndEvent::new(("col2", 0), Some(("col1", 0)));
        assert!(apply_drag_end(&mut board, &unknown, Utc::now()).is_none());
        assert!(apply_drag_end(&mut board, &out_of_range, Utc::now()).is_none());
        assert_eq!(board, before);
    }

    #[test]
    fn test_parse_wire_event() {
        let event: DragEndEvent = serde_json::from_value(json!({
            "draggableId": "task-1",
            "source": {"droppableId": "col1", "index": 0},
            "destination": null
        }))
        .unwrap();
        assert!(event.destination.is_none());
        assert_eq!(event.source.droppable_id, "col1");
    }
}
