pub mod bag;
pub mod board;
pub mod column;
pub mod commands;
pub mod controller;
pub mod drag;
pub mod field_update;
pub mod metrics;
pub mod snapshot;
pub mod style;
pub mod task;
pub mod tree;

pub use bag::{apply_patch, Bag, NodePatch, UpdateSink};
pub use board::{Board, BoardMode, BoardSummary, ColumnSummary};
pub use column::{Column, ColumnId, ColumnUpdate};
pub use controller::{BoardController, Clock, PersistHandle, SystemClock};
pub use drag::{apply_drag_end, DragEndEvent, DraggableLocation};
pub use field_update::FieldUpdate;
pub use metrics::{
    column_duration, format_duration, linked_todo_list_progress, task_duration, LinkedProgress,
    TaskMetrics,
};
pub use snapshot::{ComponentData, ComponentDataEnvelope, StoredTasks, KANBAN_COMPONENT_TYPE};
pub use style::{KanbanStyle, ResolvedKanbanStyle};
pub use task::{NewTask, Task, TaskId, TaskUpdate};
pub use tree::{
    find_node, find_node_mut, find_todo_list_by_id, ComponentNode, Page, TodoItem, TodoList,
    TODO_COMPONENT_TYPE,
};
